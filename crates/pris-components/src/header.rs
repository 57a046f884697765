//! Site header, footer and the session controls

use leptos::prelude::*;
use leptos_router::components::A;
use pris_state::{use_app_state, SessionUser};

#[component]
pub fn Header() -> impl IntoView {
    let state = use_app_state();
    let user = state.user;
    let bookmarks = state.bookmarks.clone();
    let menu_open = RwSignal::new(false);

    view! {
        <header class="site-header">
            <div class="container header-inner">
                <A href="/" attr:class="logo">
                    <span class="logo-mark">"₭"</span>
                    <span class="logo-text">"PrisSjekk"</span>
                </A>

                <button
                    class="menu-toggle"
                    aria-label="Meny"
                    on:click=move |_| menu_open.update(|open| *open = !*open)
                >
                    {move || if menu_open.get() { "✕" } else { "☰" }}
                </button>

                <nav class=move || if menu_open.get() { "main-nav open" } else { "main-nav" }>
                    <A href="/">"Hjem"</A>
                    <A href="/produkter">"Produkter"</A>
                </nav>

                <div class="header-actions">
                    {move || {
                        let bookmarks = bookmarks.clone();
                        match user.get() {
                            Some(u) => view! {
                                <A href="/bookmarks" attr:class="bookmarks-link">
                                    "🔖 Bokmerker"
                                    <span class="badge">{move || bookmarks.count()}</span>
                                </A>
                                <span class="greeting">{format!("Hei, {}", u.display_name())}</span>
                                <SignOutButton />
                            }
                            .into_any(),
                            None => view! { <SignInForm /> }.into_any(),
                        }
                    }}
                </div>
            </div>
        </header>
        <ErrorBanner />
    }
}

/// Stand-in for the identity provider's sign-in dialog
#[component]
fn SignInForm() -> impl IntoView {
    let state = use_app_state();
    let name = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let entered = name.get_untracked();
        let entered = entered.trim();
        if entered.is_empty() {
            return;
        }
        let user = SessionUser::new(entered.to_lowercase()).with_first_name(entered);
        match state.sign_in(user) {
            Ok(()) => name.set(String::new()),
            Err(e) => {
                tracing::error!("Sign-in failed: {}", e);
                state.set_error("Innlogging feilet");
            }
        }
    };

    view! {
        <form class="sign-in" on:submit=on_submit>
            <input
                type="text"
                placeholder="Navn"
                aria-label="Navn"
                prop:value=move || name.get()
                on:input=move |ev| name.set(event_target_value(&ev))
            />
            <button type="submit" class="btn btn-primary">"Logg inn"</button>
        </form>
    }
}

#[component]
fn SignOutButton() -> impl IntoView {
    let state = use_app_state();
    let on_click = move |_| {
        if let Err(e) = state.sign_out() {
            tracing::error!("Sign-out failed: {}", e);
            state.set_error("Utlogging feilet");
        }
    };

    view! {
        <button class="btn btn-ghost" on:click=on_click>"Logg ut"</button>
    }
}

/// Dismissable app-wide error message
#[component]
pub fn ErrorBanner() -> impl IntoView {
    let state = use_app_state();
    let error = state.error;

    move || {
        let state = state.clone();
        error.get().map(|msg| {
            view! {
                <div class="error-banner" role="alert">
                    <span class="error-icon">"⚠"</span>
                    <span class="error-msg">{msg}</span>
                    <button class="error-dismiss" on:click=move |_| state.clear_error()>"✕"</button>
                </div>
            }
        })
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    use chrono::Datelike;
    let year = chrono::Utc::now().year();

    view! {
        <footer class="site-footer">
            <div class="container footer-inner">
                <p>{format!("© {} PrisSjekk. Alle rettigheter reservert.", year)}</p>
                <div class="footer-links">
                    <a href="#">"Vilkår"</a>
                    <a href="#">"Personvernerklæring"</a>
                    <a href="#">"Kontakt"</a>
                </div>
                <span class="footer-source">"Prisdata fra kassal.app"</span>
            </div>
        </footer>
    }
}
