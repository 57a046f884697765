//! The signed-in user's bookmarked products

use crate::labels::{image_or_placeholder, price_label};
use crate::use_api_client;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::components::A;
use pris_api::or_fallback;
use pris_core::{Product, ProductId};
use pris_state::use_app_state;

#[component]
pub fn BookmarksPage() -> impl IntoView {
    let state = use_app_state();
    let user = state.user;

    view! {
        <Title text="Bokmerker | PrisSjekk" />
        {move || {
            match user.get() {
                None => view! {
                    <div class="container empty-state">
                        <div class="empty-icon">"🔖"</div>
                        <h1>"Logg inn for å se bokmerker"</h1>
                        <p class="text-muted">
                            "Du må være innlogget for å lagre og se dine bokmerkede produkter."
                        </p>
                    </div>
                }
                .into_any(),
                Some(u) => view! { <BookmarkList greeting_name=u.display_name().to_string() /> }.into_any(),
            }
        }}
    }
}

/// A finished fetch only lands if the bookmark list still matches what it asked for
fn response_applies(requested: &[ProductId], current: &[ProductId]) -> bool {
    !current.is_empty() && requested == current
}

#[component]
fn BookmarkList(greeting_name: String) -> impl IntoView {
    let state = use_app_state();
    let bookmarks = state.bookmarks.clone();
    let client = use_api_client();

    let products = RwSignal::new(Vec::<Product>::new());
    let loading = RwSignal::new(false);

    // Reload whenever the bookmark list changes
    let bookmarked_ids = Memo::new({
        let bookmarks = bookmarks.clone();
        move |_| bookmarks.list()
    });
    Effect::new(move |_| {
        let ids = bookmarked_ids.get();
        if ids.is_empty() {
            products.set(Vec::new());
            loading.set(false);
            return;
        }
        let client = client.clone();
        loading.set(true);

        spawn_local(async move {
            let results = client.get_products_by_ids(&ids).await;
            if !response_applies(&ids, &bookmarked_ids.get_untracked()) {
                tracing::debug!("Dropping stale bookmark fetch for {} ids", ids.len());
                return;
            }
            let found: Vec<Product> = results
                .into_iter()
                .filter_map(|(id, result)| or_fallback(id, result))
                .collect();
            tracing::debug!("Resolved {}/{} bookmarked products", found.len(), ids.len());
            products.set(found);
            loading.set(false);
        });
    });

    let on_clear = {
        let state = state.clone();
        let bookmarks = bookmarks.clone();
        move |_| {
            if let Err(e) = bookmarks.clear() {
                tracing::error!("Failed to clear bookmarks: {}", e);
                state.set_error("Kunne ikke fjerne bokmerkene");
            }
        }
    };
    let count = {
        let bookmarks = bookmarks.clone();
        move || bookmarks.count()
    };
    let count_footer = count.clone();

    view! {
        <div class="container bookmarks-page">
            <div class="page-heading">
                <div>
                    <h1>"Mine bokmerker"</h1>
                    <p class="text-muted">
                        {format!("Hei {}! Her er dine bokmerkede produkter.", greeting_name)}
                    </p>
                </div>
                {move || (count() > 0).then(|| {
                    let on_clear = on_clear.clone();
                    view! {
                        <button class="btn btn-outline btn-danger" on:click=on_clear>
                            "🗑 Fjern alle"
                        </button>
                    }
                })}
            </div>

            {move || {
                if loading.get() {
                    return view! {
                        <div class="page-loading">
                            <div class="spinner"></div>
                            <p>"Laster bokmerker..."</p>
                        </div>
                    }
                    .into_any();
                }
                if products.with(Vec::is_empty) {
                    return view! {
                        <div class="empty-state">
                            <div class="empty-icon">"🔖"</div>
                            <h2>"Ingen bokmerker ennå"</h2>
                            <p class="text-muted">
                                "Bokmerk produkter for å følge med på prisene deres."
                            </p>
                            <A href="/produkter" attr:class="btn btn-primary">"Utforsk produkter"</A>
                        </div>
                    }
                    .into_any();
                }
                view! {
                    <div class="product-grid">
                        <For
                            each=move || products.get()
                            key=|product| product.id
                            children=|product| view! { <BookmarkedProduct product=product /> }
                        />
                    </div>
                }
                .into_any()
            }}

            {move || {
                let n = count_footer();
                (n > 0).then(|| view! {
                    <p class="text-muted bookmarks-total">
                        {format!("Du har {} bokmerkede produkter", n)}
                    </p>
                })
            }}
        </div>
    }
}

#[component]
fn BookmarkedProduct(product: Product) -> impl IntoView {
    let state = use_app_state();
    let id = product.id;
    let image = image_or_placeholder(&product, 300);
    let price = price_label(&product);

    let on_remove = move |_| {
        if let Err(e) = state.bookmarks.remove(id) {
            tracing::error!("Failed to remove bookmark {}: {}", id, e);
            state.set_error("Kunne ikke fjerne bokmerket");
        }
    };

    view! {
        <article class="product-card bookmarked">
            <div class="pc-media">
                <img src=image alt=product.name.clone() loading="lazy" />
                <button class="bookmark-btn active" title="Fjern bokmerke" on:click=on_remove>
                    "🗑"
                    <span class="sr-only">"Fjern bokmerke"</span>
                </button>
            </div>
            <div class="pc-body">
                {product.brand.clone().map(|b| view! { <p class="pc-brand">{b}</p> })}
                <h3 class="pc-name">{product.name.clone()}</h3>
                {product.store_name().map(|s| view! {
                    <span class="badge badge-outline">{s.to_string()}</span>
                })}
            </div>
            <div class="pc-footer">
                <p class="pc-price">{price}</p>
                <div class="pc-actions">
                    <A href=format!("/produkter/{}", id) attr:class="btn btn-primary">"Se detaljer"</A>
                    {product.url.clone().map(|url| view! {
                        <a class="btn btn-outline" href=url target="_blank" rel="noopener noreferrer">
                            "↗ Butikk"
                        </a>
                    })}
                </div>
            </div>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_applies_to_unchanged_list() {
        let ids = [ProductId(1001), ProductId(1002)];
        assert!(response_applies(&ids, &ids));
    }

    #[test]
    fn test_response_dropped_after_list_changes() {
        let requested = [ProductId(1001), ProductId(1002)];
        assert!(!response_applies(&requested, &[ProductId(1001)]));
        assert!(!response_applies(&requested, &[ProductId(1002), ProductId(1001)]));
        assert!(!response_applies(&requested, &[ProductId(1001), ProductId(1002), ProductId(7)]));
    }

    #[test]
    fn test_response_dropped_after_clear() {
        assert!(!response_applies(&[ProductId(1001)], &[]));
        assert!(!response_applies(&[], &[]));
    }
}
