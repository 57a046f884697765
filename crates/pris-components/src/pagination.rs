//! Page navigation with first/last shortcuts and a compact page selector

use leptos::prelude::*;
use pris_core::{PageMarker, PaginationConfig, PaginationControls};

#[component]
pub fn Pagination(
    #[prop(into)] current_page: Signal<u32>,
    #[prop(into)] total_pages: Signal<u32>,
    #[prop(into)] on_page_change: Callback<u32>,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
    #[prop(optional)] config: Option<PaginationConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();

    move || {
        let current = current_page.get();
        let disabled = disabled.get().unwrap_or(false);
        let controls = match PaginationControls::build(current, total_pages.get(), config, disabled) {
            Ok(Some(controls)) => controls,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!("Invalid pagination config: {}", e);
                return None;
            }
        };

        let jump_options: Vec<u32> = controls.jump_options().collect();
        let pages_enabled = controls.pages_enabled;
        let previous = controls.previous;
        let next = controls.next;

        let markers = controls
            .markers
            .iter()
            .map(|marker| match *marker {
                PageMarker::Page(page) => {
                    let class = if page == current { "pg-page active" } else { "pg-page" };
                    view! {
                        <button
                            class=class
                            aria-current=(page == current).then_some("page")
                            disabled=!pages_enabled
                            on:click=move |_| on_page_change.run(page)
                        >
                            {page}
                        </button>
                    }
                    .into_any()
                }
                PageMarker::Ellipsis(position) => view! {
                    <span class="pg-ellipsis" data-key=position.key()>"…"</span>
                }
                .into_any(),
            })
            .collect_view();

        Some(view! {
            <nav class="pagination" aria-label="Sidenavigasjon">
                <div class="pg-controls">
                    {controls.first.map(|nav| view! {
                        <button
                            class="pg-btn pg-first"
                            title="Første side"
                            disabled=!nav.enabled
                            on:click=move |_| on_page_change.run(nav.target)
                        >
                            "«"
                            <span class="sr-only">"Første side"</span>
                        </button>
                    })}

                    <button
                        class="pg-btn pg-prev"
                        disabled=!previous.enabled
                        on:click=move |_| on_page_change.run(previous.target)
                    >
                        "‹ Forrige"
                    </button>

                    <div class="pg-pages">{markers}</div>

                    <button
                        class="pg-btn pg-next"
                        disabled=!next.enabled
                        on:click=move |_| on_page_change.run(next.target)
                    >
                        "Neste ›"
                    </button>

                    {controls.last.map(|nav| view! {
                        <button
                            class="pg-btn pg-last"
                            title="Siste side"
                            disabled=!nav.enabled
                            on:click=move |_| on_page_change.run(nav.target)
                        >
                            "»"
                            <span class="sr-only">"Siste side"</span>
                        </button>
                    })}
                </div>

                <div class="pg-jump">
                    <span class="pg-jump-label">"Gå til side:"</span>
                    <select
                        disabled=!pages_enabled
                        on:change=move |ev| {
                            if let Ok(page) = event_target_value(&ev).parse::<u32>() {
                                on_page_change.run(page);
                            }
                        }
                    >
                        {jump_options
                            .into_iter()
                            .map(|page| view! {
                                <option value=page.to_string() selected=page == current>
                                    {page}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </div>
            </nav>
        })
    }
}
