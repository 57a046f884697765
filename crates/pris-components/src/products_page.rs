//! Product listing: search, filters, view mode and paging

use crate::labels::{catalog_subtitle, results_summary};
use crate::{use_api_client, Pagination, ProductCard, ProductRow};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use pris_api::{fallback_products, ProductQuery};
use pris_state::{use_app_state, CatalogState, ViewMode, SEARCH_DEBOUNCE_MS};

const ALL: &str = "all";

fn selection(value: String) -> Option<String> {
    (value != ALL && !value.is_empty()).then_some(value)
}

fn scroll_to_top() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let options = web_sys::ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    let state = use_app_state();
    let catalog = state.catalog;
    let client = use_api_client();

    // Refetch whenever the debounced query or the page changes
    let request = Memo::new(move |_| catalog.request());
    Effect::new(move |_| {
        let req = request.get();
        let client = client.clone();
        catalog.begin_loading();

        spawn_local(async move {
            let mut query = ProductQuery::page(req.page, client.config().page_size);
            if let Some(search) = &req.query {
                query = query.search(search);
            }
            let result = client.list_products(&query).await;

            if request.get_untracked() != req {
                tracing::debug!("Dropping stale response for page {}", req.page);
                return;
            }
            match result {
                Ok(page) => catalog.apply_page(page),
                Err(e) => {
                    tracing::error!("Failed to load products: {}", e);
                    catalog.apply_fallback(fallback_products());
                }
            }
        });
    });

    let on_page_change = move |page: u32| {
        if catalog.request_page(page) {
            scroll_to_top();
        }
    };

    view! {
        <Title text="Produkter | PrisSjekk" />
        <div class="container products-page">
            {move || {
                (catalog.loading.get() && catalog.products.with(Vec::is_empty)).then(|| view! {
                    <div class="page-loading">
                        <div class="spinner"></div>
                        <p>"Laster produkter..."</p>
                    </div>
                })
            }}

            <div class="page-heading">
                <div>
                    <h1>"Produkter"</h1>
                    <p class="text-muted">{move || catalog_subtitle(catalog.info.get().total_items)}</p>
                </div>
                <StoreSelect catalog=catalog />
            </div>

            {move || {
                catalog.notice.get().map(|notice| view! {
                    <div class="notice notice-warn"><p>{notice}</p></div>
                })
            }}

            <div class="products-layout">
                <CategoryList catalog=catalog />

                <section class="products-section" data-products-section="">
                    <SearchBox catalog=catalog />

                    <div class="listing-toolbar">
                        <p class="text-muted">
                            {move || {
                                let shown = catalog.visible_products().len();
                                results_summary(shown, catalog.filter.with(|f| f.is_active()))
                            }}
                        </p>
                        <ViewModeTabs catalog=catalog />
                    </div>

                    {move || {
                        catalog.loading.get().then(|| view! {
                            <div class="listing-loading">
                                <div class="spinner spinner-sm"></div>
                                <span>"Laster produkter..."</span>
                            </div>
                        })
                    }}

                    <ProductListing catalog=catalog />

                    <Pagination
                        current_page=Signal::derive(move || catalog.current_page())
                        total_pages=Signal::derive(move || catalog.total_pages())
                        on_page_change=Callback::new(on_page_change)
                        disabled={Signal::<bool>::from(catalog.loading)}
                    />
                </section>
            </div>
        </div>
    }
}

#[component]
fn SearchBox(catalog: CatalogState) -> impl IntoView {
    let on_input = move |ev: leptos::ev::Event| {
        let token = catalog.type_query(event_target_value(&ev));
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if catalog.commit_search(token) {
                tracing::debug!("Searching for {:?}", catalog.query.get_untracked());
            }
        });
    };

    view! {
        <div class="search-box">
            <span class="search-icon">"🔍"</span>
            <input
                type="search"
                placeholder="Søk etter produkter..."
                prop:value=move || catalog.input.get()
                on:input=on_input
            />
            {move || {
                (catalog.loading.get() && !catalog.input.with(String::is_empty))
                    .then(|| view! { <div class="spinner spinner-sm search-spinner"></div> })
            }}
        </div>
    }
}

#[component]
fn CategoryList(catalog: CatalogState) -> impl IntoView {
    let selected = move || catalog.filter.with(|f| f.category.clone());

    view! {
        <aside class="card category-card">
            <h2 class="card-title">"Kategorier"</h2>
            <div class="category-list">
                <button
                    class=move || if selected().is_none() { "btn btn-block active" } else { "btn btn-block btn-ghost" }
                    on:click=move |_| catalog.set_category(None)
                >
                    "Alle kategorier"
                </button>
                <For
                    each=move || catalog.facets().categories
                    key=|name| name.clone()
                    children=move |name| {
                        let value = name.clone();
                        let is_selected = {
                            let name = name.clone();
                            move || selected().as_deref() == Some(name.as_str())
                        };
                        view! {
                            <button
                                class=move || if is_selected() { "btn btn-block active" } else { "btn btn-block btn-ghost" }
                                on:click=move |_| catalog.set_category(Some(value.clone()))
                            >
                                {name}
                            </button>
                        }
                    }
                />
            </div>
        </aside>
    }
}

#[component]
fn StoreSelect(catalog: CatalogState) -> impl IntoView {
    view! {
        <select
            class="store-select"
            aria-label="Velg butikk"
            on:change=move |ev| catalog.set_store(selection(event_target_value(&ev)))
        >
            <option value=ALL selected=move || catalog.filter.with(|f| f.store.is_none())>
                "Alle butikker"
            </option>
            <For
                each=move || catalog.facets().stores
                key=|name| name.clone()
                children=move |name| {
                    let is_selected = {
                        let name = name.clone();
                        move || catalog.filter.with(|f| f.store.as_deref() == Some(name.as_str()))
                    };
                    let value = name.clone();
                    view! { <option value=value selected=is_selected>{name}</option> }
                }
            />
        </select>
    }
}

#[component]
fn ViewModeTabs(catalog: CatalogState) -> impl IntoView {
    let tab = move |mode: ViewMode| {
        view! {
            <button
                class=move || if catalog.view_mode.get() == mode { "tab active" } else { "tab" }
                on:click=move |_| catalog.view_mode.set(mode)
            >
                {mode.label()}
            </button>
        }
    };

    view! {
        <div class="tabs" role="tablist">
            {tab(ViewMode::Grid)}
            {tab(ViewMode::List)}
        </div>
    }
}

#[component]
fn ProductListing(catalog: CatalogState) -> impl IntoView {
    move || {
        let mode = catalog.view_mode.get();
        if !catalog.loading.get() && catalog.visible_products().is_empty() {
            return view! {
                <div class="empty-state">
                    <p>"Ingen produkter funnet."</p>
                </div>
            }
            .into_any();
        }

        match mode {
            ViewMode::Grid => view! {
                <div class=mode.css_class()>
                    <For
                        each=move || catalog.visible_products()
                        key=|product| product.id
                        children=|product| view! { <ProductCard product=product /> }
                    />
                </div>
            }
            .into_any(),
            ViewMode::List => view! {
                <div class=mode.css_class()>
                    <For
                        each=move || catalog.visible_products()
                        key=|product| product.id
                        children=|product| view! { <ProductRow product=product /> }
                    />
                </div>
            }
            .into_any(),
        }
    }
}
