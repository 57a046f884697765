//! Product tiles for the grid and list views

use crate::labels::{
    image_or_placeholder, price_change_label, price_label, unit_price_label, SIGN_IN_TO_BOOKMARK,
};
use leptos::prelude::*;
use leptos_router::components::A;
use pris_charts::{ChartConfig, PriceHistoryChart};
use pris_core::{Product, ProductId};
use pris_state::{use_app_state, BookmarkError};

/// Bookmark toggle; asks the visitor to sign in first
#[component]
pub fn BookmarkButton(id: ProductId) -> impl IntoView {
    let state = use_app_state();
    let bookmarks = state.bookmarks.clone();
    let is_bookmarked = {
        let bookmarks = bookmarks.clone();
        move || bookmarks.is_bookmarked(id)
    };
    let is_bookmarked_title = is_bookmarked.clone();
    let is_bookmarked_icon = is_bookmarked.clone();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        match bookmarks.toggle(id) {
            Ok(now) => tracing::debug!("Product {} bookmarked: {}", id, now),
            Err(BookmarkError::NotSignedIn) => state.set_error(SIGN_IN_TO_BOOKMARK),
            Err(e) => {
                tracing::error!("Failed to update bookmark for {}: {}", id, e);
                state.set_error("Kunne ikke lagre bokmerket");
            }
        }
    };

    view! {
        <button
            class=move || if is_bookmarked() { "bookmark-btn active" } else { "bookmark-btn" }
            title=move || if is_bookmarked_title() { "Fjern bokmerke" } else { "Bokmerk" }
            on:click=on_click
        >
            {move || if is_bookmarked_icon() { "★" } else { "☆" }}
            <span class="sr-only">"Bokmerke"</span>
        </button>
    }
}

/// Grid tile with an expandable price chart
#[component]
pub fn ProductCard(product: Product) -> impl IntoView {
    let show_chart = RwSignal::new(false);
    let has_history = !product.price_history.is_empty();
    let history = Signal::stored(product.price_history.clone());

    let id = product.id;
    let image = image_or_placeholder(&product, 300);
    let price = price_label(&product);
    let unit_price = unit_price_label(&product);
    let store = product.store_name().map(str::to_string);
    let category = product.primary_category().map(|c| c.name.clone());
    let brand = product.brand.clone();
    let name = product.name.clone();
    let alt = name.clone();

    view! {
        <article class="product-card">
            <div class="pc-media">
                <img src=image alt=alt loading="lazy" />
                <BookmarkButton id=id />
            </div>

            <div class="pc-body">
                {brand.map(|b| view! { <p class="pc-brand">{b}</p> })}
                <h3 class="pc-name">{name}</h3>
                <div class="pc-badges">
                    {store.map(|s| view! { <span class="badge badge-outline">{s}</span> })}
                    {category.map(|c| view! { <span class="badge badge-secondary">{c}</span> })}
                </div>
            </div>

            <div class="pc-footer">
                <div class="pc-price-row">
                    <div>
                        <p class="pc-price">{price}</p>
                        {unit_price.map(|u| view! { <p class="pc-unit-price">{u}</p> })}
                    </div>
                    {has_history.then(|| view! {
                        <button
                            class="btn btn-outline btn-sm"
                            on:click=move |_| show_chart.update(|s| *s = !*s)
                        >
                            {move || if show_chart.get() { "Skjul historikk" } else { "Prishistorikk" }}
                        </button>
                    })}
                </div>

                {move || show_chart.get().then(|| view! {
                    <div class="pc-chart">
                        <PriceHistoryChart points=history config=ChartConfig::compact() />
                    </div>
                })}

                <A href=format!("/produkter/{}", id) attr:class="btn btn-primary btn-block">
                    "Se detaljer"
                </A>
            </div>
        </article>
    }
}

/// Wide row for the list view, chart always visible
#[component]
pub fn ProductRow(product: Product) -> impl IntoView {
    let history = Signal::stored(product.price_history.clone());
    let has_history = !product.price_history.is_empty();

    let id = product.id;
    let image = image_or_placeholder(&product, 200);
    let price = price_label(&product);
    let unit_price = unit_price_label(&product);
    let change = price_change_label(&product);
    let store = product.store_name().map(str::to_string);
    let categories: Vec<String> = product
        .categories
        .iter()
        .take(2)
        .map(|c| c.name.clone())
        .collect();
    let brand = product.brand.clone();
    let name = product.name.clone();
    let alt = name.clone();

    view! {
        <article class="product-row">
            <A href=format!("/produkter/{}", id) attr:class="pr-media">
                <img src=image alt=alt loading="lazy" />
            </A>

            <div class="pr-body">
                <div class="pr-heading">
                    <div>
                        {brand.map(|b| view! { <p class="pc-brand">{b}</p> })}
                        <A href=format!("/produkter/{}", id) attr:class="pr-name">{name}</A>
                        <div class="pc-badges">
                            {store.map(|s| view! { <span class="badge badge-outline">{s}</span> })}
                            {categories
                                .into_iter()
                                .map(|c| view! { <span class="badge badge-secondary">{c}</span> })
                                .collect_view()}
                        </div>
                    </div>
                    <div class="pr-price">
                        <p class="pc-price">{price}</p>
                        {unit_price.map(|u| view! { <p class="pc-unit-price">{u}</p> })}
                        {change.map(|(text, class)| view! {
                            <p class=format!("pc-change {}", class)>{text}</p>
                        })}
                    </div>
                </div>

                {has_history.then(|| view! {
                    <div class="pr-chart">
                        <PriceHistoryChart points=history config=ChartConfig::compact() />
                    </div>
                })}
            </div>

            <div class="pr-actions">
                <BookmarkButton id=id />
            </div>
        </article>
    }
}
