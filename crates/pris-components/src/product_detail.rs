//! Single product page with price history, nutrition and allergens

use crate::labels::{
    image_or_placeholder, label_tooltip, price_label, unit_price_label, PRODUCT_LOAD_FAILED,
};
use crate::{use_api_client, BookmarkButton};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use pris_api::fallback_product;
use pris_charts::PriceHistoryChart;
use pris_core::{format_long_date, AllergenPresence, Product, ProductId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailTab {
    Details,
    Nutrition,
    Allergens,
}

impl DetailTab {
    fn label(&self) -> &'static str {
        match self {
            Self::Details => "Detaljer",
            Self::Nutrition => "Næringsinnhold",
            Self::Allergens => "Allergener",
        }
    }
}

/// A response is written only while the route still points at the product it fetched
fn response_applies(requested: ProductId, current: Option<ProductId>) -> bool {
    current == Some(requested)
}

#[component]
pub fn ProductDetailPage() -> impl IntoView {
    let client = use_api_client();
    let params = use_params_map();
    let product_id = Memo::new(move |_| {
        params.with(|p| p.get("id").and_then(|raw| raw.parse::<ProductId>().ok()))
    });

    let product = RwSignal::new(None::<Product>);
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let Some(id) = product_id.get() else {
            product.set(None);
            error.set(Some("Ugyldig produkt-ID".to_string()));
            loading.set(false);
            return;
        };
        let client = client.clone();
        loading.set(true);
        error.set(None);

        spawn_local(async move {
            let result = client.get_product(id).await;
            if !response_applies(id, product_id.get_untracked()) {
                tracing::debug!("Dropping stale response for product {}", id);
                return;
            }
            match result {
                Ok(p) => product.set(Some(p)),
                Err(e) => {
                    tracing::error!("Error loading product {}: {}", id, e);
                    error.set(Some(PRODUCT_LOAD_FAILED.to_string()));
                    product.set(fallback_product(id));
                }
            }
            loading.set(false);
        });
    });

    let error_banner = move || {
        error.get().map(|msg| view! {
            <div class="notice notice-danger"><p>{msg}</p></div>
        })
    };

    move || {
        if loading.get() {
            return view! {
                <div class="container page-loading">
                    <div class="spinner"></div>
                    <p>"Laster produktdetaljer..."</p>
                </div>
            }
            .into_any();
        }

        match product.get() {
            None => view! {
                <div class="container not-found">
                    <h1>"Produktet ble ikke funnet"</h1>
                    {error_banner}
                    <A href="/produkter" attr:class="btn btn-primary">"Tilbake til produkter"</A>
                </div>
            }
            .into_any(),
            Some(p) => view! {
                <Title text=format!("{} | PrisSjekk", p.name) />
                <div class="container product-detail">
                    <A href="/produkter" attr:class="back-link">"← Tilbake til produkter"</A>
                    {error_banner}
                    <ProductSummary product=p.clone() />
                    <ProductTabs product=p />
                </div>
            }
            .into_any(),
        }
    }
}

#[component]
fn ProductSummary(product: Product) -> impl IntoView {
    let history = Signal::stored(product.price_history.clone());
    let has_history = !product.price_history.is_empty();
    let image = image_or_placeholder(&product, 400);
    let price = price_label(&product);
    let unit_price = unit_price_label(&product);
    let updated = product.updated_at.as_ref().map(format_long_date);

    view! {
        <div class="pd-summary">
            <div class="pd-media">
                <img src=image alt=product.name.clone() />
            </div>

            <div class="pd-info">
                <div class="pd-title-row">
                    <div>
                        {product.brand.clone().map(|b| view! { <p class="pc-brand">{b}</p> })}
                        <h1 class="pd-name">{product.name.clone()}</h1>
                    </div>
                    <BookmarkButton id=product.id />
                </div>

                <div class="pc-badges">
                    {product
                        .categories
                        .iter()
                        .map(|c| view! { <span class="badge badge-secondary">{c.name.clone()}</span> })
                        .collect_view()}
                    {product.store_name().map(|s| view! {
                        <span class="badge badge-outline">{s.to_string()}</span>
                    })}
                </div>

                <div class="pd-price">
                    <span class="pc-price">{price}</span>
                    {unit_price.map(|u| view! { <span class="pc-unit-price">{format!("({})", u)}</span> })}
                </div>

                {has_history.then(|| view! {
                    <div class="pd-chart">
                        <h2>"Prishistorikk"</h2>
                        <PriceHistoryChart points=history />
                    </div>
                })}

                {updated.map(|d| view! { <p class="text-muted">{format!("Sist oppdatert {}", d)}</p> })}

                {product.url.clone().map(|url| view! {
                    <a class="btn btn-primary" href=url target="_blank" rel="noopener noreferrer">
                        "Besøk butikk"
                    </a>
                })}
            </div>
        </div>
    }
}

#[component]
fn ProductTabs(product: Product) -> impl IntoView {
    let active = RwSignal::new(DetailTab::Details);
    let product = StoredValue::new(product);

    let tab_button = move |tab: DetailTab| {
        view! {
            <button
                class=move || if active.get() == tab { "tab active" } else { "tab" }
                on:click=move |_| active.set(tab)
            >
                {tab.label()}
            </button>
        }
    };

    view! {
        <div class="pd-tabs">
            <div class="tabs" role="tablist">
                {tab_button(DetailTab::Details)}
                {tab_button(DetailTab::Nutrition)}
                {tab_button(DetailTab::Allergens)}
            </div>

            <div class="tab-panel">
                {move || {
                    let product = product.get_value();
                    match active.get() {
                        DetailTab::Details => view! { <DetailsPanel product=product /> }.into_any(),
                        DetailTab::Nutrition => view! { <NutritionPanel product=product /> }.into_any(),
                        DetailTab::Allergens => view! { <AllergensPanel product=product /> }.into_any(),
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn DetailsPanel(product: Product) -> impl IntoView {
    let facts: Vec<(&'static str, String)> = [
        ("Merke", product.brand.clone()),
        ("Vekt", product.weight.as_ref().map(|w| w.to_string())),
        ("EAN", product.ean.clone()),
        ("Leverandør", product.vendor.clone()),
    ]
    .into_iter()
    .filter_map(|(label, value)| Some((label, value?)))
    .collect();

    view! {
        <div class="details-panel">
            {product.description.clone().map(|d| view! {
                <section><h3>"Beskrivelse"</h3><p>{d}</p></section>
            })}
            {product.ingredients.clone().map(|i| view! {
                <section><h3>"Ingredienser"</h3><p>{i}</p></section>
            })}

            <section>
                <h3>"Produktinformasjon"</h3>
                <dl class="fact-list">
                    {facts
                        .into_iter()
                        .map(|(label, value)| view! { <dt>{label}</dt><dd>{value}</dd> })
                        .collect_view()}
                </dl>
            </section>

            {(!product.labels.is_empty()).then(|| view! {
                <section>
                    <h3>"Merking"</h3>
                    <div class="pc-badges">
                        {product
                            .labels
                            .iter()
                            .map(|label| view! {
                                <span class="badge badge-label" title=label_tooltip(label)>
                                    {label.icon_url.clone().map(|src| view! {
                                        <img class="label-icon" src=src alt="" />
                                    })}
                                    {label.display_name.clone()}
                                </span>
                            })
                            .collect_view()}
                    </div>
                </section>
            })}
        </div>
    }
}

#[component]
fn NutritionPanel(product: Product) -> impl IntoView {
    if product.nutrition.is_empty() {
        return view! {
            <p class="text-muted">"Ingen næringsinformasjon tilgjengelig."</p>
        }
        .into_any();
    }

    view! {
        <table class="nutrition-table">
            <thead>
                <tr><th>"Næringsstoff"</th><th>"Mengde"</th><th>"Enhet"</th></tr>
            </thead>
            <tbody>
                {product
                    .nutrition
                    .iter()
                    .map(|n| view! {
                        <tr>
                            <td>{n.display_name.clone()}</td>
                            <td>{n.amount.to_string().replace('.', ",")}</td>
                            <td>{n.unit.clone()}</td>
                        </tr>
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}

#[component]
fn AllergensPanel(product: Product) -> impl IntoView {
    if product.allergens.is_empty() {
        return view! {
            <p class="text-muted">"Ingen allergeninformasjon tilgjengelig."</p>
        }
        .into_any();
    }

    let by_presence = |presence: AllergenPresence| {
        product
            .allergens
            .iter()
            .filter(|a| a.contains == presence)
            .cloned()
            .collect::<Vec<_>>()
    };
    let contains = by_presence(AllergenPresence::Yes);
    let free_of = by_presence(AllergenPresence::No);
    let traces = by_presence(AllergenPresence::Unknown);

    view! {
        <div class="allergens-panel">
            <section>
                <h3>{AllergenPresence::Yes.label()}</h3>
                {if contains.is_empty() {
                    view! { <p>"Ingen allergener oppført for dette produktet."</p> }.into_any()
                } else {
                    contains
                        .into_iter()
                        .map(|a| view! {
                            <div class=format!("allergen {}", AllergenPresence::Yes.css_class())>
                                {a.display_name}
                            </div>
                        })
                        .collect_view()
                        .into_any()
                }}
            </section>

            {(!free_of.is_empty()).then(|| view! {
                <section>
                    <h3>{AllergenPresence::No.label()}</h3>
                    <div class="pc-badges">
                        {free_of
                            .into_iter()
                            .map(|a| view! {
                                <span
                                    class=format!("badge {}", AllergenPresence::No.css_class())
                                    title=format!("Dette produktet inneholder ikke {}", a.display_name)
                                >
                                    {a.display_name.clone()}
                                </span>
                            })
                            .collect_view()}
                    </div>
                </section>
            })}

            {(!traces.is_empty()).then(|| view! {
                <section>
                    <h3>{AllergenPresence::Unknown.label()}</h3>
                    <div class="pc-badges">
                        {traces
                            .into_iter()
                            .map(|a| view! {
                                <span class=format!("badge {}", AllergenPresence::Unknown.css_class())>
                                    {a.display_name}
                                </span>
                            })
                            .collect_view()}
                    </div>
                </section>
            })}
        </div>
    }
    .into_any()
}
