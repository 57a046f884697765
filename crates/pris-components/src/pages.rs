//! Static pages: landing and 404

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="PrisSjekk" />
        <section class="hero">
            <div class="container hero-inner">
                <h1>"Finn de beste tilbudene på favorittproduktene dine"</h1>
                <p class="hero-lead">
                    "Sammenlign priser på tvers av butikker, følg prishistorikken og bokmerk varene du handler oftest."
                </p>
                <A href="/produkter" attr:class="btn btn-primary btn-lg">"Se Produkter"</A>
            </div>
        </section>

        <section class="container features">
            <div class="card feature">
                <div class="feature-icon">"📈"</div>
                <h2>"Prishistorikk"</h2>
                <p class="text-muted">"Se hvordan prisen har endret seg over tid."</p>
            </div>
            <div class="card feature">
                <div class="feature-icon">"🏪"</div>
                <h2>"Alle butikker"</h2>
                <p class="text-muted">"Filtrer på butikk og kategori for å finne riktig vare."</p>
            </div>
            <div class="card feature">
                <div class="feature-icon">"🔖"</div>
                <h2>"Bokmerker"</h2>
                <p class="text-muted">"Logg inn og lagre produktene du vil følge med på."</p>
            </div>
        </section>
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <Title text="Side ikke funnet | PrisSjekk" />
        <div class="container not-found">
            <h1>"404 - Side ikke funnet"</h1>
            <p class="text-muted">"Siden du leter etter finnes ikke."</p>
            <A href="/" attr:class="btn btn-primary">"Tilbake til forsiden"</A>
        </div>
    }
}
