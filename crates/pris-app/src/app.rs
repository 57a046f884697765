//! Root component: context providers, router and page chrome

use leptos::prelude::*;
use leptos_meta::provide_meta_context;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use pris_api::ApiClient;
use pris_components::{
    BookmarksPage, Footer, Header, HomePage, NotFound, ProductDetailPage, ProductsPage,
};
use pris_state::provide_app_state;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_app_state();

    let client = ApiClient::from_build_env();
    if client.config().token.is_none() {
        tracing::warn!("KASSAL_API_TOKEN not set at build time; requests will be unauthenticated");
    }
    provide_context(client);

    view! {
        <Router>
            <div class="app">
                <Header />
                <main class="app-main">
                    <Routes fallback=|| view! { <NotFound /> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/produkter") view=ProductsPage />
                        <Route path=path!("/produkter/:id") view=ProductDetailPage />
                        <Route path=path!("/bookmarks") view=BookmarksPage />
                    </Routes>
                </main>
                <Footer />
            </div>
        </Router>
    }
}
