//! Reactive product-listing state: query, page, filters and view mode

use leptos::prelude::*;
use pris_core::{Facets, PageInfo, Product, ProductFilter, ProductPage};

/// Shown when the listing falls back to the built-in catalog
pub const FALLBACK_NOTICE: &str = "Kunne ikke laste produkter. Bruker reservedata.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Grid,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Grid => "product-grid",
            Self::List => "product-list",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Grid => "Rutenett",
            Self::List => "Liste",
        }
    }
}

/// What the next fetch should ask the API for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    pub page: u32,
    pub query: Option<String>,
}

/// Listing state for the products page
#[derive(Debug, Clone, Copy)]
pub struct CatalogState {
    /// Text in the search box, before debouncing
    pub input: RwSignal<String>,
    /// Debounced query the listing is fetched for
    pub query: RwSignal<String>,
    pub info: RwSignal<PageInfo>,
    pub products: RwSignal<Vec<Product>>,
    pub filter: RwSignal<ProductFilter>,
    pub view_mode: RwSignal<ViewMode>,
    pub loading: RwSignal<bool>,
    /// Non-fatal message shown above the listing
    pub notice: RwSignal<Option<String>>,
    search_generation: RwSignal<u64>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self {
            input: RwSignal::new(String::new()),
            query: RwSignal::new(String::new()),
            info: RwSignal::new(PageInfo::single(0)),
            products: RwSignal::new(Vec::new()),
            filter: RwSignal::new(ProductFilter::default()),
            view_mode: RwSignal::new(ViewMode::default()),
            loading: RwSignal::new(false),
            notice: RwSignal::new(None),
            search_generation: RwSignal::new(0),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.info.with(|i| i.page)
    }

    pub fn total_pages(&self) -> u32 {
        self.info.with(|i| i.total_pages)
    }

    pub fn request(&self) -> CatalogRequest {
        let query = self.query.get();
        let query = query.trim();
        CatalogRequest {
            page: self.current_page(),
            query: (!query.is_empty()).then(|| query.to_string()),
        }
    }

    // ========================================================================
    // Paging
    // ========================================================================

    /// Move to `target`; ignored while loading, for the current page, or out of range
    pub fn request_page(&self, target: u32) -> bool {
        if self.loading.get_untracked() {
            return false;
        }
        let info = self.info.get_untracked();
        if target == info.page || target < 1 || target > info.total_pages {
            return false;
        }
        self.info.update(|i| i.page = target);
        true
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Record a keystroke and return the token the debounce timer must present
    pub fn type_query(&self, text: impl Into<String>) -> u64 {
        self.input.set(text.into());
        self.search_generation.update(|g| *g += 1);
        self.search_generation.get_untracked()
    }

    /// Commit the typed query if no newer keystroke arrived; resets to page 1
    pub fn commit_search(&self, generation: u64) -> bool {
        if generation != self.search_generation.get_untracked() {
            return false;
        }
        let input = self.input.get_untracked();
        if input == self.query.get_untracked() {
            return false;
        }
        self.query.set(input);
        self.info.update(|i| i.page = 1);
        true
    }

    // ========================================================================
    // Results
    // ========================================================================

    pub fn begin_loading(&self) {
        self.loading.set(true);
    }

    pub fn apply_page(&self, page: ProductPage) {
        tracing::debug!(
            "Loaded page {}/{} with {} products",
            page.info.page,
            page.info.total_pages,
            page.products.len()
        );
        self.products.set(page.products);
        self.info.set(page.info);
        self.notice.set(None);
        self.loading.set(false);
    }

    /// Show the built-in catalog as a single page
    pub fn apply_fallback(&self, products: Vec<Product>) {
        tracing::warn!("Using fallback catalog ({} products)", products.len());
        self.info.set(PageInfo::single(products.len() as u64));
        self.products.set(products);
        self.notice.set(Some(FALLBACK_NOTICE.to_string()));
        self.loading.set(false);
    }

    // ========================================================================
    // Filters
    // ========================================================================

    pub fn facets(&self) -> Facets {
        self.products.with(|p| Facets::collect(p))
    }

    pub fn visible_products(&self) -> Vec<Product> {
        let filter = self.filter.get();
        self.products.with(|p| filter.apply(p))
    }

    pub fn set_category(&self, category: Option<String>) {
        self.filter.update(|f| f.category = category);
    }

    pub fn set_store(&self, store: Option<String>) {
        self.filter.update(|f| f.store = store);
    }

    pub fn reset_filters(&self) {
        self.filter.set(ProductFilter::default());
    }

    pub fn toggle_view_mode(&self) {
        self.view_mode.update(|m| *m = m.toggle());
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new()
    }
}
