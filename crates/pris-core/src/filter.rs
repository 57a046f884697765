//! Client-side category/store filtering of a loaded product page

use crate::product::Product;
use std::collections::HashSet;

/// Active filter selection; `None` means "all"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub store: Option<String>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    pub fn is_active(&self) -> bool {
        self.category.is_some() || self.store.is_some()
    }

    pub fn matches(&self, product: &Product) -> bool {
        let category_match = self
            .category
            .as_deref()
            .is_none_or(|c| product.has_category(c));
        let store_match = self
            .store
            .as_deref()
            .is_none_or(|s| product.store_name() == Some(s));
        category_match && store_match
    }

    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

/// Distinct filter values present on a page, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub categories: Vec<String>,
    pub stores: Vec<String>,
}

impl Facets {
    pub fn collect(products: &[Product]) -> Self {
        let mut seen_categories = HashSet::new();
        let mut seen_stores = HashSet::new();
        let mut facets = Self::default();

        for product in products {
            for category in &product.categories {
                if seen_categories.insert(category.name.as_str()) {
                    facets.categories.push(category.name.clone());
                }
            }
            if let Some(store) = product.store_name() {
                if seen_stores.insert(store) {
                    facets.stores.push(store.to_string());
                }
            }
        }

        facets
    }
}
