//! Page envelopes returned by the product API

use crate::product::{Product, RawProduct};
use serde::{Deserialize, Serialize};

/// Pagination metadata attached to list responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPageMeta {
    pub current_page: Option<u32>,
    pub last_page: Option<u32>,
    pub per_page: Option<u32>,
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<u64>,
}

/// `{ "data": [...], "meta": {...} }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPage<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RawPageMeta>,
}

/// `{ "data": {...} }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiItem<T> {
    pub data: T,
}

/// Resolved page position of a product listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl PageInfo {
    pub fn single(total_items: u64) -> Self {
        Self {
            page: 1,
            total_pages: 1,
            total_items,
        }
    }

    /// Resolve page info from optional metadata.
    ///
    /// Without metadata the listing is assumed to continue for one more page
    /// whenever the current page came back full.
    pub fn resolve(
        meta: Option<&RawPageMeta>,
        requested_page: u32,
        page_size: u32,
        item_count: usize,
    ) -> Self {
        let requested_page = requested_page.max(1);
        match meta {
            Some(meta) => Self {
                page: meta.current_page.unwrap_or(requested_page).max(1),
                total_pages: meta.last_page.unwrap_or(1).max(1),
                total_items: meta.total.unwrap_or(item_count as u64),
            },
            None => {
                let full = page_size > 0 && item_count == page_size as usize;
                Self {
                    page: requested_page,
                    total_pages: if full { requested_page + 1 } else { requested_page },
                    total_items: item_count as u64,
                }
            }
        }
    }
}

/// A normalized page of products
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub info: PageInfo,
}

impl ProductPage {
    /// Normalize a raw page, dropping products that fail validation
    pub fn from_raw(raw: ApiPage<RawProduct>, requested_page: u32, page_size: u32) -> Self {
        let item_count = raw.data.len();
        let info = PageInfo::resolve(raw.meta.as_ref(), requested_page, page_size, item_count);

        let products: Vec<Product> = raw
            .data
            .into_iter()
            .filter_map(|p| match p.normalize() {
                Ok(product) => Some(product),
                Err(e) => {
                    tracing::warn!("Skipping product: {}", e);
                    None
                }
            })
            .collect();

        Self { products, info }
    }
}
