//! # pris-components
//!
//! Leptos UI for PrisSjekk: the site chrome, product listing and detail
//! pages, the bookmarks page and the pagination control.

pub mod bookmarks_page;
pub mod header;
pub mod labels;
pub mod pages;
pub mod pagination;
pub mod product_card;
pub mod product_detail;
pub mod products_page;

pub use bookmarks_page::*;
pub use header::*;
pub use pages::*;
pub use pagination::*;
pub use product_card::*;
pub use product_detail::*;
pub use products_page::*;

use leptos::prelude::*;
use pris_api::ApiClient;

/// API client from context, or one built from the compile-time config
pub fn use_api_client() -> ApiClient {
    use_context::<ApiClient>().unwrap_or_default()
}
