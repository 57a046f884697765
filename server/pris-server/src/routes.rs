//! kassal.app-compatible product routes

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use serde::Deserialize;
use thiserror::Error;

use pris_core::{ApiItem, ApiPage, RawCategory, RawPageMeta, RawProduct, RawStore};

use crate::mock::MockCatalog;

pub const DEFAULT_PAGE_SIZE: u32 = 50;

#[derive(Clone)]
pub struct ServerState {
    pub catalog: Arc<MockCatalog>,
    /// Required bearer token; any token is accepted when unset
    pub token: Option<Arc<str>>,
}

impl ServerState {
    pub fn new(catalog: MockCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<Arc<str>>) -> Self {
        self.token = Some(token.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unauthenticated.")]
    Unauthorized,
    #[error("Product {0} not found")]
    NotFound(u64),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        let body = serde_json::json!({ "message": self.to_string() });
        (status, Json(body)).into_response()
    }
}

type BearerHeader = Option<TypedHeader<Authorization<Bearer>>>;

fn authorize(state: &ServerState, header: BearerHeader) -> Result<(), ServerError> {
    let TypedHeader(auth) = header.ok_or(ServerError::Unauthorized)?;
    match &state.token {
        Some(expected) if auth.token() != expected.as_ref() => {
            tracing::warn!("Rejected request with invalid bearer token");
            Err(ServerError::Unauthorized)
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub search: Option<String>,
}

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
        .route("/categories", get(list_categories))
        .route("/stores", get(list_stores))
}

async fn list_products(
    State(state): State<ServerState>,
    header: BearerHeader,
    Query(params): Query<ProductParams>,
) -> Result<Json<ApiPage<RawProduct>>, ServerError> {
    authorize(&state, header)?;
    let page = params.page.unwrap_or(1);
    let size = params.size.unwrap_or(DEFAULT_PAGE_SIZE);
    tracing::debug!("GET /products page={} size={} search={:?}", page, size, params.search);

    Ok(Json(state.catalog.page(page, size, params.search.as_deref())))
}

async fn get_product(
    State(state): State<ServerState>,
    header: BearerHeader,
    Path(id): Path<u64>,
) -> Result<Json<ApiItem<RawProduct>>, ServerError> {
    authorize(&state, header)?;
    let product = state.catalog.get(id).cloned().ok_or(ServerError::NotFound(id))?;
    Ok(Json(ApiItem { data: product }))
}

fn unpaged<T>(data: Vec<T>) -> ApiPage<T> {
    let total = data.len() as u64;
    ApiPage {
        data,
        meta: Some(RawPageMeta {
            current_page: Some(1),
            last_page: Some(1),
            total: Some(total),
            ..Default::default()
        }),
    }
}

async fn list_categories(
    State(state): State<ServerState>,
    header: BearerHeader,
) -> Result<Json<ApiPage<RawCategory>>, ServerError> {
    authorize(&state, header)?;
    Ok(Json(unpaged(state.catalog.categories())))
}

async fn list_stores(
    State(state): State<ServerState>,
    header: BearerHeader,
) -> Result<Json<ApiPage<RawStore>>, ServerError> {
    authorize(&state, header)?;
    Ok(Json(unpaged(state.catalog.stores())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use pris_core::ProductPage;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    const TOKEN: &str = "test-token";

    fn app() -> Router {
        let catalog = MockCatalog::generate(120, &mut StdRng::seed_from_u64(42));
        Router::new()
            .nest("/api/v1", router())
            .with_state(ServerState::new(catalog).with_token(TOKEN))
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json<T: DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected() {
        let response = app().oneshot(get("/api/v1/products", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_token_is_rejected() {
        let response = app()
            .oneshot(get("/api/v1/products", Some("nope")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_any_token_accepted_without_configured_token() {
        let catalog = MockCatalog::generate(3, &mut StdRng::seed_from_u64(1));
        let app = Router::new()
            .nest("/api/v1", router())
            .with_state(ServerState::new(catalog));

        let response = app
            .oneshot(get("/api/v1/stores", Some("anything")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_products_decodes_as_product_page() {
        let response = app()
            .oneshot(get("/api/v1/products?page=2&size=50", Some(TOKEN)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let raw: ApiPage<RawProduct> = json(response).await;
        let page = ProductPage::from_raw(raw, 2, 50);
        assert_eq!(page.products.len(), 50);
        assert_eq!(page.info.page, 2);
        assert_eq!(page.info.total_pages, 3);
        assert_eq!(page.info.total_items, 120);
    }

    #[tokio::test]
    async fn test_search_filters_products() {
        let response = app()
            .oneshot(get("/api/v1/products?search=kvikk", Some(TOKEN)))
            .await
            .unwrap();
        let raw: ApiPage<RawProduct> = json(response).await;

        assert_eq!(raw.data.len(), 10);
        assert!(raw
            .data
            .iter()
            .all(|p| p.name.as_deref().is_some_and(|n| n.contains("Kvikk"))));
    }

    #[tokio::test]
    async fn test_get_product_by_id() {
        let response = app()
            .oneshot(get("/api/v1/products/1001", Some(TOKEN)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let item: ApiItem<RawProduct> = json(response).await;
        assert_eq!(item.data.id, Some(1001));
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let response = app()
            .oneshot(get("/api/v1/products/9", Some(TOKEN)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = json(response).await;
        assert_eq!(body["message"], "Product 9 not found");
    }

    #[tokio::test]
    async fn test_categories_and_stores() {
        let response = app()
            .oneshot(get("/api/v1/categories", Some(TOKEN)))
            .await
            .unwrap();
        let categories: ApiPage<RawCategory> = json(response).await;
        assert_eq!(
            categories.meta.and_then(|m| m.total),
            Some(categories.data.len() as u64)
        );
        assert!(!categories.data.is_empty());

        let response = app()
            .oneshot(get("/api/v1/stores", Some(TOKEN)))
            .await
            .unwrap();
        let stores: ApiPage<RawStore> = json(response).await;
        assert!(!stores.data.is_empty());
    }
}
