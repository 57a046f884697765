//! PrisSjekk development server
//!
//! Serves a mock of the kassal.app product API under `/api/v1` and the
//! built frontend from `dist/`.

mod mock;
mod routes;

use std::net::SocketAddr;

use axum::Router;
use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use mock::MockCatalog;
use routes::ServerState;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_MOCK_PRODUCTS: usize = 240;
const DEFAULT_DIST_DIR: &str = "dist";

struct ServerConfig {
    addr: SocketAddr,
    mock_products: usize,
    dist_dir: String,
    token: Option<String>,
}

impl ServerConfig {
    fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let addr = std::env::var("PRIS_SERVER_ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
            .parse()?;
        let mock_products = match std::env::var("PRIS_MOCK_PRODUCTS") {
            Ok(raw) => raw.parse()?,
            Err(_) => DEFAULT_MOCK_PRODUCTS,
        };
        let dist_dir =
            std::env::var("PRIS_DIST_DIR").unwrap_or_else(|_| DEFAULT_DIST_DIR.to_string());
        let token = std::env::var("KASSAL_API_TOKEN").ok().filter(|t| !t.is_empty());

        Ok(Self {
            addr,
            mock_products,
            dist_dir,
            token,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let catalog = MockCatalog::generate(config.mock_products, &mut rand::thread_rng());
    tracing::info!("Generated {} mock products", catalog.len());
    let mut state = ServerState::new(catalog);
    if let Some(token) = config.token {
        tracing::info!("Requiring configured bearer token");
        state = state.with_token(token);
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE]);

    let app = Router::new()
        .nest("/api/v1", routes::router())
        .with_state(state)
        .fallback_service(ServeDir::new(&config.dist_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    tracing::info!("Serving mock API on http://{}/api/v1", config.addr);
    tracing::info!("Serving frontend from {}", config.dist_dir);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
