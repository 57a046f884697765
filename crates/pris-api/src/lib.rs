//! # pris-api
//!
//! HTTP client for the kassal.app product API.
//! Uses Strategy pattern for retry backoff on transient failures.

pub mod client;
pub mod fallback;

pub use client::*;
pub use fallback::*;

use thiserror::Error;

/// Default API base URL
pub const DEFAULT_API_URL: &str = "https://kassal.app/api/v1";

/// Products per page requested from the API
pub const DEFAULT_PAGE_SIZE: u32 = 50;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("HTTP error! status: {status} - {status_text}")]
    Status { status: u16, status_text: String },
    #[error("not found")]
    NotFound,
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error(transparent)]
    Product(#[from] pris_core::ProductError),
}

impl ApiError {
    /// Network failures, throttling and server errors may succeed on retry
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

// ============================================================================
// STRATEGY PATTERN: Retry Policy
// ============================================================================

/// Strategy trait for retry backoff
pub trait RetryPolicy: Send + Sync + Clone {
    /// Delay in milliseconds before retry number `attempt` (0-indexed)
    fn delay_ms(&self, attempt: u32) -> u32;

    /// Whether retry number `attempt` may be made
    fn should_retry(&self, attempt: u32) -> bool;
}

/// Exponential backoff retry policy
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    /// Delay before the first retry (ms)
    pub initial_delay_ms: u32,
    /// Maximum delay between attempts (ms)
    pub max_delay_ms: u32,
    /// Multiplier for each subsequent attempt
    pub multiplier: f64,
    /// Maximum number of retries (0 = never retry)
    pub max_retries: u32,
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            initial_delay_ms: 300,
            max_delay_ms: 3000,
            multiplier: 2.0,
            max_retries: 2,
        }
    }
}

impl ExponentialBackoff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }
}

impl RetryPolicy for ExponentialBackoff {
    fn delay_ms(&self, attempt: u32) -> u32 {
        let base_delay = self.initial_delay_ms as f64 * self.multiplier.powi(attempt as i32);
        (base_delay as u32).min(self.max_delay_ms)
    }

    fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }
}

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// API client configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Bearer token; requests go out unauthenticated without one
    pub token: Option<String>,
    pub page_size: u32,
    pub retry_policy: ExponentialBackoff,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
            retry_policy: ExponentialBackoff::default(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Configuration baked in at build time from `KASSAL_API_URL` and `KASSAL_API_TOKEN`
    pub fn from_build_env() -> Self {
        let mut config = match option_env!("KASSAL_API_URL") {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        };
        config.token = option_env!("KASSAL_API_TOKEN")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        config
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size.max(1);
        self
    }

    pub fn with_policy(mut self, policy: ExponentialBackoff) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Absolute URL for an endpoint path such as `/products`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }
}

// ============================================================================
// QUERIES
// ============================================================================

/// Query for one page of the product listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: u32,
    pub size: u32,
    pub search: Option<String>,
}

impl ProductQuery {
    pub fn page(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size,
            search: None,
        }
    }

    /// Blank searches fall back to the plain listing
    pub fn search(mut self, query: impl AsRef<str>) -> Self {
        let query = query.as_ref().trim();
        self.search = (!query.is_empty()).then(|| query.to_string());
        self
    }

    /// Query-string pairs; values are encoded by the request builder
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params.push(("size", self.size.to_string()));
        params.push(("page", self.page.to_string()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff() {
        let policy = ExponentialBackoff {
            initial_delay_ms: 1000,
            max_delay_ms: 10000,
            multiplier: 2.0,
            max_retries: 5,
        };

        assert_eq!(policy.delay_ms(0), 1000);
        assert_eq!(policy.delay_ms(1), 2000);
        assert_eq!(policy.delay_ms(2), 4000);
        assert_eq!(policy.delay_ms(3), 8000);
        assert_eq!(policy.delay_ms(4), 10000); // Capped at max
    }

    #[test]
    fn test_should_retry() {
        let policy = ExponentialBackoff::new().max_retries(2);
        assert!(policy.should_retry(0));
        assert!(policy.should_retry(1));
        assert!(!policy.should_retry(2));

        let config = ApiConfig::default().with_policy(ExponentialBackoff::new().max_retries(0));
        assert!(!config.retry_policy.should_retry(0));
    }

    #[test]
    fn test_retryable_errors() {
        assert!(ApiError::Network("offline".into()).is_retryable());
        assert!(ApiError::Status { status: 503, status_text: "Service Unavailable".into() }.is_retryable());
        assert!(ApiError::Status { status: 429, status_text: "Too Many Requests".into() }.is_retryable());
        assert!(!ApiError::Status { status: 401, status_text: "Unauthorized".into() }.is_retryable());
        assert!(!ApiError::NotFound.is_retryable());
        assert!(!ApiError::Decode("eof".into()).is_retryable());
    }

    #[test]
    fn test_status_error_message() {
        let err = ApiError::Status { status: 500, status_text: "Internal Server Error".into() };
        assert_eq!(err.to_string(), "HTTP error! status: 500 - Internal Server Error");
    }

    #[test]
    fn test_api_config() {
        let config = ApiConfig::new("http://127.0.0.1:3001/api/v1/")
            .token("secret")
            .page_size(0);

        assert_eq!(config.endpoint("/products"), "http://127.0.0.1:3001/api/v1/products");
        assert_eq!(config.endpoint("products/1881"), "http://127.0.0.1:3001/api/v1/products/1881");
        assert_eq!(config.auth_header().as_deref(), Some("Bearer secret"));
        assert_eq!(config.page_size, 1);
    }

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.auth_header(), None);
    }

    #[test]
    fn test_product_query_params() {
        let listing = ProductQuery::page(2, 50);
        assert_eq!(
            listing.params(),
            vec![("size", "50".to_string()), ("page", "2".to_string())]
        );

        let search = ProductQuery::page(0, 50).search("  melk & brød ");
        assert_eq!(search.page, 1);
        assert_eq!(
            search.params(),
            vec![
                ("search", "melk & brød".to_string()),
                ("size", "50".to_string()),
                ("page", "1".to_string()),
            ]
        );

        assert_eq!(ProductQuery::page(1, 50).search("   ").search, None);
    }
}
