//! Shop sessions: which store a request is for and the token to call it with.

use std::fmt;

use async_trait::async_trait;
use axum::http::HeaderMap;
use validator::{Validate, ValidationError};

use crate::{InsightsError, Result};

pub const SHOP_DOMAIN_HEADER: &str = "x-shopify-shop-domain";
pub const ACCESS_TOKEN_HEADER: &str = "x-shopify-access-token";

const SHOP_SUFFIX: &str = ".myshopify.com";

/// Shop domain plus Admin API access token.
#[derive(Clone, PartialEq, Eq, Validate)]
pub struct ShopSession {
    #[validate(custom = "validate_shop_domain")]
    pub shop: String,
    #[validate(length(min = 1))]
    pub access_token: String,
}

impl ShopSession {
    pub fn new(shop: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let session = Self {
            shop: shop.into().trim().to_lowercase(),
            access_token: access_token.into().trim().to_string(),
        };
        session.validate().map_err(|e| InsightsError::InvalidSession(e.to_string()))?;
        Ok(session)
    }
}

// Keeps the token out of logs.
impl fmt::Debug for ShopSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopSession").field("shop", &self.shop).field("access_token", &"<redacted>").finish()
    }
}

fn validate_shop_domain(shop: &str) -> std::result::Result<(), ValidationError> {
    let handle = shop.strip_suffix(SHOP_SUFFIX).ok_or_else(|| ValidationError::new("shop_domain_suffix"))?;
    let valid = !handle.is_empty()
        && !handle.starts_with('-')
        && handle.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid { Ok(()) } else { Err(ValidationError::new("shop_domain_handle")) }
}

/// Resolves the session for an incoming admin request.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn session_for(&self, headers: &HeaderMap) -> Result<ShopSession>;
}

/// One configured shop, used for every request.
#[derive(Debug, Clone)]
pub struct StaticSessionProvider { session: ShopSession }

impl StaticSessionProvider {
    pub fn new(session: ShopSession) -> Self { Self { session } }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn session_for(&self, _headers: &HeaderMap) -> Result<ShopSession> {
        Ok(self.session.clone())
    }
}

/// Reads the shop and token from request headers set by an upstream auth proxy.
#[derive(Debug, Clone, Default)]
pub struct HeaderSessionProvider;

#[async_trait]
impl SessionProvider for HeaderSessionProvider {
    async fn session_for(&self, headers: &HeaderMap) -> Result<ShopSession> {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
        match (header(SHOP_DOMAIN_HEADER), header(ACCESS_TOKEN_HEADER)) {
            (Some(shop), Some(token)) => ShopSession::new(shop, token),
            _ => Err(InsightsError::MissingSession),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_normalizes_shop() {
        let s = ShopSession::new("  Demo-Store.myshopify.com ", "shpat_123").unwrap();
        assert_eq!(s.shop, "demo-store.myshopify.com");
    }

    #[test]
    fn test_session_rejects_bad_input() {
        assert!(matches!(ShopSession::new("evil.example.com", "t"), Err(InsightsError::InvalidSession(_))));
        assert!(matches!(ShopSession::new(".myshopify.com", "t"), Err(InsightsError::InvalidSession(_))));
        assert!(matches!(ShopSession::new("a/b.myshopify.com", "t"), Err(InsightsError::InvalidSession(_))));
        assert!(matches!(ShopSession::new("demo.myshopify.com", " "), Err(InsightsError::InvalidSession(_))));
    }

    #[test]
    fn test_debug_redacts_token() {
        let s = ShopSession::new("demo.myshopify.com", "shpat_secret").unwrap();
        assert!(!format!("{s:?}").contains("shpat_secret"));
    }

    #[tokio::test]
    async fn test_header_provider() {
        let mut headers = HeaderMap::new();
        assert!(matches!(HeaderSessionProvider.session_for(&headers).await, Err(InsightsError::MissingSession)));
        headers.insert(SHOP_DOMAIN_HEADER, HeaderValue::from_static("demo.myshopify.com"));
        headers.insert(ACCESS_TOKEN_HEADER, HeaderValue::from_static("shpat_123"));
        let session = HeaderSessionProvider.session_for(&headers).await.unwrap();
        assert_eq!(session.access_token, "shpat_123");
    }

    #[tokio::test]
    async fn test_static_provider_ignores_headers() {
        let session = ShopSession::new("demo.myshopify.com", "shpat_123").unwrap();
        let provider = StaticSessionProvider::new(session.clone());
        assert_eq!(provider.session_for(&HeaderMap::new()).await.unwrap(), session);
    }
}
