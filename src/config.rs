//! Environment configuration.
//!
//! | Variable | Default |
//! |---|---|
//! | `PORT` | `8083` |
//! | `SHOPIFY_API_VERSION` | `2024-04` |
//! | `SHOPIFY_API_BASE_URL` | `https://<shop>` |
//! | `SHOPIFY_SHOP` / `SHOPIFY_ACCESS_TOKEN` | unset: sessions come from request headers |
//! | `CORS_ALLOWED_ORIGINS` | unset: no cross-origin reads |

use std::sync::Arc;

use axum::http::HeaderValue;

use crate::session::{HeaderSessionProvider, SessionProvider, ShopSession, StaticSessionProvider};
use crate::shopify::{AdminClient, DEFAULT_API_VERSION};
use crate::{InsightsError, Result};

const DEFAULT_PORT: u16 = 8083;

#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub api_version: String,
    pub api_base_url: Option<String>,
    pub session: Option<ShopSession>,
    pub allowed_origins: Vec<HeaderValue>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(p) => p.trim().parse().map_err(|_| InsightsError::Config(format!("PORT is not a port number: {p}")))?,
            None => DEFAULT_PORT,
        };
        let session = match (var("SHOPIFY_SHOP"), var("SHOPIFY_ACCESS_TOKEN")) {
            (Some(shop), Some(token)) => Some(ShopSession::new(shop, token)?),
            (None, None) => None,
            _ => return Err(InsightsError::Config("SHOPIFY_SHOP and SHOPIFY_ACCESS_TOKEN must be set together".into())),
        };

        let allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(|origin| {
                        HeaderValue::from_str(origin)
                            .map_err(|_| InsightsError::Config(format!("CORS_ALLOWED_ORIGINS has an invalid origin: {origin}")))
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            port,
            api_version: var("SHOPIFY_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            api_base_url: var("SHOPIFY_API_BASE_URL"),
            session,
            allowed_origins,
        })
    }

    pub fn admin_client(&self) -> AdminClient {
        let client = AdminClient::new(reqwest::Client::new(), &self.api_version);
        match &self.api_base_url {
            Some(url) => client.with_base_url(url),
            None => client,
        }
    }

    pub fn session_provider(&self) -> Arc<dyn SessionProvider> {
        match &self.session {
            Some(session) => Arc::new(StaticSessionProvider::new(session.clone())),
            None => Arc::new(HeaderSessionProvider),
        }
    }
}
