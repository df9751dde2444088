//! Shopify Admin REST client.
//!
//! Fetches one page (up to [`PAGE_LIMIT`] records) of products, customers and
//! orders for a shop. A body without the expected top-level key is read as an
//! empty collection; transport errors, non-2xx statuses and undecodable
//! bodies are returned as errors.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::domain::aggregates::{Customer, Order, Product};
use crate::session::ShopSession;
use crate::{InsightsError, Result};

pub const DEFAULT_API_VERSION: &str = "2024-04";
pub const PAGE_LIMIT: u32 = 250;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Products,
    Customers,
    Orders,
}

impl Resource {
    /// Path segment and top-level JSON key, e.g. `products`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Customers => "customers",
            Self::Orders => "orders",
        }
    }

    fn extra_query(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Orders => &[("status", "any")],
            Self::Products | Self::Customers => &[],
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.key()) }
}

/// The three collections a dashboard load needs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShopResources {
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
}

#[derive(Clone, Debug)]
pub struct AdminClient {
    http: reqwest::Client,
    api_version: String,
    base_url: Option<String>,
}

impl AdminClient {
    pub fn new(http: reqwest::Client, api_version: impl Into<String>) -> Self {
        Self { http, api_version: api_version.into(), base_url: None }
    }

    /// Send every request to `base_url` instead of `https://<shop>`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    pub fn api_version(&self) -> &str { &self.api_version }

    pub fn resource_url(&self, session: &ShopSession, resource: Resource) -> String {
        let base = match &self.base_url {
            Some(url) => url.clone(),
            None => format!("https://{}", session.shop),
        };
        format!("{base}/admin/api/{}/{}.json", self.api_version, resource.key())
    }

    pub async fn fetch_products(&self, session: &ShopSession) -> Result<Vec<Product>> {
        self.fetch(session, Resource::Products).await
    }

    pub async fn fetch_customers(&self, session: &ShopSession) -> Result<Vec<Customer>> {
        self.fetch(session, Resource::Customers).await
    }

    pub async fn fetch_orders(&self, session: &ShopSession) -> Result<Vec<Order>> {
        self.fetch(session, Resource::Orders).await
    }

    /// Runs the three fetches concurrently and waits for all of them; one
    /// failing does not cancel the others. The first error in
    /// products/customers/orders order is returned.
    pub async fn fetch_all(&self, session: &ShopSession) -> Result<ShopResources> {
        let (products, customers, orders) = tokio::join!(
            self.fetch_products(session),
            self.fetch_customers(session),
            self.fetch_orders(session),
        );
        Ok(ShopResources { products: products?, customers: customers?, orders: orders? })
    }

    #[instrument(skip(self, session), fields(shop = %session.shop))]
    async fn fetch<T: DeserializeOwned>(&self, session: &ShopSession, resource: Resource) -> Result<Vec<T>> {
        let limit = PAGE_LIMIT.to_string();
        let response = self
            .http
            .get(self.resource_url(session, resource))
            .header(ACCESS_TOKEN_HEADER, session.access_token.as_str())
            .query(resource.extra_query())
            .query(&[("limit", limit.as_str())])
            .send()
            .await
            .map_err(|source| InsightsError::Transport { resource, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(InsightsError::UpstreamStatus { resource, status: status.as_u16() });
        }

        let body = response.bytes().await.map_err(|source| InsightsError::Transport { resource, source })?;
        let records: Vec<T> = decode_collection(resource, &body)?;
        debug!(count = records.len(), "fetched");
        Ok(records)
    }
}

/// Pulls `resource.key()` out of a response body. A missing or null key is
/// an empty collection.
pub fn decode_collection<T: DeserializeOwned>(resource: Resource, body: &[u8]) -> Result<Vec<T>> {
    let decode_err = |source| InsightsError::Decode { resource, source };
    let mut envelope: serde_json::Value = serde_json::from_slice(body).map_err(decode_err)?;
    match envelope.get_mut(resource.key()).map(serde_json::Value::take) {
        None | Some(serde_json::Value::Null) => Ok(Vec::new()),
        Some(records) => serde_json::from_value(records).map_err(decode_err),
    }
}
