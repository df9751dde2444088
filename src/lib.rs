//! Merchant Insights
//!
//! Admin dashboard for a Shopify store: pulls products, customers and orders
//! from the Admin REST API and ranks them.
//!
//! ## Features
//! - Best-selling products by units sold
//! - Most valuable customers by total spent
//! - Server-rendered dashboard page and JSON endpoint

pub mod config;
pub mod domain;
pub mod routes;
pub mod session;
pub mod shopify;
pub mod view;

pub use domain::aggregates::{Customer, LineItem, Order, Product, ProductImage, Variant};
pub use domain::insights::{DashboardInsights, RankedProduct, SalesTally, TOP_N};
pub use domain::value_objects::Money;
pub use session::ShopSession;
pub use shopify::{AdminClient, Resource, ShopResources};
pub use view::ViewState;

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("No shop session on request")]
    MissingSession,

    #[error("Invalid shop session: {0}")]
    InvalidSession(String),

    #[error("Transport error fetching {resource}: {source}")]
    Transport {
        resource: Resource,
        #[source]
        source: reqwest::Error,
    },

    #[error("{resource} request returned HTTP {status}")]
    UpstreamStatus { resource: Resource, status: u16 },

    #[error("Failed to decode {resource} response: {source}")]
    Decode {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },

    #[error("Template render error: {0}")]
    Render(#[from] askama::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, InsightsError>;
