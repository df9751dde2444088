//! Product record as returned by `products.json`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::value_objects::Money;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub vendor: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub image: Option<ProductImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<Money>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

impl Product {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self { id, title: title.into(), vendor: String::new(), variants: vec![], image: None, created_at: None }
    }

    /// Price shown on the dashboard: the first variant's.
    pub fn display_price(&self) -> Option<Money> {
        self.variants.first().and_then(|v| v.price)
    }

    /// Alt text for the thumbnail, falling back to the title.
    pub fn image_alt(&self) -> Option<&str> {
        self.image.as_ref().map(|img| img.alt.as_deref().filter(|a| !a.is_empty()).unwrap_or(self.title.as_str()))
    }
}
