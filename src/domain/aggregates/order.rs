//! Order record as returned by `orders.json`
//!
//! Only line items matter here; everything else in the payload is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub line_items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// `product_id` is null for custom line items that have no catalog product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub product_id: Option<u64>,
    pub quantity: u32,
    #[serde(default)]
    pub title: Option<String>,
}

impl LineItem {
    pub fn new(product_id: u64, quantity: u32) -> Self {
        Self { id: None, product_id: Some(product_id), quantity, title: None }
    }
}

impl Order {
    pub fn new(id: u64, line_items: Vec<LineItem>) -> Self {
        Self { id, line_items, created_at: None }
    }

    /// `(product_id, quantity)` for every line item tied to a product.
    pub fn units_by_product(&self) -> impl Iterator<Item = (u64, u32)> + '_ {
        self.line_items.iter().filter_map(|item| item.product_id.map(|id| (id, item.quantity)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_from_admin_json() {
        let json = r#"{"id": 450789469, "created_at": "2008-01-10T11:00:00-05:00", "line_items": [
            {"id": 466157049, "product_id": 632910392, "quantity": 1, "title": "IPod Nano - 8gb"},
            {"id": 518995019, "product_id": null, "quantity": 2, "title": "Gift wrap"}
        ]}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.line_items.len(), 2);
        assert!(order.created_at.is_some());
        assert_eq!(order.units_by_product().collect::<Vec<_>>(), vec![(632910392, 1)]);
    }

    #[test]
    fn test_order_without_line_items() {
        let order: Order = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(order.units_by_product().count(), 0);
    }
}
