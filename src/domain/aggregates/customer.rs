//! Customer record as returned by `customers.json`

use serde::{Deserialize, Serialize};
use crate::domain::value_objects::Money;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub total_spent: Money,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub orders_count: u64,
}

impl Customer {
    pub fn new(id: u64, total_spent: Money) -> Self {
        Self { id, first_name: None, last_name: None, email: None, total_spent, orders_count: 0 }
    }

    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_from_admin_json() {
        let json = r#"{"id": 207119551, "email": "bob.norman@mail.example.com", "first_name": "Bob",
            "last_name": "Norman", "orders_count": 1, "total_spent": "199.65", "state": "disabled"}"#;
        let c: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(c.full_name(), "Bob Norman");
        assert_eq!(c.total_spent, "199.65".parse::<Money>().unwrap());
        assert_eq!(c.orders_count, 1);
    }

    #[test]
    fn test_customer_missing_names() {
        let c: Customer = serde_json::from_str(r#"{"id": 3, "first_name": null, "last_name": "Solo"}"#).unwrap();
        assert_eq!(c.full_name(), "Solo");
        assert!(c.total_spent.is_zero());
    }
}
