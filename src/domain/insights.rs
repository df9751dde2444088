//! Sales tally and top-N rankings shown on the dashboard.
//!
//! Everything here is a pure function of the fetched records. Rankings use a
//! stable sort, so records with equal keys keep the order the API returned.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::aggregates::{Customer, Order, Product};

/// Number of entries in each dashboard ranking.
pub const TOP_N: usize = 5;

/// Units sold per product id, accumulated over order line items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SalesTally(HashMap<u64, u64>);

impl SalesTally {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut tally = Self::default();
        for (product_id, quantity) in orders.iter().flat_map(|order| order.units_by_product()) {
            tally.record(product_id, quantity);
        }
        tally
    }

    pub fn record(&mut self, product_id: u64, quantity: u32) {
        let units = self.0.entry(product_id).or_insert(0);
        *units = units.saturating_add(u64::from(quantity));
    }

    /// Zero for products that never appear in a line item.
    pub fn units_sold(&self, product_id: u64) -> u64 {
        self.0.get(&product_id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

/// A product with its units sold attached.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedProduct {
    #[serde(flatten)]
    pub product: Product,
    pub sales_count: u64,
}

pub fn best_selling_products(products: Vec<Product>, tally: &SalesTally, limit: usize) -> Vec<RankedProduct> {
    let mut ranked: Vec<RankedProduct> = products
        .into_iter()
        .map(|product| {
            let sales_count = tally.units_sold(product.id);
            RankedProduct { product, sales_count }
        })
        .collect();
    ranked.sort_by(|a, b| b.sales_count.cmp(&a.sales_count));
    ranked.truncate(limit);
    ranked
}

pub fn most_valuable_customers(mut customers: Vec<Customer>, limit: usize) -> Vec<Customer> {
    customers.sort_by(|a, b| b.total_spent.cmp(&a.total_spent));
    customers.truncate(limit);
    customers
}

/// The two rankings the dashboard renders.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DashboardInsights {
    pub best_selling_products: Vec<RankedProduct>,
    pub most_valuable_customers: Vec<Customer>,
}

impl DashboardInsights {
    pub fn compute(orders: &[Order], products: Vec<Product>, customers: Vec<Customer>) -> Self {
        let tally = SalesTally::from_orders(orders);
        Self {
            best_selling_products: best_selling_products(products, &tally, TOP_N),
            most_valuable_customers: most_valuable_customers(customers, TOP_N),
        }
    }
}
