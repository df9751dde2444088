//! Dashboard page rendering.
//!
//! Only one list is visible at a time. The toggles are plain links carrying
//! the next [`ViewState`] as `?view=`. Markup lives in
//! `templates/dashboard.html`; askama escapes every interpolated value.

use askama::Template;

use crate::domain::aggregates::Customer;
use crate::domain::insights::{DashboardInsights, RankedProduct};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    None,
    ShowingProducts,
    ShowingCustomers,
}

impl ViewState {
    /// Unknown values fall back to `None`.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("products") => Self::ShowingProducts,
            Some("customers") => Self::ShowingCustomers,
            _ => Self::None,
        }
    }

    pub fn as_query(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::ShowingProducts => Some("products"),
            Self::ShowingCustomers => Some("customers"),
        }
    }

    pub fn toggle_products(self) -> Self {
        if self == Self::ShowingProducts { Self::None } else { Self::ShowingProducts }
    }

    pub fn toggle_customers(self) -> Self {
        if self == Self::ShowingCustomers { Self::None } else { Self::ShowingCustomers }
    }

    fn href(self) -> String {
        match self.as_query() {
            Some(view) => format!("?view={view}"),
            None => "?".to_string(),
        }
    }
}

/// Product list entry for templates.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: u64,
    pub title: String,
    pub vendor: String,
    pub price: Option<String>,
    pub image_src: String,
    pub image_alt: String,
    pub sales_count: u64,
}

impl From<&RankedProduct> for ProductRow {
    fn from(ranked: &RankedProduct) -> Self {
        let p = &ranked.product;
        let (image_src, image_alt) = match (&p.image, p.image_alt()) {
            (Some(img), Some(alt)) => (img.src.clone(), alt.to_string()),
            _ => (String::new(), "No image available".to_string()),
        };
        Self {
            id: p.id,
            title: p.title.clone(),
            vendor: p.vendor.clone(),
            price: p.display_price().map(|m| m.to_string()),
            image_src,
            image_alt,
            sales_count: ranked.sales_count,
        }
    }
}

/// Customer list entry for templates.
#[derive(Debug, Clone)]
pub struct CustomerRow {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub orders_count: u64,
    pub total_spent: String,
}

impl From<&Customer> for CustomerRow {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id,
            name: c.full_name(),
            email: c.email.clone().unwrap_or_default(),
            orders_count: c.orders_count,
            total_spent: c.total_spent.to_string(),
        }
    }
}

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub products_label: &'static str,
    pub products_href: String,
    pub customers_label: &'static str,
    pub customers_href: String,
    pub show_products: bool,
    pub show_customers: bool,
    pub products: Vec<ProductRow>,
    pub customers: Vec<CustomerRow>,
}

impl DashboardTemplate {
    pub fn new(insights: &DashboardInsights, view: ViewState) -> Self {
        let show_products = view == ViewState::ShowingProducts;
        let show_customers = view == ViewState::ShowingCustomers;
        Self {
            products_label: if show_products { "Hide Top Selling Products" } else { "Show Top Selling Products" },
            products_href: view.toggle_products().href(),
            customers_label: if show_customers { "Hide Most Valuable Customers" } else { "Show Most Valuable Customers" },
            customers_href: view.toggle_customers().href(),
            show_products,
            show_customers,
            products: insights.best_selling_products.iter().map(ProductRow::from).collect(),
            customers: insights.most_valuable_customers.iter().map(CustomerRow::from).collect(),
        }
    }
}

pub fn render_dashboard(insights: &DashboardInsights, view: ViewState) -> askama::Result<String> {
    DashboardTemplate::new(insights, view).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::{Product, ProductImage, Variant};
    use crate::domain::value_objects::Money;

    fn insights() -> DashboardInsights {
        let mut hat = Product::new(1, "Hat <b>");
        hat.vendor = "Acme & Sons".into();
        hat.variants = vec![Variant { price: Some("19.99".parse::<Money>().unwrap()), ..Default::default() }];
        hat.image = Some(ProductImage { src: "https://cdn.example.com/hat.png".into(), alt: None });
        let mut ada = Customer::new(7, "250.00".parse::<Money>().unwrap());
        ada.first_name = Some("Ada".into());
        ada.last_name = Some("Lovelace".into());
        ada.orders_count = 3;
        DashboardInsights {
            best_selling_products: vec![
                RankedProduct { product: hat, sales_count: 12 },
                RankedProduct { product: Product::new(2, "Scarf"), sales_count: 0 },
            ],
            most_valuable_customers: vec![ada],
        }
    }

    #[test]
    fn test_toggles_are_exclusive() {
        let v = ViewState::None.toggle_products();
        assert_eq!(v, ViewState::ShowingProducts);
        let v = v.toggle_customers();
        assert_eq!(v, ViewState::ShowingCustomers);
        assert_eq!(v.toggle_customers(), ViewState::None);
        assert_eq!(ViewState::ShowingProducts.toggle_products(), ViewState::None);
    }

    #[test]
    fn test_view_from_query() {
        assert_eq!(ViewState::from_query(Some("products")), ViewState::ShowingProducts);
        assert_eq!(ViewState::from_query(Some("customers")), ViewState::ShowingCustomers);
        assert_eq!(ViewState::from_query(Some("both")), ViewState::None);
        assert_eq!(ViewState::from_query(None), ViewState::None);
    }

    #[test]
    fn test_product_row() {
        let data = insights();
        let hat = ProductRow::from(&data.best_selling_products[0]);
        assert_eq!(hat.price.as_deref(), Some("19.99"));
        assert_eq!(hat.image_alt, "Hat <b>");
        let scarf = ProductRow::from(&data.best_selling_products[1]);
        assert!(scarf.price.is_none());
        assert_eq!(scarf.image_src, "");
        assert_eq!(scarf.image_alt, "No image available");
    }

    #[test]
    fn test_hidden_lists() {
        let html = render_dashboard(&insights(), ViewState::None).unwrap();
        assert!(html.contains("Show Top Selling Products"));
        assert!(html.contains("Show Most Valuable Customers"));
        assert!(!html.contains("resource-list"));
    }

    #[test]
    fn test_products_view() {
        let html = render_dashboard(&insights(), ViewState::ShowingProducts).unwrap();
        assert!(html.contains("Hide Top Selling Products"));
        assert!(html.contains("href=\"?\""));
        assert!(html.contains("href=\"?view=customers\""));
        assert!(html.contains("<b>Price:</b> $19.99"));
        assert!(html.contains("<b>Sales Count:</b> 12"));
        assert!(html.contains("<b>Price:</b> N/A"));
        assert!(html.contains("alt=\"No image available\""));
        assert!(!html.contains("Lovelace"));
    }

    #[test]
    fn test_product_text_is_escaped() {
        let html = render_dashboard(&insights(), ViewState::ShowingProducts).unwrap();
        assert!(html.contains("Hat &lt;b&gt;"));
        assert!(html.contains("alt=\"Hat &lt;b&gt;\""));
        assert!(html.contains("Acme &amp; Sons"));
        assert!(!html.contains("Hat <b>"));
    }

    #[test]
    fn test_customers_view() {
        let html = render_dashboard(&insights(), ViewState::ShowingCustomers).unwrap();
        assert!(html.contains("Hide Most Valuable Customers"));
        assert!(html.contains("<b>Name: </b>Ada Lovelace"));
        assert!(html.contains("<b>Total_Orders: </b>3"));
        assert!(html.contains("<b>Total Spent:</b> $250.00"));
        assert!(!html.contains("Scarf"));
    }
}
