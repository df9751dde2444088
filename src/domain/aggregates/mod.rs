//! Aggregates module
pub mod product;
pub mod order;
pub mod customer;

pub use product::{Product, ProductImage, Variant};
pub use order::{Order, LineItem};
pub use customer::Customer;

use serde::{Deserialize, Deserializer};

/// Admin API payloads send explicit `null` for empty fields; treat it like a
/// missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
