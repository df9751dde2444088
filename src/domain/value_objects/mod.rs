//! Value Objects for Admin API records

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Money value object
///
/// The Admin API reports amounts as decimal strings (`"1250.00"`). Parsing
/// them into a `Decimal` keeps ordering numeric: `"10"` sorts above `"9.5"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub fn new(amount: Decimal) -> Self { Self(amount) }
    pub fn zero() -> Self { Self(Decimal::ZERO) }
    pub fn amount(&self) -> Decimal { self.0 }
    pub fn is_zero(&self) -> bool { self.0.is_zero() }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() { return Err(MoneyError::Empty); }
        Decimal::from_str(trimmed).map(Self).map_err(|_| MoneyError::Invalid(trimmed.to_string()))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum MoneyError { Empty, Invalid(String) }
impl std::error::Error for MoneyError {}
impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::Empty => write!(f, "Amount empty"), Self::Invalid(v) => write!(f, "Invalid amount: {v}") }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_orders_numerically() {
        let ten: Money = "10".parse().unwrap();
        let nine_and_a_half: Money = "9.5".parse().unwrap();
        assert!(ten > nine_and_a_half);
    }

    #[test]
    fn test_money_from_json_string() {
        let m: Money = serde_json::from_str("\"1250.00\"").unwrap();
        assert_eq!(m.amount(), Decimal::new(125000, 2));
        assert_eq!(m.to_string(), "1250.00");
    }

    #[test]
    fn test_money_rejects_garbage() {
        assert_eq!("".parse::<Money>(), Err(MoneyError::Empty));
        assert!(matches!("abc".parse::<Money>(), Err(MoneyError::Invalid(_))));
    }
}
