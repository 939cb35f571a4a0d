//! Pricing boundary
//!
//! Opaque mapping from price tier to a currency amount. The core never
//! computes prices; a tier missing from the table prices at zero.

use serde::Deserialize;
use std::collections::HashMap;

/// Tier -> price lookup table
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    by_tier: HashMap<u32, f64>,
}

impl Default for PriceTable {
    /// House defaults; tier 1 is the most expensive by convention
    fn default() -> Self {
        Self {
            by_tier: HashMap::from([(1, 120.0), (2, 95.0), (3, 70.0), (4, 50.0)]),
        }
    }
}

impl PriceTable {
    pub fn new(by_tier: HashMap<u32, f64>) -> Self {
        Self { by_tier }
    }

    /// Price for a tier; unknown tiers price at zero
    pub fn price(&self, tier: u32) -> f64 {
        self.by_tier.get(&tier).copied().unwrap_or(0.0)
    }

    /// Subtotal over an iterator of tiers
    pub fn subtotal(&self, tiers: impl IntoIterator<Item = u32>) -> f64 {
        tiers.into_iter().map(|t| self.price(t)).sum()
    }
}

/// Format an amount as US dollars with thousands separators, e.g. "$1,234.50"
pub fn format_usd(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let (dollars, rem) = (cents / 100, cents % 100);

    let digits = dollars.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!(
        "{}${}.{:02}",
        if negative { "-" } else { "" },
        grouped,
        rem
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = PriceTable::default();
        assert_eq!(table.price(1), 120.0);
        assert_eq!(table.price(4), 50.0);
    }

    #[test]
    fn test_missing_tier_prices_at_zero() {
        let table = PriceTable::default();
        assert_eq!(table.price(99), 0.0);
    }

    #[test]
    fn test_subtotal() {
        let table = PriceTable::default();
        assert_eq!(table.subtotal([1, 2, 99]), 215.0);
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(95.0), "$95.00");
        assert_eq!(format_usd(1234.5), "$1,234.50");
        assert_eq!(format_usd(1_000_000.0), "$1,000,000.00");
    }
}
