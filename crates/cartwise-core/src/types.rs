//! # Domain Types
//!
//! Reference data and scalar types used throughout Cartwise.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │   Percentage    │   │     Points      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ItemId)    │   │  bps (u32)      │   │  hundredths     │       │
//! │  │  name           │   │  1000 = 10%     │   │  7900 = 79 pts  │       │
//! │  │  unit_price     │   └─────────────────┘   └─────────────────┘       │
//! │  │  category       │                                                    │
//! │  └─────────────────┘   ┌─────────────────┐                              │
//! │                        │  ItemCategory   │                              │
//! │                        │  Clothing       │                              │
//! │                        │  Footwear       │                              │
//! │                        │  Bags           │                              │
//! │                        │  Accessories    │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Percentage
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1500 bps = 15%
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percentage(u32);

impl Percentage {
    /// 100% in basis points.
    pub const MAX_BPS: u32 = 10_000;

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percentage(bps)
    }

    /// Creates a percentage from a whole percent value (15 = 15%).
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        Percentage(percent * 100)
    }

    /// Creates a percentage from a decimal percent (12.5 = 12.5%).
    ///
    /// Boundary ingestion only. Returns `None` for NaN, infinity and
    /// negative values; values above 100% are kept so validation can report
    /// them as out of range.
    pub fn from_percent_f64(percent: f64) -> Option<Self> {
        if !percent.is_finite() || percent < 0.0 {
            return None;
        }
        let bps = (percent * 100.0).round();
        if bps > u32::MAX as f64 {
            return None;
        }
        Some(Percentage(bps as u32))
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Checks `0% <= self <= 100%`.
    #[inline]
    pub const fn is_within_bounds(&self) -> bool {
        self.0 <= Self::MAX_BPS
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
        }
    }
}

// =============================================================================
// Points
// =============================================================================

/// A customer's loyalty points balance, in hundredths of a point.
///
/// Supplied from outside the engine and consumed only by the
/// `DiscountByPoints` campaign. One point is worth one major currency unit.
/// A balance is never negative and never above [`Points::MAX_WHOLE`].
///
/// ```rust
/// use cartwise_core::types::Points;
///
/// assert_eq!(Points::from_whole(79).hundredths(), 7900);
/// assert!(Points::checked_from_whole(Points::MAX_WHOLE).is_some());
/// assert_eq!(Points::checked_from_whole(Points::MAX_WHOLE + 1), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, TS)]
#[ts(export)]
pub struct Points(u64);

impl Points {
    /// Largest accepted balance, in whole points.
    pub const MAX_WHOLE: u64 = 1_000_000_000_000;

    #[inline]
    pub const fn from_whole(points: u32) -> Self {
        Points(points as u64 * 100)
    }

    /// Whole points from untrusted input. `None` above [`Points::MAX_WHOLE`].
    pub const fn checked_from_whole(points: u64) -> Option<Self> {
        if points > Self::MAX_WHOLE {
            None
        } else {
            Some(Points(points * 100))
        }
    }

    #[inline]
    pub const fn from_hundredths(hundredths: u32) -> Self {
        Points(hundredths as u64)
    }

    #[inline]
    pub const fn hundredths(&self) -> u64 {
        self.0
    }

    /// The monetary value of the balance.
    #[inline]
    pub const fn as_money(&self) -> Money {
        // At most MAX_WHOLE * 100, far inside i64.
        Money::from_minor(self.0 as i64)
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}", self.0 / 100)
        } else {
            write!(f, "{}", self.as_money())
        }
    }
}

// =============================================================================
// Item
// =============================================================================

/// Identifier of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ItemId(u32);

impl ItemId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ItemId(id)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Merchandise category of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ItemCategory {
    Clothing,
    Footwear,
    Bags,
    Accessories,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 4] = [
        ItemCategory::Clothing,
        ItemCategory::Footwear,
        ItemCategory::Bags,
        ItemCategory::Accessories,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            ItemCategory::Clothing => "Clothing",
            ItemCategory::Footwear => "Footwear",
            ItemCategory::Bags => "Bags",
            ItemCategory::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ItemCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemCategory::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown item category: {}", s))
    }
}

/// An item that can be placed in the cart.
///
/// Immutable reference data; the cart holds copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Non-negative unit price.
    pub unit_price: Money,
    pub category: ItemCategory,
}

impl Item {
    pub fn new(id: u32, name: impl Into<String>, unit_price: Money, category: ItemCategory) -> Self {
        Item {
            id: ItemId::new(id),
            name: name.into(),
            unit_price,
            category,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_from_percent() {
        assert_eq!(Percentage::from_percent(15).bps(), 1500);
        assert!((Percentage::from_bps(1250).percent() - 12.5).abs() < 0.001);
    }

    #[test]
    fn test_percentage_from_percent_f64() {
        assert_eq!(Percentage::from_percent_f64(12.5), Some(Percentage::from_bps(1250)));
        assert_eq!(Percentage::from_percent_f64(150.0), Some(Percentage::from_bps(15000)));
        assert_eq!(Percentage::from_percent_f64(-1.0), None);
        assert_eq!(Percentage::from_percent_f64(f64::NAN), None);
    }

    #[test]
    fn test_percentage_bounds() {
        assert!(Percentage::from_percent(0).is_within_bounds());
        assert!(Percentage::from_percent(100).is_within_bounds());
        assert!(!Percentage::from_bps(10_001).is_within_bounds());
    }

    #[test]
    fn test_percentage_display() {
        assert_eq!(Percentage::from_percent(10).to_string(), "10%");
        assert_eq!(Percentage::from_bps(1250).to_string(), "12.50%");
    }

    #[test]
    fn test_points_as_money() {
        let points = Points::from_whole(79);
        assert_eq!(points.hundredths(), 7900);
        assert_eq!(points.as_money(), Money::from_major(79));
        assert_eq!(points.to_string(), "79");
        assert_eq!(Points::from_hundredths(150).to_string(), "1.50");
    }

    #[test]
    fn test_points_upper_bound() {
        let max = Points::checked_from_whole(Points::MAX_WHOLE).unwrap();
        assert_eq!(max.as_money(), Money::from_major(1_000_000_000_000));
        assert_eq!(Points::checked_from_whole(u64::MAX), None);
        assert_eq!(Points::checked_from_whole(0), Some(Points::default()));
    }

    #[test]
    fn test_item_category_parsing() {
        assert_eq!("Footwear".parse::<ItemCategory>().unwrap(), ItemCategory::Footwear);
        assert_eq!("bags".parse::<ItemCategory>().unwrap(), ItemCategory::Bags);
        assert!("Groceries".parse::<ItemCategory>().is_err());
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = Item::new(4, "Sneakers", Money::from_major(2000), ItemCategory::Footwear);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["unitPrice"], 200000);
        assert_eq!(json["category"], "Footwear");
        assert_eq!(json["id"], 4);
    }
}
