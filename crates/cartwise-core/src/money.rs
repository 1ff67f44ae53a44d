//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    1200 * 0.1 + 79 * 0.5 drifts once enough promotions stack            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units (satang)                             │
//! │    ฿1,200.00 = 120000 satang                                           │
//! │    10% of 120000 = 12000 satang, exactly                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cartwise_core::money::Money;
//!
//! // Create from minor units (preferred)
//! let price = Money::from_minor(30000); // ฿300.00
//!
//! // Arithmetic operations
//! let total = price + Money::from_major(900); // ฿1,200.00
//! assert_eq!(total.minor(), 120000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Percentage;

/// Minor units per major unit (100 satang = 1 baht).
pub const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values; a net price is not clamped
///   when discounts exceed the subtotal
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Item.unit_price ──► Cart.subtotal ──┬──► PricingResult.subtotal        │
/// │                                      │                                  │
/// │  Campaign amounts ──► Contribution ──┴──► discount ──► net              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use cartwise_core::money::Money;
    ///
    /// let price = Money::from_minor(3950); // ฿39.50
    /// assert_eq!(price.minor(), 3950);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole major units.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_PER_MAJOR)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use cartwise_core::money::Money;
    ///
    /// let net = Money::from_major_minor(910, 50); // ฿910.50
    /// assert_eq!(net.minor(), 91050);
    ///
    /// let negative = Money::from_major_minor(-5, 50);
    /// assert_eq!(negative.minor(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * MINOR_PER_MAJOR - minor)
        } else {
            Money(major * MINOR_PER_MAJOR + minor)
        }
    }

    /// Converts a JSON-style decimal number into Money, rounding to the
    /// nearest minor unit.
    ///
    /// Boundary ingestion only. Returns `None` for NaN, infinity or values
    /// outside the i64 range.
    ///
    /// ```rust
    /// use cartwise_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_f64(39.5), Some(Money::from_minor(3950)));
    /// assert_eq!(Money::from_major_f64(f64::NAN), None);
    /// ```
    pub fn from_major_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let minor = (value * MINOR_PER_MAJOR as f64).round();
        if minor < i64::MIN as f64 || minor > i64::MAX as f64 {
            return None;
        }
        Some(Money(minor as i64))
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns `percentage` of this amount, rounded half-up on the minor unit.
    /// Saturates at the i64 bounds.
    ///
    /// ## Implementation
    /// Integer math on basis points: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use cartwise_core::money::Money;
    /// use cartwise_core::types::Percentage;
    ///
    /// let subtotal = Money::from_major(1200);
    /// let discount = subtotal.percentage_of(Percentage::from_percent(10));
    /// assert_eq!(discount, Money::from_major(120));
    /// ```
    pub fn percentage_of(&self, percentage: Percentage) -> Money {
        self.checked_percentage_of(percentage).unwrap_or(if self.0 < 0 {
            Money(i64::MIN)
        } else {
            Money(i64::MAX)
        })
    }

    /// Like [`Money::percentage_of`], but `None` when the result doesn't fit
    /// in i64. Only percentages above 100% can get there.
    pub fn checked_percentage_of(&self, percentage: Percentage) -> Option<Money> {
        // i128 keeps large subtotals from overflowing mid-multiplication
        let scaled = self.0 as i128 * percentage.bps() as i128;
        let half = if scaled < 0 { -5000 } else { 5000 };
        i64::try_from((scaled + half) / 10000).ok().map(Money)
    }

    /// How many whole `every` amounts fit into this one (floor division).
    ///
    /// Returns `None` when `every` is zero or negative.
    ///
    /// ```rust
    /// use cartwise_core::money::Money;
    ///
    /// let subtotal = Money::from_major(250);
    /// assert_eq!(subtotal.checked_tiers(Money::from_major(100)), Some(2));
    /// assert_eq!(subtotal.checked_tiers(Money::zero()), None);
    /// ```
    pub fn checked_tiers(&self, every: Money) -> Option<i64> {
        if every.0 <= 0 {
            return None;
        }
        Some(self.0.div_euclid(every.0))
    }

    /// Multiplies by a whole number of tiers. `None` on overflow.
    ///
    /// ```rust
    /// use cartwise_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(20).checked_times(2), Some(Money::from_major(40)));
    /// assert_eq!(Money::from_minor(i64::MAX).checked_times(2), None);
    /// ```
    #[inline]
    pub const fn checked_times(&self, count: i64) -> Option<Self> {
        match self.0.checked_mul(count) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }

    /// Adds up `amounts`, or `None` as soon as the total leaves the i64 range.
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |total, amount| total.checked_add(amount))
    }

    /// Formats with a currency symbol in front, e.g. `฿1080.00`.
    pub fn display_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.major().abs(),
            self.minor_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal form, e.g. `910.50`. Currency symbols are a display concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
