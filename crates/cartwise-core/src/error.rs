//! # Error Types
//!
//! Domain-specific error types for cartwise-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cartwise-core errors (this file)                                      │
//! │  ├── ModelError       - Promotion record doesn't fit its variant       │
//! │  ├── SelectionError   - One-per-group rule violated                    │
//! │  ├── PricingError     - Should-not-happen arithmetic guard             │
//! │  ├── CartError        - Cart snapshot rules (unique items)             │
//! │  ├── ValidationError  - Authoring form field failures                  │
//! │  └── CoreError        - Umbrella over all of the above                 │
//! │                                                                         │
//! │  checkout app errors (separate crate)                                  │
//! │  └── ApiError         - What the caller sees (serialized)              │
//! │                                                                         │
//! │  Flow: ModelError/SelectionError/... → CoreError → ApiError            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is recoverable at the boundary. Invalid promotions are
//! filtered out before they reach the engine and group conflicts are rejected
//! before the selection is mutated.

use thiserror::Error;

use crate::promotion::{PromotionGroup, PromotionId};
use crate::types::ItemId;

// =============================================================================
// Model Error
// =============================================================================

/// A raw promotion record failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The payload fields present don't match the declared `(group, campaign)`.
    ///
    /// ## When This Occurs
    /// - `FixedAmount` record without `amount`
    /// - `DiscountByPoints` record that also carries `item_category`
    /// - `campaign` that doesn't belong to `group`
    /// - Unknown group/campaign label in the catalog wire format
    #[error("Invalid payload for promotion {id}: {reason}")]
    InvalidPayload { id: PromotionId, reason: String },

    /// A percentage is outside `[0, 100]` or an amount is negative.
    #[error("Promotion {id}: {field} must be between {min} and {max}")]
    OutOfRange {
        id: PromotionId,
        field: &'static str,
        min: String,
        max: String,
    },

    /// Tier denominator is zero.
    #[error("Promotion {id}: {field} must be greater than zero")]
    InvalidThreshold { id: PromotionId, field: &'static str },

    /// Two catalog records share an id.
    #[error("Duplicate promotion id: {0}")]
    DuplicateId(PromotionId),
}

impl ModelError {
    /// Id of the offending record.
    pub fn promotion_id(&self) -> PromotionId {
        match self {
            ModelError::InvalidPayload { id, .. }
            | ModelError::OutOfRange { id, .. }
            | ModelError::InvalidThreshold { id, .. } => *id,
            ModelError::DuplicateId(id) => *id,
        }
    }
}

// =============================================================================
// Selection Error
// =============================================================================

/// Selecting a promotion would break the at-most-one-per-group rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Another promotion of the same group is already selected.
    ///
    /// ## User Workflow
    /// ```text
    /// Selected: Coupon #1 (Fixed amount)
    ///      │
    ///      ▼
    /// select(Coupon #2)
    ///      │
    ///      ▼
    /// GroupConflict { group: Coupon, selected: 1, candidate: 2 }
    ///      │
    ///      ▼
    /// Coupon #1 stays selected, #2 shown disabled
    /// ```
    #[error("Cannot select promotion {candidate}: {group} promotion {selected} is already selected")]
    GroupConflict {
        group: PromotionGroup,
        selected: PromotionId,
        candidate: PromotionId,
    },

    /// Id isn't part of the catalog snapshot.
    #[error("Promotion not found: {0}")]
    UnknownPromotion(PromotionId),
}

// =============================================================================
// Pricing Error
// =============================================================================

/// Pricing failures.
///
/// Validated promotions never have a zero threshold. Overflow needs
/// amounts near the i64 limit; it is reported instead of wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Promotion {promotion_id} has a non-positive tier threshold")]
    InvalidThreshold { promotion_id: PromotionId },

    /// One promotion's discount doesn't fit in `Money`.
    #[error("Discount of promotion {promotion_id} overflows")]
    Overflow { promotion_id: PromotionId },

    /// The summed discount, or subtotal minus discount, doesn't fit.
    #[error("Cart total overflows")]
    TotalOverflow,
}

// =============================================================================
// Cart Error
// =============================================================================

/// Cart snapshot rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Each item may appear at most once per cart snapshot.
    #[error("Item {0} is already in the cart")]
    DuplicateItem(ItemId),

    #[error("Item {0} is not in the cart")]
    ItemNotInCart(ItemId),

    #[error("Item {0} has a negative price")]
    NegativePrice(ItemId),

    /// Adding the item would push the subtotal past what `Money` holds.
    #[error("Adding item {0} would overflow the cart subtotal")]
    SubtotalOverflow(ItemId),

    /// Id isn't part of the item catalog.
    #[error("Item not found: {0}")]
    UnknownItem(ItemId),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Authoring form validation errors.
///
/// These occur while a promotion draft is being filled in, before it becomes a
/// raw record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// A numeric field can't be represented (NaN, infinite, negative percent).
    #[error("{field} is not a valid number: {reason}")]
    InvalidNumber { field: String, reason: String },
}

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella error for callers that don't care which stage failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
