//! # cartwise-core: Promotion & Pricing Logic for Cartwise
//!
//! This crate holds the promotion model, the one-per-group selection rule and
//! the pricing engine as pure functions with no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cartwise Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 checkout app (CLI + session state)              │   │
//! │  │    items ──► toggle item ──► select promotion ──► quote         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cartwise-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ promotion │  │ selection │  │  pricing  │  │  catalog  │  │   │
//! │  │   │  Campaign │  │ Selection │  │   price   │  │  ingest   │  │   │
//! │  │   │  validate │  │  options  │  │  Outcome  │  │  Entry    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   types   │  │   cart    │  │   draft   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • DETERMINISTIC                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`promotion`] - Groups, campaigns, raw records and `validate`
//! - [`selection`] - At most one selected promotion per group
//! - [`pricing`] - Subtotal, per-promotion contributions, net
//! - [`catalog`] - Catalog wire format and ingestion
//! - [`draft`] - Promotion authoring form state
//! - [`cart`] - Cart snapshot
//! - [`money`] / [`types`] - Integer money, percentages, points, items
//! - [`error`] - Domain error types
//! - [`validation`] - Form field validators
//!
//! ## Design Principles
//!
//! 1. **Integer Money**: amounts are minor units (satang) in `i64`
//! 2. **Validated Variants**: the engine only sees [`ValidPromotion`]
//! 3. **Explicit Errors**: conflicts and bad records are typed errors, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use cartwise_core::cart::Cart;
//! use cartwise_core::money::Money;
//! use cartwise_core::pricing::price;
//! use cartwise_core::promotion::{validate, PromotionRecord};
//! use cartwise_core::selection::Selection;
//! use cartwise_core::types::{Item, ItemCategory, Percentage, Points};
//!
//! let cart = Cart::from_items([
//!     Item::new(1, "Tops", Money::from_major(300), ItemCategory::Clothing),
//!     Item::new(3, "Sandals", Money::from_major(900), ItemCategory::Footwear),
//! ])
//! .unwrap();
//!
//! let coupon = validate(&PromotionRecord::percentage_discount(2, "10% off", Percentage::from_percent(10))).unwrap();
//! let selection = Selection::from_promotions([coupon]).unwrap();
//!
//! let result = price(&cart, &selection, Points::default()).unwrap().into_result().unwrap();
//! assert_eq!(result.subtotal, Money::from_major(1200));
//! assert_eq!(result.discount, Money::from_major(120));
//! assert_eq!(result.net, Money::from_major(1080));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod draft;
pub mod error;
pub mod money;
pub mod pricing;
pub mod promotion;
pub mod selection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use catalog::{ingest, CatalogEntry, CatalogSnapshot};
pub use draft::{DraftPayload, PromotionDraft};
pub use error::{CartError, CoreError, CoreResult, ModelError, PricingError, SelectionError, ValidationError};
pub use money::Money;
pub use pricing::{price, Contribution, PricingOutcome, PricingResult};
pub use promotion::{
    validate, Campaign, CampaignKind, PromotionGroup, PromotionId, PromotionRecord, ValidPromotion,
};
pub use selection::{options, PromotionOption, Selection};
pub use types::*;
