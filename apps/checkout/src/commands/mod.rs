//! # Commands Module
//!
//! Operations exposed by the checkout app. The CLI calls these; they'd be the
//! same for any other front end.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── cart.rs       ◄─── Cart manipulation
//! ├── promotion.rs  ◄─── Promotion listing and selection
//! └── pricing.rs    ◄─── Quote for the current cart
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the session
//! fn get_cart(checkout: &CheckoutState) -> CartResponse
//!
//! // Needs both
//! fn select_promotion(checkout: &CheckoutState, catalog: &CatalogState, id: u32)
//! ```

pub mod cart;
pub mod pricing;
pub mod promotion;
