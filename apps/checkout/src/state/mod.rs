//! # State Module
//!
//! Manages application state for the checkout app.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────────┐    │
//! │  │     CheckoutState        │      │        CatalogState          │    │
//! │  │                          │      │                              │    │
//! │  │  Arc<Mutex<              │      │  CatalogSnapshot (promos)    │    │
//! │  │    CheckoutSession       │      │  Vec<Item>                   │    │
//! │  │  >>                      │      │                              │    │
//! │  │  cart, selection, points │      │                              │    │
//! │  └──────────────────────────┘      └──────────────────────────────┘    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CheckoutState: Protected by Arc<Mutex<T>> for exclusive access      │
//! │  • CatalogState: Read-only after loading                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod session;

pub use catalog::{CatalogError, CatalogState};
pub use session::{CheckoutSession, CheckoutState};
