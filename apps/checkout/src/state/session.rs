//! # Checkout Session
//!
//! The cart, the selected promotions and the customer's points for one
//! checkout.
//!
//! ## Ordering Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Operations                                   │
//! │                                                                         │
//! │  Action                 Session Change                                 │
//! │  ──────                 ──────────────                                 │
//! │                                                                         │
//! │  toggle/add/remove ───► cart changes, selection CLEARED                │
//! │                                                                         │
//! │  select_promotion ────► validator adds it, or GroupConflict            │
//! │                                                                         │
//! │  deselect_promotion ──► removed; empty selection ⇒ quote is Unset      │
//! │                                                                         │
//! │  quote ───────────────► price(cart, selection, points)                 │
//! │                                                                         │
//! │  clear ───────────────► everything back to empty                       │
//! │                                                                         │
//! │  NOTE: Selections are scoped to one cart snapshot. A discount chosen   │
//! │        for one set of items never survives an edit of that set.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use cartwise_core::{
    options, price, Cart, CartError, CatalogSnapshot, Item, ItemId, Points, PricingError,
    PricingOutcome, PromotionId, PromotionOption, Selection, SelectionError,
};

/// One customer's checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    cart: Cart,
    selection: Selection,
    points: Points,
    /// When the session was created or last cleared
    started_at: DateTime<Utc>,
}

impl CheckoutSession {
    pub fn new(points: Points) -> Self {
        CheckoutSession {
            cart: Cart::new(),
            selection: Selection::new(),
            points,
            started_at: Utc::now(),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn points(&self) -> Points {
        self.points
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Adds the item if absent, removes it if present.
    ///
    /// Returns `true` when the item is in the cart afterwards. A rejected add
    /// leaves cart and selection untouched.
    pub fn toggle_item(&mut self, item: Item) -> Result<bool, CartError> {
        let present = match self.cart.remove(item.id) {
            Ok(_) => false,
            Err(CartError::ItemNotInCart(_)) => {
                self.cart.add(item)?;
                true
            }
            Err(err) => return Err(err),
        };
        self.cart_changed();
        Ok(present)
    }

    pub fn add_item(&mut self, item: Item) -> Result<(), CartError> {
        self.cart.add(item)?;
        self.cart_changed();
        Ok(())
    }

    pub fn remove_item(&mut self, id: ItemId) -> Result<Item, CartError> {
        let item = self.cart.remove(id)?;
        self.cart_changed();
        Ok(item)
    }

    fn cart_changed(&mut self) {
        if !self.selection.is_empty() {
            debug!(
                cleared = self.selection.len(),
                "Cart changed, clearing selected promotions"
            );
            self.selection.clear();
        }
    }

    /// Selects a catalog promotion by id through the one-per-group rule.
    pub fn select_promotion(
        &mut self,
        catalog: &CatalogSnapshot,
        id: PromotionId,
    ) -> Result<(), SelectionError> {
        let promotion = catalog
            .get(id)
            .ok_or(SelectionError::UnknownPromotion(id))?;
        self.selection.select(promotion.clone())
    }

    /// Returns `true` if the promotion was selected.
    pub fn deselect_promotion(&mut self, id: PromotionId) -> bool {
        self.selection.deselect(id).is_some()
    }

    /// Every catalog promotion with its selected/disabled flags.
    pub fn promotion_options(&self, catalog: &CatalogSnapshot) -> Vec<PromotionOption> {
        options(&catalog.promotions, &self.selection)
    }

    /// Prices the current cart. `Unset` while cart or selection is empty.
    pub fn quote(&self) -> Result<PricingOutcome, PricingError> {
        price(&self.cart, &self.selection, self.points)
    }

    /// Empties cart and selection. Points are kept.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.selection.clear();
        self.started_at = Utc::now();
    }
}

/// Shared checkout session.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<CheckoutSession>>`: every command either reads or edits
/// the whole session, and edits must not interleave. A poisoned lock is
/// recovered, since no session operation leaves it half-updated.
#[derive(Debug, Clone)]
pub struct CheckoutState {
    session: Arc<Mutex<CheckoutSession>>,
}

impl CheckoutState {
    pub fn new(points: Points) -> Self {
        CheckoutState {
            session: Arc::new(Mutex::new(CheckoutSession::new(points))),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust
    /// use cartwise_checkout::state::CheckoutState;
    /// use cartwise_core::Points;
    ///
    /// let state = CheckoutState::new(Points::from_whole(79));
    /// assert!(state.with_session(|s| s.cart().is_empty()));
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CheckoutSession) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Executes a function with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CheckoutSession) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }
}
