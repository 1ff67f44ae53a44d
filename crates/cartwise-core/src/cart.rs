//! # Cart
//!
//! One cart snapshot: the items currently picked, each at quantity 1.
//!
//! ## Invariants
//! - Items are unique by `id` (adding the same item twice is rejected)
//! - Unit prices are non-negative and their total fits in `Money`, so every
//!   subtotal, whole-cart or per-category, is exact
//! - Order of insertion is kept for display; it never affects totals

use serde::Serialize;
use ts_rs::TS;

use crate::error::CartError;
use crate::money::Money;
use crate::types::{Item, ItemCategory, ItemId};

/// The shopping cart for a single pricing computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Cart {
    items: Vec<Item>,
    subtotal: Money,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            subtotal: Money::zero(),
        }
    }

    /// Builds a cart from a list of items, rejecting duplicates.
    ///
    /// ## Example
    /// ```rust
    /// use cartwise_core::cart::Cart;
    /// use cartwise_core::money::Money;
    /// use cartwise_core::types::{Item, ItemCategory};
    ///
    /// let tops = Item::new(1, "Tops", Money::from_major(300), ItemCategory::Clothing);
    /// let cart = Cart::from_items([tops.clone()]).unwrap();
    /// assert_eq!(cart.subtotal(), Money::from_major(300));
    ///
    /// assert!(Cart::from_items([tops.clone(), tops]).is_err());
    /// ```
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self, CartError> {
        let mut cart = Cart::new();
        for item in items {
            cart.add(item)?;
        }
        Ok(cart)
    }

    /// Adds an item.
    ///
    /// ## Errors
    /// - `DuplicateItem` if an item with the same id is already present
    /// - `NegativePrice` if the unit price is below zero
    /// - `SubtotalOverflow` if the new subtotal wouldn't fit in `Money`
    pub fn add(&mut self, item: Item) -> Result<(), CartError> {
        if self.contains(item.id) {
            return Err(CartError::DuplicateItem(item.id));
        }
        if item.unit_price.is_negative() {
            return Err(CartError::NegativePrice(item.id));
        }
        self.subtotal = self
            .subtotal
            .checked_add(item.unit_price)
            .ok_or(CartError::SubtotalOverflow(item.id))?;
        self.items.push(item);
        Ok(())
    }

    /// Removes an item by id.
    pub fn remove(&mut self, id: ItemId) -> Result<Item, CartError> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(CartError::ItemNotInCart(id))?;
        let item = self.items.remove(index);
        self.subtotal -= item.unit_price;
        Ok(item)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of unit prices of all items.
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// Sum of unit prices of items in `category`. Zero when none match.
    ///
    /// Never above `subtotal()`, since prices are non-negative.
    pub fn subtotal_for(&self, category: ItemCategory) -> Money {
        self.items
            .iter()
            .filter(|i| i.category == category)
            .fold(Money::zero(), |total, i| total + i.unit_price)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.subtotal = Money::zero();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, price: i64, category: ItemCategory) -> Item {
        Item::new(id, format!("Item {}", id), Money::from_major(price), category)
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        cart.add(item(1, 300, ItemCategory::Clothing)).unwrap();
        cart.add(item(3, 900, ItemCategory::Footwear)).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.subtotal(), Money::from_major(1200));
    }

    #[test]
    fn test_cart_rejects_duplicate_item() {
        let mut cart = Cart::new();
        cart.add(item(1, 300, ItemCategory::Clothing)).unwrap();

        let err = cart.add(item(1, 300, ItemCategory::Clothing)).unwrap_err();
        assert_eq!(err, CartError::DuplicateItem(ItemId::new(1)));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_cart_remove_item() {
        let mut cart = Cart::from_items([
            item(1, 300, ItemCategory::Clothing),
            item(2, 350, ItemCategory::Clothing),
        ])
        .unwrap();

        let removed = cart.remove(ItemId::new(1)).unwrap();
        assert_eq!(removed.id, ItemId::new(1));
        assert_eq!(cart.subtotal(), Money::from_major(350));

        assert_eq!(
            cart.remove(ItemId::new(1)),
            Err(CartError::ItemNotInCart(ItemId::new(1)))
        );
    }

    #[test]
    fn test_cart_rejects_negative_price() {
        let mut cart = Cart::new();
        let refund = Item::new(9, "Refund", Money::from_major(-10), ItemCategory::Bags);

        assert_eq!(cart.add(refund), Err(CartError::NegativePrice(ItemId::new(9))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_rejects_subtotal_overflow() {
        let huge = Money::from_minor(i64::MAX - 100);
        let mut cart = Cart::from_items([Item::new(1, "Yacht", huge, ItemCategory::Accessories)]).unwrap();

        let err = cart
            .add(Item::new(2, "Anchor", Money::from_minor(101), ItemCategory::Accessories))
            .unwrap_err();
        assert_eq!(err, CartError::SubtotalOverflow(ItemId::new(2)));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.subtotal(), huge);

        cart.add(Item::new(3, "Rope", Money::from_minor(100), ItemCategory::Accessories))
            .unwrap();
        assert_eq!(cart.subtotal(), Money::from_minor(i64::MAX));
        assert_eq!(cart.subtotal_for(ItemCategory::Accessories), Money::from_minor(i64::MAX));
    }

    #[test]
    fn test_subtotal_for_category() {
        let cart = Cart::from_items([
            item(1, 300, ItemCategory::Clothing),
            item(3, 900, ItemCategory::Footwear),
            item(4, 2000, ItemCategory::Footwear),
        ])
        .unwrap();

        assert_eq!(cart.subtotal_for(ItemCategory::Footwear), Money::from_major(2900));
        assert_eq!(cart.subtotal_for(ItemCategory::Bags), Money::zero());
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::from_items([item(1, 300, ItemCategory::Clothing)]).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.subtotal().is_zero());
    }
}
