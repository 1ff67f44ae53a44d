//! # Cart Commands
//!
//! Every edit of the cart clears the selected promotions; the response says
//! whether that happened.

use serde::Serialize;
use tracing::debug;

use cartwise_core::{Cart, Item, ItemId, Money};

use crate::error::ApiResult;
use crate::state::{CatalogState, CheckoutSession, CheckoutState};

/// Cart response including items and subtotal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<Item>,
    pub item_count: usize,
    pub subtotal: Money,
    /// Number of selected promotions after the command.
    pub selected_promotions: usize,
}

impl From<&CheckoutSession> for CartResponse {
    fn from(session: &CheckoutSession) -> Self {
        let cart: &Cart = session.cart();
        CartResponse {
            items: cart.items().to_vec(),
            item_count: cart.len(),
            subtotal: cart.subtotal(),
            selected_promotions: session.selection().len(),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(checkout: &CheckoutState) -> CartResponse {
    debug!("get_cart command");
    checkout.with_session(|s| CartResponse::from(s))
}

/// Lists the item catalog.
pub fn list_items(catalog: &CatalogState) -> Vec<Item> {
    debug!("list_items command");
    catalog.items().to_vec()
}

/// Picks or un-picks an item, as a click on the item card does.
pub fn toggle_item(
    checkout: &CheckoutState,
    catalog: &CatalogState,
    item_id: u32,
) -> ApiResult<CartResponse> {
    debug!(item_id = %item_id, "toggle_item command");
    let item = catalog.item(ItemId::new(item_id))?.clone();

    checkout.with_session_mut(|s| -> ApiResult<CartResponse> {
        s.toggle_item(item)?;
        Ok(CartResponse::from(&*s))
    })
}

/// Adds an item. Fails if it is already in the cart.
pub fn add_to_cart(
    checkout: &CheckoutState,
    catalog: &CatalogState,
    item_id: u32,
) -> ApiResult<CartResponse> {
    debug!(item_id = %item_id, "add_to_cart command");
    let item = catalog.item(ItemId::new(item_id))?.clone();

    checkout.with_session_mut(|s| -> ApiResult<CartResponse> {
        s.add_item(item)?;
        Ok(CartResponse::from(&*s))
    })
}

/// Removes an item from the cart.
pub fn remove_from_cart(checkout: &CheckoutState, item_id: u32) -> ApiResult<CartResponse> {
    debug!(item_id = %item_id, "remove_from_cart command");

    checkout.with_session_mut(|s| -> ApiResult<CartResponse> {
        s.remove_item(ItemId::new(item_id))?;
        Ok(CartResponse::from(&*s))
    })
}

/// Empties the cart and the selection.
pub fn clear_cart(checkout: &CheckoutState) -> CartResponse {
    debug!("clear_cart command");
    checkout.with_session_mut(|s| {
        s.clear();
        CartResponse::from(&*s)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use crate::error::ErrorCode;
    use cartwise_core::Points;

    fn setup() -> (CheckoutState, CatalogState) {
        (
            CheckoutState::new(Points::from_whole(79)),
            CatalogState::load(&CatalogConfig::default()).unwrap(),
        )
    }

    #[test]
    fn test_toggle_item_twice() {
        let (checkout, catalog) = setup();

        let response = toggle_item(&checkout, &catalog, 4).unwrap();
        assert_eq!(response.item_count, 1);
        assert_eq!(response.subtotal, Money::from_major(2000));

        let response = toggle_item(&checkout, &catalog, 4).unwrap();
        assert_eq!(response.item_count, 0);
    }

    #[test]
    fn test_unknown_item_not_found() {
        let (checkout, catalog) = setup();
        let err = toggle_item(&checkout, &catalog, 99).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_add_twice_is_cart_error() {
        let (checkout, catalog) = setup();
        add_to_cart(&checkout, &catalog, 1).unwrap();

        let err = add_to_cart(&checkout, &catalog, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(get_cart(&checkout).item_count, 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let (checkout, catalog) = setup();
        add_to_cart(&checkout, &catalog, 1).unwrap();
        add_to_cart(&checkout, &catalog, 2).unwrap();

        let response = remove_from_cart(&checkout, 1).unwrap();
        assert_eq!(response.subtotal, Money::from_major(350));
        assert!(remove_from_cart(&checkout, 1).is_err());

        assert_eq!(clear_cart(&checkout).item_count, 0);
    }

    #[test]
    fn test_list_items() {
        let (_, catalog) = setup();
        assert_eq!(list_items(&catalog).len(), 8);
    }
}
