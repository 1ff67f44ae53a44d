//! # Pricing Commands

use serde::Serialize;
use tracing::debug;

use cartwise_core::{Points, PricingOutcome};

use crate::error::ApiResult;
use crate::state::CheckoutState;

/// Quote for the current cart and selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub points: Points,
    pub outcome: PricingOutcome,
}

/// Prices the current session.
///
/// `outcome` is `unset` while the cart or the selection is empty.
pub fn quote(checkout: &CheckoutState) -> ApiResult<QuoteResponse> {
    debug!("quote command");
    checkout.with_session(|s| -> ApiResult<QuoteResponse> {
        Ok(QuoteResponse {
            points: s.points(),
            outcome: s.quote()?,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{cart, promotion};
    use crate::config::CatalogConfig;
    use crate::state::CatalogState;
    use cartwise_core::Money;

    fn setup() -> (CheckoutState, CatalogState) {
        (
            CheckoutState::new(Points::from_whole(79)),
            CatalogState::load(&CatalogConfig::default()).unwrap(),
        )
    }

    #[test]
    fn test_quote_unset_until_promotion_selected() {
        let (checkout, catalog) = setup();
        assert!(quote(&checkout).unwrap().outcome.is_unset());

        cart::toggle_item(&checkout, &catalog, 1).unwrap();
        assert!(quote(&checkout).unwrap().outcome.is_unset());

        promotion::select_promotion(&checkout, &catalog, 2).unwrap();
        let result = quote(&checkout).unwrap().outcome.into_result().unwrap();
        assert_eq!(result.net, Money::from_major(270));
    }

    #[test]
    fn test_quote_all_groups() {
        let (checkout, catalog) = setup();
        // Tops 300 + Bottoms 350 + Sandals 900 = 1550
        for id in [1, 2, 3] {
            cart::toggle_item(&checkout, &catalog, id).unwrap();
        }
        for id in [1, 3, 5] {
            promotion::select_promotion(&checkout, &catalog, id).unwrap();
        }

        let result = quote(&checkout).unwrap().outcome.into_result().unwrap();
        // 50 + 15% of 650 + floor(1550 / 300) * 40
        assert_eq!(result.subtotal, Money::from_major(1550));
        assert_eq!(result.discount, Money::from_major_minor(347, 50));
        assert_eq!(result.net, Money::from_major_minor(1202, 50));
    }

    #[test]
    fn test_cart_edit_resets_quote() {
        let (checkout, catalog) = setup();
        cart::toggle_item(&checkout, &catalog, 7).unwrap();
        promotion::select_promotion(&checkout, &catalog, 4).unwrap();
        assert!(!quote(&checkout).unwrap().outcome.is_unset());

        cart::toggle_item(&checkout, &catalog, 8).unwrap();
        assert!(quote(&checkout).unwrap().outcome.is_unset());
    }

    #[test]
    fn test_quote_json_shape() {
        let (checkout, _) = setup();
        let json = serde_json::to_value(quote(&checkout).unwrap()).unwrap();
        assert_eq!(json["outcome"]["state"], "unset");
    }
}
