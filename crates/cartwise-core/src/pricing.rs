//! # Pricing Engine
//!
//! Turns a cart and a set of selected promotions into subtotal, discount and
//! net price.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cart empty OR selection empty ──────────────────────────► Unset       │
//! │                                                                         │
//! │  subtotal = Σ item.unit_price                                           │
//! │                                                                         │
//! │  for each selected promotion (independently, any order):               │
//! │    FixedAmount                      amount                              │
//! │    PercentageDiscount               subtotal × pct                      │
//! │    PercentageDiscountByItemCategory Σ matching items × pct              │
//! │    DiscountByPoints                 points × pct                        │
//! │    SpecialCampaigns                 ⌊subtotal / every⌋ × per_tier       │
//! │                                                                         │
//! │  discount = Σ contributions                                             │
//! │  net      = subtotal − discount      (NOT clamped at zero)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `price` is a pure function. It holds no state between calls, so the same
//! `(cart, selection, points)` always yields the same outcome and calls for
//! different carts can run in parallel.

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::PricingError;
use crate::money::Money;
use crate::promotion::{Campaign, CampaignKind, PromotionGroup, PromotionId, ValidPromotion};
use crate::selection::Selection;
use crate::types::Points;

// =============================================================================
// Result Types
// =============================================================================

/// Discount produced by one selected promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Contribution {
    pub promotion_id: PromotionId,
    pub group: PromotionGroup,
    pub campaign: CampaignKind,
    pub amount: Money,
}

/// Computed totals for a cart.
///
/// `net = subtotal - discount`. `net` may be negative when a fixed amount
/// exceeds the subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingResult {
    pub subtotal: Money,
    pub discount: Money,
    pub net: Money,
    /// One entry per selected promotion, in selection order.
    pub contributions: Vec<Contribution>,
}

impl PricingResult {
    /// Contribution of a single promotion, if it was part of the selection.
    pub fn contribution_of(&self, id: PromotionId) -> Option<Money> {
        self.contributions
            .iter()
            .find(|c| c.promotion_id == id)
            .map(|c| c.amount)
    }
}

/// Outcome of a pricing call.
///
/// `Unset` means nothing was computed (no items or no promotions) and must be
/// rendered differently from a computed zero discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "state", content = "result", rename_all = "camelCase")]
#[ts(export)]
pub enum PricingOutcome {
    Unset,
    Priced(PricingResult),
}

impl PricingOutcome {
    pub fn is_unset(&self) -> bool {
        matches!(self, PricingOutcome::Unset)
    }

    pub fn result(&self) -> Option<&PricingResult> {
        match self {
            PricingOutcome::Unset => None,
            PricingOutcome::Priced(result) => Some(result),
        }
    }

    pub fn into_result(self) -> Option<PricingResult> {
        match self {
            PricingOutcome::Unset => None,
            PricingOutcome::Priced(result) => Some(result),
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Prices `cart` under `selection`.
///
/// ## Example
/// ```rust
/// use cartwise_core::cart::Cart;
/// use cartwise_core::money::Money;
/// use cartwise_core::pricing::price;
/// use cartwise_core::promotion::{validate, PromotionRecord};
/// use cartwise_core::selection::Selection;
/// use cartwise_core::types::{Item, ItemCategory, Percentage, Points};
///
/// let cart = Cart::from_items([
///     Item::new(1, "Tops", Money::from_major(300), ItemCategory::Clothing),
///     Item::new(3, "Sandals", Money::from_major(900), ItemCategory::Footwear),
/// ]).unwrap();
///
/// let ten_percent = validate(&PromotionRecord::percentage_discount(
///     2, "10% off", Percentage::from_percent(10),
/// )).unwrap();
/// let selection = Selection::from_promotions([ten_percent]).unwrap();
///
/// let result = price(&cart, &selection, Points::from_whole(79))
///     .unwrap()
///     .into_result()
///     .unwrap();
/// assert_eq!(result.subtotal, Money::from_major(1200));
/// assert_eq!(result.discount, Money::from_major(120));
/// assert_eq!(result.net, Money::from_major(1080));
/// ```
///
/// ## Errors
/// - `InvalidThreshold` if a tiered campaign has a non-positive
///   `every_amount`. Validated promotions never do.
/// - `Overflow` / `TotalOverflow` when a discount or the net leaves the
///   `Money` range, e.g. a tiny tier threshold with a huge per-tier amount.
pub fn price(
    cart: &Cart,
    selection: &Selection,
    points: Points,
) -> Result<PricingOutcome, PricingError> {
    if cart.is_empty() || selection.is_empty() {
        debug!(
            items = cart.len(),
            promotions = selection.len(),
            "Pricing unset: nothing to price"
        );
        return Ok(PricingOutcome::Unset);
    }

    let subtotal = cart.subtotal();

    let contributions = selection
        .iter()
        .map(|promotion| -> Result<Contribution, PricingError> {
            Ok(Contribution {
                promotion_id: promotion.id(),
                group: promotion.group(),
                campaign: promotion.kind(),
                amount: contribution(promotion, cart, subtotal, points)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let discount = Money::checked_sum(contributions.iter().map(|c| c.amount))
        .ok_or(PricingError::TotalOverflow)?;
    let net = subtotal
        .checked_sub(discount)
        .ok_or(PricingError::TotalOverflow)?;

    debug!(
        items = cart.len(),
        promotions = selection.len(),
        subtotal = %subtotal,
        discount = %discount,
        net = %net,
        "Cart priced"
    );

    Ok(PricingOutcome::Priced(PricingResult {
        subtotal,
        discount,
        net,
        contributions,
    }))
}

/// Discount contributed by one promotion, independent of any other.
pub fn contribution(
    promotion: &ValidPromotion,
    cart: &Cart,
    subtotal: Money,
    points: Points,
) -> Result<Money, PricingError> {
    let overflow = || PricingError::Overflow {
        promotion_id: promotion.id(),
    };

    match *promotion.campaign() {
        Campaign::FixedAmount { amount } => Ok(amount),
        Campaign::PercentageDiscount { percentage } => {
            subtotal.checked_percentage_of(percentage).ok_or_else(overflow)
        }
        Campaign::PercentageDiscountByItemCategory {
            item_category,
            percentage,
        } => cart
            .subtotal_for(item_category)
            .checked_percentage_of(percentage)
            .ok_or_else(overflow),
        Campaign::DiscountByPoints { percentage } => points
            .as_money()
            .checked_percentage_of(percentage)
            .ok_or_else(overflow),
        Campaign::SpecialCampaigns {
            every_amount,
            discount_per_tier,
        } => {
            let tiers = subtotal
                .checked_tiers(every_amount)
                .ok_or(PricingError::InvalidThreshold {
                    promotion_id: promotion.id(),
                })?;
            discount_per_tier.checked_times(tiers).ok_or_else(overflow)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promotion::{validate, PromotionRecord};
    use crate::types::{Item, ItemCategory, Percentage};

    fn cart(items: &[(u32, i64, ItemCategory)]) -> Cart {
        Cart::from_items(
            items
                .iter()
                .map(|&(id, price, category)| {
                    Item::new(id, format!("Item {}", id), Money::from_major(price), category)
                }),
        )
        .unwrap()
    }

    fn selection(records: &[PromotionRecord]) -> Selection {
        Selection::from_promotions(records.iter().map(|r| validate(r).unwrap())).unwrap()
    }

    fn priced(cart: &Cart, selection: &Selection, points: Points) -> PricingResult {
        price(cart, selection, points).unwrap().into_result().unwrap()
    }

    #[test]
    fn test_empty_cart_is_unset() {
        let sel = selection(&[PromotionRecord::fixed_amount(1, "Fixed", Money::from_major(50))]);
        let outcome = price(&Cart::new(), &sel, Points::from_whole(79)).unwrap();
        assert!(outcome.is_unset());
    }

    #[test]
    fn test_empty_selection_is_unset() {
        let c = cart(&[(1, 300, ItemCategory::Clothing)]);
        let outcome = price(&c, &Selection::new(), Points::from_whole(79)).unwrap();
        assert_eq!(outcome, PricingOutcome::Unset);
    }

    #[test]
    fn test_fixed_amount_is_not_capped() {
        let c = cart(&[(8, 150, ItemCategory::Accessories)]);
        let sel = selection(&[PromotionRecord::fixed_amount(1, "฿200 off", Money::from_major(200))]);

        let result = priced(&c, &sel, Points::default());
        assert_eq!(result.discount, Money::from_major(200));
        assert_eq!(result.net, Money::from_major(-50));
        assert!(result.net.is_negative());
    }

    #[test]
    fn test_category_discount_without_matches_is_zero() {
        let c = cart(&[(1, 300, ItemCategory::Clothing)]);
        let sel = selection(&[PromotionRecord::by_item_category(
            3,
            "Bags 20%",
            ItemCategory::Bags,
            Percentage::from_percent(20),
        )]);

        let result = priced(&c, &sel, Points::default());
        assert!(result.discount.is_zero());
        assert_eq!(result.net, result.subtotal);
        assert_eq!(result.contribution_of(PromotionId::new(3)), Some(Money::zero()));
    }

    #[test]
    fn test_special_campaign_tiers() {
        let c = cart(&[
            (1, 100, ItemCategory::Clothing),
            (2, 150, ItemCategory::Clothing),
        ]);
        let sel = selection(&[PromotionRecord::special_campaign(
            5,
            "Every ฿100 get ฿20",
            Money::from_major(100),
            Money::from_major(20),
        )]);

        let result = priced(&c, &sel, Points::default());
        assert_eq!(result.subtotal, Money::from_major(250));
        assert_eq!(result.discount, Money::from_major(40));
        assert_eq!(result.net, Money::from_major(210));
    }

    #[test]
    fn test_points_discount_ignores_cart_value() {
        let small = cart(&[(8, 150, ItemCategory::Accessories)]);
        let large = cart(&[(4, 2000, ItemCategory::Footwear)]);
        let sel = selection(&[PromotionRecord::by_points(4, "Points", Percentage::from_percent(50))]);

        let a = priced(&small, &sel, Points::from_whole(79));
        let b = priced(&large, &sel, Points::from_whole(79));
        assert_eq!(a.discount, Money::from_minor(3950));
        assert_eq!(a.discount, b.discount);
    }

    #[test]
    fn test_contributions_are_summed_not_chained() {
        let c = cart(&[
            (1, 300, ItemCategory::Clothing),
            (3, 900, ItemCategory::Footwear),
        ]);
        let sel = selection(&[
            PromotionRecord::percentage_discount(2, "10% off", Percentage::from_percent(10)),
            PromotionRecord::by_item_category(
                3,
                "Footwear 10%",
                ItemCategory::Footwear,
                Percentage::from_percent(10),
            ),
            PromotionRecord::special_campaign(
                5,
                "Every ฿500 get ฿25",
                Money::from_major(500),
                Money::from_major(25),
            ),
        ]);

        let result = priced(&c, &sel, Points::default());
        // 120 + 90 + (1200 / 500 = 2) × 25; each computed on the full subtotal
        assert_eq!(result.discount, Money::from_major(260));
        assert_eq!(result.net, Money::from_major(940));
        assert_eq!(result.contributions.len(), 3);
    }

    #[test]
    fn test_zero_threshold_is_reported_not_panicked() {
        let c = cart(&[(1, 300, ItemCategory::Clothing)]);
        let broken = ValidPromotion::unchecked(
            9,
            Campaign::SpecialCampaigns {
                every_amount: Money::zero(),
                discount_per_tier: Money::from_major(20),
            },
        );
        let sel = Selection::from_promotions([broken]).unwrap();

        assert_eq!(
            price(&c, &sel, Points::default()),
            Err(PricingError::InvalidThreshold {
                promotion_id: PromotionId::new(9)
            })
        );
    }

    #[test]
    fn test_tier_overflow_is_reported_not_panicked() {
        let c = cart(&[(1, 1000, ItemCategory::Clothing)]);
        // 1 satang threshold: 100_000 tiers of ฿1,000,000,000,000 each
        let sel = selection(&[PromotionRecord::special_campaign(
            5,
            "Absurd tiers",
            Money::from_minor(1),
            Money::from_major(1_000_000_000_000),
        )]);

        assert_eq!(
            price(&c, &sel, Points::default()),
            Err(PricingError::Overflow {
                promotion_id: PromotionId::new(5)
            })
        );
    }

    #[test]
    fn test_summed_discount_overflow_is_reported() {
        let c = cart(&[(1, 300, ItemCategory::Clothing)]);
        let sel = selection(&[
            PromotionRecord::fixed_amount(1, "Huge", Money::from_minor(i64::MAX)),
            PromotionRecord::special_campaign(
                5,
                "Every ฿100 get ฿20",
                Money::from_major(100),
                Money::from_major(20),
            ),
        ]);

        assert_eq!(
            price(&c, &sel, Points::default()),
            Err(PricingError::TotalOverflow)
        );
    }

    #[test]
    fn test_result_serializes_with_state_tag() {
        let c = cart(&[(1, 300, ItemCategory::Clothing)]);
        let sel = selection(&[PromotionRecord::fixed_amount(1, "Fixed", Money::from_major(50))]);

        let json = serde_json::to_value(price(&c, &sel, Points::default()).unwrap()).unwrap();
        assert_eq!(json["state"], "priced");
        assert_eq!(json["result"]["net"], 25000);

        let json = serde_json::to_value(PricingOutcome::Unset).unwrap();
        assert_eq!(json["state"], "unset");
    }
}
