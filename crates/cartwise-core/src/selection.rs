//! # Selection Validator
//!
//! Keeps the set of promotions chosen for the current cart and enforces
//! group exclusivity: at most one selected promotion per group.
//!
//! ## Selection Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog option rendered                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  is_selectable(candidate) ← disable the checkbox when false            │
//! │       │                                                                 │
//! │       ├── same group, other id selected → false (GroupConflict)        │
//! │       ├── candidate itself selected     → true  (allows de-selection)  │
//! │       └── group free                    → true                         │
//! │                                                                         │
//! │  select(candidate)   → adds, or GroupConflict with nothing changed     │
//! │  deselect(id)        → removes, no-op when absent                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The exclusivity rule is enforced before mutation. A conflicting selection
//! is never silently swapped for the existing one.

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::error::SelectionError;
use crate::promotion::{CampaignKind, PromotionGroup, PromotionId, ValidPromotion};

/// Promotions selected for one cart snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Selection {
    promotions: Vec<ValidPromotion>,
}

impl Selection {
    pub fn new() -> Self {
        Selection {
            promotions: Vec::new(),
        }
    }

    /// Builds a selection by selecting each promotion in turn.
    ///
    /// Fails on the first group conflict.
    pub fn from_promotions(
        promotions: impl IntoIterator<Item = ValidPromotion>,
    ) -> Result<Self, SelectionError> {
        let mut selection = Selection::new();
        for promotion in promotions {
            selection.select(promotion)?;
        }
        Ok(selection)
    }

    /// The selected promotion of `group`, if any.
    pub fn selected_in(&self, group: PromotionGroup) -> Option<&ValidPromotion> {
        self.promotions.iter().find(|p| p.group() == group)
    }

    /// Returns `false` iff another promotion of the candidate's group is
    /// already selected.
    ///
    /// ## Example
    /// ```rust
    /// use cartwise_core::money::Money;
    /// use cartwise_core::promotion::{validate, PromotionRecord};
    /// use cartwise_core::selection::Selection;
    /// use cartwise_core::types::Percentage;
    ///
    /// let fixed = validate(&PromotionRecord::fixed_amount(1, "฿50 off", Money::from_major(50))).unwrap();
    /// let pct = validate(&PromotionRecord::percentage_discount(2, "10% off", Percentage::from_percent(10))).unwrap();
    ///
    /// let mut selection = Selection::new();
    /// selection.select(fixed.clone()).unwrap();
    ///
    /// assert!(selection.is_selectable(&fixed)); // can still be de-selected
    /// assert!(!selection.is_selectable(&pct));  // both are Coupons
    /// ```
    pub fn is_selectable(&self, candidate: &ValidPromotion) -> bool {
        match self.selected_in(candidate.group()) {
            Some(current) => current.id() == candidate.id(),
            None => true,
        }
    }

    /// Adds `candidate` to the selection.
    ///
    /// Selecting an already-selected promotion is a no-op. A conflict leaves
    /// the selection untouched.
    pub fn select(&mut self, candidate: ValidPromotion) -> Result<(), SelectionError> {
        if let Some(current) = self.selected_in(candidate.group()) {
            if current.id() == candidate.id() {
                return Ok(());
            }
            debug!(
                group = %candidate.group(),
                selected = %current.id(),
                candidate = %candidate.id(),
                "Selection rejected: group already taken"
            );
            return Err(SelectionError::GroupConflict {
                group: candidate.group(),
                selected: current.id(),
                candidate: candidate.id(),
            });
        }

        debug!(promotion_id = %candidate.id(), group = %candidate.group(), "Promotion selected");
        self.promotions.push(candidate);
        Ok(())
    }

    /// Removes a promotion by id. Returns it when it was selected.
    pub fn deselect(&mut self, id: PromotionId) -> Option<ValidPromotion> {
        let index = self.promotions.iter().position(|p| p.id() == id)?;
        debug!(promotion_id = %id, "Promotion deselected");
        Some(self.promotions.remove(index))
    }

    pub fn contains(&self, id: PromotionId) -> bool {
        self.promotions.iter().any(|p| p.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidPromotion> {
        self.promotions.iter()
    }

    pub fn ids(&self) -> Vec<PromotionId> {
        self.promotions.iter().map(ValidPromotion::id).collect()
    }

    pub fn len(&self) -> usize {
        self.promotions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.promotions.is_empty()
    }

    pub fn clear(&mut self) {
        self.promotions.clear();
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a ValidPromotion;
    type IntoIter = std::slice::Iter<'a, ValidPromotion>;

    fn into_iter(self) -> Self::IntoIter {
        self.promotions.iter()
    }
}

// =============================================================================
// Availability Listing
// =============================================================================

/// A catalog promotion as presented for selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PromotionOption {
    pub id: PromotionId,
    pub name: String,
    pub group: PromotionGroup,
    pub campaign: CampaignKind,
    pub selected: bool,
    /// True when choosing this option would break group exclusivity.
    pub disabled: bool,
}

/// Lists every catalog promotion with its selected/disabled state.
pub fn options(catalog: &[ValidPromotion], selection: &Selection) -> Vec<PromotionOption> {
    catalog
        .iter()
        .map(|p| PromotionOption {
            id: p.id(),
            name: p.name().to_string(),
            group: p.group(),
            campaign: p.kind(),
            selected: selection.contains(p.id()),
            disabled: !selection.is_selectable(p),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::promotion::{validate, PromotionRecord};
    use crate::types::{ItemCategory, Percentage};

    fn fixed(id: u32) -> ValidPromotion {
        validate(&PromotionRecord::fixed_amount(id, "Fixed", Money::from_major(50))).unwrap()
    }

    fn percent(id: u32) -> ValidPromotion {
        validate(&PromotionRecord::percentage_discount(
            id,
            "Percent",
            Percentage::from_percent(10),
        ))
        .unwrap()
    }

    fn on_top(id: u32) -> ValidPromotion {
        validate(&PromotionRecord::by_item_category(
            id,
            "Footwear",
            ItemCategory::Footwear,
            Percentage::from_percent(15),
        ))
        .unwrap()
    }

    #[test]
    fn test_select_one_per_group() {
        let mut selection = Selection::new();
        selection.select(fixed(1)).unwrap();
        selection.select(on_top(3)).unwrap();

        assert_eq!(selection.len(), 2);
        assert_eq!(
            selection.selected_in(PromotionGroup::Coupon).map(ValidPromotion::id),
            Some(PromotionId::new(1))
        );
        assert!(selection.selected_in(PromotionGroup::Seasonal).is_none());
    }

    #[test]
    fn test_second_coupon_is_rejected() {
        let mut selection = Selection::new();
        selection.select(fixed(1)).unwrap();

        let err = selection.select(percent(2)).unwrap_err();
        assert_eq!(
            err,
            SelectionError::GroupConflict {
                group: PromotionGroup::Coupon,
                selected: PromotionId::new(1),
                candidate: PromotionId::new(2),
            }
        );
        assert_eq!(selection.ids(), vec![PromotionId::new(1)]);
    }

    #[test]
    fn test_reselecting_same_promotion_is_noop() {
        let mut selection = Selection::new();
        selection.select(fixed(1)).unwrap();
        selection.select(fixed(1)).unwrap();
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_is_selectable_allows_deselection() {
        let mut selection = Selection::new();
        let first = fixed(1);
        selection.select(first.clone()).unwrap();

        assert!(selection.is_selectable(&first));
        assert!(!selection.is_selectable(&percent(2)));
        assert!(selection.is_selectable(&on_top(3)));
    }

    #[test]
    fn test_deselect_frees_the_group() {
        let mut selection = Selection::new();
        selection.select(fixed(1)).unwrap();

        assert!(selection.deselect(PromotionId::new(1)).is_some());
        assert!(selection.deselect(PromotionId::new(1)).is_none());
        assert!(selection.is_empty());

        selection.select(percent(2)).unwrap();
        assert!(selection.contains(PromotionId::new(2)));
    }

    #[test]
    fn test_from_promotions_stops_on_conflict() {
        let err = Selection::from_promotions([fixed(1), percent(2)]).unwrap_err();
        assert!(matches!(err, SelectionError::GroupConflict { .. }));
    }

    #[test]
    fn test_options_flags() {
        let catalog = vec![fixed(1), percent(2), on_top(3)];
        let mut selection = Selection::new();
        selection.select(catalog[0].clone()).unwrap();

        let listed = options(&catalog, &selection);
        assert_eq!(listed.len(), 3);

        assert!(listed[0].selected && !listed[0].disabled);
        assert!(!listed[1].selected && listed[1].disabled);
        assert!(!listed[2].selected && !listed[2].disabled);
    }
}
