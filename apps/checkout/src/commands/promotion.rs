//! # Promotion Commands
//!
//! Listing the catalog and changing the selection.
//!
//! ## Selection Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list_promotions ──► options with selected / disabled flags            │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  select_promotion(id)                                                  │
//! │        ├── unknown id           ──► NOT_FOUND                          │
//! │        ├── group already taken  ──► GROUP_CONFLICT (selection kept)    │
//! │        └── ok                   ──► updated options                    │
//! │                                                                         │
//! │  deselect_promotion(id) ──► updated options (no-op when absent)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use cartwise_core::{validate, PromotionDraft, PromotionId, PromotionOption, ValidPromotion};

use crate::error::{ApiError, ApiResult};
use crate::state::{CatalogState, CheckoutState};

/// Lists every catalog promotion with its current flags.
pub fn list_promotions(checkout: &CheckoutState, catalog: &CatalogState) -> Vec<PromotionOption> {
    debug!("list_promotions command");
    checkout.with_session(|s| s.promotion_options(catalog.promotions()))
}

/// Selects a promotion for the current cart.
pub fn select_promotion(
    checkout: &CheckoutState,
    catalog: &CatalogState,
    promotion_id: u32,
) -> ApiResult<Vec<PromotionOption>> {
    let id = PromotionId::new(promotion_id);
    debug!(promotion_id = %id, "select_promotion command");

    checkout.with_session_mut(|s| -> ApiResult<Vec<PromotionOption>> {
        s.select_promotion(catalog.promotions(), id)?;
        Ok(s.promotion_options(catalog.promotions()))
    })
}

/// Removes a promotion from the selection.
pub fn deselect_promotion(
    checkout: &CheckoutState,
    catalog: &CatalogState,
    promotion_id: u32,
) -> Vec<PromotionOption> {
    let id = PromotionId::new(promotion_id);
    debug!(promotion_id = %id, "deselect_promotion command");

    checkout.with_session_mut(|s| {
        s.deselect_promotion(id);
        s.promotion_options(catalog.promotions())
    })
}

/// Turns an authoring draft into a validated promotion without adding it to
/// the catalog.
pub fn preview_draft(draft: &PromotionDraft, promotion_id: u32) -> ApiResult<ValidPromotion> {
    debug!(promotion_id = %promotion_id, "preview_draft command");
    let record = draft
        .submit(PromotionId::new(promotion_id))
        .map_err(|e| ApiError::validation(e.to_string()))?;
    Ok(validate(&record)?)
}
