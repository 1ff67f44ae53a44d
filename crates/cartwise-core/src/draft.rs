//! # Promotion Draft
//!
//! State of the "add promotion" form while it is being filled in.
//!
//! ## Field Reset Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     name  group  campaign  details  payload            │
//! │  on_group_changed    keep  set    clear     clear    clear             │
//! │  on_campaign_changed keep  keep   set       clear    clear             │
//! │  reset               clear clear  clear     clear    clear             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every transition returns a new draft; the old one is left as it was.
//! `submit` turns a complete draft into a [`PromotionRecord`] carrying only
//! the chosen campaign's fields, ready for `promotion::validate`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::promotion::{CampaignKind, PromotionGroup, PromotionId, PromotionRecord};
use crate::money::Money;
use crate::types::{ItemCategory, Percentage};
use crate::validation::{
    parse_amount, parse_percentage, validate_promotion_details, validate_promotion_name,
    ValidationResult,
};

/// Raw payload inputs of the form. Numbers are as typed, in major units or
/// whole percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DraftPayload {
    pub amount: Option<f64>,
    pub percentage: Option<f64>,
    pub item_category: Option<ItemCategory>,
    pub every_amount: Option<f64>,
    pub discount_per_tier: Option<f64>,
}

/// The authoring form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PromotionDraft {
    pub name: String,
    pub details: String,
    pub group: Option<PromotionGroup>,
    pub campaign: Option<CampaignKind>,
    pub payload: DraftPayload,
}

/// Campaigns offered once `group` is chosen.
pub fn campaign_options(group: PromotionGroup) -> &'static [CampaignKind] {
    group.campaigns()
}

impl PromotionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group picker changed. Keeps only the name.
    pub fn on_group_changed(&self, group: PromotionGroup) -> PromotionDraft {
        PromotionDraft {
            name: self.name.clone(),
            group: Some(group),
            ..PromotionDraft::default()
        }
    }

    /// Campaign picker changed. Keeps name and group.
    ///
    /// ## Errors
    /// `NotAllowed` when no group is chosen yet or `campaign` isn't one of
    /// the group's campaigns.
    pub fn on_campaign_changed(&self, campaign: CampaignKind) -> ValidationResult<PromotionDraft> {
        let allowed = self.group.map(campaign_options).unwrap_or(&[]);
        if !allowed.contains(&campaign) {
            return Err(ValidationError::NotAllowed {
                field: "campaign".to_string(),
                allowed: allowed.iter().map(|c| c.label().to_string()).collect(),
            });
        }

        Ok(PromotionDraft {
            name: self.name.clone(),
            group: self.group,
            campaign: Some(campaign),
            ..PromotionDraft::default()
        })
    }

    /// Dialog closed: everything back to defaults.
    pub fn reset(&self) -> PromotionDraft {
        PromotionDraft::default()
    }

    /// Builds the raw record for this draft.
    ///
    /// ## Example
    /// ```rust
    /// use cartwise_core::draft::PromotionDraft;
    /// use cartwise_core::promotion::{validate, CampaignKind, PromotionGroup, PromotionId};
    ///
    /// let mut draft = PromotionDraft::new();
    /// draft.name = "฿50 off".to_string();
    /// let mut draft = draft
    ///     .on_group_changed(PromotionGroup::Coupon)
    ///     .on_campaign_changed(CampaignKind::FixedAmount)
    ///     .unwrap();
    /// draft.details = "Whole cart".to_string();
    /// draft.payload.amount = Some(50.0);
    ///
    /// let record = draft.submit(PromotionId::new(10)).unwrap();
    /// assert!(validate(&record).is_ok());
    /// ```
    pub fn submit(&self, id: PromotionId) -> ValidationResult<PromotionRecord> {
        validate_promotion_name(&self.name)?;
        let group = self.group.ok_or_else(|| required("group"))?;
        let campaign = self.campaign.ok_or_else(|| required("campaign"))?;
        if !campaign_options(group).contains(&campaign) {
            return Err(ValidationError::NotAllowed {
                field: "campaign".to_string(),
                allowed: campaign_options(group)
                    .iter()
                    .map(|c| c.label().to_string())
                    .collect(),
            });
        }
        validate_promotion_details(&self.details)?;

        let mut record = PromotionRecord::new(id.get(), self.name.trim(), campaign)
            .with_details(self.details.trim());
        let payload = &self.payload;

        match campaign {
            CampaignKind::FixedAmount => {
                record.amount = Some(amount_field("amount", payload.amount)?);
            }
            CampaignKind::PercentageDiscount | CampaignKind::DiscountByPoints => {
                record.percentage = Some(percentage_field(payload.percentage)?);
            }
            CampaignKind::PercentageDiscountByItemCategory => {
                record.item_category =
                    Some(payload.item_category.ok_or_else(|| required("item_category"))?);
                record.percentage = Some(percentage_field(payload.percentage)?);
            }
            CampaignKind::SpecialCampaigns => {
                record.every_amount = Some(amount_field("every_amount", payload.every_amount)?);
                record.discount_per_tier =
                    Some(amount_field("discount_per_tier", payload.discount_per_tier)?);
            }
        }

        Ok(record)
    }
}

fn amount_field(field: &str, value: Option<f64>) -> ValidationResult<Money> {
    parse_amount(field, value.ok_or_else(|| required(field))?)
}

fn percentage_field(value: Option<f64>) -> ValidationResult<Percentage> {
    parse_percentage("percentage", value.ok_or_else(|| required("percentage"))?)
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
