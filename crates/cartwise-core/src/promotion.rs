//! # Promotion Model
//!
//! Tagged-variant representation of a promotion and the validation that turns
//! a raw record into one.
//!
//! ## Record → Validated Promotion
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PromotionRecord (raw, optional payload fields)                         │
//! │  { id, name, group, campaign, amount?, percentage?, item_category?,     │
//! │    every_amount?, discount_per_tier? }                                  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  validate() ── InvalidPayload / OutOfRange / InvalidThreshold          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ValidPromotion { id, name, details, campaign: Campaign }              │
//! │                                      │                                  │
//! │     Campaign::FixedAmount { amount } │  one variant per (group, kind), │
//! │     Campaign::PercentageDiscount ... │  each carrying only its fields  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Groups and Campaigns
//! | group    | campaign                          | payload                          |
//! |----------|-----------------------------------|----------------------------------|
//! | Coupon   | FixedAmount                       | amount ≥ 0                       |
//! | Coupon   | PercentageDiscount                | percentage in [0, 100]           |
//! | OnTop    | PercentageDiscountByItemCategory  | item_category, percentage        |
//! | OnTop    | DiscountByPoints                  | percentage                       |
//! | Seasonal | SpecialCampaigns                  | every_amount > 0, per tier ≥ 0   |

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ModelError;
use crate::money::Money;
use crate::types::{ItemCategory, Percentage};

// =============================================================================
// Identity
// =============================================================================

/// Identifier of a promotion, unique within a catalog snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct PromotionId(u32);

impl PromotionId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        PromotionId(id)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PromotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Group
// =============================================================================

/// One of the mutually-exclusive promotion families.
///
/// At most one promotion per group may be selected for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PromotionGroup {
    Coupon,
    OnTop,
    Seasonal,
}

impl PromotionGroup {
    pub const ALL: [PromotionGroup; 3] = [
        PromotionGroup::Coupon,
        PromotionGroup::OnTop,
        PromotionGroup::Seasonal,
    ];

    /// Campaign kinds allowed in this group.
    pub const fn campaigns(&self) -> &'static [CampaignKind] {
        match self {
            PromotionGroup::Coupon => &[CampaignKind::FixedAmount, CampaignKind::PercentageDiscount],
            PromotionGroup::OnTop => &[
                CampaignKind::PercentageDiscountByItemCategory,
                CampaignKind::DiscountByPoints,
            ],
            PromotionGroup::Seasonal => &[CampaignKind::SpecialCampaigns],
        }
    }

    /// Human-readable label as shown in the catalog.
    pub const fn label(&self) -> &'static str {
        match self {
            PromotionGroup::Coupon => "Coupon",
            PromotionGroup::OnTop => "On Top",
            PromotionGroup::Seasonal => "Seasonal",
        }
    }
}

impl fmt::Display for PromotionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Campaign Kind
// =============================================================================

/// The rule variant within a group, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CampaignKind {
    FixedAmount,
    PercentageDiscount,
    PercentageDiscountByItemCategory,
    DiscountByPoints,
    SpecialCampaigns,
}

impl CampaignKind {
    pub const ALL: [CampaignKind; 5] = [
        CampaignKind::FixedAmount,
        CampaignKind::PercentageDiscount,
        CampaignKind::PercentageDiscountByItemCategory,
        CampaignKind::DiscountByPoints,
        CampaignKind::SpecialCampaigns,
    ];

    /// The group this campaign belongs to.
    pub const fn group(&self) -> PromotionGroup {
        match self {
            CampaignKind::FixedAmount | CampaignKind::PercentageDiscount => PromotionGroup::Coupon,
            CampaignKind::PercentageDiscountByItemCategory | CampaignKind::DiscountByPoints => {
                PromotionGroup::OnTop
            }
            CampaignKind::SpecialCampaigns => PromotionGroup::Seasonal,
        }
    }

    /// Human-readable label as shown in the catalog.
    pub const fn label(&self) -> &'static str {
        match self {
            CampaignKind::FixedAmount => "Fixed amount",
            CampaignKind::PercentageDiscount => "Percentage discount",
            CampaignKind::PercentageDiscountByItemCategory => "Percentage discount by item category",
            CampaignKind::DiscountByPoints => "Discount by points",
            CampaignKind::SpecialCampaigns => "Special campaigns",
        }
    }

    /// Payload fields this campaign requires, by record field name.
    pub const fn payload_fields(&self) -> &'static [&'static str] {
        match self {
            CampaignKind::FixedAmount => &["amount"],
            CampaignKind::PercentageDiscount => &["percentage"],
            CampaignKind::PercentageDiscountByItemCategory => &["item_category", "percentage"],
            CampaignKind::DiscountByPoints => &["percentage"],
            CampaignKind::SpecialCampaigns => &["every_amount", "discount_per_tier"],
        }
    }
}

impl fmt::Display for CampaignKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Campaign (payload-narrowed)
// =============================================================================

/// A campaign together with exactly the payload it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[ts(export)]
pub enum Campaign {
    /// Flat amount off. Not capped to the subtotal.
    FixedAmount { amount: Money },

    /// Percentage of the whole subtotal.
    PercentageDiscount { percentage: Percentage },

    /// Percentage of the subtotal of items in one category.
    #[serde(rename_all = "camelCase")]
    PercentageDiscountByItemCategory {
        item_category: ItemCategory,
        percentage: Percentage,
    },

    /// Percentage of the customer's points balance.
    DiscountByPoints { percentage: Percentage },

    /// `discount_per_tier` for every whole `every_amount` of subtotal.
    #[serde(rename_all = "camelCase")]
    SpecialCampaigns {
        every_amount: Money,
        discount_per_tier: Money,
    },
}

impl Campaign {
    pub const fn kind(&self) -> CampaignKind {
        match self {
            Campaign::FixedAmount { .. } => CampaignKind::FixedAmount,
            Campaign::PercentageDiscount { .. } => CampaignKind::PercentageDiscount,
            Campaign::PercentageDiscountByItemCategory { .. } => {
                CampaignKind::PercentageDiscountByItemCategory
            }
            Campaign::DiscountByPoints { .. } => CampaignKind::DiscountByPoints,
            Campaign::SpecialCampaigns { .. } => CampaignKind::SpecialCampaigns,
        }
    }

    pub const fn group(&self) -> PromotionGroup {
        self.kind().group()
    }
}

// =============================================================================
// Raw Record
// =============================================================================

/// A promotion as handed over by the catalog collaborator, before validation.
///
/// Payload fields are all optional here; `validate` checks that exactly the
/// fields of `campaign` are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PromotionRecord {
    pub id: PromotionId,
    pub name: String,
    #[serde(default)]
    pub details: String,
    pub group: PromotionGroup,
    pub campaign: CampaignKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Percentage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_category: Option<ItemCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub every_amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_per_tier: Option<Money>,
}

impl PromotionRecord {
    /// An empty record of the given campaign; payload fields still unset.
    pub fn new(id: u32, name: impl Into<String>, campaign: CampaignKind) -> Self {
        PromotionRecord {
            id: PromotionId::new(id),
            name: name.into(),
            details: String::new(),
            group: campaign.group(),
            campaign,
            amount: None,
            percentage: None,
            item_category: None,
            every_amount: None,
            discount_per_tier: None,
        }
    }

    pub fn fixed_amount(id: u32, name: impl Into<String>, amount: Money) -> Self {
        PromotionRecord {
            amount: Some(amount),
            ..Self::new(id, name, CampaignKind::FixedAmount)
        }
    }

    pub fn percentage_discount(id: u32, name: impl Into<String>, percentage: Percentage) -> Self {
        PromotionRecord {
            percentage: Some(percentage),
            ..Self::new(id, name, CampaignKind::PercentageDiscount)
        }
    }

    pub fn by_item_category(
        id: u32,
        name: impl Into<String>,
        item_category: ItemCategory,
        percentage: Percentage,
    ) -> Self {
        PromotionRecord {
            item_category: Some(item_category),
            percentage: Some(percentage),
            ..Self::new(id, name, CampaignKind::PercentageDiscountByItemCategory)
        }
    }

    pub fn by_points(id: u32, name: impl Into<String>, percentage: Percentage) -> Self {
        PromotionRecord {
            percentage: Some(percentage),
            ..Self::new(id, name, CampaignKind::DiscountByPoints)
        }
    }

    pub fn special_campaign(
        id: u32,
        name: impl Into<String>,
        every_amount: Money,
        discount_per_tier: Money,
    ) -> Self {
        PromotionRecord {
            every_amount: Some(every_amount),
            discount_per_tier: Some(discount_per_tier),
            ..Self::new(id, name, CampaignKind::SpecialCampaigns)
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Names of the payload fields that are set.
    fn present_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.amount.is_some() {
            fields.push("amount");
        }
        if self.percentage.is_some() {
            fields.push("percentage");
        }
        if self.item_category.is_some() {
            fields.push("item_category");
        }
        if self.every_amount.is_some() {
            fields.push("every_amount");
        }
        if self.discount_per_tier.is_some() {
            fields.push("discount_per_tier");
        }
        fields
    }
}

// =============================================================================
// Validated Promotion
// =============================================================================

/// A promotion whose payload is known to match its campaign.
///
/// Only `validate` builds one, so the pricing engine can't mis-read fields
/// for the wrong campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ValidPromotion {
    id: PromotionId,
    name: String,
    details: String,
    campaign: Campaign,
}

impl ValidPromotion {
    #[inline]
    pub fn id(&self) -> PromotionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    #[inline]
    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    #[inline]
    pub fn group(&self) -> PromotionGroup {
        self.campaign.group()
    }

    #[inline]
    pub fn kind(&self) -> CampaignKind {
        self.campaign.kind()
    }
}

#[cfg(test)]
impl ValidPromotion {
    /// Skips validation; lets tests reach the engine's own guards.
    pub(crate) fn unchecked(id: u32, campaign: Campaign) -> Self {
        ValidPromotion {
            id: PromotionId::new(id),
            name: format!("Unchecked {}", id),
            details: String::new(),
            campaign,
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Validates a raw promotion record.
///
/// ## Rules
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. campaign belongs to group           else InvalidPayload            │
/// │  2. exactly the campaign's fields set   else InvalidPayload            │
/// │  3. percentage in [0, 100]               else OutOfRange                │
/// │  4. amount / discount_per_tier ≥ 0       else OutOfRange                │
/// │  5. every_amount < 0                     → OutOfRange                   │
/// │     every_amount = 0                     → InvalidThreshold             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Example
/// ```rust
/// use cartwise_core::money::Money;
/// use cartwise_core::promotion::{validate, PromotionRecord};
///
/// let record = PromotionRecord::fixed_amount(1, "฿50 off", Money::from_major(50));
/// let promotion = validate(&record).unwrap();
/// assert_eq!(promotion.name(), "฿50 off");
/// ```
pub fn validate(record: &PromotionRecord) -> Result<ValidPromotion, ModelError> {
    let id = record.id;
    let kind = record.campaign;

    if kind.group() != record.group {
        return Err(ModelError::InvalidPayload {
            id,
            reason: format!(
                "campaign '{}' does not belong to group '{}'",
                kind, record.group
            ),
        });
    }

    let expected = kind.payload_fields();
    let present = record.present_fields();

    if let Some(missing) = expected.iter().find(|f| !present.contains(*f)) {
        return Err(ModelError::InvalidPayload {
            id,
            reason: format!("'{}' requires {}", kind, missing),
        });
    }
    if let Some(extra) = present.iter().find(|f| !expected.contains(*f)) {
        return Err(ModelError::InvalidPayload {
            id,
            reason: format!("'{}' does not accept {}", kind, extra),
        });
    }

    // Presence was checked above, so the `ok_or` arms below only fire if the
    // field tables and this match drift apart.
    let missing = |field: &'static str| ModelError::InvalidPayload {
        id,
        reason: format!("'{}' requires {}", kind, field),
    };

    let campaign = match kind {
        CampaignKind::FixedAmount => Campaign::FixedAmount {
            amount: non_negative(id, "amount", record.amount.ok_or_else(|| missing("amount"))?)?,
        },
        CampaignKind::PercentageDiscount => Campaign::PercentageDiscount {
            percentage: bounded(id, record.percentage.ok_or_else(|| missing("percentage"))?)?,
        },
        CampaignKind::PercentageDiscountByItemCategory => {
            Campaign::PercentageDiscountByItemCategory {
                item_category: record
                    .item_category
                    .ok_or_else(|| missing("item_category"))?,
                percentage: bounded(id, record.percentage.ok_or_else(|| missing("percentage"))?)?,
            }
        }
        CampaignKind::DiscountByPoints => Campaign::DiscountByPoints {
            percentage: bounded(id, record.percentage.ok_or_else(|| missing("percentage"))?)?,
        },
        CampaignKind::SpecialCampaigns => {
            let every_amount = record.every_amount.ok_or_else(|| missing("every_amount"))?;
            if every_amount.is_negative() {
                return Err(out_of_range_money(id, "every_amount"));
            }
            if every_amount.is_zero() {
                return Err(ModelError::InvalidThreshold {
                    id,
                    field: "every_amount",
                });
            }
            Campaign::SpecialCampaigns {
                every_amount,
                discount_per_tier: non_negative(
                    id,
                    "discount_per_tier",
                    record
                        .discount_per_tier
                        .ok_or_else(|| missing("discount_per_tier"))?,
                )?,
            }
        }
    };

    Ok(ValidPromotion {
        id,
        name: record.name.clone(),
        details: record.details.clone(),
        campaign,
    })
}

fn bounded(id: PromotionId, percentage: Percentage) -> Result<Percentage, ModelError> {
    if percentage.is_within_bounds() {
        Ok(percentage)
    } else {
        Err(ModelError::OutOfRange {
            id,
            field: "percentage",
            min: "0".to_string(),
            max: "100".to_string(),
        })
    }
}

fn non_negative(id: PromotionId, field: &'static str, amount: Money) -> Result<Money, ModelError> {
    if amount.is_negative() {
        Err(out_of_range_money(id, field))
    } else {
        Ok(amount)
    }
}

fn out_of_range_money(id: PromotionId, field: &'static str) -> ModelError {
    ModelError::OutOfRange {
        id,
        field,
        min: "0".to_string(),
        max: "unbounded".to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
