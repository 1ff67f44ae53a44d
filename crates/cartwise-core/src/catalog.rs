//! # Catalog Ingestion
//!
//! Turns promotion entries in the external catalog's wire format into
//! validated promotions.
//!
//! ## Ingestion Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CatalogEntry (wire)                                                   │
//! │  { id, name, categories: "On Top", campaigns: "Discount by points",    │
//! │    Percentage: 50 }                                                     │
//! │        │                                                                │
//! │        ▼  normalize()     labels → group + campaign, numbers → units   │
//! │  PromotionRecord                                                        │
//! │        │                                                                │
//! │        ▼  validate()      payload matches campaign                      │
//! │  ValidPromotion ──► CatalogSnapshot.promotions                         │
//! │                                                                         │
//! │  any failure, or an id already seen ──► CatalogSnapshot.rejected       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is coerced: a record that doesn't fit is rejected and logged,
//! never repaired.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::error::ModelError;
use crate::money::Money;
use crate::promotion::{
    validate, CampaignKind, PromotionGroup, PromotionId, PromotionRecord, ValidPromotion,
};
use crate::types::{ItemCategory, Percentage};
use crate::validation::parse_amount;

// =============================================================================
// Wire Format
// =============================================================================

/// A promotion exactly as the catalog serves it.
///
/// `categories` carries the group label and `campaigns` the campaign label.
/// Payload fields are capitalized on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub details: Option<String>,
    pub categories: String,
    pub campaigns: String,
    #[serde(rename = "Amount", default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(rename = "Percentage", default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(rename = "Category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "Every", default, skip_serializing_if = "Option::is_none")]
    pub every: Option<f64>,
    #[serde(rename = "Discount", default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

fn parse_group(label: &str) -> Option<PromotionGroup> {
    match label.trim() {
        "Coupon" => Some(PromotionGroup::Coupon),
        "On Top" => Some(PromotionGroup::OnTop),
        "Special campaigns" | "Seasonal" => Some(PromotionGroup::Seasonal),
        _ => None,
    }
}

fn parse_campaign(label: &str) -> Option<CampaignKind> {
    CampaignKind::ALL
        .iter()
        .copied()
        .find(|kind| kind.label() == label.trim())
}

impl CatalogEntry {
    /// Splits the wire labels into an explicit group and campaign and
    /// converts payload numbers into engine units.
    ///
    /// The result still has to pass `promotion::validate`.
    ///
    /// ## Legacy Percentage
    /// Older catalog entries of "Percentage discount by item category" keep
    /// the rate in `Amount`. That value is taken as the percentage only when
    /// `Percentage` is absent.
    pub fn normalize(&self) -> Result<PromotionRecord, ModelError> {
        let id = PromotionId::new(self.id);
        let invalid = |reason: String| ModelError::InvalidPayload { id, reason };

        let group = parse_group(&self.categories)
            .ok_or_else(|| invalid(format!("unknown group '{}'", self.categories)))?;
        let campaign = parse_campaign(&self.campaigns)
            .ok_or_else(|| invalid(format!("unknown campaign '{}'", self.campaigns)))?;

        let mut record = PromotionRecord::new(self.id, self.name.clone(), campaign);
        record.group = group;
        record.details = self.details.clone().unwrap_or_default();

        let (amount, percentage) = match campaign {
            CampaignKind::PercentageDiscountByItemCategory => match (self.amount, self.percentage) {
                (Some(_), Some(_)) => {
                    return Err(invalid(
                        "both Amount and Percentage set for a category discount".to_string(),
                    ))
                }
                (Some(legacy), None) => (None, Some(legacy)),
                (None, percentage) => (None, percentage),
            },
            _ => (self.amount, self.percentage),
        };

        record.amount = amount.map(|v| money(id, "amount", v)).transpose()?;
        record.percentage = percentage.map(|v| percent(id, v)).transpose()?;
        record.item_category = self
            .category
            .as_deref()
            .map(|label| {
                label
                    .parse::<ItemCategory>()
                    .map_err(|_| invalid(format!("unknown item category '{}'", label)))
            })
            .transpose()?;
        record.every_amount = self.every.map(|v| money(id, "every_amount", v)).transpose()?;
        record.discount_per_tier = self
            .discount
            .map(|v| money(id, "discount_per_tier", v))
            .transpose()?;

        Ok(record)
    }
}

fn money(id: PromotionId, field: &str, value: f64) -> Result<Money, ModelError> {
    parse_amount(field, value).map_err(|e| ModelError::InvalidPayload {
        id,
        reason: e.to_string(),
    })
}

fn percent(id: PromotionId, value: f64) -> Result<Percentage, ModelError> {
    if value.is_finite() && value < 0.0 {
        return Err(ModelError::OutOfRange {
            id,
            field: "percentage",
            min: "0".to_string(),
            max: "100".to_string(),
        });
    }
    Percentage::from_percent_f64(value).ok_or_else(|| ModelError::InvalidPayload {
        id,
        reason: "percentage is not a finite number".to_string(),
    })
}

// =============================================================================
// Snapshot
// =============================================================================

/// The usable promotions of one catalog fetch, plus what was turned away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    /// In catalog order.
    pub promotions: Vec<ValidPromotion>,
    pub rejected: Vec<ModelError>,
}

impl CatalogSnapshot {
    pub fn get(&self, id: PromotionId) -> Option<&ValidPromotion> {
        self.promotions.iter().find(|p| p.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.promotions.is_empty()
    }
}

/// Normalizes and validates every entry.
///
/// Duplicate ids are rejected after the first occurrence, even when the
/// first occurrence was itself rejected.
///
/// ## Example
/// ```rust
/// use cartwise_core::catalog::{ingest, CatalogEntry};
///
/// let entries: Vec<CatalogEntry> = serde_json::from_str(r#"[
///     { "id": 1, "name": "฿50 off", "categories": "Coupon",
///       "campaigns": "Fixed amount", "Amount": 50 },
///     { "id": 2, "name": "Broken", "categories": "Coupon",
///       "campaigns": "Fixed amount" }
/// ]"#).unwrap();
///
/// let snapshot = ingest(&entries);
/// assert_eq!(snapshot.promotions.len(), 1);
/// assert_eq!(snapshot.rejected.len(), 1);
/// ```
pub fn ingest(entries: &[CatalogEntry]) -> CatalogSnapshot {
    let mut seen = HashSet::new();
    let mut snapshot = CatalogSnapshot::default();

    for entry in entries {
        let id = PromotionId::new(entry.id);
        let result = if seen.insert(id) {
            entry.normalize().and_then(|record| validate(&record))
        } else {
            Err(ModelError::DuplicateId(id))
        };

        match result {
            Ok(promotion) => snapshot.promotions.push(promotion),
            Err(e) => {
                warn!(promotion_id = %id, error = %e, "Catalog entry rejected");
                snapshot.rejected.push(e);
            }
        }
    }

    debug!(
        accepted = snapshot.promotions.len(),
        rejected = snapshot.rejected.len(),
        "Catalog ingested"
    );
    snapshot
}

// =============================================================================
// Unit Tests
// =============================================================================
