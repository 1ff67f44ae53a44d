//! # API Error Type
//!
//! Unified error type for checkout commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Cartwise Checkout                      │
//! │                                                                         │
//! │  Command Function                                                      │
//! │  Result<T, ApiError>                                                   │
//! │         │                                                               │
//! │         ├── SelectionError::GroupConflict ──► GROUP_CONFLICT           │
//! │         ├── CartError / unknown ids       ──► CART_ERROR / NOT_FOUND   │
//! │         ├── ModelError                    ──► INVALID_PROMOTION        │
//! │         ├── ValidationError               ──► VALIDATION_ERROR         │
//! │         ├── PricingError                  ──► PRICING_ERROR            │
//! │         └── ConfigError                   ──► CONFIG_ERROR             │
//! │                                                                         │
//! │  Serialized for the caller:                                            │
//! │  { "code": "GROUP_CONFLICT", "message": "Cannot select promotion 2..." }│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use cartwise_core::{CartError, CoreError, ModelError, PricingError, SelectionError};

use crate::config::ConfigError;

/// API error returned from checkout commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Promotion not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown item or promotion id
    NotFound,

    /// Authoring form input failed
    ValidationError,

    /// Promotion record doesn't fit its campaign
    InvalidPromotion,

    /// Another promotion of the same group is selected
    GroupConflict,

    /// Cart operation failed
    CartError,

    /// Pricing guard tripped
    PricingError,

    /// Configuration couldn't be loaded
    ConfigError,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

impl From<SelectionError> for ApiError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::GroupConflict { .. } => {
                ApiError::new(ErrorCode::GroupConflict, err.to_string())
            }
            SelectionError::UnknownPromotion(id) => ApiError::not_found("Promotion", id),
        }
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::UnknownItem(id) => ApiError::not_found("Item", id),
            CartError::DuplicateItem(_)
            | CartError::ItemNotInCart(_)
            | CartError::NegativePrice(_)
            | CartError::SubtotalOverflow(_) => {
                ApiError::new(ErrorCode::CartError, err.to_string())
            }
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        ApiError::new(ErrorCode::InvalidPromotion, err.to_string())
    }
}

impl From<PricingError> for ApiError {
    fn from(err: PricingError) -> Self {
        tracing::error!(error = %err, "Pricing failed");
        ApiError::new(ErrorCode::PricingError, err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Model(e) => e.into(),
            CoreError::Selection(e) => e.into(),
            CoreError::Cart(e) => e.into(),
            CoreError::Pricing(e) => e.into(),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for commands.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cartwise_core::{ItemId, PromotionGroup, PromotionId, ValidationError};

    #[test]
    fn test_group_conflict_code() {
        let err: ApiError = CoreError::from(SelectionError::GroupConflict {
            group: PromotionGroup::Coupon,
            selected: PromotionId::new(1),
            candidate: PromotionId::new(2),
        })
        .into();
        assert_eq!(err.code, ErrorCode::GroupConflict);
        assert!(err.message.contains("already selected"));
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let err: ApiError = CartError::UnknownItem(ItemId::new(99)).into();
        assert_eq!(err, ApiError::not_found("Item", 99));
        assert_eq!(err.message, "Item not found: 99");

        let err: ApiError = SelectionError::UnknownPromotion(PromotionId::new(42)).into();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_other_core_errors() {
        let err: ApiError = CoreError::from(ValidationError::Required {
            field: "name".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err: ApiError = CoreError::from(PricingError::InvalidThreshold {
            promotion_id: PromotionId::new(5),
        })
        .into();
        assert_eq!(err.code, ErrorCode::PricingError);
    }

    #[test]
    fn test_serialization_shape() {
        let err = ApiError::not_found("Promotion", 42);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Promotion not found: 42");
    }
}
