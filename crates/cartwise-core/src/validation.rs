//! # Validation Module
//!
//! Field validators for the promotion authoring form.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Authoring form (THIS MODULE + draft)                         │
//! │  ├── Required fields, lengths                                          │
//! │  └── Form numbers → Money / Percentage                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: promotion::validate                                          │
//! │  ├── Payload matches the campaign                                      │
//! │  └── Ranges and thresholds                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cartwise_core::validation::{parse_amount, validate_promotion_name};
//!
//! validate_promotion_name("Summer sale").unwrap();
//! assert_eq!(parse_amount("amount", 50.0).unwrap().minor(), 5000);
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Percentage;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted promotion name.
pub const MAX_NAME_LEN: usize = 100;

/// Longest accepted promotion details text.
pub const MAX_DETAILS_LEN: usize = 500;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a promotion name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_NAME_LEN`] characters
pub fn validate_promotion_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_NAME_LEN)
}

/// Validates the free-form details text of a promotion.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_DETAILS_LEN`] characters
pub fn validate_promotion_details(details: &str) -> ValidationResult<()> {
    validate_text("details", details, MAX_DETAILS_LEN)
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Converts a form amount in major units to [`Money`].
///
/// Sign is kept: a negative amount is reported later by
/// `promotion::validate` as out of range.
///
/// ## Example
/// ```rust
/// use cartwise_core::validation::parse_amount;
///
/// assert_eq!(parse_amount("amount", 12.5).unwrap().minor(), 1250);
/// assert!(parse_amount("amount", f64::NAN).is_err());
/// ```
pub fn parse_amount(field: &str, value: f64) -> ValidationResult<Money> {
    Money::from_major_f64(value).ok_or_else(|| ValidationError::InvalidNumber {
        field: field.to_string(),
        reason: "must be a finite amount".to_string(),
    })
}

/// Converts a form percent value (12.5 = 12.5%) to a [`Percentage`].
///
/// Values above 100 pass through so range checking stays in one place.
pub fn parse_percentage(field: &str, value: f64) -> ValidationResult<Percentage> {
    if value.is_finite() && value < 0.0 {
        return Err(ValidationError::InvalidNumber {
            field: field.to_string(),
            reason: "percentage cannot be negative".to_string(),
        });
    }
    Percentage::from_percent_f64(value).ok_or_else(|| ValidationError::InvalidNumber {
        field: field.to_string(),
        reason: "must be a finite percentage".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_promotion_name() {
        assert!(validate_promotion_name("Discount 50 THB").is_ok());
        assert!(matches!(
            validate_promotion_name("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_promotion_name(&"A".repeat(MAX_NAME_LEN + 1)),
            Err(ValidationError::TooLong { max: MAX_NAME_LEN, .. })
        ));
    }

    #[test]
    fn test_validate_promotion_details() {
        assert!(validate_promotion_details("Cannot be combined with other coupons").is_ok());
        assert_eq!(
            validate_promotion_details(""),
            Err(ValidationError::Required {
                field: "details".to_string()
            })
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Thai text is three bytes per character in UTF-8.
        let name = "ส".repeat(MAX_NAME_LEN);
        assert!(validate_promotion_name(&name).is_ok());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("amount", 50.0).unwrap(), Money::from_major(50));
        assert_eq!(parse_amount("amount", -5.0).unwrap(), Money::from_major(-5));
        assert!(matches!(
            parse_amount("amount", f64::INFINITY),
            Err(ValidationError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(
            parse_percentage("percentage", 15.0).unwrap(),
            Percentage::from_percent(15)
        );
        assert_eq!(
            parse_percentage("percentage", 120.0).unwrap(),
            Percentage::from_percent(120)
        );
        assert!(parse_percentage("percentage", -1.0).is_err());
        assert!(parse_percentage("percentage", f64::NAN).is_err());
    }
}
