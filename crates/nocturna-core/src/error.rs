//! # Error Types
//!
//! Domain-specific error types for nocturna-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  PricingError                                                           │
//! │  ├── InvalidConfiguration  - a form/config field breaks a rule         │
//! │  │     └── Violation        - which rule (positive, range, required)   │
//! │  ├── Overflow              - a money product left the i64 range        │
//! │  └── Settings / InvalidSettings - settings text could not be used     │
//! │                                                                         │
//! │  Flow: Violation → PricingError → host app → form validation message   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A "not computable" margin is NOT an error. It is a regular result state,
//! see [`crate::metrics::Margin`].

use thiserror::Error;

// =============================================================================
// Violation
// =============================================================================

/// The rule a configuration field failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// Value must be strictly greater than zero.
    #[error("must be positive")]
    MustBePositive,

    /// Value must be zero or greater.
    #[error("must not be negative")]
    MustNotBeNegative,

    /// Value must be a finite number.
    #[error("must be a finite number")]
    NotFinite,

    /// Value is outside the accepted range.
    #[error("must be between {min} and {max}")]
    OutOfRange { min: String, max: String },

    /// Value is not one of the accepted names.
    #[error("must be one of: {allowed}")]
    NotAllowed { allowed: String },

    /// A field that the sale type needs is missing.
    #[error("is required for {sale_type} sales")]
    Required { sale_type: String },

    /// The product is sold only as a whole bottle but a pour was expected.
    #[error("must be a poured sale type (GLASS or SHOT)")]
    NotPourable,
}

// =============================================================================
// Pricing Error
// =============================================================================

/// Errors returned by the pricing engine.
///
/// Every failure is surfaced immediately. The engine never substitutes a
/// default and never returns partially computed metrics.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A precondition on the pricing input was violated.
    ///
    /// ## User Workflow
    /// ```text
    /// Form: bottle capacity = 0
    ///      │
    ///      ▼
    /// compute_yield_metrics()
    ///      │
    ///      ▼
    /// InvalidConfiguration { field: "bottle_capacity_ml", value: "0", .. }
    ///      │
    ///      ▼
    /// UI shows: "bottle_capacity_ml must be positive"
    /// ```
    #[error("Invalid configuration: {field} {violation} (got {value})")]
    InvalidConfiguration {
        field: String,
        value: String,
        violation: Violation,
    },

    /// A monetary product did not fit in i64 cents.
    #[error("Arithmetic overflow while computing {quantity}")]
    Overflow { quantity: String },

    /// Settings text is not valid TOML for [`crate::config::PricingSettings`].
    #[error("Settings parse error: {0}")]
    Settings(#[from] toml::de::Error),

    /// Settings parsed but hold inconsistent values.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

impl PricingError {
    /// Shorthand for building an [`PricingError::InvalidConfiguration`].
    pub fn invalid(field: &str, value: impl ToString, violation: Violation) -> Self {
        PricingError::InvalidConfiguration {
            field: field.to_string(),
            value: value.to_string(),
            violation,
        }
    }

    /// Name of the offending field, if this is a configuration error.
    pub fn field(&self) -> Option<&str> {
        match self {
            PricingError::InvalidConfiguration { field, .. } => Some(field),
            _ => None,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PricingError::invalid("bottle_capacity_ml", 0, Violation::MustBePositive);
        assert_eq!(
            err.to_string(),
            "Invalid configuration: bottle_capacity_ml must be positive (got 0)"
        );

        let err = PricingError::invalid(
            "serving_size_ml",
            "none",
            Violation::Required {
                sale_type: "GLASS".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "Invalid configuration: serving_size_ml is required for GLASS sales (got none)"
        );
    }

    #[test]
    fn test_field_accessor() {
        let err = PricingError::invalid("sale_price", -1, Violation::MustNotBeNegative);
        assert_eq!(err.field(), Some("sale_price"));

        let err = PricingError::InvalidSettings("bad".to_string());
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_toml_error_converts() {
        let toml_err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err: PricingError = toml_err.into();
        assert!(matches!(err, PricingError::Settings(_)));
    }
}
