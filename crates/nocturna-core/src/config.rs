//! # Pricing Settings
//!
//! Venue-level settings for presenting pricing results.
//!
//! ## Configuration Format
//! ```toml
//! # pricing.toml
//! currency_symbol = "€"
//!
//! [margin_thresholds]
//! excellent_above = 400.0   # % margin labelled "excellent"
//! very_good_above = 200.0   # % margin labelled "very good"
//! ```
//!
//! The host application reads the file; this crate only parses the text
//! ([`PricingSettings::from_toml_str`]). Sale-type presets are fixed and
//! deliberately absent here.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PricingError, PricingResult};
use crate::metrics::MarginRating;
use crate::money::DEFAULT_CURRENCY_SYMBOL;

// =============================================================================
// Margin Thresholds
// =============================================================================

/// Percentage cut-offs for [`MarginRating`]. A margin must be strictly above
/// a threshold to earn its label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginThresholds {
    #[serde(default = "default_excellent_above")]
    pub excellent_above: f64,

    #[serde(default = "default_very_good_above")]
    pub very_good_above: f64,
}

fn default_excellent_above() -> f64 {
    400.0
}

fn default_very_good_above() -> f64 {
    200.0
}

impl Default for MarginThresholds {
    fn default() -> Self {
        MarginThresholds {
            excellent_above: default_excellent_above(),
            very_good_above: default_very_good_above(),
        }
    }
}

impl MarginThresholds {
    /// Rates a computed margin percentage.
    pub fn rate(&self, percent: f64) -> MarginRating {
        if percent > self.excellent_above {
            MarginRating::Excellent
        } else if percent > self.very_good_above {
            MarginRating::VeryGood
        } else {
            MarginRating::Moderate
        }
    }
}

// =============================================================================
// Pricing Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Symbol used in cashier-facing summaries.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default)]
    pub margin_thresholds: MarginThresholds,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            currency_symbol: default_currency_symbol(),
            margin_thresholds: MarginThresholds::default(),
        }
    }
}

impl PricingSettings {
    /// Parses and validates settings from TOML text. Missing keys take
    /// their defaults; an empty string yields `PricingSettings::default()`.
    pub fn from_toml_str(contents: &str) -> PricingResult<Self> {
        let settings: PricingSettings = toml::from_str(contents)?;
        settings.validate()?;
        debug!(?settings, "loaded pricing settings");
        Ok(settings)
    }

    /// Serializes the settings back to TOML.
    pub fn to_toml_string(&self) -> PricingResult<String> {
        toml::to_string_pretty(self).map_err(|e| PricingError::InvalidSettings(e.to_string()))
    }

    pub fn validate(&self) -> PricingResult<()> {
        let t = &self.margin_thresholds;
        if !t.excellent_above.is_finite() || !t.very_good_above.is_finite() {
            return Err(PricingError::InvalidSettings(
                "margin thresholds must be finite numbers".to_string(),
            ));
        }
        if t.excellent_above <= t.very_good_above {
            return Err(PricingError::InvalidSettings(format!(
                "excellent_above ({}) must be greater than very_good_above ({})",
                t.excellent_above, t.very_good_above
            )));
        }
        if self.currency_symbol.trim().is_empty() {
            return Err(PricingError::InvalidSettings(
                "currency_symbol cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = PricingSettings::default();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.margin_thresholds.excellent_above, 400.0);
        assert_eq!(settings.margin_thresholds.very_good_above, 200.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let settings = PricingSettings::from_toml_str("").unwrap();
        assert_eq!(settings, PricingSettings::default());
    }

    #[test]
    fn test_partial_toml() {
        let settings = PricingSettings::from_toml_str(
            r#"
            currency_symbol = "$"

            [margin_thresholds]
            excellent_above = 300.0
            "#,
        )
        .unwrap();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.margin_thresholds.excellent_above, 300.0);
        assert_eq!(settings.margin_thresholds.very_good_above, 200.0);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let err = PricingSettings::from_toml_str(
            r#"
            [margin_thresholds]
            excellent_above = 100.0
            very_good_above = 150.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::InvalidSettings(_)));

        let settings = PricingSettings {
            currency_symbol: "  ".to_string(),
            ..PricingSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = PricingSettings::from_toml_str("currency_symbol = ").unwrap_err();
        assert!(matches!(err, PricingError::Settings(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let settings = PricingSettings::default();
        let text = settings.to_toml_string().unwrap();
        assert!(text.contains("[margin_thresholds]"));
        assert_eq!(PricingSettings::from_toml_str(&text).unwrap(), settings);
    }

    #[test]
    fn test_rate_thresholds() {
        let t = MarginThresholds::default();
        assert_eq!(t.rate(401.0), MarginRating::Excellent);
        assert_eq!(t.rate(201.0), MarginRating::VeryGood);
        assert_eq!(t.rate(0.0), MarginRating::Moderate);
    }
}
