//! # Domain Types
//!
//! Input types for the bottle-service pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  PricingForm (flat, as posted by the product form)                     │
//! │        │  TryFrom (validation.rs)                                       │
//! │        ▼                                                                │
//! │  ┌──────────────────────┐                                               │
//! │  │ ProductPricingConfig │                                               │
//! │  │ ──────────────────── │     SaleConfig                                │
//! │  │ purchase_price Money │     ├── Glass(PourSpec)                       │
//! │  │ sale_price     Money │     ├── Shot(PourSpec)                        │
//! │  │ bottle_capacity      │     └── Bottle  (no serving size, no waste)   │
//! │  │ sale ────────────────┼───►                                           │
//! │  └──────────────────────┘     PourSpec { serving_size, waste }          │
//! │                                                                         │
//! │  Volume      u64 microlitres   700 ml = 700_000                         │
//! │  WasteFactor u32 basis points  10% = 1000                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Integer volumes and basis points keep the serving count exact: the floor in
//! `real_servings` never lands on 6.999… because of float noise.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{PricingError, Violation};
use crate::money::Money;

// =============================================================================
// Sale Type
// =============================================================================

/// How a product leaves the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleType {
    /// Poured as a long drink / glass.
    Glass,
    /// Poured as a shot.
    Shot,
    /// Sold as an indivisible whole bottle.
    Bottle,
}

impl SaleType {
    /// Every sale type, in display order.
    pub const ALL: [SaleType; 3] = [SaleType::Glass, SaleType::Shot, SaleType::Bottle];

    /// True when the product is sold in servings poured from a bottle.
    pub const fn is_poured(&self) -> bool {
        matches!(self, SaleType::Glass | SaleType::Shot)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            SaleType::Glass => "GLASS",
            SaleType::Shot => "SHOT",
            SaleType::Bottle => "BOTTLE",
        }
    }
}

impl fmt::Display for SaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaleType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GLASS" => Ok(SaleType::Glass),
            "SHOT" => Ok(SaleType::Shot),
            "BOTTLE" => Ok(SaleType::Bottle),
            _ => Err(PricingError::invalid(
                "sale_type",
                s,
                Violation::NotAllowed {
                    allowed: "GLASS, SHOT, BOTTLE".to_string(),
                },
            )),
        }
    }
}

// =============================================================================
// Unit Conversion
// =============================================================================

/// Direction for converting a decimal form input into integer units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

/// Distance from a whole unit still treated as that unit. Absorbs binary
/// float noise such as `33.3 * 1000.0 = 33300.000000000004`.
const UNIT_TOLERANCE: f64 = 1e-6;

/// Scales `value` by `scale` and rounds to a whole unit in `direction`.
/// Callers check that `value` is finite and non-negative.
pub(crate) fn to_units(value: f64, scale: f64, direction: Rounding) -> u64 {
    let scaled = value * scale;
    let nearest = scaled.round();
    let units = if (scaled - nearest).abs() < UNIT_TOLERANCE {
        nearest
    } else {
        match direction {
            Rounding::Down => scaled.floor(),
            Rounding::Up => scaled.ceil(),
        }
    };
    units as u64
}

// =============================================================================
// Volume
// =============================================================================

/// A liquid volume in microlitres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Volume(u64);

impl Volume {
    pub const MICROLITRES_PER_ML: u64 = 1_000;

    #[inline]
    pub const fn from_ml(ml: u64) -> Self {
        Volume(ml * Self::MICROLITRES_PER_ML)
    }

    #[inline]
    pub const fn from_microlitres(microlitres: u64) -> Self {
        Volume(microlitres)
    }

    #[inline]
    pub const fn microlitres(&self) -> u64 {
        self.0
    }

    /// Millilitres, for display only.
    #[inline]
    pub fn ml(&self) -> f64 {
        self.0 as f64 / Self::MICROLITRES_PER_ML as f64
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ml", self.ml())
    }
}

// =============================================================================
// Waste Factor
// =============================================================================

/// Expected loss (spillage, over-pour) in basis points of theoretical yield.
///
/// 1 basis point = 0.01%, so 1000 bps = 10%. Valid range is 0..=10000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WasteFactor(u32);

impl WasteFactor {
    /// 100% expressed in basis points.
    pub const FULL_BPS: u32 = 10_000;

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        WasteFactor(bps)
    }

    /// Creates a waste factor from a percentage.
    ///
    /// Sub-basis-point input is rounded UP: more waste means fewer servings,
    /// so the stored factor never promises more yield than was entered.
    /// Range checking lives in [`crate::validation::validate_waste_percent`].
    ///
    /// ```rust
    /// use nocturna_core::types::WasteFactor;
    ///
    /// assert_eq!(WasteFactor::from_percentage(10.0).bps(), 1000);
    /// assert_eq!(WasteFactor::from_percentage(10.004).bps(), 1001);
    /// ```
    pub fn from_percentage(pct: f64) -> Self {
        WasteFactor(to_units(pct, 100.0, Rounding::Up) as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Percentage, for display only.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Share of the theoretical yield that survives waste, in bps.
    #[inline]
    pub const fn retained_bps(&self) -> u32 {
        Self::FULL_BPS.saturating_sub(self.0)
    }

    #[inline]
    pub const fn zero() -> Self {
        WasteFactor(0)
    }
}

impl Default for WasteFactor {
    fn default() -> Self {
        WasteFactor::zero()
    }
}

impl fmt::Display for WasteFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// Sale Configuration
// =============================================================================

/// How much is poured per serving and how much is lost doing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PourSpec {
    pub serving_size: Volume,
    pub waste: WasteFactor,
}

/// Sale-type specific configuration.
///
/// The `Bottle` variant has no serving size and no waste factor: a bottle
/// is one indivisible sale unit, so those values cannot influence yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "sale_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleConfig {
    Glass(PourSpec),
    Shot(PourSpec),
    Bottle,
}

impl SaleConfig {
    pub const fn sale_type(&self) -> SaleType {
        match self {
            SaleConfig::Glass(_) => SaleType::Glass,
            SaleConfig::Shot(_) => SaleType::Shot,
            SaleConfig::Bottle => SaleType::Bottle,
        }
    }

    /// The pour, if this sale type has one.
    pub const fn pour(&self) -> Option<&PourSpec> {
        match self {
            SaleConfig::Glass(pour) | SaleConfig::Shot(pour) => Some(pour),
            SaleConfig::Bottle => None,
        }
    }
}

/// A product's commercial configuration, immutable per calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductPricingConfig {
    /// Cost of one bottle.
    pub purchase_price: Money,

    /// Price per serving, or per bottle when `sale` is `Bottle`.
    pub sale_price: Money,

    /// Nominal volume of one bottle.
    pub bottle_capacity: Volume,

    pub sale: SaleConfig,
}

impl ProductPricingConfig {
    #[inline]
    pub const fn sale_type(&self) -> SaleType {
        self.sale.sale_type()
    }
}

// =============================================================================
// Pricing Form
// =============================================================================

/// The flat payload a product form posts on every change.
///
/// Every sale type uses the same shape. `serving_size_ml` and
/// `waste_factor_percent` are optional here and only required once the
/// sale type needs them; for `BOTTLE` they are accepted and ignored.
/// Converted into [`ProductPricingConfig`] via `TryFrom` (see `validation`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingForm {
    pub purchase_price_cents: i64,
    pub sale_price_cents: i64,
    pub bottle_capacity_ml: f64,
    pub sale_type: SaleType,
    #[serde(default)]
    pub serving_size_ml: Option<f64>,
    #[serde(default)]
    pub waste_factor_percent: Option<f64>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_type_parsing() {
        assert_eq!("GLASS".parse::<SaleType>().unwrap(), SaleType::Glass);
        assert_eq!(" shot ".parse::<SaleType>().unwrap(), SaleType::Shot);
        assert_eq!("Bottle".parse::<SaleType>().unwrap(), SaleType::Bottle);

        let err = "PITCHER".parse::<SaleType>().unwrap_err();
        assert_eq!(err.field(), Some("sale_type"));
    }

    #[test]
    fn test_sale_type_serde_names() {
        assert_eq!(serde_json::to_string(&SaleType::Shot).unwrap(), "\"SHOT\"");
        let parsed: SaleType = serde_json::from_str("\"BOTTLE\"").unwrap();
        assert_eq!(parsed, SaleType::Bottle);
    }

    #[test]
    fn test_is_poured() {
        assert!(SaleType::Glass.is_poured());
        assert!(SaleType::Shot.is_poured());
        assert!(!SaleType::Bottle.is_poured());
    }

    #[test]
    fn test_volume_units() {
        let v = Volume::from_ml(700);
        assert_eq!(v.microlitres(), 700_000);
        assert!((v.ml() - 700.0).abs() < f64::EPSILON);
        assert_eq!(v.to_string(), "700ml");
        assert!(Volume::from_ml(0).is_zero());
    }

    #[test]
    fn test_waste_factor() {
        let w = WasteFactor::from_percentage(10.0);
        assert_eq!(w.bps(), 1000);
        assert_eq!(w.retained_bps(), 9000);
        assert_eq!(WasteFactor::from_bps(12_000).retained_bps(), 0);
        assert_eq!(WasteFactor::default(), WasteFactor::zero());
    }

    #[test]
    fn test_waste_factor_rounds_fractional_bps_up() {
        assert_eq!(WasteFactor::from_percentage(10.004).bps(), 1001);
        assert_eq!(WasteFactor::from_percentage(0.001).bps(), 1);
        assert_eq!(WasteFactor::from_percentage(12.5).bps(), 1250);
        assert_eq!(WasteFactor::from_percentage(100.0).bps(), 10_000);
    }

    #[test]
    fn test_to_units_directions() {
        assert_eq!(to_units(33.3334, 1000.0, Rounding::Up), 33_334);
        assert_eq!(to_units(33.3334, 1000.0, Rounding::Down), 33_333);
        // Float noise on an exact decimal is not a fraction
        assert_eq!(to_units(33.3, 1000.0, Rounding::Up), 33_300);
        assert_eq!(to_units(0.7, 1000.0, Rounding::Down), 700);
        assert_eq!(to_units(90.0, 1000.0, Rounding::Up), 90_000);
    }

    #[test]
    fn test_sale_config_serde_is_tagged() {
        let config = SaleConfig::Glass(PourSpec {
            serving_size: Volume::from_ml(90),
            waste: WasteFactor::from_bps(1000),
        });
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["sale_type"], "GLASS");
        assert_eq!(json["serving_size"], 90_000);

        let bottle: SaleConfig = serde_json::from_str(r#"{"sale_type":"BOTTLE"}"#).unwrap();
        assert_eq!(bottle, SaleConfig::Bottle);
        assert_eq!(bottle.sale_type(), SaleType::Bottle);
        assert!(bottle.pour().is_none());
    }

    #[test]
    fn test_pricing_form_optional_fields_default_to_none() {
        let form: PricingForm = serde_json::from_str(
            r#"{
                "purchase_price_cents": 2500,
                "sale_price_cents": 12000,
                "bottle_capacity_ml": 750.0,
                "sale_type": "BOTTLE"
            }"#,
        )
        .unwrap();
        assert_eq!(form.serving_size_ml, None);
        assert_eq!(form.waste_factor_percent, None);
    }
}
