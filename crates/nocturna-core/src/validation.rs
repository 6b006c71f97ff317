//! # Validation Module
//!
//! Precondition checks for the pricing engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Product form (frontend)                                      │
//! │  └── Immediate feedback on empty inputs                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: PricingForm → ProductPricingConfig (THIS MODULE)            │
//! │  ├── Float inputs checked (finite, positive, in range)                 │
//! │  └── Sale-type specific fields required only where they matter         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: ProductPricingConfig::validate()                             │
//! │  └── Re-checked by every calculation, configs can be built by hand    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nocturna_core::types::{PricingForm, ProductPricingConfig, SaleType};
//!
//! let form = PricingForm {
//!     purchase_price_cents: 1000,
//!     sale_price_cents: 300,
//!     bottle_capacity_ml: 700.0,
//!     sale_type: SaleType::Glass,
//!     serving_size_ml: Some(90.0),
//!     waste_factor_percent: Some(10.0),
//! };
//! let config = ProductPricingConfig::try_from(&form).unwrap();
//! assert_eq!(config.sale_type(), SaleType::Glass);
//! ```

use tracing::{debug, warn};

use crate::error::{PricingError, PricingResult, Violation};
use crate::money::Money;
use crate::stock::BottleStock;
use crate::types::{
    to_units, PourSpec, PricingForm, ProductPricingConfig, Rounding, SaleConfig, SaleType, Volume,
    WasteFactor,
};
use crate::MAX_VOLUME_ML;

/// Field names as reported in [`PricingError::InvalidConfiguration`].
pub mod fields {
    pub const PURCHASE_PRICE: &str = "purchase_price";
    pub const SALE_PRICE: &str = "sale_price";
    pub const BOTTLE_CAPACITY_ML: &str = "bottle_capacity_ml";
    pub const SERVING_SIZE_ML: &str = "serving_size_ml";
    pub const WASTE_FACTOR_PERCENT: &str = "waste_factor_percent";
    pub const SALE_TYPE: &str = "sale_type";
    pub const GLASS_PRICE: &str = "glass_price";
    pub const VIP_BOTTLE_PRICE: &str = "vip_bottle_price";
    pub const STOCK_BOTTLES: &str = "stock_bottles";
}

// =============================================================================
// Typed Validators
// =============================================================================

/// Validates a price. Zero is allowed (free or comped stock).
///
/// ```rust
/// use nocturna_core::money::Money;
/// use nocturna_core::validation::validate_price;
///
/// assert!(validate_price("sale_price", Money::from_cents(0)).is_ok());
/// assert!(validate_price("sale_price", Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(field: &str, price: Money) -> PricingResult<()> {
    if price.is_negative() {
        return Err(PricingError::invalid(field, price.cents(), Violation::MustNotBeNegative));
    }
    Ok(())
}

/// Validates a volume that must hold something.
pub fn validate_volume(field: &str, volume: Volume) -> PricingResult<()> {
    if volume.is_zero() {
        return Err(PricingError::invalid(field, volume.ml(), Violation::MustBePositive));
    }
    Ok(())
}

/// Validates a waste factor (0% to 100%).
pub fn validate_waste(waste: WasteFactor) -> PricingResult<()> {
    if waste.bps() > WasteFactor::FULL_BPS {
        return Err(PricingError::invalid(
            fields::WASTE_FACTOR_PERCENT,
            waste.percentage(),
            percent_range(),
        ));
    }
    Ok(())
}

// =============================================================================
// Form Input Validators
// =============================================================================

/// Converts a millilitre input into a [`Volume`].
///
/// ## Rules
/// - Must be a finite number
/// - Must be positive, also after rounding to whole microlitres
/// - Must not exceed `MAX_VOLUME_ML`
///
/// ## Rounding
/// Sub-microlitre input is rounded in `rounding`'s direction. Bottle
/// capacities round [`Rounding::Down`] and serving sizes [`Rounding::Up`],
/// so neither can raise the serving count above what was entered.
///
/// ```rust
/// use nocturna_core::types::{Rounding, Volume};
/// use nocturna_core::validation::validate_volume_ml;
///
/// let serving = validate_volume_ml("serving_size_ml", 33.3334, Rounding::Up).unwrap();
/// assert_eq!(serving, Volume::from_microlitres(33_334));
/// ```
pub fn validate_volume_ml(field: &str, ml: f64, rounding: Rounding) -> PricingResult<Volume> {
    if !ml.is_finite() {
        return Err(PricingError::invalid(field, ml, Violation::NotFinite));
    }
    if ml <= 0.0 {
        return Err(PricingError::invalid(field, ml, Violation::MustBePositive));
    }
    if ml > MAX_VOLUME_ML {
        return Err(PricingError::invalid(
            field,
            ml,
            Violation::OutOfRange {
                min: "0".to_string(),
                max: MAX_VOLUME_ML.to_string(),
            },
        ));
    }

    let volume = Volume::from_microlitres(to_units(ml, Volume::MICROLITRES_PER_ML as f64, rounding));
    validate_volume(field, volume)?;
    Ok(volume)
}

/// Converts a percentage input into a [`WasteFactor`].
///
/// ```rust
/// use nocturna_core::validation::validate_waste_percent;
///
/// assert_eq!(validate_waste_percent(12.5).unwrap().bps(), 1250);
/// assert!(validate_waste_percent(101.0).is_err());
/// assert!(validate_waste_percent(f64::NAN).is_err());
/// ```
pub fn validate_waste_percent(pct: f64) -> PricingResult<WasteFactor> {
    if !pct.is_finite() {
        return Err(PricingError::invalid(fields::WASTE_FACTOR_PERCENT, pct, Violation::NotFinite));
    }
    if !(0.0..=100.0).contains(&pct) {
        return Err(PricingError::invalid(fields::WASTE_FACTOR_PERCENT, pct, percent_range()));
    }
    Ok(WasteFactor::from_percentage(pct))
}

/// Converts a stock count in bottles into a [`BottleStock`].
///
/// Fractions below a thousandth of a bottle are rounded down.
///
/// ```rust
/// use nocturna_core::validation::validate_stock_bottles;
///
/// assert_eq!(validate_stock_bottles(2.5).unwrap().thousandths(), 2_500);
/// assert!(validate_stock_bottles(-1.0).is_err());
/// ```
pub fn validate_stock_bottles(bottles: f64) -> PricingResult<BottleStock> {
    if !bottles.is_finite() {
        return Err(PricingError::invalid(fields::STOCK_BOTTLES, bottles, Violation::NotFinite));
    }
    if bottles < 0.0 {
        return Err(PricingError::invalid(
            fields::STOCK_BOTTLES,
            bottles,
            Violation::MustNotBeNegative,
        ));
    }
    Ok(BottleStock::from_thousandths(to_units(
        bottles,
        BottleStock::THOUSANDTHS_PER_BOTTLE as f64,
        Rounding::Down,
    )))
}

fn percent_range() -> Violation {
    Violation::OutOfRange {
        min: "0".to_string(),
        max: "100".to_string(),
    }
}

// =============================================================================
// Configuration Validation
// =============================================================================

impl ProductPricingConfig {
    /// Checks every precondition of the yield calculation.
    ///
    /// Fields are checked in form order and the first failure is returned.
    /// The `Bottle` variant has nothing else to check.
    pub fn validate(&self) -> PricingResult<()> {
        validate_price(fields::PURCHASE_PRICE, self.purchase_price)?;
        validate_price(fields::SALE_PRICE, self.sale_price)?;
        validate_volume(fields::BOTTLE_CAPACITY_ML, self.bottle_capacity)?;

        if let Some(pour) = self.sale.pour() {
            validate_volume(fields::SERVING_SIZE_ML, pour.serving_size)?;
            validate_waste(pour.waste)?;
        }
        Ok(())
    }
}

impl TryFrom<&PricingForm> for ProductPricingConfig {
    type Error = PricingError;

    fn try_from(form: &PricingForm) -> Result<Self, Self::Error> {
        build_config(form).inspect_err(|err| {
            warn!(sale_type = %form.sale_type, error = %err, "rejected pricing form");
        })
    }
}

impl TryFrom<PricingForm> for ProductPricingConfig {
    type Error = PricingError;

    fn try_from(form: PricingForm) -> Result<Self, Self::Error> {
        ProductPricingConfig::try_from(&form)
    }
}

fn build_config(form: &PricingForm) -> PricingResult<ProductPricingConfig> {
    let purchase_price = Money::from_cents(form.purchase_price_cents);
    let sale_price = Money::from_cents(form.sale_price_cents);
    validate_price(fields::PURCHASE_PRICE, purchase_price)?;
    validate_price(fields::SALE_PRICE, sale_price)?;
    let bottle_capacity = validate_volume_ml(
        fields::BOTTLE_CAPACITY_ML,
        form.bottle_capacity_ml,
        Rounding::Down,
    )?;

    let sale = match form.sale_type {
        SaleType::Glass => SaleConfig::Glass(pour_from_form(form)?),
        SaleType::Shot => SaleConfig::Shot(pour_from_form(form)?),
        SaleType::Bottle => {
            if form.serving_size_ml.is_some() || form.waste_factor_percent.is_some() {
                debug!("ignoring serving size and waste factor for bottle sale");
            }
            SaleConfig::Bottle
        }
    };

    Ok(ProductPricingConfig {
        purchase_price,
        sale_price,
        bottle_capacity,
        sale,
    })
}

fn pour_from_form(form: &PricingForm) -> PricingResult<PourSpec> {
    let required = || Violation::Required {
        sale_type: form.sale_type.to_string(),
    };

    let serving_ml = form
        .serving_size_ml
        .ok_or_else(|| PricingError::invalid(fields::SERVING_SIZE_ML, "none", required()))?;
    let waste_pct = form
        .waste_factor_percent
        .ok_or_else(|| PricingError::invalid(fields::WASTE_FACTOR_PERCENT, "none", required()))?;

    Ok(PourSpec {
        serving_size: validate_volume_ml(fields::SERVING_SIZE_ML, serving_ml, Rounding::Up)?,
        waste: validate_waste_percent(waste_pct)?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
