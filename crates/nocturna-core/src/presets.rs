//! # Sale-Type Presets
//!
//! Default serving size and waste factor for each [`SaleType`].
//!
//! ```text
//! ┌────────────┬──────────────┬────────┬──────────────────────────────┐
//! │ Sale type  │ Serving      │ Waste  │ Common capacities (ml)       │
//! ├────────────┼──────────────┼────────┼──────────────────────────────┤
//! │ GLASS      │ 90 ml        │ 10%    │ 700, 1000, 1500              │
//! │ SHOT       │ 30 ml        │ 10%    │ 700, 1000                    │
//! │ BOTTLE     │ n/a          │ 0%     │ 700, 750, 1000, 1500, 3000   │
//! └────────────┴──────────────┴────────┴──────────────────────────────┘
//! ```
//!
//! Presets only pre-fill the form when the user picks a sale type. They are
//! static: not user-editable and not part of [`crate::config::PricingSettings`].

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::types::{PricingForm, SaleType, Volume, WasteFactor};

/// Defaults for one sale type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleTypePreset {
    pub sale_type: SaleType,
    /// `None` for `BOTTLE`: there is no pour.
    pub serving_size: Option<Volume>,
    pub waste: WasteFactor,
}

/// Returns the preset for a sale type.
///
/// ```rust
/// use nocturna_core::presets::get_preset;
/// use nocturna_core::types::{SaleType, Volume};
///
/// let shot = get_preset(SaleType::Shot);
/// assert_eq!(shot.serving_size, Some(Volume::from_ml(30)));
/// assert_eq!(shot.waste.percentage(), 10.0);
/// ```
pub const fn get_preset(sale_type: SaleType) -> SaleTypePreset {
    // Adding a SaleType variant must fail to compile here.
    match sale_type {
        SaleType::Glass => SaleTypePreset {
            sale_type,
            serving_size: Some(Volume::from_ml(90)),
            waste: WasteFactor::from_bps(1_000),
        },
        SaleType::Shot => SaleTypePreset {
            sale_type,
            serving_size: Some(Volume::from_ml(30)),
            waste: WasteFactor::from_bps(1_000),
        },
        SaleType::Bottle => SaleTypePreset {
            sale_type,
            serving_size: None,
            waste: WasteFactor::zero(),
        },
    }
}

impl SaleTypePreset {
    /// Bottle sizes the product form offers as one-click shortcuts, in ml.
    ///
    /// ```rust
    /// use nocturna_core::presets::get_preset;
    /// use nocturna_core::types::SaleType;
    ///
    /// assert_eq!(get_preset(SaleType::Shot).common_capacities_ml(), &[700, 1000]);
    /// ```
    pub const fn common_capacities_ml(&self) -> &'static [u64] {
        match self.sale_type {
            SaleType::Glass => &[700, 1000, 1500],
            SaleType::Shot => &[700, 1000],
            SaleType::Bottle => &[700, 750, 1000, 1500, 3000],
        }
    }

    /// Pre-fills a form after the user explicitly changed its sale type.
    ///
    /// Sets `sale_type`, overwrites `waste_factor_percent`, and overwrites
    /// `serving_size_ml` when the preset has one. For `BOTTLE` the previous
    /// serving size is kept so switching back to a pour does not lose it.
    /// Call this only on a sale-type change, never on every render, or it
    /// will clobber values the user typed.
    pub fn apply_to(&self, form: &mut PricingForm) {
        debug!(sale_type = %self.sale_type, "applying sale-type preset");
        form.sale_type = self.sale_type;
        if let Some(serving) = self.serving_size {
            form.serving_size_ml = Some(serving.ml());
        }
        form.waste_factor_percent = Some(self.waste.percentage());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
