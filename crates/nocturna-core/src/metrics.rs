//! # Yield & Margin Calculator
//!
//! Turns a [`ProductPricingConfig`] into [`YieldMetrics`]: how many servings a
//! bottle really gives, what it earns, and the margin over purchase cost.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  capacity ÷ serving ──► theoretical servings (7.78)                    │
//! │        │                                                                │
//! │        ▼  × (1 − waste)                                                 │
//! │  floor(...)  ─────────► real servings (7)   BOTTLE: always 1           │
//! │        │                                                                │
//! │        ▼  × sale_price                                                  │
//! │  estimated revenue (€21.00)                                            │
//! │        │                                                                │
//! │        ▼  − purchase_price                                              │
//! │  unit profit (€11.00) ──► margin 110%   (NotComputable if cost = 0)    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Real servings are floored, never rounded: the bar must not sell a pour
//! that is not physically in the bottle.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::config::MarginThresholds;
use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::types::{PourSpec, ProductPricingConfig, SaleConfig, SaleType, WasteFactor};

// =============================================================================
// Margin
// =============================================================================

/// Unit profit as a percentage of purchase cost.
///
/// `NotComputable` is a distinct state, not 0% and not infinity: a product
/// that cost nothing has no meaningful margin and the UI must say so.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Margin {
    Computed { percent: f64 },
    NotComputable,
}

impl Margin {
    /// Margin of `profit` over `purchase_price`.
    ///
    /// ```rust
    /// use nocturna_core::metrics::Margin;
    /// use nocturna_core::money::Money;
    ///
    /// let m = Margin::from_profit(Money::from_cents(1100), Money::from_cents(1000));
    /// assert_eq!(m.percent(), Some(110.0));
    ///
    /// let m = Margin::from_profit(Money::from_cents(500), Money::zero());
    /// assert_eq!(m, Margin::NotComputable);
    /// ```
    pub fn from_profit(profit: Money, purchase_price: Money) -> Self {
        if !purchase_price.is_positive() {
            return Margin::NotComputable;
        }
        match profit.percent_of(purchase_price) {
            Some(percent) => Margin::Computed { percent },
            None => Margin::NotComputable,
        }
    }

    pub fn percent(&self) -> Option<f64> {
        match self {
            Margin::Computed { percent } => Some(*percent),
            Margin::NotComputable => None,
        }
    }

    pub fn is_computable(&self) -> bool {
        matches!(self, Margin::Computed { .. })
    }

    /// Rates the margin against the configured thresholds.
    /// `None` when the margin is not computable.
    pub fn rating(&self, thresholds: &MarginThresholds) -> Option<MarginRating> {
        self.percent().map(|pct| thresholds.rate(pct))
    }
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Margin::Computed { percent } => write!(f, "{:.0}%", percent),
            Margin::NotComputable => f.write_str("n/a"),
        }
    }
}

/// Profitability label shown next to the margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MarginRating {
    Excellent,
    VeryGood,
    Moderate,
}

impl MarginRating {
    pub const fn label(&self) -> &'static str {
        match self {
            MarginRating::Excellent => "Excellent profitability",
            MarginRating::VeryGood => "Very good margin",
            MarginRating::Moderate => "Moderate margin",
        }
    }
}

// =============================================================================
// Yield Metrics
// =============================================================================

/// Derived per-bottle figures. Never persisted, recomputed on every change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct YieldMetrics {
    pub sale_type: SaleType,

    /// Capacity ÷ serving size, unrounded. 1 for whole-bottle sales.
    pub theoretical_servings: f64,

    /// Whole sellable servings after waste. 1 for whole-bottle sales.
    pub real_servings: u64,

    pub estimated_total_revenue: Money,

    /// Revenue minus purchase price. Negative when the bottle loses money.
    pub unit_profit: Money,

    pub margin: Margin,
}

/// Computes the yield and margin metrics of one bottle.
///
/// ## Errors
/// [`PricingError::InvalidConfiguration`] naming the first field that
/// breaks a precondition (negative price, zero capacity or serving size,
/// waste above 100%). [`PricingError::Overflow`] if revenue leaves i64 cents.
///
/// ## Example
/// ```rust
/// use nocturna_core::metrics::compute_yield_metrics;
/// use nocturna_core::money::Money;
/// use nocturna_core::types::*;
///
/// let config = ProductPricingConfig {
///     purchase_price: Money::from_cents(1000),
///     sale_price: Money::from_cents(300),
///     bottle_capacity: Volume::from_ml(700),
///     sale: SaleConfig::Glass(PourSpec {
///         serving_size: Volume::from_ml(90),
///         waste: WasteFactor::from_bps(1000),
///     }),
/// };
///
/// let metrics = compute_yield_metrics(&config).unwrap();
/// assert_eq!(metrics.real_servings, 7);
/// assert_eq!(metrics.unit_profit, Money::from_cents(1100));
/// assert_eq!(metrics.margin.percent(), Some(110.0));
/// ```
pub fn compute_yield_metrics(config: &ProductPricingConfig) -> PricingResult<YieldMetrics> {
    config.validate().inspect_err(|err| {
        warn!(sale_type = %config.sale_type(), error = %err, "invalid pricing configuration");
    })?;

    let (theoretical_servings, real_servings) = match &config.sale {
        SaleConfig::Glass(pour) | SaleConfig::Shot(pour) => servings_per_bottle(config, pour),
        SaleConfig::Bottle => (1.0, 1),
    };

    let estimated_total_revenue = config
        .sale_price
        .checked_multiply_servings(real_servings)
        .ok_or_else(|| overflow("estimated_total_revenue"))?;
    let unit_profit = estimated_total_revenue
        .checked_sub(config.purchase_price)
        .ok_or_else(|| overflow("unit_profit"))?;
    let margin = Margin::from_profit(unit_profit, config.purchase_price);

    debug!(
        sale_type = %config.sale_type(),
        theoretical_servings,
        real_servings,
        revenue = %estimated_total_revenue,
        profit = %unit_profit,
        margin = %margin,
        "computed yield metrics"
    );

    Ok(YieldMetrics {
        sale_type: config.sale_type(),
        theoretical_servings,
        real_servings,
        estimated_total_revenue,
        unit_profit,
        margin,
    })
}

/// Theoretical and real servings for a poured sale.
///
/// real = floor(capacity × retained_bps / (serving × 10000)), all integers,
/// so the waste is applied before flooring and there is no float noise.
fn servings_per_bottle(config: &ProductPricingConfig, pour: &PourSpec) -> (f64, u64) {
    let capacity = config.bottle_capacity.microlitres();
    let serving = pour.serving_size.microlitres();

    let theoretical = capacity as f64 / serving as f64;

    let numerator = capacity as u128 * pour.waste.retained_bps() as u128;
    let denominator = serving as u128 * WasteFactor::FULL_BPS as u128;
    // Bounded by capacity / serving, which fits in u64.
    let real = (numerator / denominator) as u64;

    (theoretical, real)
}

fn overflow(quantity: &str) -> PricingError {
    PricingError::Overflow {
        quantity: quantity.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
