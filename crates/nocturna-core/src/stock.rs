//! # Stock Valuation
//!
//! What the bottles on the shelf are worth once poured.
//!
//! ```text
//! stock 2.5 bottles × 7 real servings = 17.5 ──► floor ──► 17 servings
//!                                                    │
//!                                                    ▼  × sale_price
//!                                          potential revenue €51.00
//! ```
//!
//! Stock is counted in thousandths of a bottle so an opened bottle can be
//! part of the count. Servings are floored: half a glass cannot be sold.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};
use crate::metrics::{compute_yield_metrics, YieldMetrics};
use crate::money::Money;
use crate::types::ProductPricingConfig;

/// Bottles in stock, in thousandths of a bottle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BottleStock(u64);

impl BottleStock {
    pub const THOUSANDTHS_PER_BOTTLE: u64 = 1_000;

    #[inline]
    pub const fn from_bottles(bottles: u64) -> Self {
        BottleStock(bottles * Self::THOUSANDTHS_PER_BOTTLE)
    }

    #[inline]
    pub const fn from_thousandths(thousandths: u64) -> Self {
        BottleStock(thousandths)
    }

    #[inline]
    pub const fn thousandths(&self) -> u64 {
        self.0
    }

    /// Bottles, for display only.
    #[inline]
    pub fn bottles(&self) -> f64 {
        self.0 as f64 / Self::THOUSANDTHS_PER_BOTTLE as f64
    }
}

/// Sellable servings and their revenue for the current stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockValuation {
    pub servings_available: u64,
    pub potential_revenue: Money,
}

/// Servings the stock can still produce: `floor(stock × real_servings)`.
///
/// For whole-bottle sales `real_servings` is 1, so this is the number of
/// whole bottles in stock.
///
/// ```rust
/// use nocturna_core::stock::{servings_available, BottleStock};
/// # use nocturna_core::*;
/// # let config = ProductPricingConfig {
/// #     purchase_price: Money::from_cents(1000),
/// #     sale_price: Money::from_cents(300),
/// #     bottle_capacity: Volume::from_ml(700),
/// #     sale: SaleConfig::Glass(PourSpec {
/// #         serving_size: Volume::from_ml(90),
/// #         waste: WasteFactor::from_bps(1000),
/// #     }),
/// # };
/// let metrics = compute_yield_metrics(&config).unwrap(); // 7 real servings
/// assert_eq!(servings_available(BottleStock::from_thousandths(2_500), &metrics), 17);
/// ```
pub fn servings_available(stock: BottleStock, metrics: &YieldMetrics) -> u64 {
    let servings = stock.thousandths() as u128 * metrics.real_servings as u128
        / BottleStock::THOUSANDTHS_PER_BOTTLE as u128;
    // Bounded by stock × capacity / serving in µl, far below u64::MAX.
    servings as u64
}

/// Servings available and what they would earn at the configured sale price.
///
/// ## Errors
/// Anything [`compute_yield_metrics`] rejects, plus
/// [`PricingError::Overflow`] if the revenue leaves i64 cents.
pub fn value_stock(config: &ProductPricingConfig, stock: BottleStock) -> PricingResult<StockValuation> {
    let metrics = compute_yield_metrics(config)?;
    let servings = servings_available(stock, &metrics);
    let potential_revenue = config
        .sale_price
        .checked_multiply_servings(servings)
        .ok_or_else(|| PricingError::Overflow {
            quantity: "potential_revenue".to_string(),
        })?;

    debug!(
        sale_type = %config.sale_type(),
        stock_bottles = stock.bottles(),
        servings,
        revenue = %potential_revenue,
        "valued stock"
    );

    Ok(StockValuation {
        servings_available: servings,
        potential_revenue,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PourSpec, SaleConfig, Volume, WasteFactor};

    fn glass_config() -> ProductPricingConfig {
        ProductPricingConfig {
            purchase_price: Money::from_cents(1000),
            sale_price: Money::from_cents(300),
            bottle_capacity: Volume::from_ml(700),
            sale: SaleConfig::Glass(PourSpec {
                serving_size: Volume::from_ml(90),
                waste: WasteFactor::from_bps(1000),
            }),
        }
    }

    #[test]
    fn test_servings_from_whole_bottles() {
        let valuation = value_stock(&glass_config(), BottleStock::from_bottles(3)).unwrap();
        assert_eq!(valuation.servings_available, 21);
        assert_eq!(valuation.potential_revenue, Money::from_cents(6300));
    }

    #[test]
    fn test_partial_bottle_is_floored() {
        // 2.5 × 7 = 17.5 → 17
        let valuation = value_stock(&glass_config(), BottleStock::from_thousandths(2_500)).unwrap();
        assert_eq!(valuation.servings_available, 17);
        assert_eq!(valuation.potential_revenue, Money::from_cents(5100));
    }

    #[test]
    fn test_bottle_sale_counts_whole_bottles() {
        let config = ProductPricingConfig {
            sale_price: Money::from_cents(12000),
            sale: SaleConfig::Bottle,
            ..glass_config()
        };
        let valuation = value_stock(&config, BottleStock::from_bottles(4)).unwrap();
        assert_eq!(valuation.servings_available, 4);
        assert_eq!(valuation.potential_revenue, Money::from_cents(48000));

        // An opened bottle cannot go out as a VIP bottle
        let valuation = value_stock(&config, BottleStock::from_thousandths(4_600)).unwrap();
        assert_eq!(valuation.servings_available, 4);
    }

    #[test]
    fn test_empty_stock() {
        let valuation = value_stock(&glass_config(), BottleStock::from_bottles(0)).unwrap();
        assert_eq!(valuation.servings_available, 0);
        assert_eq!(valuation.potential_revenue, Money::zero());
    }

    #[test]
    fn test_invalid_config_propagates() {
        let config = ProductPricingConfig {
            bottle_capacity: Volume::from_ml(0),
            ..glass_config()
        };
        let err = value_stock(&config, BottleStock::from_bottles(1)).unwrap_err();
        assert_eq!(err.field(), Some("bottle_capacity_ml"));
    }
}
