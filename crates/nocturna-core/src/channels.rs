//! # Dual-Channel Comparator
//!
//! A dual-priced product can leave the bar poured by the glass or as a whole
//! VIP bottle. This module tells the cashier which channel earns more.
//!
//! ## POS Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cashier selects "Gin Premium"                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  compare_channels(servings = 7, glass = €9, vip = €60)                 │
//! │       │                                                                 │
//! │       ├── glass revenue  = 7 × €9 = €63                                │
//! │       ├── VIP revenue    = €60                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  recommended: GLASS, delta €3                                          │
//! │  "Glass service earns €3.00 more than VIP bottle"                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No waste is applied here: `servings_per_bottle` is expected to be the
//! real servings already produced by [`crate::metrics::compute_yield_metrics`].
//! [`DualPricedProduct`] wires the two together.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::config::PricingSettings;
use crate::error::{PricingError, PricingResult, Violation};
use crate::metrics::{compute_yield_metrics, Margin};
use crate::money::Money;
use crate::types::ProductPricingConfig;
use crate::validation::{fields, validate_price};

/// A sale channel for a dual-priced product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    Glass,
    VipBottle,
}

/// Revenue of both channels for one bottle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DualChannelComparison {
    pub glass_channel_revenue: Money,
    pub vip_channel_revenue: Money,
    /// The larger revenue. Ties go to `Glass`.
    pub recommended_channel: Channel,
    /// Absolute difference between the two revenues.
    pub revenue_delta: Money,
}

/// Margin of each channel over the bottle's purchase price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChannelMargins {
    pub glass: Margin,
    pub vip_bottle: Margin,
}

/// Compares glass service against selling the whole bottle.
///
/// ## Errors
/// [`PricingError::InvalidConfiguration`] for a negative `glass_price` or
/// `vip_bottle_price`; [`PricingError::Overflow`] if glass revenue leaves
/// the i64 range.
///
/// ```rust
/// use nocturna_core::channels::{compare_channels, Channel};
/// use nocturna_core::money::Money;
///
/// let cmp = compare_channels(10, Money::from_cents(500), Money::from_cents(5000)).unwrap();
/// assert_eq!(cmp.recommended_channel, Channel::Glass);
/// assert_eq!(cmp.revenue_delta, Money::zero());
/// ```
pub fn compare_channels(
    servings_per_bottle: u64,
    glass_price: Money,
    vip_bottle_price: Money,
) -> PricingResult<DualChannelComparison> {
    validate_price(fields::GLASS_PRICE, glass_price)?;
    validate_price(fields::VIP_BOTTLE_PRICE, vip_bottle_price)?;

    let glass_channel_revenue = glass_price
        .checked_multiply_servings(servings_per_bottle)
        .ok_or_else(|| PricingError::Overflow {
            quantity: "glass_channel_revenue".to_string(),
        })?;
    let vip_channel_revenue = vip_bottle_price;

    let recommended_channel = if glass_channel_revenue >= vip_channel_revenue {
        Channel::Glass
    } else {
        Channel::VipBottle
    };
    let revenue_delta = (glass_channel_revenue - vip_channel_revenue).abs();

    debug!(
        servings_per_bottle,
        glass = %glass_channel_revenue,
        vip = %vip_channel_revenue,
        ?recommended_channel,
        "compared sale channels"
    );

    Ok(DualChannelComparison {
        glass_channel_revenue,
        vip_channel_revenue,
        recommended_channel,
        revenue_delta,
    })
}

impl DualChannelComparison {
    /// Revenue of the given channel.
    pub fn revenue(&self, channel: Channel) -> Money {
        match channel {
            Channel::Glass => self.glass_channel_revenue,
            Channel::VipBottle => self.vip_channel_revenue,
        }
    }

    /// How much cheaper the VIP bottle is than pouring the same bottle, as a
    /// percentage of glass revenue. Negative when the VIP price is higher.
    /// 0 when glass revenue is zero (nothing to discount from).
    ///
    /// ```rust
    /// use nocturna_core::channels::compare_channels;
    /// use nocturna_core::money::Money;
    ///
    /// // 10 glasses × €8 = €80 vs VIP €60 → 25% off
    /// let cmp = compare_channels(10, Money::from_cents(800), Money::from_cents(6000)).unwrap();
    /// assert_eq!(cmp.vip_discount_percent(), 25.0);
    /// ```
    pub fn vip_discount_percent(&self) -> f64 {
        (self.glass_channel_revenue - self.vip_channel_revenue)
            .percent_of(self.glass_channel_revenue)
            .unwrap_or(0.0)
    }

    /// Margin of each channel over what the bottle cost.
    pub fn channel_margins(&self, purchase_price: Money) -> PricingResult<ChannelMargins> {
        validate_price(fields::PURCHASE_PRICE, purchase_price)?;
        let margin = |revenue: Money| Margin::from_profit(revenue - purchase_price, purchase_price);
        Ok(ChannelMargins {
            glass: margin(self.glass_channel_revenue),
            vip_bottle: margin(self.vip_channel_revenue),
        })
    }

    /// One-line explanation for the cashier.
    ///
    /// ```rust
    /// use nocturna_core::channels::compare_channels;
    /// use nocturna_core::config::PricingSettings;
    /// use nocturna_core::money::Money;
    ///
    /// let cmp = compare_channels(7, Money::from_cents(900), Money::from_cents(6000)).unwrap();
    /// assert_eq!(
    ///     cmp.summary(&PricingSettings::default()),
    ///     "Glass service earns €3.00 more than VIP bottle"
    /// );
    /// ```
    pub fn summary(&self, settings: &PricingSettings) -> String {
        let delta = self.revenue_delta.format_with(&settings.currency_symbol);
        if self.revenue_delta.is_zero() {
            return "Both channels earn the same".to_string();
        }
        match self.recommended_channel {
            Channel::Glass => format!("Glass service earns {} more than VIP bottle", delta),
            Channel::VipBottle => format!("VIP bottle earns {} more than glass service", delta),
        }
    }
}

// =============================================================================
// Dual-Priced Product
// =============================================================================

/// A pourable product that also has a whole-bottle VIP price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DualPricedProduct {
    /// Pour configuration. `sale_price` is ignored in favour of `glass_price`.
    pub config: ProductPricingConfig,
    pub glass_price: Money,
    pub vip_bottle_price: Money,
}

impl DualPricedProduct {
    /// Compares channels using the real servings of `config`.
    ///
    /// ## Errors
    /// Anything [`compute_yield_metrics`] rejects, plus `sale_type` when the
    /// config is a whole-bottle sale (there is no glass channel to compare).
    pub fn compare(&self) -> PricingResult<DualChannelComparison> {
        if !self.config.sale_type().is_poured() {
            return Err(PricingError::invalid(
                fields::SALE_TYPE,
                self.config.sale_type(),
                Violation::NotPourable,
            ));
        }

        let pour_config = ProductPricingConfig {
            sale_price: self.glass_price,
            ..self.config
        };
        let metrics = compute_yield_metrics(&pour_config)?;
        compare_channels(metrics.real_servings, self.glass_price, self.vip_bottle_price)
    }

    /// Comparison plus per-channel margins over the bottle's purchase price.
    pub fn compare_with_margins(&self) -> PricingResult<(DualChannelComparison, ChannelMargins)> {
        let comparison = self.compare()?;
        let margins = comparison.channel_margins(self.config.purchase_price)?;
        Ok((comparison, margins))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PourSpec, SaleConfig, Volume, WasteFactor};

    fn gin(purchase: i64) -> DualPricedProduct {
        DualPricedProduct {
            config: ProductPricingConfig {
                purchase_price: Money::from_cents(purchase),
                sale_price: Money::zero(),
                bottle_capacity: Volume::from_ml(700),
                sale: SaleConfig::Glass(PourSpec {
                    serving_size: Volume::from_ml(90),
                    waste: WasteFactor::from_bps(1000),
                }),
            },
            glass_price: Money::from_cents(900),
            vip_bottle_price: Money::from_cents(6000),
        }
    }

    #[test]
    fn test_tie_favors_glass() {
        let cmp = compare_channels(10, Money::from_cents(500), Money::from_cents(5000)).unwrap();
        assert_eq!(cmp.glass_channel_revenue, Money::from_cents(5000));
        assert_eq!(cmp.vip_channel_revenue, Money::from_cents(5000));
        assert_eq!(cmp.recommended_channel, Channel::Glass);
        assert_eq!(cmp.revenue_delta, Money::zero());
    }

    #[test]
    fn test_vip_wins() {
        let cmp = compare_channels(7, Money::from_cents(800), Money::from_cents(8000)).unwrap();
        assert_eq!(cmp.glass_channel_revenue, Money::from_cents(5600));
        assert_eq!(cmp.recommended_channel, Channel::VipBottle);
        assert_eq!(cmp.revenue_delta, Money::from_cents(2400));
        assert_eq!(cmp.revenue(Channel::VipBottle), Money::from_cents(8000));
    }

    #[test]
    fn test_zero_servings() {
        let cmp = compare_channels(0, Money::from_cents(800), Money::zero()).unwrap();
        assert_eq!(cmp.glass_channel_revenue, Money::zero());
        assert_eq!(cmp.recommended_channel, Channel::Glass);
    }

    #[test]
    fn test_negative_prices_rejected() {
        let err = compare_channels(5, Money::from_cents(-1), Money::zero()).unwrap_err();
        assert_eq!(err.field(), Some("glass_price"));

        let err = compare_channels(5, Money::zero(), Money::from_cents(-1)).unwrap_err();
        assert_eq!(err.field(), Some("vip_bottle_price"));
    }

    #[test]
    fn test_vip_discount_percent() {
        let cmp = compare_channels(10, Money::from_cents(800), Money::from_cents(6000)).unwrap();
        assert_eq!(cmp.vip_discount_percent(), 25.0);

        // VIP priced above glass revenue is a negative discount
        let cmp = compare_channels(7, Money::from_cents(800), Money::from_cents(8400)).unwrap();
        assert_eq!(cmp.vip_discount_percent(), -50.0);

        let cmp = compare_channels(10, Money::from_cents(500), Money::from_cents(5000)).unwrap();
        assert_eq!(cmp.vip_discount_percent(), 0.0);
    }

    #[test]
    fn test_vip_discount_zero_when_no_glass_revenue() {
        let cmp = compare_channels(0, Money::from_cents(800), Money::from_cents(6000)).unwrap();
        assert_eq!(cmp.vip_discount_percent(), 0.0);

        let cmp = compare_channels(7, Money::zero(), Money::from_cents(6000)).unwrap();
        assert_eq!(cmp.vip_discount_percent(), 0.0);
    }

    #[test]
    fn test_summary() {
        let settings = PricingSettings::default();

        let cmp = compare_channels(7, Money::from_cents(800), Money::from_cents(8000)).unwrap();
        assert_eq!(cmp.summary(&settings), "VIP bottle earns €24.00 more than glass service");

        let cmp = compare_channels(10, Money::from_cents(500), Money::from_cents(5000)).unwrap();
        assert_eq!(cmp.summary(&settings), "Both channels earn the same");
    }

    #[test]
    fn test_channel_margins() {
        let cmp = compare_channels(7, Money::from_cents(900), Money::from_cents(6000)).unwrap();
        let margins = cmp.channel_margins(Money::from_cents(2000)).unwrap();
        assert_eq!(margins.glass.percent(), Some(215.0));
        assert_eq!(margins.vip_bottle.percent(), Some(200.0));

        let margins = cmp.channel_margins(Money::zero()).unwrap();
        assert_eq!(margins.glass, Margin::NotComputable);
        assert_eq!(margins.vip_bottle, Margin::NotComputable);
    }

    #[test]
    fn test_dual_priced_product_uses_real_servings() {
        let (cmp, margins) = gin(2000).compare_with_margins().unwrap();
        // 7 real servings × €9
        assert_eq!(cmp.glass_channel_revenue, Money::from_cents(6300));
        assert_eq!(cmp.recommended_channel, Channel::Glass);
        assert_eq!(cmp.revenue_delta, Money::from_cents(300));
        assert_eq!(margins.glass.percent(), Some(215.0));
    }

    #[test]
    fn test_dual_priced_product_rejects_bottle_config() {
        let mut product = gin(2000);
        product.config.sale = SaleConfig::Bottle;
        let err = product.compare().unwrap_err();
        assert_eq!(err.field(), Some("sale_type"));
    }

    #[test]
    fn test_dual_priced_product_propagates_config_errors() {
        let mut product = gin(2000);
        product.config.bottle_capacity = Volume::from_ml(0);
        assert_eq!(product.compare().unwrap_err().field(), Some("bottle_capacity_ml"));
    }
}
