//! # nocturna-core: Bottle-Service Pricing & Yield Engine
//!
//! Pure pricing logic for a nightclub bar: how many servings a bottle really
//! gives, what it earns, its margin, and whether a dual-priced bottle should
//! go out by the glass or as a VIP bottle.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Nocturna POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   Product form          POS sale-type modal                     │   │
//! │  │   (live metrics)        (glass vs VIP bottle)                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ PricingForm / DualPricedProduct        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ nocturna-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐         │   │
//! │  │   │validation│ │ metrics  │ │ channels │ │ presets  │         │   │
//! │  │   │form→conf │ │ yield,   │ │ glass vs │ │ defaults │         │   │
//! │  │   │          │ │ margin   │ │ VIP      │ │ per type │         │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   REST backend (external): stores the raw pricing fields        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Sale types, volumes, waste factors, pricing config
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`validation`] - Preconditions and form → config conversion
//! - [`metrics`] - Yield & margin calculator
//! - [`channels`] - Glass vs VIP bottle comparator
//! - [`presets`] - Sale-type defaults
//! - [`stock`] - Servings and revenue left in stock
//! - [`config`] - Presentation settings (currency, margin thresholds)
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use nocturna_core::{compute_yield_metrics, PricingForm, ProductPricingConfig, SaleType};
//!
//! let form = PricingForm {
//!     purchase_price_cents: 1000,
//!     sale_price_cents: 300,
//!     bottle_capacity_ml: 700.0,
//!     sale_type: SaleType::Glass,
//!     serving_size_ml: Some(90.0),
//!     waste_factor_percent: Some(10.0),
//! };
//!
//! let config = ProductPricingConfig::try_from(&form)?;
//! let metrics = compute_yield_metrics(&config)?;
//!
//! assert_eq!(metrics.real_servings, 7);
//! assert_eq!(metrics.margin.to_string(), "110%");
//! # Ok::<(), nocturna_core::PricingError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod channels;
pub mod config;
pub mod error;
pub mod metrics;
pub mod money;
pub mod presets;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use channels::{compare_channels, Channel, ChannelMargins, DualChannelComparison, DualPricedProduct};
pub use config::{MarginThresholds, PricingSettings};
pub use error::{PricingError, PricingResult, Violation};
pub use metrics::{compute_yield_metrics, Margin, MarginRating, YieldMetrics};
pub use money::Money;
pub use presets::{get_preset, SaleTypePreset};
pub use stock::{servings_available, value_stock, BottleStock, StockValuation};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest volume accepted from a form, in ml.
///
/// 100 litres is well above any bottle format sold at a bar and keeps
/// microlitre arithmetic far from overflow.
pub const MAX_VOLUME_ML: f64 = 100_000.0;


#[cfg(test)]
mod tests {
    use super::*;

    // Scenario walk-through across modules, the way the product form uses them.
    #[test]
    fn test_form_preset_then_metrics() {
        test_support::init_tracing();

        let mut form = PricingForm {
            purchase_price_cents: 1000,
            sale_price_cents: 300,
            bottle_capacity_ml: 700.0,
            sale_type: SaleType::Bottle,
            serving_size_ml: None,
            waste_factor_percent: None,
        };

        // User switches the sale type to GLASS
        get_preset(SaleType::Glass).apply_to(&mut form);
        let metrics = compute_yield_metrics(&ProductPricingConfig::try_from(&form).unwrap()).unwrap();

        assert_eq!(metrics.real_servings, 7);
        assert_eq!(metrics.estimated_total_revenue, Money::from_cents(2100));
        assert_eq!(metrics.unit_profit, Money::from_cents(1100));
        assert_eq!(metrics.margin.percent(), Some(110.0));
        assert_eq!(
            metrics.margin.rating(&PricingSettings::default().margin_thresholds),
            Some(MarginRating::Moderate)
        );
    }

    #[test]
    fn test_metrics_serialize_for_frontend() {
        let config = ProductPricingConfig {
            purchase_price: Money::zero(),
            sale_price: Money::from_cents(9000),
            bottle_capacity: Volume::from_ml(750),
            sale: SaleConfig::Bottle,
        };
        let metrics = compute_yield_metrics(&config).unwrap();
        let json = serde_json::to_value(metrics).unwrap();

        assert_eq!(json["sale_type"], "BOTTLE");
        assert_eq!(json["real_servings"], 1);
        assert_eq!(json["estimated_total_revenue"], 9000);
        assert_eq!(json["margin"]["status"], "not_computable");
    }

    #[test]
    fn test_engine_types_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProductPricingConfig>();
        assert_send_sync::<YieldMetrics>();
        assert_send_sync::<DualChannelComparison>();
        assert_send_sync::<PricingError>();
    }
}
