//! Display-only derivations shown next to a price estimate.
//!
//! Nothing here is served by the prediction endpoint; values are computed
//! from the price and the form inputs the client already holds.

use crate::domain::vehicle::{CarDetails, ServiceHistory};

/// Lower bound of the gauge axis
pub const GAUGE_MIN_RANGE: f64 = 50_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeScale {
    pub max: f64,
    /// Three equal-width bands: low, fair, high
    pub bands: [(f64, f64); 3],
    pub delta_reference: f64,
}

impl GaugeScale {
    pub fn for_price(price: f64) -> Self {
        let max = GAUGE_MIN_RANGE.max(price * 2.0);
        let third = max / 3.0;
        Self {
            max,
            bands: [(0.0, third), (third, 2.0 * third), (2.0 * third, max)],
            delta_reference: price * 0.7,
        }
    }

    /// Needle position in [0, 1]
    pub fn position(&self, price: f64) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (price / self.max).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FactorImpact {
    pub label: &'static str,
    /// Signed percentage; negative decreases value
    pub impact: f64,
}

impl FactorImpact {
    pub fn progress(&self) -> f32 {
        (self.impact.abs() / 100.0).min(1.0) as f32
    }

    pub fn increases_value(&self) -> bool {
        self.impact > 0.0
    }

    pub fn describe(&self) -> String {
        let direction = if self.increases_value() {
            "↑ Increases"
        } else {
            "↓ Decreases"
        };
        format!("{} value by {:.1}%", direction, self.impact.abs())
    }
}

/// Factor impacts sorted by absolute impact, largest first.
pub fn factor_impacts(details: &CarDetails) -> Vec<FactorImpact> {
    let service = if details.service_history == ServiceHistory::Regular {
        12.0
    } else {
        5.0
    };

    let mut impacts = vec![
        FactorImpact {
            label: "Brand Rating",
            impact: (details.brand as f64 * 0.8).min(100.0),
        },
        FactorImpact {
            label: "Mileage Efficiency",
            impact: (details.mileage_kmpl * 0.5).min(100.0),
        },
        FactorImpact {
            label: "Service History",
            impact: service,
        },
        FactorImpact {
            label: "Accidents Reported",
            impact: -(details.accidents_reported as f64 * 1.5).min(100.0),
        },
        FactorImpact {
            label: "Previous Owners",
            impact: -(details.owner_count as f64 * 0.7).min(100.0),
        },
    ];

    // Stable sort keeps declaration order for ties
    impacts.sort_by(|a, b| b.impact.abs().total_cmp(&a.impact.abs()));
    impacts
}
