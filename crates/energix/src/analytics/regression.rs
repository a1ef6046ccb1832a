//! Interpretation of backend-fitted regression results.
//!
//! Least-squares fitting, R², and coefficient estimation all happen
//! server-side. This module only reconstructs display lines from returned
//! coefficients and derives reference/improvement figures from them; it
//! never fits anything.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default improvement goal, percent, for target-consumption planning.
pub const DEFAULT_IMPROVEMENT_GOAL_PERCENT: f64 = 3.0;

/// Fitted regression payload as returned by the backend. Read-only input:
/// the core never mutates or re-fits it. Simple fits carry `slope`;
/// multi-variable fits carry the `coefficients` map instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slope: Option<f64>,
    pub intercept: f64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub coefficients: BTreeMap<String, f64>,
    #[serde(rename = "rSquared", default)]
    pub r_squared: f64,
    #[serde(rename = "adjustedRSquared", default)]
    pub adjusted_r_squared: f64,
    #[serde(default)]
    pub mse: f64,
    /// Optional per-month series the backend attaches for display.
    #[serde(rename = "monthlyData", default, skip_serializing_if = "Vec::is_empty")]
    pub monthly_data: Vec<RegressionMonthPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionMonthPoint {
    pub month: String,
    pub consommation: f64,
    #[serde(rename = "consommationReference", default)]
    pub consommation_reference: f64,
}

/// Simple-form coefficients for a straight reference line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LineCoefficients {
    pub slope: f64,
    pub intercept: f64,
}

/// Multi-variable coefficients for reference consumption:
/// `intercept + kilometrage*km + tonnage*tonnes`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReferenceCoefficients {
    pub kilometrage: f64,
    pub tonnage: f64,
    pub intercept: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinePoint {
    pub x: f64,
    pub y: f64,
}

/// Endpoints of the fitted line over the data domain, for drawing a
/// straight reference line without re-fitting. Returns `None` when the
/// domain has no finite values to anchor the line on.
pub fn reconstruct_line(coefficients: LineCoefficients, domain: &[f64]) -> Option<[LinePoint; 2]> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &x in domain {
        if x.is_finite() {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
        }
    }
    if !min_x.is_finite() || !max_x.is_finite() {
        return None;
    }

    let at = |x: f64| LinePoint {
        x,
        y: coefficients.slope * x + coefficients.intercept,
    };
    Some([at(min_x), at(max_x)])
}

/// Reference consumption for a (kilometrage, tonnage) pair. Non-finite
/// inputs resolve to 0 so dependent charts stay renderable with partial
/// data; callers needing strictness pre-validate.
pub fn calculate_reference_consumption(
    coefficients: ReferenceCoefficients,
    kilometrage: f64,
    tonnage: f64,
) -> f64 {
    let finite = [
        coefficients.intercept,
        coefficients.kilometrage,
        coefficients.tonnage,
        kilometrage,
        tonnage,
    ]
    .iter()
    .all(|value| value.is_finite());
    if !finite {
        return 0.0;
    }

    coefficients.intercept + coefficients.kilometrage * kilometrage + coefficients.tonnage * tonnage
}

/// Deviation of actual consumption from the reference, as a percentage of
/// actual. Positive means actual exceeds the reference (room for
/// improvement); negative means actual already beats it. Zero or
/// non-finite inputs resolve to 0 to guard the division.
pub fn calculate_improvement(actual: f64, reference: f64) -> f64 {
    if actual == 0.0 || !actual.is_finite() || reference == 0.0 || !reference.is_finite() {
        return 0.0;
    }
    ((actual - reference) / actual) * 100.0
}

/// Target consumption after applying an improvement goal (percent) to the
/// actual figure. Zero or non-finite actuals resolve to 0.
pub fn calculate_target_consumption(actual: f64, improvement_goal_percent: f64) -> f64 {
    if actual == 0.0 || !actual.is_finite() {
        return 0.0;
    }
    actual * (1.0 - improvement_goal_percent / 100.0)
}
