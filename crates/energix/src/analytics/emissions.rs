use super::aggregation::{self, UNKNOWN_MONTH};
use super::domain::{AnalyticsError, FuelType, VehicleRecord};
use serde::Serialize;
use std::collections::HashMap;

/// Canonical diesel factor, kg CO2 per liter. Older reports occasionally
/// used an ad-hoc 2.6; that was a data bug and this constant is the only
/// value in use here.
pub const DIESEL_EMISSION_FACTOR: f64 = 2.68;
pub const ESSENCE_EMISSION_FACTOR: f64 = 2.31;
/// Direct emissions only.
pub const ELECTRIC_EMISSION_FACTOR: f64 = 0.0;

pub const DIESEL_LCA_FACTOR: f64 = 1.0;
pub const ESSENCE_LCA_FACTOR: f64 = 0.9;
pub const ELECTRIC_LCA_FACTOR: f64 = 0.5;

/// CO2 emissions in kilograms for a consumption figure in liters.
pub fn emissions_for(consumption_liters: f64, fuel: FuelType) -> f64 {
    let factor = match fuel {
        FuelType::Diesel => DIESEL_EMISSION_FACTOR,
        FuelType::Essence => ESSENCE_EMISSION_FACTOR,
        FuelType::Electric => ELECTRIC_EMISSION_FACTOR,
    };
    consumption_liters * factor
}

/// Life-cycle-assessment impact score for a consumption figure.
pub fn lca_score_for(consumption_liters: f64, fuel: FuelType) -> f64 {
    let factor = match fuel {
        FuelType::Diesel => DIESEL_LCA_FACTOR,
        FuelType::Essence => ESSENCE_LCA_FACTOR,
        FuelType::Electric => ELECTRIC_LCA_FACTOR,
    };
    consumption_liters * factor
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyEmission {
    pub month: String,
    pub value: f64,
}

/// Emission report for one vehicle-type slice of the fleet.
#[derive(Debug, Clone, Serialize)]
pub struct EmissionData {
    #[serde(rename = "totalEmissions")]
    pub total_emissions: f64,
    #[serde(rename = "lcaScore")]
    pub lca_score: f64,
    #[serde(rename = "monthlyEmissions")]
    pub monthly_emissions: Vec<MonthlyEmission>,
    #[serde(rename = "vehicleType")]
    pub vehicle_type: String,
}

/// Convert a record set into per-month and total CO2/LCA figures.
///
/// Fails hard on empty input: an emission total must never silently read
/// zero for a dataset that was lost upstream. Fuel type is not tracked
/// per-record in this dataset, so the caller picks one for the whole slice
/// (diesel for the fleet's trucks).
pub fn process_emission_data(
    records: &[VehicleRecord],
    vehicle_type: &str,
    fuel: FuelType,
) -> Result<EmissionData, AnalyticsError> {
    if records.is_empty() {
        return Err(AnalyticsError::NoRecords);
    }

    let mut monthly: HashMap<String, f64> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();
    for record in records {
        let label = match record.mois.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => UNKNOWN_MONTH.to_string(),
        };
        if !monthly.contains_key(&label) {
            first_seen.push(label.clone());
        }
        let consumption = if record.consommation_l.is_finite() {
            record.consommation_l
        } else {
            0.0
        };
        *monthly.entry(label).or_insert(0.0) += consumption;
    }

    let total_consumption: f64 = monthly.values().sum();

    let mut monthly_emissions: Vec<MonthlyEmission> = first_seen
        .into_iter()
        .map(|month| {
            let consumption = monthly.remove(&month).unwrap_or(0.0);
            MonthlyEmission {
                month,
                value: emissions_for(consumption, fuel),
            }
        })
        .collect();
    aggregation::sort_monthly(&mut monthly_emissions, |entry| entry.month.as_str());

    Ok(EmissionData {
        total_emissions: emissions_for(total_consumption, fuel),
        lca_score: lca_score_for(total_consumption, fuel),
        monthly_emissions,
        vehicle_type: vehicle_type.to_string(),
    })
}
