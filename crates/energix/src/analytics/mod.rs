//! The SER (reference energy situation) analytics pipeline.
//!
//! Pure, synchronous transforms over already-fetched data: raw vehicle
//! records flow through validation into monthly/vehicle aggregation, then
//! into the emission converter or the regression interpreter. Given the
//! same inputs the outputs are bit-for-bit reproducible; nothing here
//! touches the clock, randomness, or ambient locale.

pub mod aggregation;
pub mod domain;
pub mod emissions;
pub mod regression;
pub mod validation;

pub use aggregation::{
    aggregate_by_month, aggregate_by_vehicle, vehicle_type_breakdown, MonthlyAggregate,
    TypeBreakdownEntry, VehicleAggregate,
};
pub use domain::{AnalyticsError, FuelType, Month, RawValue, VehicleRecord};
pub use emissions::{
    emissions_for, lca_score_for, process_emission_data, EmissionData, MonthlyEmission,
};
pub use regression::{
    calculate_improvement, calculate_reference_consumption, calculate_target_consumption,
    reconstruct_line, LineCoefficients, LinePoint, ReferenceCoefficients, RegressionResult,
};
pub use validation::{validate_records, RecordValidation};
