use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use energix::analytics::{
    aggregate_by_month, aggregate_by_vehicle, calculate_improvement,
    calculate_reference_consumption, calculate_target_consumption, process_emission_data,
    validate_records, vehicle_type_breakdown, EmissionData, FuelType, MonthlyAggregate,
    RecordValidation, ReferenceCoefficients, TypeBreakdownEntry, VehicleAggregate, VehicleRecord,
};
use energix::analytics::regression::DEFAULT_IMPROVEMENT_GOAL_PERCENT;
use energix::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct RecordsRequest {
    pub(crate) records: Vec<VehicleRecord>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MonthlyResponse {
    pub(crate) months: Vec<MonthlyAggregate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct VehiclesResponse {
    pub(crate) vehicles: Vec<VehicleAggregate>,
    pub(crate) breakdown: Vec<TypeBreakdownEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmissionsRequest {
    pub(crate) records: Vec<VehicleRecord>,
    #[serde(rename = "vehicleType", default = "default_vehicle_type")]
    pub(crate) vehicle_type: String,
    #[serde(rename = "fuelType", default)]
    pub(crate) fuel_type: FuelType,
}

fn default_vehicle_type() -> String {
    "camions".to_string()
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReferenceRequest {
    pub(crate) coefficients: ReferenceCoefficients,
    pub(crate) kilometrage: f64,
    pub(crate) tonnage: f64,
    /// Actual consumption, when improvement/target figures are wanted.
    #[serde(default)]
    pub(crate) actual: Option<f64>,
    /// Improvement goal in percent; defaults to the 3% planning target.
    #[serde(rename = "improvementGoal", default)]
    pub(crate) improvement_goal: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReferenceResponse {
    pub(crate) reference: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) improvement: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) target: Option<f64>,
}

pub(crate) fn analytics_router() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/analytics/validate",
            axum::routing::post(validate_endpoint),
        )
        .route(
            "/api/v1/analytics/monthly",
            axum::routing::post(monthly_endpoint),
        )
        .route(
            "/api/v1/analytics/vehicles",
            axum::routing::post(vehicles_endpoint),
        )
        .route(
            "/api/v1/analytics/emissions",
            axum::routing::post(emissions_endpoint),
        )
        .route(
            "/api/v1/analytics/regression/reference",
            axum::routing::post(regression_reference_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn validate_endpoint(
    Json(payload): Json<RecordsRequest>,
) -> Json<RecordValidation> {
    Json(validate_records(&payload.records))
}

pub(crate) async fn monthly_endpoint(Json(payload): Json<RecordsRequest>) -> Json<MonthlyResponse> {
    Json(MonthlyResponse {
        months: aggregate_by_month(&payload.records),
    })
}

pub(crate) async fn vehicles_endpoint(
    Json(payload): Json<RecordsRequest>,
) -> Json<VehiclesResponse> {
    Json(VehiclesResponse {
        vehicles: aggregate_by_vehicle(&payload.records),
        breakdown: vehicle_type_breakdown(&payload.records),
    })
}

pub(crate) async fn emissions_endpoint(
    Json(payload): Json<EmissionsRequest>,
) -> Result<Json<EmissionData>, AppError> {
    let report = process_emission_data(&payload.records, &payload.vehicle_type, payload.fuel_type)?;
    Ok(Json(report))
}

pub(crate) async fn regression_reference_endpoint(
    Json(payload): Json<ReferenceRequest>,
) -> Json<ReferenceResponse> {
    let reference =
        calculate_reference_consumption(payload.coefficients, payload.kilometrage, payload.tonnage);

    let improvement = payload
        .actual
        .map(|actual| calculate_improvement(actual, reference));
    let target = payload.actual.map(|actual| {
        calculate_target_consumption(
            actual,
            payload
                .improvement_goal
                .unwrap_or(DEFAULT_IMPROVEMENT_GOAL_PERCENT),
        )
    });

    Json(ReferenceResponse {
        reference,
        improvement,
        target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(matricule: &str, mois: &str, consommation_l: f64) -> VehicleRecord {
        VehicleRecord {
            id: format!("{matricule}-{mois}"),
            vehicle_type: "camions".to_string(),
            matricule: matricule.to_string(),
            mois: Some(mois.to_string()),
            year: "2024".to_string(),
            region: None,
            consommation_l,
            consommation_tep: 0.0,
            cout_dt: 0.0,
            kilometrage: 1000.0,
            produits_tonnes: 10.0,
            ipe_l_100km: 12.0,
            ipe_l_100_tonne_km: 0.6,
            raw_values: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn monthly_endpoint_orders_the_calendar() {
        let request = RecordsRequest {
            records: vec![
                record("A-1", "Mars", 30.0),
                record("A-2", "Janvier", 10.0),
                record("A-3", "Février", 20.0),
            ],
        };

        let Json(body) = monthly_endpoint(Json(request)).await;
        let months: Vec<&str> = body.months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["Janvier", "Février", "Mars"]);
    }

    #[tokio::test]
    async fn validate_endpoint_reports_empty_input() {
        let Json(body) = validate_endpoint(Json(RecordsRequest { records: vec![] })).await;
        assert!(!body.is_valid);
        assert_eq!(body.errors, vec!["No records provided".to_string()]);
    }

    #[tokio::test]
    async fn emissions_endpoint_rejects_empty_records() {
        let request = EmissionsRequest {
            records: vec![],
            vehicle_type: "camions".to_string(),
            fuel_type: FuelType::Diesel,
        };

        let err = emissions_endpoint(Json(request))
            .await
            .expect_err("empty records must fail");
        assert!(matches!(err, AppError::Analytics(_)));
    }

    #[tokio::test]
    async fn emissions_endpoint_converts_with_the_canonical_factor() {
        let request = EmissionsRequest {
            records: vec![record("A-1", "Janvier", 100.0)],
            vehicle_type: "camions".to_string(),
            fuel_type: FuelType::Diesel,
        };

        let Json(body) = emissions_endpoint(Json(request))
            .await
            .expect("report builds");
        assert!((body.total_emissions - 268.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn reference_endpoint_derives_improvement_and_target() {
        let request = ReferenceRequest {
            coefficients: ReferenceCoefficients {
                kilometrage: 0.05,
                tonnage: 0.02,
                intercept: 10.0,
            },
            kilometrage: 1000.0,
            tonnage: 5.0,
            actual: Some(75.0),
            improvement_goal: None,
        };

        let Json(body) = regression_reference_endpoint(Json(request)).await;
        assert!((body.reference - 60.1).abs() < 1e-9);
        let improvement = body.improvement.expect("actual supplied");
        assert!(improvement > 0.0);
        let target = body.target.expect("actual supplied");
        assert!((target - 72.75).abs() < 1e-9);
    }

    #[tokio::test]
    async fn vehicles_endpoint_returns_breakdown_and_aggregates() {
        let request = RecordsRequest {
            records: vec![
                record("A-1", "Janvier", 100.0),
                record("A-1", "Février", 50.0),
                record("B-2", "Janvier", 25.0),
            ],
        };

        let Json(body) = vehicles_endpoint(Json(request)).await;
        assert_eq!(body.vehicles.len(), 2);
        assert!((body.vehicles[0].consommation - 150.0).abs() < 1e-9);
        assert_eq!(body.breakdown.len(), 1);
        assert!((body.breakdown[0].value - 175.0).abs() < 1e-9);
    }
}
