use energix::analytics::{
    aggregate_by_month, calculate_improvement, calculate_reference_consumption,
    calculate_target_consumption, process_emission_data, reconstruct_line, validate_records,
    FuelType, LineCoefficients, ReferenceCoefficients, VehicleRecord,
};
use energix::format::{format_number, format_percentage};
use std::collections::BTreeMap;

fn truck(matricule: &str, mois: &str, consommation_l: f64, kilometrage: f64) -> VehicleRecord {
    VehicleRecord {
        id: format!("{matricule}-{mois}"),
        vehicle_type: "camions".to_string(),
        matricule: matricule.to_string(),
        mois: Some(mois.to_string()),
        year: "2024".to_string(),
        region: Some("Tunis".to_string()),
        consommation_l,
        consommation_tep: consommation_l * 0.00086,
        cout_dt: consommation_l * 1.8,
        kilometrage,
        produits_tonnes: 15.0,
        ipe_l_100km: if kilometrage > 0.0 {
            consommation_l / kilometrage * 100.0
        } else {
            0.0
        },
        ipe_l_100_tonne_km: 0.8,
        raw_values: BTreeMap::new(),
    }
}

/// A full year of truck records, deliberately out of calendar order.
fn shuffled_year() -> Vec<VehicleRecord> {
    let months = [
        "Juillet", "Janvier", "Décembre", "Avril", "Octobre", "Février", "Mai", "Novembre",
        "Mars", "Septembre", "Juin", "Août",
    ];
    months
        .iter()
        .enumerate()
        .map(|(i, mois)| truck("220 TUN 1436", mois, 100.0 + 10.0 * i as f64, 3000.0))
        .collect()
}

#[test]
fn aggregation_conserves_mass_and_orders_the_calendar() {
    let records = shuffled_year();
    let aggregates = aggregate_by_month(&records);

    let regrouped: f64 = aggregates.iter().map(|a| a.consommation).sum();
    let direct: f64 = records.iter().map(|r| r.consommation_l).sum();
    assert!((regrouped - direct).abs() < 1e-9, "regrouping must conserve liters");

    let months: Vec<&str> = aggregates.iter().map(|a| a.month.as_str()).collect();
    assert_eq!(
        months,
        vec![
            "Janvier", "Février", "Mars", "Avril", "Mai", "Juin", "Juillet", "Août",
            "Septembre", "Octobre", "Novembre", "Décembre",
        ],
        "output must follow the French calendar regardless of input order"
    );
}

#[test]
fn validation_is_advisory_and_aggregation_still_runs() {
    let mut records = shuffled_year();
    records[0].mois = None;
    records[1].consommation_l = -4.0;

    let validation = validate_records(&records);
    assert!(!validation.is_valid);
    assert_eq!(validation.errors.len(), 2);

    // Computation proceeds despite findings; the unlabeled record lands in
    // the Unknown bucket rather than being dropped.
    let aggregates = aggregate_by_month(&records);
    assert_eq!(aggregates.len(), 12);
    assert_eq!(aggregates.last().map(|a| a.month.as_str()), Some("Unknown"));
}

#[test]
fn emission_report_matches_hand_computed_totals() {
    let records = vec![
        truck("220 TUN 1436", "Janvier", 100.0, 3000.0),
        truck("318 TUN 902", "Janvier", 50.0, 1500.0),
        truck("220 TUN 1436", "Février", 110.0, 3100.0),
    ];

    let report =
        process_emission_data(&records, "camions", FuelType::Diesel).expect("report builds");
    assert!((report.total_emissions - 260.0 * 2.68).abs() < 1e-9);
    assert!((report.lca_score - 260.0).abs() < 1e-9);
    assert_eq!(report.monthly_emissions[0].month, "Janvier");
    assert!((report.monthly_emissions[0].value - 150.0 * 2.68).abs() < 1e-9);
}

#[test]
fn regression_interpretation_round_trip() {
    // Coefficients as the backend would return them for a truck fleet.
    let coefficients = ReferenceCoefficients {
        kilometrage: 0.05,
        tonnage: 0.02,
        intercept: 10.0,
    };
    let reference = calculate_reference_consumption(coefficients, 1000.0, 5.0);
    assert!((reference - 60.1).abs() < 1e-9);

    let actual = 75.0;
    let improvement = calculate_improvement(actual, reference);
    assert!(improvement > 0.0, "actual above reference means room to improve");
    assert!((improvement - ((actual - reference) / actual * 100.0)).abs() < 1e-9);

    let target = calculate_target_consumption(actual, 3.0);
    assert!((target - 72.75).abs() < 1e-9);

    let line = reconstruct_line(
        LineCoefficients {
            slope: 0.05,
            intercept: 10.0,
        },
        &[1000.0, 2500.0, 1800.0],
    )
    .expect("line reconstructs over a finite domain");
    assert_eq!(line[0].x, 1000.0);
    assert_eq!(line[1].x, 2500.0);
    assert!((line[1].y - (0.05 * 2500.0 + 10.0)).abs() < 1e-9);
}

#[test]
fn surfaced_figures_format_for_the_french_audience() {
    let records = shuffled_year();
    let aggregates = aggregate_by_month(&records);
    let total: f64 = aggregates.iter().map(|a| a.consommation).sum();

    assert_eq!(format_number(Some(total), 2), "1\u{00A0}860,00");
    assert_eq!(format_percentage(Some(0.03), 0), "3\u{00A0}%");
    assert_eq!(format_number(None, 2), "N/A");
}
