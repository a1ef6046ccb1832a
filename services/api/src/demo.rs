use clap::Args;
use energix::analytics::{
    aggregate_by_month, calculate_improvement, calculate_reference_consumption,
    calculate_target_consumption, process_emission_data, validate_records,
    vehicle_type_breakdown, FuelType, ReferenceCoefficients, VehicleRecord,
};
use energix::error::AppError;
use energix::format::{format_currency, format_number, format_percentage};
use std::collections::BTreeMap;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Improvement goal in percent for the target-consumption figure.
    #[arg(long, default_value_t = 3.0)]
    pub(crate) improvement_goal: f64,
    /// Print the per-month aggregate table in addition to the summary.
    #[arg(long)]
    pub(crate) list_months: bool,
}

/// Run the whole SER pipeline over built-in sample records and print the
/// results the way the dashboard would surface them.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let records = sample_records();

    println!("ENERGIX analytics demo ({} sample records)\n", records.len());

    let validation = validate_records(&records);
    if validation.is_valid {
        println!("Validation: all records usable");
    } else {
        println!("Validation findings (advisory):");
        for finding in &validation.errors {
            println!("  - {finding}");
        }
    }

    let monthly = aggregate_by_month(&records);
    let total_consumption: f64 = monthly.iter().map(|m| m.consommation).sum();
    let total_cost: f64 = monthly.iter().map(|m| m.cout_dt).sum();
    println!("\nFleet totals");
    println!("  Consumption: {} L", format_number(Some(total_consumption), 2));
    println!("  Cost:        {}", format_currency(Some(total_cost), 2));

    if args.list_months {
        println!("\nMonthly aggregates");
        for month in &monthly {
            println!(
                "  {:<10} {} L over {} km (IPE {} L/100km, {} records)",
                month.month,
                format_number(Some(month.consommation), 1),
                format_number(Some(month.kilometrage), 0),
                format_number(Some(month.ipe), 2),
                month.count
            );
        }
    }

    println!("\nConsumption by vehicle type");
    for entry in vehicle_type_breakdown(&records) {
        println!("  {:<10} {} L", entry.name, format_number(Some(entry.value), 1));
    }

    let emissions = process_emission_data(&records, "camions", FuelType::Diesel)?;
    println!("\nEmissions (diesel factors)");
    println!(
        "  Total CO2:  {} kg",
        format_number(Some(emissions.total_emissions), 1)
    );
    println!("  LCA score:  {}", format_number(Some(emissions.lca_score), 1));

    // Coefficients as the regression backend would return them for this
    // fleet; the demo only interprets them.
    let coefficients = ReferenceCoefficients {
        kilometrage: 0.012,
        tonnage: 0.45,
        intercept: 55.0,
    };
    let mean_km = records.iter().map(|r| r.kilometrage).sum::<f64>() / records.len() as f64;
    let mean_tonnes =
        records.iter().map(|r| r.produits_tonnes).sum::<f64>() / records.len() as f64;
    let mean_actual = total_consumption / records.len() as f64;

    let reference = calculate_reference_consumption(coefficients, mean_km, mean_tonnes);
    let improvement = calculate_improvement(mean_actual, reference);
    let target = calculate_target_consumption(mean_actual, args.improvement_goal);

    println!("\nSER reference analysis (mean vehicle-month)");
    println!("  Actual:      {} L", format_number(Some(mean_actual), 2));
    println!("  Reference:   {} L", format_number(Some(reference), 2));
    println!(
        "  Deviation:   {}",
        format_percentage(Some(improvement / 100.0), 2)
    );
    println!(
        "  Target ({}): {} L",
        format_percentage(Some(args.improvement_goal / 100.0), 0),
        format_number(Some(target), 2)
    );

    Ok(())
}

fn sample_records() -> Vec<VehicleRecord> {
    let months = [
        "Juillet", "Janvier", "Avril", "Octobre", "Février", "Mai",
    ];
    let fleet = [
        ("220 TUN 1436", "camions", 26.0),
        ("318 TUN 902", "camions", 19.5),
        ("77 TUN 2210", "voitures", 0.0),
    ];

    let mut records = Vec::new();
    for (i, mois) in months.iter().enumerate() {
        for (matricule, vehicle_type, tonnes) in fleet {
            let kilometrage = 2800.0 + 150.0 * i as f64;
            let consommation_l = if vehicle_type == "camions" {
                kilometrage * 0.14
            } else {
                kilometrage * 0.065
            };
            records.push(VehicleRecord {
                id: format!("{matricule}-{mois}"),
                vehicle_type: vehicle_type.to_string(),
                matricule: matricule.to_string(),
                mois: Some(mois.to_string()),
                year: "2024".to_string(),
                region: Some("Tunis".to_string()),
                consommation_l,
                consommation_tep: consommation_l * 0.00086,
                cout_dt: consommation_l * 1.8,
                kilometrage,
                produits_tonnes: tonnes,
                ipe_l_100km: consommation_l / kilometrage * 100.0,
                ipe_l_100_tonne_km: if tonnes > 0.0 {
                    consommation_l / kilometrage * 100.0 / tonnes
                } else {
                    0.0
                },
                raw_values: BTreeMap::new(),
            });
        }
    }
    records
}
