use super::domain::{Month, VehicleRecord};
use serde::Serialize;
use std::collections::HashMap;

/// Label used for records without a month so they group together instead of
/// being dropped.
pub const UNKNOWN_MONTH: &str = "Unknown";

/// Aggregated figures for one month of activity, ready for chart series.
///
/// Consumption, mileage, tonnage, and cost are sums over the group; the IPE
/// fields are arithmetic means over `count` contributing records. Summing
/// IPE values across records would produce a fictitious metric with no
/// engineering meaning.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyAggregate {
    pub month: String,
    pub year: String,
    pub consommation: f64,
    pub kilometrage: f64,
    #[serde(rename = "produitsTonnes")]
    pub produits_tonnes: f64,
    #[serde(rename = "coutDT")]
    pub cout_dt: f64,
    pub ipe: f64,
    #[serde(rename = "ipeTonne")]
    pub ipe_tonne: f64,
    pub count: usize,
}

/// Aggregated figures for one vehicle across the whole input window.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleAggregate {
    pub matricule: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub consommation: f64,
    pub kilometrage: f64,
    #[serde(rename = "produitsTonnes")]
    pub produits_tonnes: f64,
    #[serde(rename = "coutDT")]
    pub cout_dt: f64,
    pub ipe: f64,
    #[serde(rename = "ipeTonne")]
    pub ipe_tonne: f64,
    pub count: usize,
}

/// Consumption share of one vehicle category, for breakdown pies.
#[derive(Debug, Clone, Serialize)]
pub struct TypeBreakdownEntry {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Default)]
struct Accumulator {
    year: String,
    vehicle_type: String,
    consommation: f64,
    kilometrage: f64,
    produits_tonnes: f64,
    cout_dt: f64,
    ipe_sum: f64,
    ipe_tonne_sum: f64,
    count: usize,
}

impl Accumulator {
    fn absorb(&mut self, record: &VehicleRecord) {
        self.consommation += finite_or_zero(record.consommation_l);
        self.kilometrage += finite_or_zero(record.kilometrage);
        self.produits_tonnes += finite_or_zero(record.produits_tonnes);
        self.cout_dt += finite_or_zero(record.cout_dt);
        self.ipe_sum += finite_or_zero(record.ipe_l_100km);
        self.ipe_tonne_sum += finite_or_zero(record.ipe_l_100_tonne_km);
        self.count += 1;
    }

    fn mean_ipe(&self) -> (f64, f64) {
        if self.count == 0 {
            (0.0, 0.0)
        } else {
            (
                self.ipe_sum / self.count as f64,
                self.ipe_tonne_sum / self.count as f64,
            )
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn month_label(record: &VehicleRecord) -> String {
    match record.mois.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => UNKNOWN_MONTH.to_string(),
    }
}

/// Group records by month label and fold each group into a
/// [`MonthlyAggregate`]. Output is in calendar order per the fixed French
/// month table; labels the table does not know (including "Unknown") sort
/// after Décembre in first-seen order.
pub fn aggregate_by_month(records: &[VehicleRecord]) -> Vec<MonthlyAggregate> {
    let mut groups: HashMap<String, Accumulator> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for record in records {
        let label = month_label(record);
        let acc = groups.entry(label.clone()).or_insert_with(|| {
            first_seen.push(label.clone());
            Accumulator {
                year: record.year.clone(),
                ..Accumulator::default()
            }
        });
        acc.absorb(record);
    }

    let mut aggregates: Vec<MonthlyAggregate> = first_seen
        .into_iter()
        .map(|label| {
            let acc = groups.remove(&label).expect("group recorded when first seen");
            let (ipe, ipe_tonne) = acc.mean_ipe();
            MonthlyAggregate {
                month: label,
                year: acc.year,
                consommation: acc.consommation,
                kilometrage: acc.kilometrage,
                produits_tonnes: acc.produits_tonnes,
                cout_dt: acc.cout_dt,
                ipe,
                ipe_tonne,
                count: acc.count,
            }
        })
        .collect();

    sort_monthly(&mut aggregates, |aggregate| aggregate.month.as_str());
    aggregates
}

/// Group records by registration plate and fold each group into a
/// [`VehicleAggregate`], in first-seen order.
pub fn aggregate_by_vehicle(records: &[VehicleRecord]) -> Vec<VehicleAggregate> {
    let mut groups: HashMap<String, Accumulator> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for record in records {
        let acc = groups.entry(record.matricule.clone()).or_insert_with(|| {
            first_seen.push(record.matricule.clone());
            Accumulator {
                vehicle_type: record.vehicle_type.clone(),
                ..Accumulator::default()
            }
        });
        acc.absorb(record);
    }

    first_seen
        .into_iter()
        .map(|matricule| {
            let acc = groups
                .remove(&matricule)
                .expect("group recorded when first seen");
            let (ipe, ipe_tonne) = acc.mean_ipe();
            VehicleAggregate {
                matricule,
                vehicle_type: acc.vehicle_type,
                consommation: acc.consommation,
                kilometrage: acc.kilometrage,
                produits_tonnes: acc.produits_tonnes,
                cout_dt: acc.cout_dt,
                ipe,
                ipe_tonne,
                count: acc.count,
            }
        })
        .collect()
}

/// Sum consumption per vehicle category, in first-seen order.
pub fn vehicle_type_breakdown(records: &[VehicleRecord]) -> Vec<TypeBreakdownEntry> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for record in records {
        let name = if record.vehicle_type.trim().is_empty() {
            "Unknown".to_string()
        } else {
            record.vehicle_type.clone()
        };
        if !totals.contains_key(&name) {
            first_seen.push(name.clone());
        }
        *totals.entry(name).or_insert(0.0) += finite_or_zero(record.consommation_l);
    }

    first_seen
        .into_iter()
        .map(|name| {
            let value = totals.remove(&name).unwrap_or(0.0);
            TypeBreakdownEntry { name, value }
        })
        .collect()
}

/// Stable calendar sort for any month-labeled series. Known French months
/// take their table position; anything else keeps relative input order after
/// Décembre.
pub fn sort_monthly<T, F>(items: &mut [T], label_of: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_key(|item| {
        Month::from_label(label_of(item))
            .map(Month::position)
            .unwrap_or(Month::ordered().len())
    });
}
