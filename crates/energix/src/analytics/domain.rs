use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One vehicle-month observation as delivered by the backend.
///
/// Field names on the wire follow the backend model (`consommationL`,
/// `ipeL100km`, ...), so payloads fetched from `/api/records` deserialize
/// without a mapping layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub id: String,
    /// Vehicle category (camions, voitures, chariots, ...). Free-form.
    #[serde(rename = "type")]
    pub vehicle_type: String,
    /// Registration plate, unique per vehicle.
    pub matricule: String,
    /// French month label. Missing months group under "Unknown".
    #[serde(default)]
    pub mois: Option<String>,
    #[serde(default)]
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Liters consumed.
    #[serde(rename = "consommationL")]
    pub consommation_l: f64,
    /// Liters converted to tonne-oil-equivalent.
    #[serde(rename = "consommationTEP", default)]
    pub consommation_tep: f64,
    /// Cost in Tunisian dinars.
    #[serde(rename = "coutDT", default)]
    pub cout_dt: f64,
    /// Distance driven in kilometers.
    #[serde(default)]
    pub kilometrage: f64,
    /// Cargo tonnage. Meaningful for trucks only.
    #[serde(rename = "produitsTonnes", default)]
    pub produits_tonnes: f64,
    /// Energy performance index, liters per 100 km.
    #[serde(rename = "ipeL100km", default)]
    pub ipe_l_100km: f64,
    /// Energy performance index, liters per 100 km per tonne.
    /// Meaningful only when `produits_tonnes > 0`.
    #[serde(rename = "ipeL100TonneKm", default)]
    pub ipe_l_100_tonne_km: f64,
    /// Passthrough for backend-added columns the core does not interpret.
    #[serde(rename = "rawValues", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub raw_values: BTreeMap<String, RawValue>,
}

/// Tagged passthrough value for extra backend columns. Keeps the typed
/// fields above statically verifiable while still accommodating columns
/// added server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

/// Fixed French calendar enumeration. Month labels must never be sorted
/// alphabetically ("Avril" < "Janvier") or derived from locale APIs; this
/// table is the single ordering authority for every monthly series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Month {
    Janvier,
    #[serde(rename = "Février")]
    Fevrier,
    Mars,
    Avril,
    Mai,
    Juin,
    Juillet,
    #[serde(rename = "Août")]
    Aout,
    Septembre,
    Octobre,
    Novembre,
    #[serde(rename = "Décembre")]
    Decembre,
}

impl Month {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::Janvier,
            Self::Fevrier,
            Self::Mars,
            Self::Avril,
            Self::Mai,
            Self::Juin,
            Self::Juillet,
            Self::Aout,
            Self::Septembre,
            Self::Octobre,
            Self::Novembre,
            Self::Decembre,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Janvier => "Janvier",
            Self::Fevrier => "Février",
            Self::Mars => "Mars",
            Self::Avril => "Avril",
            Self::Mai => "Mai",
            Self::Juin => "Juin",
            Self::Juillet => "Juillet",
            Self::Aout => "Août",
            Self::Septembre => "Septembre",
            Self::Octobre => "Octobre",
            Self::Novembre => "Novembre",
            Self::Decembre => "Décembre",
        }
    }

    /// Calendar position, 0-based.
    pub fn position(self) -> usize {
        Self::ordered()
            .iter()
            .position(|month| *month == self)
            .unwrap_or(0)
    }

    /// Case-insensitive lookup so backend variations like "janvier" still
    /// sort correctly.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim().to_lowercase();
        Self::ordered()
            .into_iter()
            .find(|month| month.label().to_lowercase() == wanted)
    }

    /// 1-based month number to label, mirroring the backend convention.
    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            1..=12 => Some(Self::ordered()[(number - 1) as usize]),
            _ => None,
        }
    }
}

/// Fuel categories recognized by the emission converter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FuelType {
    #[default]
    Diesel,
    Essence,
    Electric,
}

impl FuelType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Diesel => "Diesel",
            Self::Essence => "Essence",
            Self::Electric => "Électrique",
        }
    }
}

/// Hard failures from the analytics core. Soft conditions (validation
/// findings, degenerate numeric inputs) never surface here.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("no records available for emission calculation")]
    NoRecords,
}
