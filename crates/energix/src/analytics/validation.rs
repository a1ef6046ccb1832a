use super::domain::VehicleRecord;
use serde::Serialize;

/// Outcome of a pre-flight validation pass. Advisory only: callers decide
/// whether to proceed with the usable subset of the data.
#[derive(Debug, Clone, Serialize)]
pub struct RecordValidation {
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Check raw vehicle records before they feed any aggregate.
///
/// Scans every record (no short-circuit) and collects human-readable
/// findings with 1-based record indexes: missing month, non-finite
/// consumption, negative consumption. An empty input is a single finding of
/// its own.
pub fn validate_records(records: &[VehicleRecord]) -> RecordValidation {
    if records.is_empty() {
        return RecordValidation {
            is_valid: false,
            errors: vec!["No records provided".to_string()],
        };
    }

    let mut errors = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let position = index + 1;
        if record.mois.as_deref().map_or(true, |mois| mois.trim().is_empty()) {
            errors.push(format!("Record {position}: Missing month"));
        }
        if !record.consommation_l.is_finite() {
            errors.push(format!("Record {position}: Invalid consumption value"));
        }
        if record.consommation_l < 0.0 {
            errors.push(format!("Record {position}: Negative consumption value"));
        }
    }

    RecordValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::record;

    #[test]
    fn empty_input_is_a_single_finding() {
        let validation = validate_records(&[]);
        assert!(!validation.is_valid);
        assert_eq!(validation.errors, vec!["No records provided".to_string()]);
    }

    #[test]
    fn clean_records_pass() {
        let records = vec![
            record("A-1", "Janvier", 420.0),
            record("A-1", "Février", 385.5),
        ];
        let validation = validate_records(&records);
        assert!(validation.is_valid);
        assert!(validation.errors.is_empty());
    }

    #[test]
    fn findings_carry_one_based_record_indexes() {
        let mut bad = record("A-1", "Janvier", -5.0);
        bad.mois = None;
        let records = vec![record("A-1", "Janvier", 100.0), bad];

        let validation = validate_records(&records);
        assert!(!validation.is_valid);
        assert!(validation.errors.contains(&"Record 2: Missing month".to_string()));
        assert!(validation
            .errors
            .contains(&"Record 2: Negative consumption value".to_string()));
    }

    #[test]
    fn non_finite_consumption_is_flagged_without_stopping_the_scan() {
        let mut nan = record("A-1", "Mars", f64::NAN);
        nan.mois = Some("Mars".to_string());
        let records = vec![nan, record("A-2", "", 50.0)];

        let validation = validate_records(&records);
        assert!(validation
            .errors
            .contains(&"Record 1: Invalid consumption value".to_string()));
        assert!(validation.errors.contains(&"Record 2: Missing month".to_string()));
    }
}
