//! Record plausibility validation
//!
//! Imported values must fall inside physiologically plausible ranges before
//! they reach storage. The ranges are wide on purpose: they catch unit
//! mistakes and typos, not borderline health states.

use crate::models::HealthRecord;

/// Plausible value ranges for imported records
#[derive(Debug, Clone, PartialEq)]
pub struct PlausibleRanges {
    pub heart_rate_min: f64,
    pub heart_rate_max: f64,
    pub sleep_hours_max: f64,
    pub water_glasses_max: u8,
    pub stress_min: u8,
    pub stress_max: u8,
    pub activity_minutes_max: u16,
}

impl Default for PlausibleRanges {
    fn default() -> Self {
        PlausibleRanges {
            heart_rate_min: 20.0,
            heart_rate_max: 250.0,
            sleep_hours_max: 24.0,
            water_glasses_max: 30,
            stress_min: 1,
            stress_max: 10,
            activity_minutes_max: 1440,
        }
    }
}

/// Validates records against the plausible ranges
#[derive(Debug, Default)]
pub struct RecordValidator {
    ranges: PlausibleRanges,
}

impl RecordValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ranges(ranges: PlausibleRanges) -> Self {
        RecordValidator { ranges }
    }

    /// Collect every implausible value in the record. An empty list means
    /// the record is acceptable; missing fields are always acceptable.
    pub fn issues(&self, record: &HealthRecord) -> Vec<String> {
        let mut issues = Vec::new();
        let r = &self.ranges;

        if let Some(hr) = record.heart_rate {
            if !(r.heart_rate_min..=r.heart_rate_max).contains(&hr) {
                issues.push(format!(
                    "heart_rate {} outside plausible range {}-{}",
                    hr, r.heart_rate_min, r.heart_rate_max
                ));
            }
        }

        if let Some(sleep) = record.sleep_duration {
            if !(0.0..=r.sleep_hours_max).contains(&sleep) {
                issues.push(format!(
                    "sleep_duration {} outside plausible range 0-{}",
                    sleep, r.sleep_hours_max
                ));
            }
        }

        if let Some(water) = record.water_intake {
            if water > r.water_glasses_max {
                issues.push(format!(
                    "water_intake {} above plausible maximum {}",
                    water, r.water_glasses_max
                ));
            }
        }

        if let Some(stress) = record.stress_level {
            if !(r.stress_min..=r.stress_max).contains(&stress) {
                issues.push(format!(
                    "stress_level {} outside scale {}-{}",
                    stress, r.stress_min, r.stress_max
                ));
            }
        }

        if let Some(activity) = record.activity_level {
            if activity > r.activity_minutes_max {
                issues.push(format!(
                    "activity_level {} above plausible maximum {}",
                    activity, r.activity_minutes_max
                ));
            }
        }

        issues
    }

    /// Convenience wrapper: `Ok` when no issues exist
    pub fn validate(&self, record: &HealthRecord) -> Result<(), String> {
        let issues = self.issues(record);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record() -> HealthRecord {
        let mut r = HealthRecord::new(Utc::now());
        r.heart_rate = Some(72.0);
        r.sleep_duration = Some(7.5);
        r.water_intake = Some(8);
        r.stress_level = Some(3);
        r.activity_level = Some(35);
        r
    }

    #[test]
    fn test_plausible_record_passes() {
        let validator = RecordValidator::new();
        assert!(validator.validate(&record()).is_ok());
    }

    #[test]
    fn test_missing_fields_are_acceptable() {
        let validator = RecordValidator::new();
        let empty = HealthRecord::new(Utc::now());
        assert!(validator.validate(&empty).is_ok());
    }

    #[test]
    fn test_implausible_heart_rate() {
        let validator = RecordValidator::new();
        let mut r = record();
        r.heart_rate = Some(400.0);
        let err = validator.validate(&r).unwrap_err();
        assert!(err.contains("heart_rate"));
    }

    #[test]
    fn test_stress_scale_bounds() {
        let validator = RecordValidator::new();
        let mut r = record();
        r.stress_level = Some(0);
        assert!(validator.validate(&r).is_err());
        r.stress_level = Some(11);
        assert!(validator.validate(&r).is_err());
        r.stress_level = Some(10);
        assert!(validator.validate(&r).is_ok());
    }

    #[test]
    fn test_multiple_issues_are_collected() {
        let validator = RecordValidator::new();
        let mut r = record();
        r.sleep_duration = Some(30.0);
        r.water_intake = Some(99);
        assert_eq!(validator.issues(&r).len(), 2);
    }
}
