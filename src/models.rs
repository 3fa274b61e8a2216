use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Self-reported mood for a daily health entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
    Anxious,
    Energetic,
    Tired,
}

impl Mood {
    /// Moods counted as positive by the mood trend classifier
    pub fn is_positive(&self) -> bool {
        matches!(self, Mood::Happy | Mood::Energetic)
    }

    /// Moods counted as negative by the mood trend classifier and the
    /// activity correlation rule
    pub fn is_negative(&self) -> bool {
        matches!(self, Mood::Sad | Mood::Anxious | Mood::Tired)
    }

    /// Indonesian display label as shown in the entry form
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "Senang",
            Mood::Neutral => "Netral",
            Mood::Sad => "Sedih",
            Mood::Anxious => "Cemas",
            Mood::Energetic => "Energik",
            Mood::Tired => "Lelah",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Energetic => "energetic",
            Mood::Tired => "tired",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "happy" | "senang" => Ok(Mood::Happy),
            "neutral" | "netral" => Ok(Mood::Neutral),
            "sad" | "sedih" => Ok(Mood::Sad),
            "anxious" | "cemas" => Ok(Mood::Anxious),
            "energetic" | "energik" => Ok(Mood::Energetic),
            "tired" | "lelah" => Ok(Mood::Tired),
            _ => Err(format!("Unknown mood: {}", s)),
        }
    }
}

/// One daily self-reported health entry
///
/// Records are immutable once created and owned by the storage layer; the
/// insight engine only reads them. Metric fields are optional because users
/// can submit partial entries; aggregation filters out missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// When the entry was recorded
    pub recorded_at: DateTime<Utc>,

    /// Resting heart rate in beats per minute
    pub heart_rate: Option<f64>,

    /// Sleep duration in hours
    pub sleep_duration: Option<f64>,

    /// Water intake in glasses
    pub water_intake: Option<u8>,

    /// Self-assessed stress level on a 1-10 scale
    pub stress_level: Option<u8>,

    /// Physical activity in minutes
    pub activity_level: Option<u16>,

    /// Self-reported mood
    pub mood: Option<Mood>,
}

impl HealthRecord {
    /// Create an empty record for the given timestamp
    pub fn new(recorded_at: DateTime<Utc>) -> Self {
        HealthRecord {
            id: Uuid::new_v4(),
            recorded_at,
            heart_rate: None,
            sleep_duration: None,
            water_intake: None,
            stress_level: None,
            activity_level: None,
            mood: None,
        }
    }
}

/// The five numeric metrics tracked per record
///
/// Drives per-field aggregation and baseline comparison without repeating
/// the field list at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    HeartRate,
    SleepDuration,
    WaterIntake,
    StressLevel,
    ActivityLevel,
}

impl MetricField {
    /// All tracked numeric fields, in the canonical order used by
    /// aggregation and baseline comparison
    pub const ALL: [MetricField; 5] = [
        MetricField::HeartRate,
        MetricField::SleepDuration,
        MetricField::WaterIntake,
        MetricField::StressLevel,
        MetricField::ActivityLevel,
    ];

    /// Extract this field's value from a record, if present
    pub fn value(&self, record: &HealthRecord) -> Option<f64> {
        match self {
            MetricField::HeartRate => record.heart_rate,
            MetricField::SleepDuration => record.sleep_duration,
            MetricField::WaterIntake => record.water_intake.map(f64::from),
            MetricField::StressLevel => record.stress_level.map(f64::from),
            MetricField::ActivityLevel => record.activity_level.map(f64::from),
        }
    }

    /// Lower values are better for stress and resting heart rate; higher is
    /// better for everything else. Used by the baseline comparator.
    pub fn lower_is_better(&self) -> bool {
        matches!(self, MetricField::StressLevel | MetricField::HeartRate)
    }

    /// Indonesian display label
    pub fn label(&self) -> &'static str {
        match self {
            MetricField::HeartRate => "Detak Jantung",
            MetricField::SleepDuration => "Durasi Tidur",
            MetricField::WaterIntake => "Asupan Air",
            MetricField::StressLevel => "Tingkat Stres",
            MetricField::ActivityLevel => "Tingkat Aktivitas",
        }
    }

    /// Unit suffix for display
    pub fn unit(&self) -> &'static str {
        match self {
            MetricField::HeartRate => "BPM",
            MetricField::SleepDuration => "jam",
            MetricField::WaterIntake => "gelas",
            MetricField::StressLevel => "/10",
            MetricField::ActivityLevel => "menit",
        }
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetricField::HeartRate => "heart_rate",
            MetricField::SleepDuration => "sleep_duration",
            MetricField::WaterIntake => "water_intake",
            MetricField::StressLevel => "stress_level",
            MetricField::ActivityLevel => "activity_level",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_classification() {
        assert!(Mood::Happy.is_positive());
        assert!(Mood::Energetic.is_positive());
        assert!(!Mood::Neutral.is_positive());
        assert!(Mood::Tired.is_negative());
        assert!(Mood::Sad.is_negative());
        assert!(Mood::Anxious.is_negative());
        assert!(!Mood::Neutral.is_negative());
    }

    #[test]
    fn test_mood_parsing() {
        assert_eq!("tired".parse::<Mood>().unwrap(), Mood::Tired);
        assert_eq!("Lelah".parse::<Mood>().unwrap(), Mood::Tired);
        assert!("grumpy".parse::<Mood>().is_err());
    }

    #[test]
    fn test_metric_field_access() {
        let mut record = HealthRecord::new(Utc::now());
        record.heart_rate = Some(72.0);
        record.water_intake = Some(8);

        assert_eq!(MetricField::HeartRate.value(&record), Some(72.0));
        assert_eq!(MetricField::WaterIntake.value(&record), Some(8.0));
        assert_eq!(MetricField::SleepDuration.value(&record), None);
    }

    #[test]
    fn test_improvement_direction() {
        assert!(MetricField::StressLevel.lower_is_better());
        assert!(MetricField::HeartRate.lower_is_better());
        assert!(!MetricField::SleepDuration.lower_is_better());
        assert!(!MetricField::WaterIntake.lower_is_better());
        assert!(!MetricField::ActivityLevel.lower_is_better());
    }
}
