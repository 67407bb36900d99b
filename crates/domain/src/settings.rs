use crate::{ReadError, UnitSystem, UpdateError};

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, ReadError>;
    async fn write_settings(&self, settings: Settings) -> Result<Settings, UpdateError>;
}

/// User preferences passed explicitly to the estimators.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    pub unit_system: UnitSystem,
    /// Bodyweight in kilograms, used for weighted pull-ups.
    pub bodyweight: Option<f64>,
}

impl Settings {
    /// Bodyweight if it is a usable positive number.
    #[must_use]
    pub fn bodyweight(&self) -> Option<f64> {
        self.bodyweight.filter(|bw| bw.is_finite() && *bw > 0.0)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::Metric,
            bodyweight: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_default() {
        let settings = Settings::default();
        assert_eq!(settings.unit_system, UnitSystem::Metric);
        assert_eq!(settings.bodyweight, None);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(82.5), Some(82.5))]
    #[case(Some(0.0), None)]
    #[case(Some(-70.0), None)]
    #[case(Some(f64::NAN), None)]
    fn test_bodyweight(#[case] bodyweight: Option<f64>, #[case] expected: Option<f64>) {
        let settings = Settings {
            bodyweight,
            ..Settings::default()
        };
        assert_eq!(settings.bodyweight(), expected);
    }

    #[test]
    fn test_serialization() {
        let settings = Settings {
            unit_system: UnitSystem::Imperial,
            bodyweight: Some(90.0),
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"unit_system":"imperial","bodyweight":90.0}"#);
        assert_eq!(serde_json::from_str::<Settings>(&json).unwrap(), settings);
    }

    #[test]
    fn test_deserialization_of_partial_settings() {
        assert_eq!(
            serde_json::from_str::<Settings>(r#"{"unit_system":"imperial"}"#).unwrap(),
            Settings {
                unit_system: UnitSystem::Imperial,
                bodyweight: None,
            }
        );
    }
}
