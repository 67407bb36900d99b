use std::fmt;

pub const CM_PER_INCH: f64 = 2.54;
pub const INCHES_PER_FOOT: f64 = 12.0;
pub const LB_PER_KG: f64 = 2.204_622_621_8;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Convert a weight entered in this unit system to kilograms.
    #[must_use]
    pub fn weight_to_kg(self, value: f64) -> f64 {
        match self {
            UnitSystem::Metric => value,
            UnitSystem::Imperial => lb_to_kg(value),
        }
    }

    /// Convert a weight in kilograms to this unit system for display.
    #[must_use]
    pub fn weight_from_kg(self, kg: f64) -> f64 {
        match self {
            UnitSystem::Metric => kg,
            UnitSystem::Imperial => kg_to_lb(kg),
        }
    }

    /// Convert a single-scalar length (waist, neck, hips) to centimetres.
    #[must_use]
    pub fn length_to_cm(self, value: f64) -> f64 {
        match self {
            UnitSystem::Metric => value,
            UnitSystem::Imperial => inches_to_cm(value),
        }
    }

    #[must_use]
    pub fn weight_unit(self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lb",
        }
    }

    #[must_use]
    pub fn length_unit(self) -> &'static str {
        match self {
            UnitSystem::Metric => "cm",
            UnitSystem::Imperial => "in",
        }
    }
}

impl From<&str> for UnitSystem {
    fn from(value: &str) -> Self {
        match value {
            "imperial" => UnitSystem::Imperial,
            _ => UnitSystem::Metric,
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                UnitSystem::Metric => "metric",
                UnitSystem::Imperial => "imperial",
            }
        )
    }
}

#[must_use]
pub fn inches_to_cm(inches: f64) -> f64 {
    inches * CM_PER_INCH
}

#[must_use]
pub fn cm_to_inches(cm: f64) -> f64 {
    cm / CM_PER_INCH
}

#[must_use]
pub fn feet_inches_to_cm(feet: f64, inches: f64) -> f64 {
    inches_to_cm(feet * INCHES_PER_FOOT + inches)
}

/// Split a length into whole feet and remaining inches.
#[must_use]
pub fn cm_to_feet_inches(cm: f64) -> (f64, f64) {
    let total_inches = cm_to_inches(cm);
    let feet = (total_inches / INCHES_PER_FOOT).floor();
    (feet, total_inches - feet * INCHES_PER_FOOT)
}

#[must_use]
pub fn kg_to_lb(kg: f64) -> f64 {
    kg * LB_PER_KG
}

#[must_use]
pub fn lb_to_kg(lb: f64) -> f64 {
    lb / LB_PER_KG
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_inches_round_trip() {
        let cm = inches_to_cm(34.0);
        assert_approx_eq!(cm, 86.36, 1e-9);
        assert_approx_eq!(cm_to_inches(cm), 34.0, 1e-6);
    }

    #[rstest]
    #[case::six_feet(6.0, 0.0, 182.88)]
    #[case::five_ten(5.0, 10.0, 177.8)]
    #[case::inches_only(0.0, 11.5, 29.21)]
    fn test_feet_inches_to_cm(#[case] feet: f64, #[case] inches: f64, #[case] expected: f64) {
        assert_approx_eq!(feet_inches_to_cm(feet, inches), expected, 1e-9);
    }

    #[test]
    fn test_cm_to_feet_inches() {
        let (feet, inches) = cm_to_feet_inches(177.8);
        assert_approx_eq!(feet, 5.0, 1e-9);
        assert_approx_eq!(inches, 10.0, 1e-9);
    }

    #[test]
    fn test_weight_conversion() {
        assert_approx_eq!(kg_to_lb(100.0), 220.462_262_18, 1e-6);
        assert_approx_eq!(lb_to_kg(kg_to_lb(82.5)), 82.5, 1e-9);
        assert_approx_eq!(UnitSystem::Imperial.weight_to_kg(225.0), 102.058_283, 1e-6);
        assert_approx_eq!(UnitSystem::Metric.weight_to_kg(100.0), 100.0, 1e-12);
        assert_approx_eq!(UnitSystem::Imperial.weight_from_kg(100.0), 220.462_262_18, 1e-6);
    }

    #[test]
    fn test_length_to_cm() {
        assert_approx_eq!(UnitSystem::Metric.length_to_cm(85.0), 85.0, 1e-12);
        assert_approx_eq!(UnitSystem::Imperial.length_to_cm(34.0), 86.36, 1e-9);
    }

    #[rstest]
    #[case(UnitSystem::Metric, "metric")]
    #[case(UnitSystem::Imperial, "imperial")]
    fn test_unit_system_display(#[case] unit_system: UnitSystem, #[case] string: &str) {
        assert_eq!(unit_system.to_string(), string);
        assert_eq!(UnitSystem::from(string), unit_system);
    }
}
