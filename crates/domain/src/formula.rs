use std::slice::Iter;

use derive_more::Display;

/// Estimation formula mapping a submaximal set to a one-repetition maximum.
#[derive(
    Debug,
    Display,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Formula {
    #[display("Epley")]
    Epley,
    #[display("Brzycki")]
    Brzycki,
    #[display("Lander")]
    Lander,
    #[display("Overhead Press")]
    OverheadPress,
    #[display("Repetitions")]
    RepetitionBased,
}

impl Formula {
    pub const EPLEY_FACTOR: f64 = 1.0 / 30.0;
    pub const OVERHEAD_PRESS_FACTOR: f64 = 0.025;
    /// Lower bound for the Brzycki and Lander denominators.
    pub const MIN_DENOMINATOR: f64 = 1.0;

    pub fn iter() -> Iter<'static, Formula> {
        static FORMULAS: [Formula; 5] = [
            Formula::Epley,
            Formula::Brzycki,
            Formula::Lander,
            Formula::OverheadPress,
            Formula::RepetitionBased,
        ];
        FORMULAS.iter()
    }

    #[must_use]
    pub fn is_weight_based(self) -> bool {
        self != Formula::RepetitionBased
    }

    /// Estimate the one-repetition maximum of a set.
    ///
    /// A single repetition is its own maximum, so every weight-based formula
    /// returns the weight unchanged for `reps == 1`. The repetition-based
    /// formula ignores the weight and returns the repetition count.
    pub fn estimate_one_rm(self, weight_kg: f64, reps: u32) -> Result<f64, FormulaError> {
        if reps == 0 {
            return Err(FormulaError::InvalidReps(reps));
        }

        if !weight_kg.is_finite() || weight_kg < 0.0 {
            return Err(FormulaError::InvalidWeight(weight_kg));
        }

        let r = f64::from(reps);

        if self == Formula::RepetitionBased {
            return Ok(r);
        }

        if reps == 1 {
            return Ok(weight_kg);
        }

        Ok(weight_kg * self.factor(r))
    }

    /// Estimate the weight that can be moved for `reps` repetitions given a
    /// one-repetition maximum.
    #[must_use]
    pub fn weight_for_reps(self, one_rm: f64, reps: u32) -> Option<f64> {
        if reps == 0 || !one_rm.is_finite() || one_rm < 0.0 || !self.is_weight_based() {
            return None;
        }

        if reps == 1 {
            return Some(one_rm);
        }

        Some(one_rm / self.factor(f64::from(reps)))
    }

    fn factor(self, r: f64) -> f64 {
        match self {
            Formula::Epley => 1.0 + r * Self::EPLEY_FACTOR,
            Formula::Brzycki => 36.0 / (37.0 - r).max(Self::MIN_DENOMINATOR),
            Formula::Lander => 100.0 / (101.3 - 2.671_23 * r).max(Self::MIN_DENOMINATOR),
            Formula::OverheadPress => 1.0 + Self::OVERHEAD_PRESS_FACTOR * r,
            Formula::RepetitionBased => 1.0,
        }
    }
}

pub fn estimate_one_rm(formula: Formula, weight_kg: f64, reps: u32) -> Result<f64, FormulaError> {
    formula.estimate_one_rm(weight_kg, reps)
}

/// Mean of the Epley, Brzycki and Lander estimates.
pub fn estimate_one_rm_average(weight_kg: f64, reps: u32) -> Result<f64, FormulaError> {
    let formulas = [Formula::Epley, Formula::Brzycki, Formula::Lander];
    let mut sum = 0.0;
    for formula in formulas {
        sum += formula.estimate_one_rm(weight_kg, reps)?;
    }
    #[allow(clippy::cast_precision_loss)]
    Ok(sum / formulas.len() as f64)
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum FormulaError {
    #[error("Repetitions must be a positive whole number ({0} given)")]
    InvalidReps(u32),
    #[error("Weight must be a non-negative number ({0} given)")]
    InvalidWeight(f64),
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::epley(Formula::Epley, 116.666_667)]
    #[case::brzycki(Formula::Brzycki, 112.5)]
    #[case::lander(Formula::Lander, 113.708_918)]
    #[case::overhead_press(Formula::OverheadPress, 112.5)]
    #[case::repetition_based(Formula::RepetitionBased, 5.0)]
    fn test_estimate_one_rm_five_reps(#[case] formula: Formula, #[case] expected: f64) {
        assert_approx_eq!(formula.estimate_one_rm(100.0, 5).unwrap(), expected, 1e-5);
    }

    #[test]
    fn test_estimate_one_rm_single_rep() {
        for formula in Formula::iter().filter(|f| f.is_weight_based()) {
            assert_approx_eq!(formula.estimate_one_rm(87.5, 1).unwrap(), 87.5, 1e-12);
        }
        assert_approx_eq!(
            Formula::RepetitionBased.estimate_one_rm(87.5, 1).unwrap(),
            1.0,
            1e-12
        );
    }

    #[rstest]
    #[case::brzycki_singularity(Formula::Brzycki, 37, 3600.0)]
    #[case::brzycki_beyond_singularity(Formula::Brzycki, 50, 3600.0)]
    #[case::lander_beyond_singularity(Formula::Lander, 40, 10_000.0)]
    fn test_estimate_one_rm_denominator_guard(
        #[case] formula: Formula,
        #[case] reps: u32,
        #[case] expected: f64,
    ) {
        let one_rm = formula.estimate_one_rm(100.0, reps).unwrap();
        assert!(one_rm.is_finite());
        assert_approx_eq!(one_rm, expected, 1e-9);
    }

    #[test]
    fn test_estimate_one_rm_repetition_based_ignores_weight() {
        assert_eq!(Formula::RepetitionBased.estimate_one_rm(0.0, 12), Ok(12.0));
        assert_eq!(Formula::RepetitionBased.estimate_one_rm(20.0, 12), Ok(12.0));
    }

    #[rstest]
    #[case::zero_reps(100.0, 0, Err(FormulaError::InvalidReps(0)))]
    #[case::negative_weight(-1.0, 5, Err(FormulaError::InvalidWeight(-1.0)))]
    #[case::infinite_weight(f64::INFINITY, 5, Err(FormulaError::InvalidWeight(f64::INFINITY)))]
    #[case::zero_weight(0.0, 5, Ok(0.0))]
    fn test_estimate_one_rm_invalid(
        #[case] weight: f64,
        #[case] reps: u32,
        #[case] expected: Result<f64, FormulaError>,
    ) {
        assert_eq!(estimate_one_rm(Formula::Epley, weight, reps), expected);
    }

    #[test]
    fn test_estimate_one_rm_nan_weight() {
        assert!(matches!(
            estimate_one_rm(Formula::Brzycki, f64::NAN, 3),
            Err(FormulaError::InvalidWeight(w)) if w.is_nan()
        ));
    }

    #[test]
    fn test_estimate_one_rm_average() {
        assert_approx_eq!(estimate_one_rm_average(100.0, 5).unwrap(), 114.291_861, 1e-5);
        assert_approx_eq!(estimate_one_rm_average(100.0, 1).unwrap(), 100.0, 1e-12);
        assert_eq!(
            estimate_one_rm_average(100.0, 0),
            Err(FormulaError::InvalidReps(0))
        );
    }

    #[rstest]
    #[case::epley(Formula::Epley)]
    #[case::brzycki(Formula::Brzycki)]
    #[case::lander(Formula::Lander)]
    #[case::overhead_press(Formula::OverheadPress)]
    fn test_weight_for_reps_inverts_estimate(#[case] formula: Formula) {
        let one_rm = formula.estimate_one_rm(80.0, 8).unwrap();
        assert_approx_eq!(formula.weight_for_reps(one_rm, 8).unwrap(), 80.0, 1e-9);
        assert_approx_eq!(formula.weight_for_reps(one_rm, 1).unwrap(), one_rm, 1e-12);
    }

    #[test]
    fn test_weight_for_reps_undefined() {
        assert_eq!(Formula::RepetitionBased.weight_for_reps(10.0, 5), None);
        assert_eq!(Formula::Epley.weight_for_reps(100.0, 0), None);
        assert_eq!(Formula::Epley.weight_for_reps(f64::NAN, 5), None);
    }

    #[test]
    fn test_formula_display() {
        assert_eq!(
            Formula::iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["Epley", "Brzycki", "Lander", "Overhead Press", "Repetitions"]
        );
    }
}
