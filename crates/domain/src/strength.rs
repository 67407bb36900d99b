use log::{debug, warn};

use crate::{ExerciseKind, Formula, FormulaError, StrengthLevel};

/// Assumed upper bound of the open-ended Elite range, relative to the Elite threshold.
pub const ELITE_HEADROOM: f64 = 1.25;

/// Bodyweight assumed for pull-up load calculations if none is known.
pub const DEFAULT_BODYWEIGHT: f64 = 80.0;

/// Strength level and position within that level.
///
/// The level is always within Beginner..=Elite and the percentile always
/// within 0.0..=1.0. Both are enforced once by the constructor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    level: StrengthLevel,
    percentile: f64,
}

impl Classification {
    #[must_use]
    pub fn new(level: i64, percentile: f64) -> Self {
        let clamped_level = StrengthLevel::from_index(level);
        if clamped_level as i64 != level {
            debug!("clamped strength level {level} to {clamped_level}");
        }

        let clamped_percentile = if percentile.is_nan() {
            0.0
        } else {
            percentile.clamp(0.0, 1.0)
        };
        if !(0.0..=1.0).contains(&percentile) {
            debug!("clamped percentile {percentile} to {clamped_percentile}");
        }

        Self {
            level: clamped_level,
            percentile: clamped_percentile,
        }
    }

    #[must_use]
    pub fn level(&self) -> StrengthLevel {
        self.level
    }

    #[must_use]
    pub fn percentile(&self) -> f64 {
        self.percentile
    }

    /// Percentile as a whole percentage.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn score_percent(&self) -> u8 {
        (self.percentile * 100.0).round() as u8
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self {
            level: StrengthLevel::Beginner,
            percentile: 0.0,
        }
    }
}

/// Classify a performance against the reference standards of an exercise.
///
/// Values below the Beginner threshold are Beginner with partial credit
/// `value / threshold`. Within a level, the percentile interpolates linearly
/// towards the next threshold. Above Elite, the range ends at
/// [`ELITE_HEADROOM`] times the Elite threshold.
///
/// Non-finite or negative values are treated as zero.
#[must_use]
pub fn classify(kind: ExerciseKind, raw_value: f64) -> Classification {
    let value = sanitize(kind, raw_value);
    let standards = kind.standards();

    let Some(level) = standards.reached_level(value) else {
        let beginner = standards.threshold(StrengthLevel::Beginner);
        return Classification::new(0, value / beginner);
    };

    let lower = standards.threshold(level);
    let upper = match level.next() {
        Some(next) => standards.threshold(next),
        None => lower * ELITE_HEADROOM,
    };

    Classification::new(
        i64::from(u8::from(level)),
        (value - lower) / (upper - lower),
    )
}

fn sanitize(kind: ExerciseKind, raw_value: f64) -> f64 {
    if raw_value.is_finite() && raw_value >= 0.0 {
        raw_value
    } else {
        warn!("invalid {kind} value {raw_value}, using 0");
        0.0
    }
}

/// Load moved during a set of pull-ups, expressed in bodyweight repetitions.
///
/// Bodyweight pull-ups report the repetitions. Weighted pull-ups scale the
/// repetitions by `(bodyweight + added_weight) / bodyweight`.
#[must_use]
pub fn effective_pull_up_load(reps: u32, added_weight: f64, bodyweight: Option<f64>) -> f64 {
    let reps = f64::from(reps);

    if !added_weight.is_finite() || added_weight <= 0.0 {
        return reps;
    }

    let bodyweight = bodyweight
        .filter(|bw| bw.is_finite() && *bw > 0.0)
        .unwrap_or(DEFAULT_BODYWEIGHT);

    reps * (bodyweight + added_weight) / bodyweight
}

/// Classified outcome of a single exercise of a strength test.
///
/// The classification is always derived from `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseResult {
    pub kind: ExerciseKind,
    /// Weight lifted in kilograms (added weight for pull-ups).
    pub weight: f64,
    pub reps: u32,
    pub formula: Formula,
    pub(crate) value: f64,
    pub(crate) classification: Classification,
}

impl ExerciseResult {
    /// Estimate and classify a set, using the preferred formula of the
    /// exercise unless `formula` is given.
    pub fn new(
        kind: ExerciseKind,
        weight: f64,
        reps: u32,
        formula: Option<Formula>,
    ) -> Result<Self, FormulaError> {
        let formula = formula.unwrap_or(kind.preferred_formula());
        let value = formula.estimate_one_rm(weight, reps)?;
        Ok(Self::with_value(kind, weight, reps, formula, value))
    }

    /// Classify a value that was measured directly, like a tested maximum
    /// or a number of pull-ups.
    ///
    /// The set is recorded as a single repetition of `value` for weight-based
    /// exercises and as `value` repetitions without added weight otherwise.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_value(kind: ExerciseKind, value: f64) -> Self {
        let formula = kind.preferred_formula();
        let (weight, reps) = match formula {
            Formula::RepetitionBased => (0.0, value.round() as u32),
            _ => (value, 1),
        };
        Self::with_value(kind, weight, reps, formula, value)
    }

    /// Rebuild a result from its set and a previously determined value.
    ///
    /// The set is taken as is. Only the classification is derived again.
    #[must_use]
    pub fn with_value(
        kind: ExerciseKind,
        weight: f64,
        reps: u32,
        formula: Formula,
        value: f64,
    ) -> Self {
        Self {
            kind,
            weight,
            reps,
            formula,
            value,
            classification: classify(kind, value),
        }
    }

    /// Estimated one-repetition maximum, or repetitions for repetition-based exercises.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn classification(&self) -> Classification {
        self.classification
    }

    #[must_use]
    pub fn level(&self) -> StrengthLevel {
        self.classification.level()
    }

    #[must_use]
    pub fn percentile(&self) -> f64 {
        self.classification.percentile()
    }

    /// Load for display: the pull-up load for pull-ups, the weight otherwise.
    #[must_use]
    pub fn effective_load(&self, bodyweight: Option<f64>) -> f64 {
        match self.kind {
            ExerciseKind::PullUp => effective_pull_up_load(self.reps, self.weight, bodyweight),
            _ => self.weight,
        }
    }
}
