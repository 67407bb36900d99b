use std::slice::Iter;

use derive_more::Display;

use crate::Formula;

/// Exercises of the strength test.
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
pub enum ExerciseKind {
    #[display("Bench Press")]
    BenchPress,
    #[display("Overhead Press")]
    OverheadPress,
    #[display("Pull-up")]
    PullUp,
    #[display("Back Squat")]
    BackSquat,
    #[display("Deadlift")]
    Deadlift,
}

impl ExerciseKind {
    pub const COUNT: usize = 5;

    pub fn iter() -> Iter<'static, ExerciseKind> {
        static EXERCISES: [ExerciseKind; ExerciseKind::COUNT] = [
            ExerciseKind::BenchPress,
            ExerciseKind::OverheadPress,
            ExerciseKind::PullUp,
            ExerciseKind::BackSquat,
            ExerciseKind::Deadlift,
        ];
        EXERCISES.iter()
    }

    #[must_use]
    pub fn muscle_group(self) -> MuscleGroup {
        match self {
            ExerciseKind::BenchPress => MuscleGroup::Chest,
            ExerciseKind::OverheadPress => MuscleGroup::Shoulders,
            ExerciseKind::PullUp => MuscleGroup::Back,
            ExerciseKind::BackSquat => MuscleGroup::Legs,
            ExerciseKind::Deadlift => MuscleGroup::PosteriorChain,
        }
    }

    #[must_use]
    pub fn region(self) -> BodyRegion {
        self.muscle_group().region()
    }

    #[must_use]
    pub fn unit(self) -> MeasurementUnit {
        match self {
            ExerciseKind::PullUp => MeasurementUnit::Repetitions,
            ExerciseKind::BenchPress
            | ExerciseKind::OverheadPress
            | ExerciseKind::BackSquat
            | ExerciseKind::Deadlift => MeasurementUnit::Kilograms,
        }
    }

    #[must_use]
    pub fn preferred_formula(self) -> Formula {
        match self {
            ExerciseKind::BenchPress | ExerciseKind::BackSquat | ExerciseKind::Deadlift => {
                Formula::Epley
            }
            ExerciseKind::OverheadPress => Formula::OverheadPress,
            ExerciseKind::PullUp => Formula::RepetitionBased,
        }
    }

    /// Reference thresholds for an 80 kg, 25-year-old male.
    #[must_use]
    pub fn standards(self) -> &'static StrengthStandards {
        match self {
            ExerciseKind::BenchPress => &BENCH_PRESS,
            ExerciseKind::OverheadPress => &OVERHEAD_PRESS,
            ExerciseKind::PullUp => &PULL_UP,
            ExerciseKind::BackSquat => &BACK_SQUAT,
            ExerciseKind::Deadlift => &DEADLIFT,
        }
    }
}

static BENCH_PRESS: StrengthStandards = StrengthStandards([40.0, 60.0, 80.0, 120.0, 140.0, 160.0]);
static OVERHEAD_PRESS: StrengthStandards = StrengthStandards([25.0, 35.0, 50.0, 65.0, 80.0, 95.0]);
static PULL_UP: StrengthStandards = StrengthStandards([1.0, 5.0, 10.0, 15.0, 20.0, 25.0]);
static BACK_SQUAT: StrengthStandards = StrengthStandards([50.0, 80.0, 110.0, 150.0, 180.0, 210.0]);
static DEADLIFT: StrengthStandards = StrengthStandards([60.0, 100.0, 140.0, 180.0, 220.0, 250.0]);

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum MuscleGroup {
    #[display("Chest")]
    Chest,
    #[display("Shoulders")]
    Shoulders,
    #[display("Back")]
    Back,
    #[display("Legs")]
    Legs,
    #[display("Posterior Chain")]
    PosteriorChain,
}

impl MuscleGroup {
    #[must_use]
    pub fn region(self) -> BodyRegion {
        match self {
            MuscleGroup::Chest | MuscleGroup::Shoulders | MuscleGroup::Back => BodyRegion::Upper,
            MuscleGroup::Legs | MuscleGroup::PosteriorChain => BodyRegion::Lower,
        }
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum BodyRegion {
    #[display("upper body")]
    Upper,
    #[display("lower body")]
    Lower,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementUnit {
    #[display("kg")]
    Kilograms,
    #[display("reps")]
    Repetitions,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLevel {
    #[display("Beginner")]
    Beginner = 0,
    #[display("Novice")]
    Novice = 1,
    #[display("Intermediate")]
    Intermediate = 2,
    #[display("Advanced")]
    Advanced = 3,
    #[display("Expert")]
    Expert = 4,
    #[display("Elite")]
    Elite = 5,
}

impl StrengthLevel {
    pub const MAX: StrengthLevel = StrengthLevel::Elite;

    pub fn iter() -> Iter<'static, StrengthLevel> {
        static LEVELS: [StrengthLevel; 6] = [
            StrengthLevel::Beginner,
            StrengthLevel::Novice,
            StrengthLevel::Intermediate,
            StrengthLevel::Advanced,
            StrengthLevel::Expert,
            StrengthLevel::Elite,
        ];
        LEVELS.iter()
    }

    /// Map any index onto a level, clamping to Beginner..=Elite.
    #[must_use]
    pub fn from_index(index: i64) -> Self {
        match index {
            i64::MIN..=0 => StrengthLevel::Beginner,
            1 => StrengthLevel::Novice,
            2 => StrengthLevel::Intermediate,
            3 => StrengthLevel::Advanced,
            4 => StrengthLevel::Expert,
            _ => StrengthLevel::Elite,
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            StrengthLevel::Elite => None,
            level => Some(Self::from_index(level as i64 + 1)),
        }
    }
}

impl From<u8> for StrengthLevel {
    fn from(value: u8) -> Self {
        Self::from_index(i64::from(value))
    }
}

impl From<StrengthLevel> for u8 {
    fn from(value: StrengthLevel) -> Self {
        value as u8
    }
}

/// Ascending level thresholds, indexed by [`StrengthLevel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthStandards([f64; 6]);

impl StrengthStandards {
    #[must_use]
    pub fn values(&self) -> &[f64; 6] {
        &self.0
    }

    #[must_use]
    pub fn threshold(&self, level: StrengthLevel) -> f64 {
        self.0[level.index()]
    }

    /// Threshold of the lowest level that `value` has not reached yet.
    #[must_use]
    pub fn next_target(&self, value: f64) -> Option<f64> {
        self.0.iter().copied().find(|threshold| value < *threshold)
    }

    /// Highest level whose threshold `value` reaches, if any.
    #[must_use]
    pub fn reached_level(&self, value: f64) -> Option<StrengthLevel> {
        StrengthLevel::iter()
            .rev()
            .find(|level| value >= self.threshold(**level))
            .copied()
    }
}
