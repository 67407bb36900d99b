use std::fmt;

use chrono::NaiveDate;

use crate::{CreateError, DeleteError, ReadError, UnitSystem, UpdateError, unit};

#[allow(async_fn_in_trait)]
pub trait BodyCompositionService {
    async fn get_body_composition(&self) -> Result<Vec<BodyComposition>, ReadError>;
    /// Validate the measurements in the configured unit system, estimate the
    /// body fat and store the result for the given date.
    async fn estimate_body_fat(
        &self,
        date: NaiveDate,
        input: &MeasurementInput,
    ) -> Result<BodyComposition, BodyCompositionError>;
    async fn delete_body_composition(&self, date: NaiveDate) -> Result<NaiveDate, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait BodyCompositionRepository {
    async fn read_body_composition(&self) -> Result<Vec<BodyComposition>, ReadError>;
    async fn create_body_composition(
        &self,
        body_composition: BodyComposition,
    ) -> Result<BodyComposition, CreateError>;
    async fn replace_body_composition(
        &self,
        body_composition: BodyComposition,
    ) -> Result<BodyComposition, UpdateError>;
    async fn delete_body_composition(&self, date: NaiveDate) -> Result<NaiveDate, DeleteError>;
}

/// Body fat estimate with the measurements it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyComposition {
    pub date: NaiveDate,
    pub measurements: BodyMeasurements,
    pub body_fat: f64,
}

impl BodyComposition {
    #[must_use]
    pub fn category(&self) -> BodyFatCategory {
        BodyFatCategory::new(self.body_fat, self.measurements.sex)
    }

    #[must_use]
    pub fn lean_body_mass(&self, bodyweight: f64) -> f64 {
        lean_body_mass(bodyweight, self.body_fat)
    }

    #[must_use]
    pub fn fat_mass(&self, bodyweight: f64) -> f64 {
        fat_mass(bodyweight, self.body_fat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    FEMALE,
    MALE,
}

impl From<u8> for Sex {
    fn from(value: u8) -> Self {
        match value {
            0 => Sex::FEMALE,
            _ => Sex::MALE,
        }
    }
}

impl From<&str> for Sex {
    fn from(value: &str) -> Self {
        match value {
            "female" => Sex::FEMALE,
            _ => Sex::MALE,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Sex::FEMALE => "female",
                Sex::MALE => "male",
            }
        )
    }
}

/// Measurements as entered by the user.
///
/// In the metric system `height` is in centimetres and `height_inches` is
/// ignored. In the imperial system `height` is in feet and `height_inches`
/// holds the remaining inches. Waist, neck and hips are given in centimetres
/// or inches respectively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementInput {
    pub sex: Sex,
    pub age: u32,
    pub height: f64,
    pub height_inches: f64,
    pub waist: f64,
    pub neck: f64,
    pub hips: Option<f64>,
}

/// Validated measurements in centimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyMeasurements {
    sex: Sex,
    age: u32,
    height: f64,
    waist: f64,
    neck: f64,
    hips: Option<f64>,
}

impl BodyMeasurements {
    pub fn new(
        input: &MeasurementInput,
        unit_system: UnitSystem,
    ) -> Result<Self, BodyCompositionError> {
        let age = validate_age(input.age)?;
        let height = validate_height(unit_system, input.height, input.height_inches)?;
        let waist = validate_waist(unit_system, input.waist)?;
        let neck = validate_neck(unit_system, input.neck)?;
        let hips = match input.sex {
            Sex::FEMALE => Some(validate_hips(unit_system, input.hips)?),
            Sex::MALE => None,
        };
        Self::checked(input.sex, age, height, waist, neck, hips)
    }

    /// Rebuild measurements that are already in centimetres.
    ///
    /// The entry ranges of [`BodyMeasurements::new`] are not applied, as
    /// imperial entries convert to values outside the metric ranges. Only
    /// positive finite lengths and the relations between them are required.
    pub fn from_centimetres(
        sex: Sex,
        age: u32,
        height: f64,
        waist: f64,
        neck: f64,
        hips: Option<f64>,
    ) -> Result<Self, BodyCompositionError> {
        let age = validate_age(age)?;
        let height = positive(height).ok_or(BodyCompositionError::InvalidHeight)?;
        let waist = positive(waist).ok_or(BodyCompositionError::InvalidWaist)?;
        let neck = positive(neck).ok_or(BodyCompositionError::InvalidNeck)?;
        let hips = match sex {
            Sex::FEMALE => Some(
                hips.and_then(positive)
                    .ok_or(BodyCompositionError::InvalidHips)?,
            ),
            Sex::MALE => None,
        };
        Self::checked(sex, age, height, waist, neck, hips)
    }

    fn checked(
        sex: Sex,
        age: u32,
        height: f64,
        waist: f64,
        neck: f64,
        hips: Option<f64>,
    ) -> Result<Self, BodyCompositionError> {
        if waist <= neck {
            return Err(BodyCompositionError::InvalidMeasurements(
                MeasurementConflict::WaistNotAboveNeck,
            ));
        }

        if hips.is_some_and(|hips| hips < waist) {
            return Err(BodyCompositionError::InvalidMeasurements(
                MeasurementConflict::HipsBelowWaist,
            ));
        }

        Ok(Self {
            sex,
            age,
            height,
            waist,
            neck,
            hips,
        })
    }

    #[must_use]
    pub fn sex(&self) -> Sex {
        self.sex
    }

    #[must_use]
    pub fn age(&self) -> u32 {
        self.age
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn waist(&self) -> f64 {
        self.waist
    }

    #[must_use]
    pub fn neck(&self) -> f64 {
        self.neck
    }

    #[must_use]
    pub fn hips(&self) -> Option<f64> {
        self.hips
    }

    pub fn body_fat(&self) -> Result<f64, BodyCompositionError> {
        navy_body_fat(self.sex, self.height, self.waist, self.neck, self.hips)
            .map_err(BodyCompositionError::Calculation)
    }
}

/// Estimate the body fat percentage using the U.S. Navy circumference method.
pub fn estimate_body_fat(
    input: &MeasurementInput,
    unit_system: UnitSystem,
) -> Result<f64, BodyCompositionError> {
    BodyMeasurements::new(input, unit_system)?.body_fat()
}

/// U.S. Navy body fat formula on centimetre measurements.
///
/// Male:   `495 / (1.0324 - 0.19077 log10(waist - neck) + 0.15456 log10(height)) - 450`
///
/// Female: `495 / (1.29579 - 0.35004 log10(waist + hips - neck) + 0.22100 log10(height)) - 450`
///
/// Results outside the physiological range of the sex are rejected.
pub fn navy_body_fat(
    sex: Sex,
    height: f64,
    waist: f64,
    neck: f64,
    hips: Option<f64>,
) -> Result<f64, CalculationError> {
    let (circumference, density_base, circumference_factor, height_factor, range) = match sex {
        Sex::MALE => (waist - neck, 1.0324, 0.19077, 0.15456, MALE_BODY_FAT_RANGE),
        Sex::FEMALE => (
            waist + hips.ok_or(CalculationError::MissingHips)? - neck,
            1.295_79,
            0.350_04,
            0.221,
            FEMALE_BODY_FAT_RANGE,
        ),
    };

    if circumference <= 0.0 || height <= 0.0 {
        return Err(CalculationError::Singularity);
    }

    let density = density_base - circumference_factor * circumference.log10()
        + height_factor * height.log10();

    if !density.is_finite() || density <= 0.0 {
        return Err(CalculationError::Singularity);
    }

    let body_fat = 495.0 / density - 450.0;

    if !(range.0..=range.1).contains(&body_fat) {
        return Err(CalculationError::OutOfRange(body_fat));
    }

    Ok(body_fat)
}

pub const MALE_BODY_FAT_RANGE: (f64, f64) = (2.0, 50.0);
pub const FEMALE_BODY_FAT_RANGE: (f64, f64) = (8.0, 50.0);

pub fn validate_age(age: u32) -> Result<u32, BodyCompositionError> {
    if age > 0 && age < 150 {
        Ok(age)
    } else {
        Err(BodyCompositionError::InvalidAge)
    }
}

/// Validate a height and convert it to centimetres.
///
/// Imperial heights are given as feet and inches.
pub fn validate_height(
    unit_system: UnitSystem,
    height: f64,
    height_inches: f64,
) -> Result<f64, BodyCompositionError> {
    match unit_system {
        UnitSystem::Metric => {
            if (100.0..=250.0).contains(&height) {
                Ok(height)
            } else {
                Err(BodyCompositionError::InvalidHeight)
            }
        }
        UnitSystem::Imperial => {
            if height > 0.0 && height <= 8.0 && (0.0..12.0).contains(&height_inches) {
                Ok(unit::feet_inches_to_cm(height, height_inches))
            } else {
                Err(BodyCompositionError::InvalidHeight)
            }
        }
    }
}

pub fn validate_waist(unit_system: UnitSystem, waist: f64) -> Result<f64, BodyCompositionError> {
    WAIST
        .validate(unit_system, waist)
        .ok_or(BodyCompositionError::InvalidWaist)
}

pub fn validate_neck(unit_system: UnitSystem, neck: f64) -> Result<f64, BodyCompositionError> {
    NECK.validate(unit_system, neck)
        .ok_or(BodyCompositionError::InvalidNeck)
}

pub fn validate_hips(
    unit_system: UnitSystem,
    hips: Option<f64>,
) -> Result<f64, BodyCompositionError> {
    hips.and_then(|hips| HIPS.validate(unit_system, hips))
        .ok_or(BodyCompositionError::InvalidHips)
}

fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

struct LengthRange {
    metric: (f64, f64),
    imperial: (f64, f64),
}

impl LengthRange {
    fn validate(&self, unit_system: UnitSystem, value: f64) -> Option<f64> {
        let (min, max) = match unit_system {
            UnitSystem::Metric => self.metric,
            UnitSystem::Imperial => self.imperial,
        };
        (min..=max)
            .contains(&value)
            .then(|| unit_system.length_to_cm(value))
    }
}

const WAIST: LengthRange = LengthRange {
    metric: (50.0, 200.0),
    imperial: (20.0, 80.0),
};

const NECK: LengthRange = LengthRange {
    metric: (20.0, 60.0),
    imperial: (8.0, 24.0),
};

const HIPS: LengthRange = LengthRange {
    metric: (60.0, 200.0),
    imperial: (24.0, 80.0),
};

#[must_use]
pub fn lean_body_mass(bodyweight: f64, body_fat: f64) -> f64 {
    bodyweight * (1.0 - body_fat / 100.0)
}

#[must_use]
pub fn fat_mass(bodyweight: f64, body_fat: f64) -> f64 {
    bodyweight * body_fat / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BodyFatCategory {
    Essential,
    Athletic,
    Fitness,
    Average,
    Obese,
}

impl BodyFatCategory {
    #[must_use]
    pub fn new(body_fat: f64, sex: Sex) -> Self {
        let [athletic, fitness, average, obese] = match sex {
            Sex::FEMALE => [14.0, 21.0, 25.0, 32.0],
            Sex::MALE => [6.0, 14.0, 18.0, 25.0],
        };
        if body_fat < athletic {
            BodyFatCategory::Essential
        } else if body_fat < fitness {
            BodyFatCategory::Athletic
        } else if body_fat < average {
            BodyFatCategory::Fitness
        } else if body_fat < obese {
            BodyFatCategory::Average
        } else {
            BodyFatCategory::Obese
        }
    }
}

impl fmt::Display for BodyFatCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BodyFatCategory::Essential => "Essential Fat",
                BodyFatCategory::Athletic => "Athletes",
                BodyFatCategory::Fitness => "Fitness",
                BodyFatCategory::Average => "Average",
                BodyFatCategory::Obese => "Obese",
            }
        )
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BodyCompositionError {
    #[error("Age must be between 1 and 149 years")]
    InvalidAge,
    #[error("Height must be between 100 and 250 cm or at most 8 ft")]
    InvalidHeight,
    #[error("Waist must be between 50 and 200 cm or 20 and 80 in")]
    InvalidWaist,
    #[error("Neck must be between 20 and 60 cm or 8 and 24 in")]
    InvalidNeck,
    #[error("Hips must be between 60 and 200 cm or 24 and 80 in")]
    InvalidHips,
    #[error(transparent)]
    InvalidMeasurements(MeasurementConflict),
    #[error(transparent)]
    Calculation(CalculationError),
    #[error("Failed to save body composition: {0}")]
    SaveFailed(String),
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementConflict {
    #[error("Waist must be larger than neck")]
    WaistNotAboveNeck,
    #[error("Hips must not be smaller than waist")]
    HipsBelowWaist,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum CalculationError {
    #[error("Body fat cannot be calculated from these measurements")]
    Singularity,
    #[error("Calculated body fat of {0:.1} % is outside the physiological range")]
    OutOfRange(f64),
    #[error("Hip measurement is required")]
    MissingHips,
}
