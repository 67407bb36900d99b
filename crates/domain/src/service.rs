use chrono::NaiveDate;
use log::{debug, error};

use crate::{
    BodyComposition, BodyCompositionError, BodyCompositionRepository, BodyCompositionService,
    BodyMeasurements, CreateError, DeleteError, ExerciseResult, MeasurementInput, ReadError,
    Settings, SettingsRepository, StrengthTest, StrengthTestID, StrengthTestRepository,
    StrengthTestService, UpdateError,
};

pub struct Service<R> {
    repository: R,
    settings: Settings,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self::with_settings(repository, Settings::default())
    }

    pub fn with_settings(repository: R, settings: Settings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        if settings.unit_system != self.settings.unit_system {
            debug!("switching to {} units", settings.unit_system);
        }
        self.settings = settings;
    }

    /// Load of a result, using the configured bodyweight for weighted pull-ups.
    #[must_use]
    pub fn effective_load(&self, result: &ExerciseResult) -> f64 {
        result.effective_load(self.settings.bodyweight())
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        if let Err(ref err) = result {
            match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            }
        }
        result
    }};
}

impl<R: SettingsRepository> Service<R> {
    /// Replace the current settings by the stored ones.
    pub async fn load_settings(&mut self) -> Result<Settings, ReadError> {
        let settings = log_on_error!(
            self.repository.read_settings(),
            ReadError,
            "read",
            "settings"
        )?;
        self.set_settings(settings);
        Ok(settings)
    }

    pub async fn save_settings(&self) -> Result<Settings, UpdateError> {
        log_on_error!(
            self.repository.write_settings(self.settings),
            UpdateError,
            "write",
            "settings"
        )
    }
}

impl<R: BodyCompositionRepository> BodyCompositionService for Service<R> {
    async fn get_body_composition(&self) -> Result<Vec<BodyComposition>, ReadError> {
        log_on_error!(
            self.repository.read_body_composition(),
            ReadError,
            "get",
            "body composition"
        )
    }

    async fn estimate_body_fat(
        &self,
        date: NaiveDate,
        input: &MeasurementInput,
    ) -> Result<BodyComposition, BodyCompositionError> {
        let measurements = BodyMeasurements::new(input, self.settings.unit_system)?;
        let body_fat = measurements.body_fat()?;
        let body_composition = BodyComposition {
            date,
            measurements,
            body_fat,
        };

        let created = log_on_error!(
            self.repository
                .create_body_composition(body_composition.clone()),
            CreateError,
            "create",
            "body composition"
        );

        match created {
            Ok(body_composition) => Ok(body_composition),
            Err(CreateError::Conflict) => log_on_error!(
                self.repository.replace_body_composition(body_composition),
                UpdateError,
                "replace",
                "body composition"
            )
            .map_err(|err| BodyCompositionError::SaveFailed(err.to_string())),
            Err(err) => Err(BodyCompositionError::SaveFailed(err.to_string())),
        }
    }

    async fn delete_body_composition(&self, date: NaiveDate) -> Result<NaiveDate, DeleteError> {
        log_on_error!(
            self.repository.delete_body_composition(date),
            DeleteError,
            "delete",
            "body composition"
        )
    }
}

impl<R: StrengthTestRepository> StrengthTestService for Service<R> {
    async fn get_strength_tests(&self) -> Result<Vec<StrengthTest>, ReadError> {
        log_on_error!(
            self.repository.read_strength_tests(),
            ReadError,
            "get",
            "strength tests"
        )
    }

    async fn create_strength_test(&self, date: NaiveDate) -> Result<StrengthTest, CreateError> {
        log_on_error!(
            self.repository.create_strength_test(date),
            CreateError,
            "create",
            "strength test"
        )
    }

    async fn record_result(
        &self,
        id: StrengthTestID,
        result: ExerciseResult,
    ) -> Result<StrengthTest, UpdateError> {
        let strength_test = self
            .get_strength_tests()
            .await?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or(UpdateError::NotFound)?;
        log_on_error!(
            self.repository
                .replace_strength_test(strength_test.with_result(result)),
            UpdateError,
            "replace",
            "strength test"
        )
    }

    async fn delete_strength_test(
        &self,
        id: StrengthTestID,
    ) -> Result<StrengthTestID, DeleteError> {
        log_on_error!(
            self.repository.delete_strength_test(id),
            DeleteError,
            "delete",
            "strength test"
        )
    }
}
