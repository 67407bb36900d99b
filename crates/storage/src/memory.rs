use std::{
    collections::BTreeMap,
    error::Error,
    sync::{
        Mutex, MutexGuard,
        atomic::{AtomicBool, Ordering},
    },
};

use chrono::NaiveDate;
use hocam_domain as domain;
use log::debug;
use serde::{Serialize, de::DeserializeOwned};
use strum::AsRefStr;
use uuid::Uuid;

type Objects = BTreeMap<String, serde_json::Value>;

/// Process-local storage keeping every object as JSON, keyed like a browser
/// object store.
pub struct InMemory {
    stores: Mutex<BTreeMap<Store, Objects>>,
    connected: AtomicBool,
}

impl Default for InMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stores: Mutex::new(BTreeMap::new()),
            connected: AtomicBool::new(true),
        }
    }

    /// Simulate a lost or restored connection. While disconnected, every
    /// operation fails with [`domain::StorageError::NoConnection`].
    pub fn set_connected(&self, connected: bool) {
        debug!(
            "storage {}",
            if connected {
                "connected"
            } else {
                "disconnected"
            }
        );
        self.connected.store(connected, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn open(&self) -> Result<MutexGuard<'_, BTreeMap<Store, Objects>>, domain::StorageError> {
        if !self.is_connected() {
            return Err(domain::StorageError::NoConnection);
        }
        self.stores
            .lock()
            .map_err(|err| domain::StorageError::Other(err.to_string().into()))
    }

    fn get<V, R>(&self, object_store: Store, key: &str) -> Result<Option<R>, domain::ReadError>
    where
        V: DeserializeOwned,
        R: TryFrom<V>,
        <R as TryFrom<V>>::Error: Error + Send + Sync + 'static,
    {
        let stores = self.open()?;
        stores
            .get(&object_store)
            .and_then(|objects| objects.get(key))
            .map(deserialize::<V, R>)
            .transpose()
    }

    fn get_all<V, R>(&self, object_store: Store) -> Result<Vec<R>, domain::ReadError>
    where
        V: DeserializeOwned,
        R: TryFrom<V>,
        <R as TryFrom<V>>::Error: Error + Send + Sync + 'static,
    {
        let stores = self.open()?;
        stores
            .get(&object_store)
            .into_iter()
            .flat_map(BTreeMap::values)
            .map(deserialize::<V, R>)
            .collect()
    }

    fn add<V: Serialize>(
        &self,
        object_store: Store,
        key: String,
        value: &V,
    ) -> Result<(), domain::CreateError> {
        let value = serde_json::to_value(value).map_err(boxed)?;
        let mut stores = self.open()?;
        let objects = stores.entry(object_store).or_default();
        if objects.contains_key(&key) {
            return Err(domain::CreateError::Conflict);
        }
        debug!("adding {key} to {}", object_store.as_ref());
        objects.insert(key, value);
        Ok(())
    }

    fn put<V: Serialize>(
        &self,
        object_store: Store,
        key: String,
        value: &V,
    ) -> Result<(), domain::UpdateError> {
        let value = serde_json::to_value(value).map_err(boxed)?;
        let mut stores = self.open()?;
        let object = stores
            .get_mut(&object_store)
            .and_then(|objects| objects.get_mut(&key))
            .ok_or(domain::UpdateError::NotFound)?;
        *object = value;
        Ok(())
    }

    fn set<V: Serialize>(
        &self,
        object_store: Store,
        key: String,
        value: &V,
    ) -> Result<(), domain::UpdateError> {
        let value = serde_json::to_value(value).map_err(boxed)?;
        let mut stores = self.open()?;
        stores.entry(object_store).or_default().insert(key, value);
        Ok(())
    }

    fn delete(&self, object_store: Store, key: &str) -> Result<(), domain::DeleteError> {
        let mut stores = self.open()?;
        stores
            .get_mut(&object_store)
            .and_then(|objects| objects.remove(key))
            .ok_or(domain::DeleteError::NotFound)?;
        debug!("deleted {key} from {}", object_store.as_ref());
        Ok(())
    }
}

fn deserialize<V, R>(value: &serde_json::Value) -> Result<R, domain::ReadError>
where
    V: DeserializeOwned,
    R: TryFrom<V>,
    <R as TryFrom<V>>::Error: Error + Send + Sync + 'static,
{
    let object = serde_json::from_value::<V>(value.clone()).map_err(boxed)?;
    Ok(R::try_from(object).map_err(boxed)?)
}

fn boxed(err: impl Error + Send + Sync + 'static) -> Box<dyn Error + Send + Sync> {
    Box::new(err)
}

const KEY_SETTINGS: &str = "settings";

impl domain::SettingsRepository for InMemory {
    async fn read_settings(&self) -> Result<domain::Settings, domain::ReadError> {
        Ok(self
            .get::<domain::Settings, domain::Settings>(Store::App, KEY_SETTINGS)?
            .unwrap_or_default())
    }

    async fn write_settings(
        &self,
        settings: domain::Settings,
    ) -> Result<domain::Settings, domain::UpdateError> {
        self.set(Store::App, KEY_SETTINGS.to_string(), &settings)?;
        Ok(settings)
    }
}

impl domain::BodyCompositionRepository for InMemory {
    async fn read_body_composition(
        &self,
    ) -> Result<Vec<domain::BodyComposition>, domain::ReadError> {
        self.get_all::<BodyComposition, domain::BodyComposition>(Store::BodyComposition)
    }

    async fn create_body_composition(
        &self,
        body_composition: domain::BodyComposition,
    ) -> Result<domain::BodyComposition, domain::CreateError> {
        self.add(
            Store::BodyComposition,
            body_composition.date.to_string(),
            &BodyComposition::from(&body_composition),
        )?;
        Ok(body_composition)
    }

    async fn replace_body_composition(
        &self,
        body_composition: domain::BodyComposition,
    ) -> Result<domain::BodyComposition, domain::UpdateError> {
        self.put(
            Store::BodyComposition,
            body_composition.date.to_string(),
            &BodyComposition::from(&body_composition),
        )?;
        Ok(body_composition)
    }

    async fn delete_body_composition(
        &self,
        date: NaiveDate,
    ) -> Result<NaiveDate, domain::DeleteError> {
        self.delete(Store::BodyComposition, &date.to_string())?;
        Ok(date)
    }
}

impl domain::StrengthTestRepository for InMemory {
    async fn read_strength_tests(&self) -> Result<Vec<domain::StrengthTest>, domain::ReadError> {
        let mut strength_tests =
            self.get_all::<StrengthTest, domain::StrengthTest>(Store::StrengthTests)?;
        strength_tests.sort_by_key(|t| (t.date, t.id));
        Ok(strength_tests)
    }

    async fn create_strength_test(
        &self,
        date: NaiveDate,
    ) -> Result<domain::StrengthTest, domain::CreateError> {
        let strength_test = domain::StrengthTest::new(Uuid::new_v4().into(), date);
        self.add(
            Store::StrengthTests,
            strength_test.id.to_string(),
            &StrengthTest::from(&strength_test),
        )?;
        Ok(strength_test)
    }

    async fn replace_strength_test(
        &self,
        strength_test: domain::StrengthTest,
    ) -> Result<domain::StrengthTest, domain::UpdateError> {
        self.put(
            Store::StrengthTests,
            strength_test.id.to_string(),
            &StrengthTest::from(&strength_test),
        )?;
        Ok(strength_test)
    }

    async fn delete_strength_test(
        &self,
        id: domain::StrengthTestID,
    ) -> Result<domain::StrengthTestID, domain::DeleteError> {
        self.delete(Store::StrengthTests, &id.to_string())?;
        Ok(id)
    }
}

#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Store {
    #[strum(serialize = "app")]
    App,
    #[strum(serialize = "body_composition")]
    BodyComposition,
    #[strum(serialize = "strength_tests")]
    StrengthTests,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct BodyComposition {
    pub date: NaiveDate,
    pub sex: u8,
    pub age: u32,
    pub height: f64,
    pub waist: f64,
    pub neck: f64,
    pub hips: Option<f64>,
    pub body_fat: f64,
}

impl From<&domain::BodyComposition> for BodyComposition {
    fn from(value: &domain::BodyComposition) -> Self {
        let measurements = &value.measurements;
        Self {
            date: value.date,
            sex: measurements.sex() as u8,
            age: measurements.age(),
            height: measurements.height(),
            waist: measurements.waist(),
            neck: measurements.neck(),
            hips: measurements.hips(),
            body_fat: value.body_fat,
        }
    }
}

impl TryFrom<BodyComposition> for domain::BodyComposition {
    type Error = domain::BodyCompositionError;

    fn try_from(value: BodyComposition) -> Result<Self, Self::Error> {
        let measurements = domain::BodyMeasurements::from_centimetres(
            value.sex.into(),
            value.age,
            value.height,
            value.waist,
            value.neck,
            value.hips,
        )?;
        Ok(Self {
            date: value.date,
            measurements,
            body_fat: value.body_fat,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct StrengthTest {
    pub id: Uuid,
    pub date: NaiveDate,
    pub results: Vec<ExerciseResult>,
}

impl From<&domain::StrengthTest> for StrengthTest {
    fn from(value: &domain::StrengthTest) -> Self {
        Self {
            id: *value.id,
            date: value.date,
            results: value.results().map(ExerciseResult::from).collect(),
        }
    }
}

impl TryFrom<StrengthTest> for domain::StrengthTest {
    type Error = domain::FormulaError;

    fn try_from(value: StrengthTest) -> Result<Self, Self::Error> {
        let mut strength_test = domain::StrengthTest::new(value.id.into(), value.date);
        for result in value.results {
            strength_test.add_result(result.try_into()?);
        }
        Ok(strength_test)
    }
}

/// Set and value of an exercise result. The classification is derived again
/// when loading. Objects without a value are estimated from the set.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseResult {
    pub exercise: domain::ExerciseKind,
    pub weight: f64,
    pub reps: u32,
    pub formula: domain::Formula,
    #[serde(default)]
    pub value: Option<f64>,
}

impl From<&domain::ExerciseResult> for ExerciseResult {
    fn from(value: &domain::ExerciseResult) -> Self {
        Self {
            exercise: value.kind,
            weight: value.weight,
            reps: value.reps,
            formula: value.formula,
            value: Some(value.value()),
        }
    }
}

impl TryFrom<ExerciseResult> for domain::ExerciseResult {
    type Error = domain::FormulaError;

    fn try_from(value: ExerciseResult) -> Result<Self, Self::Error> {
        match value.value {
            Some(v) => Ok(domain::ExerciseResult::with_value(
                value.exercise,
                value.weight,
                value.reps,
                value.formula,
                v,
            )),
            None => domain::ExerciseResult::new(
                value.exercise,
                value.weight,
                value.reps,
                Some(value.formula),
            ),
        }
    }
}
