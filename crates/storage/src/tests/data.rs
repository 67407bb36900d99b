use chrono::NaiveDate;
use hocam_domain as domain;

pub static BODY_COMPOSITION: std::sync::LazyLock<domain::BodyComposition> =
    std::sync::LazyLock::new(|| {
        let input = domain::MeasurementInput {
            sex: domain::Sex::MALE,
            age: 30,
            height: 180.0,
            height_inches: 0.0,
            waist: 85.0,
            neck: 38.0,
            hips: None,
        };
        let measurements =
            domain::BodyMeasurements::new(&input, domain::UnitSystem::Metric).unwrap();
        domain::BodyComposition {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            body_fat: measurements.body_fat().unwrap(),
            measurements,
        }
    });

pub static BODY_COMPOSITION_2: std::sync::LazyLock<domain::BodyComposition> =
    std::sync::LazyLock::new(|| {
        let input = domain::MeasurementInput {
            sex: domain::Sex::FEMALE,
            age: 28,
            height: 165.0,
            height_inches: 0.0,
            waist: 75.0,
            neck: 33.0,
            hips: Some(100.0),
        };
        let measurements =
            domain::BodyMeasurements::new(&input, domain::UnitSystem::Metric).unwrap();
        domain::BodyComposition {
            date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            body_fat: measurements.body_fat().unwrap(),
            measurements,
        }
    });

pub static STRENGTH_TEST: std::sync::LazyLock<domain::StrengthTest> =
    std::sync::LazyLock::new(|| {
        domain::StrengthTest::new(1.into(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .with_result(bench_press())
            .with_result(pull_ups())
            .with_result(
                domain::ExerciseResult::new(domain::ExerciseKind::BackSquat, 140.0, 3, None)
                    .unwrap(),
            )
    });

pub fn bench_press() -> domain::ExerciseResult {
    domain::ExerciseResult::new(domain::ExerciseKind::BenchPress, 75.0, 6, None).unwrap()
}

pub fn pull_ups() -> domain::ExerciseResult {
    domain::ExerciseResult::new(domain::ExerciseKind::PullUp, 0.0, 12, None).unwrap()
}
