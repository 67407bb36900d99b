#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod memory;

pub use memory::{BodyComposition, ExerciseResult, InMemory, Store, StrengthTest};
