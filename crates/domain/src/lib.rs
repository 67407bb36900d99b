#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod body_composition;
mod error;
mod exercise;
mod formula;
mod service;
mod settings;
mod strength;
pub mod unit;

pub use body_composition::*;
pub use error::*;
pub use exercise::*;
pub use formula::*;
pub use service::*;
pub use settings::*;
pub use strength::*;
pub use strength_test::*;
pub use unit::UnitSystem;
