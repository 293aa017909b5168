pub mod fields;
pub mod types;
pub mod validation;

pub use fields::{Bounds, Field, Section};
pub use types::{DietType, ExerciseFrequency, Gender, InputOverrides, InputRecord};
pub use validation::validate_inputs;
