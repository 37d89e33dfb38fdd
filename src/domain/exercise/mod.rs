pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::{EvaluateRequest, EvaluationVerdict, Exercise, NextExercise};
pub use repositories::{ExerciseRepository, SolutionEvaluator};
pub use services::LocalRangeEvaluator;
pub use value_objects::{ConstraintType, RangeConstraint};
