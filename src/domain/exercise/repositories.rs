//! Seams to the exercises backend. Implementations live in infrastructure;
//! futures are not `Send` because the browser runtime is single-threaded.
#![allow(async_fn_in_trait)]

use super::entities::{Exercise, NextExercise};
use crate::domain::errors::AppError;
use crate::domain::plot::Point;

pub trait ExerciseRepository {
    async fn fetch_exercise(&self, exercise_id: &str) -> Result<Exercise, AppError>;

    async fn fetch_first(&self) -> Result<Exercise, AppError>;

    async fn fetch_next(&self, exercise_id: &str) -> Result<NextExercise, AppError>;
}

/// Decides whether a submitted solution satisfies the exercise
pub trait SolutionEvaluator {
    async fn evaluate(&self, exercise_id: &str, solution: &[Point]) -> Result<bool, AppError>;
}
