use super::entities::{Exercise, NextExercise};
use super::repositories::{ExerciseRepository, SolutionEvaluator};
use super::value_objects::RangeConstraint;
use crate::domain::errors::{AppError, ValidationError};
use crate::domain::logging::LogComponent;
use crate::domain::plot::Point;
use crate::log_debug;
use std::collections::HashMap;

/// Offline evaluator and exercise catalogue.
///
/// Keeps exercises in registration order, which doubles as the "next"
/// ordering. Used when no backend is configured and in tests.
#[derive(Debug, Clone, Default)]
pub struct LocalRangeEvaluator {
    order: Vec<String>,
    exercises: HashMap<String, Exercise>,
}

impl LocalRangeEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, exercise: Exercise) -> Result<(), ValidationError> {
        exercise.constraint().validate()?;
        if !self.exercises.contains_key(&exercise.id) {
            self.order.push(exercise.id.clone());
        }
        self.exercises.insert(exercise.id.clone(), exercise);
        Ok(())
    }

    pub fn constraint(&self, exercise_id: &str) -> Result<RangeConstraint, ValidationError> {
        self.exercises
            .get(exercise_id)
            .map(Exercise::constraint)
            .ok_or_else(|| ValidationError::UnknownExercise(exercise_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn get(&self, exercise_id: &str) -> Result<Exercise, AppError> {
        self.exercises
            .get(exercise_id)
            .cloned()
            .ok_or_else(|| ValidationError::UnknownExercise(exercise_id.to_string()).into())
    }
}

impl ExerciseRepository for LocalRangeEvaluator {
    async fn fetch_exercise(&self, exercise_id: &str) -> Result<Exercise, AppError> {
        self.get(exercise_id)
    }

    async fn fetch_first(&self) -> Result<Exercise, AppError> {
        let first = self
            .order
            .first()
            .ok_or_else(|| ValidationError::UnknownExercise("first".to_string()))?;
        self.get(first)
    }

    async fn fetch_next(&self, exercise_id: &str) -> Result<NextExercise, AppError> {
        let position = self
            .order
            .iter()
            .position(|id| id == exercise_id)
            .ok_or_else(|| ValidationError::UnknownExercise(exercise_id.to_string()))?;
        Ok(NextExercise { id: self.order.get(position + 1).cloned() })
    }
}

impl SolutionEvaluator for LocalRangeEvaluator {
    async fn evaluate(&self, exercise_id: &str, solution: &[Point]) -> Result<bool, AppError> {
        let verdict = self.constraint(exercise_id)?.is_satisfied(solution)?;
        log_debug!(
            LogComponent::Domain("LocalRangeEvaluator"),
            "evaluated {} with {} points -> {}",
            exercise_id,
            solution.len(),
            verdict
        );
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exercise::ConstraintType;
    use futures::executor::block_on;

    fn exercise(id: &str, constraint_type: ConstraintType, lower: Option<f64>, upper: Option<f64>) -> Exercise {
        Exercise {
            id: id.to_string(),
            order: 0,
            title: id.to_string(),
            description: String::new(),
            constraint_type,
            lower_bound: lower,
            upper_bound: upper,
            is_active: true,
            created_at: None,
            updated_at: None,
            data_points: vec![Point::new("p", 0.0, 0.0, 1.0)],
        }
    }

    #[test]
    fn next_follows_registration_order() {
        let mut local = LocalRangeEvaluator::new();
        local.register(exercise("a", ConstraintType::Lt, None, Some(1.0))).unwrap();
        local.register(exercise("b", ConstraintType::Gt, Some(1.0), None)).unwrap();

        assert_eq!(block_on(local.fetch_first()).unwrap().id, "a");
        assert_eq!(block_on(local.fetch_next("a")).unwrap().id.as_deref(), Some("b"));
        assert_eq!(block_on(local.fetch_next("b")).unwrap().id, None);
    }

    #[test]
    fn evaluates_registered_constraint() {
        let mut local = LocalRangeEvaluator::new();
        local.register(exercise("a", ConstraintType::Lt, None, Some(1.0))).unwrap();

        let low = [Point::new("p", 0.0, 0.5, 1.0)];
        assert!(block_on(local.evaluate("a", &low)).unwrap());
        assert_eq!(
            block_on(local.evaluate("missing", &low)),
            Err(AppError::Validation(ValidationError::UnknownExercise("missing".to_string())))
        );
        assert_eq!(
            block_on(local.evaluate("a", &[])),
            Err(AppError::Validation(ValidationError::EmptySolution))
        );
    }

    #[test]
    fn invalid_constraints_are_not_registered() {
        let mut local = LocalRangeEvaluator::new();
        assert!(local.register(exercise("a", ConstraintType::Between, Some(1.0), None)).is_err());
        assert!(local.is_empty());
    }
}
