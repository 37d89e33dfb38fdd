use crate::domain::{
    errors::AppError,
    exercise::{Exercise, ExerciseRepository, SolutionEvaluator},
    logging::{LogComponent, LogEntry, LogLevel, get_logger},
    plot::Point,
};

/// An exercise together with the id of the one that follows it
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedExercise {
    pub exercise: Exercise,
    pub next: Option<String>,
}

/// Use Case: fetch an exercise (or the first one) and its successor
pub struct LoadExerciseUseCase<R: ExerciseRepository> {
    repository: R,
}

impl<R: ExerciseRepository> LoadExerciseUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// `None` loads the first exercise of the catalogue.
    pub async fn execute(&self, exercise_id: Option<&str>) -> Result<LoadedExercise, AppError> {
        let exercise = match exercise_id {
            Some(id) => self.repository.fetch_exercise(id).await?,
            None => self.repository.fetch_first().await?,
        };
        exercise.constraint().validate()?;
        let next = self.repository.fetch_next(&exercise.id).await?.id;

        get_logger().log(
            LogEntry::new(
                LogLevel::Info,
                LogComponent::Application("LoadExercise"),
                &format!("loaded exercise {}", exercise.id),
            )
            .with_field("points", exercise.data_points.len())
            .with_field("next", next.as_deref().unwrap_or("none")),
        );
        Ok(LoadedExercise { exercise, next })
    }
}

/// Use Case: submit the current points for judgement
pub struct EvaluateSolutionUseCase<E: SolutionEvaluator> {
    evaluator: E,
}

impl<E: SolutionEvaluator> EvaluateSolutionUseCase<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    pub async fn execute(&self, exercise_id: &str, solution: &[Point]) -> Result<bool, AppError> {
        let verdict = self.evaluator.evaluate(exercise_id, solution).await;
        match &verdict {
            Ok(is_correct) => get_logger().info(
                LogComponent::Application("EvaluateSolution"),
                &format!("exercise {} evaluated: correct={}", exercise_id, is_correct),
            ),
            Err(e) => get_logger().warn(
                LogComponent::Application("EvaluateSolution"),
                &format!("exercise {} evaluation failed: {}", exercise_id, e),
            ),
        }
        verdict
    }
}
