use super::use_cases::LoadedExercise;
use crate::domain::{
    errors::AppError,
    events::PlotEvent,
    exercise::{Exercise, RangeConstraint},
    logging::LogComponent,
    plot::{BubblePlot, Point},
};
use crate::log_debug;
use std::cell::Cell;
use std::rc::Rc;

/// Where the learner stands on the current exercise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    NotLoaded,
    InProgress,
    /// Last submission was wrong.
    Retry,
    /// Last submission was right and another exercise follows.
    Solved { next: String },
    /// Last submission was right and this was the final exercise.
    Completed,
}

/// Points handed to the evaluator, tagged with the commit they were taken at
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub exercise_id: String,
    pub points: Vec<Point>,
    pub revision: u64,
}

/// One plot bound to the exercise currently on screen.
///
/// Every commit on the plot bumps the revision; a verdict only counts for
/// the revision it was computed on.
#[derive(Debug)]
pub struct ExerciseSession {
    plot: BubblePlot,
    exercise: Option<Exercise>,
    next: Option<String>,
    revision: Rc<Cell<u64>>,
    verdict: Option<(u64, bool)>,
}

impl ExerciseSession {
    pub fn new(mut plot: BubblePlot) -> Self {
        let revision = Rc::new(Cell::new(0));
        let counter = Rc::clone(&revision);
        plot.subscribe(move |event| {
            if let PlotEvent::PointsCommitted { .. } = event {
                counter.set(counter.get() + 1);
            }
        });
        Self { plot, exercise: None, next: None, revision, verdict: None }
    }

    /// Show `loaded` on the plot. The data set identity is the exercise id,
    /// so reloading the same exercise keeps the frozen axes.
    pub fn apply_exercise(&mut self, loaded: LoadedExercise) -> Result<(), AppError> {
        let LoadedExercise { exercise, next } = loaded;
        let constraint = exercise.constraint();
        constraint.validate()?;
        self.plot.load_dataset(exercise.dataset_id(), exercise.points(), constraint.targets())?;
        log_debug!(
            LogComponent::Application("ExerciseSession"),
            "session now on exercise {} (revision {})",
            exercise.id,
            self.revision()
        );
        self.exercise = Some(exercise);
        self.next = next;
        self.verdict = None;
        Ok(())
    }

    /// Exercise id and the current (possibly dragged) points.
    pub fn solution(&self) -> Option<Submission> {
        self.exercise.as_ref().map(|e| Submission {
            exercise_id: e.id.clone(),
            points: self.plot.points().to_vec(),
            revision: self.revision(),
        })
    }

    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    /// Record the verdict for the points taken at `revision`. Returns `false`
    /// and keeps nothing when the points changed since.
    pub fn record_verdict(&mut self, revision: u64, is_correct: bool) -> bool {
        if revision != self.revision() {
            log_debug!(
                LogComponent::Application("ExerciseSession"),
                "dropping verdict for revision {} (now {})",
                revision,
                self.revision()
            );
            return false;
        }
        self.verdict = Some((revision, is_correct));
        true
    }

    /// Verdict for the points currently on the plot, if one was recorded.
    pub fn verdict(&self) -> Option<bool> {
        self.verdict
            .filter(|(revision, _)| *revision == self.revision())
            .map(|(_, is_correct)| is_correct)
    }

    pub fn status(&self) -> SessionStatus {
        if self.exercise.is_none() {
            return SessionStatus::NotLoaded;
        }
        match (self.verdict(), &self.next) {
            (None, _) => SessionStatus::InProgress,
            (Some(false), _) => SessionStatus::Retry,
            (Some(true), Some(next)) => SessionStatus::Solved { next: next.clone() },
            (Some(true), None) => SessionStatus::Completed,
        }
    }

    pub fn constraint(&self) -> Option<RangeConstraint> {
        self.exercise.as_ref().map(Exercise::constraint)
    }

    /// Goal sentence shown above the plot.
    pub fn prompt(&self) -> Option<String> {
        self.constraint().map(|c| format!("Move the points so that every y-value is {}.", c.prompt()))
    }

    pub fn exercise(&self) -> Option<&Exercise> {
        self.exercise.as_ref()
    }

    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    pub fn plot(&self) -> &BubblePlot {
        &self.plot
    }

    pub fn plot_mut(&mut self) -> &mut BubblePlot {
        &mut self.plot
    }
}
