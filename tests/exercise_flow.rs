use bubble_plot_wasm::application::{
    EvaluateSolutionUseCase, ExerciseSession, LoadExerciseUseCase, SessionStatus,
};
use bubble_plot_wasm::domain::errors::{AppError, ValidationError};
use bubble_plot_wasm::domain::exercise::{Exercise, LocalRangeEvaluator};
use bubble_plot_wasm::domain::plot::{BubblePlot, PixelPoint, PlotConfig, PointId, Viewport};
use futures::executor::block_on;

const BETWEEN: &str = r#"{
    "id": "ex-between",
    "order": 1,
    "title": "Squeeze the range",
    "description": "",
    "constraint_type": "between",
    "lower_bound": 200,
    "upper_bound": 500,
    "is_active": true,
    "data_points": [
        {"id": "p1", "x": 1, "y": 100, "size": 3},
        {"id": "p2", "x": 2, "y": 350, "size": 6},
        {"id": "p3", "x": 3, "y": 600, "size": 2}
    ]
}"#;

const LESS_THAN: &str = r#"{
    "id": "ex-lt",
    "order": 2,
    "title": "Push everything down",
    "constraint_type": "lt",
    "upper_bound": 50,
    "data_points": [
        {"id": "a", "x": 0, "y": 10, "size": 1},
        {"id": "b", "x": 5, "y": 80, "size": 1}
    ]
}"#;

fn catalogue() -> LocalRangeEvaluator {
    let mut catalogue = LocalRangeEvaluator::new();
    catalogue.register(Exercise::from_json(BETWEEN).unwrap()).unwrap();
    catalogue.register(Exercise::from_json(LESS_THAN).unwrap()).unwrap();
    catalogue
}

fn session() -> ExerciseSession {
    ExerciseSession::new(BubblePlot::new(Viewport::new(600.0, 500.0).unwrap(), PlotConfig::default()).unwrap())
}

/// Drag `id` to the data-space y value `y` by going through pixel space.
fn drag_to_y(session: &mut ExerciseSession, id: &str, y: f64) {
    let plot = session.plot_mut();
    let scales = *plot.scales().unwrap();
    let point = plot.points().iter().find(|p| p.id.as_str() == id).unwrap().clone();
    let start = scales.project(&point);
    plot.pointer_down_on(&PointId::from(id), start);
    plot.pointer_up(Some(PixelPoint::new(start.x, scales.y.apply(y))));
}

#[test]
fn first_exercise_loads_with_its_successor() {
    let use_case = LoadExerciseUseCase::new(catalogue());
    let loaded = block_on(use_case.execute(None)).unwrap();

    assert_eq!(loaded.exercise.id, "ex-between");
    assert_eq!(loaded.next.as_deref(), Some("ex-lt"));

    let mut session = session();
    assert_eq!(session.status(), SessionStatus::NotLoaded);
    session.apply_exercise(loaded).unwrap();
    assert_eq!(session.status(), SessionStatus::InProgress);
    assert_eq!(
        session.prompt().as_deref(),
        Some("Move the points so that every y-value is between 200 and 500.")
    );
    // targets stay visible inside the frozen y domain
    let y = session.plot().domain().unwrap().y;
    assert!(y.contains(210.0) && y.contains(490.0));
}

#[test]
fn untouched_points_fail_then_dragged_points_pass() {
    let evaluator = catalogue();
    let loaded = block_on(LoadExerciseUseCase::new(evaluator.clone()).execute(None)).unwrap();
    let mut session = session();
    session.apply_exercise(loaded).unwrap();
    let evaluate = EvaluateSolutionUseCase::new(evaluator);

    let submission = session.solution().unwrap();
    let verdict = block_on(evaluate.execute(&submission.exercise_id, &submission.points)).unwrap();
    assert!(session.record_verdict(submission.revision, verdict));
    assert_eq!(session.status(), SessionStatus::Retry);

    drag_to_y(&mut session, "p1", 250.0);
    assert_eq!(session.status(), SessionStatus::InProgress);
    drag_to_y(&mut session, "p3", 450.0);

    let submission = session.solution().unwrap();
    assert!(submission.points.iter().all(|p| (200.0..=500.0).contains(&p.y)));
    let verdict = block_on(evaluate.execute(&submission.exercise_id, &submission.points)).unwrap();
    assert!(session.record_verdict(submission.revision, verdict));
    assert_eq!(session.status(), SessionStatus::Solved { next: "ex-lt".to_string() });
}

#[test]
fn last_exercise_completes_the_session() {
    let evaluator = catalogue();
    let loaded = block_on(LoadExerciseUseCase::new(evaluator.clone()).execute(Some("ex-lt"))).unwrap();
    assert_eq!(loaded.next, None);

    let mut session = session();
    session.apply_exercise(loaded).unwrap();
    assert_eq!(
        session.prompt().as_deref(),
        Some("Move the points so that every y-value is less than 50.")
    );

    drag_to_y(&mut session, "b", 20.0);
    let submission = session.solution().unwrap();
    let verdict =
        block_on(EvaluateSolutionUseCase::new(evaluator).execute(&submission.exercise_id, &submission.points))
            .unwrap();
    assert!(session.record_verdict(submission.revision, verdict));
    assert_eq!(session.status(), SessionStatus::Completed);
}

#[test]
fn unknown_exercise_surfaces_as_validation_error() {
    let use_case = LoadExerciseUseCase::new(catalogue());
    let err = block_on(use_case.execute(Some("missing"))).unwrap_err();
    assert_eq!(err, AppError::Validation(ValidationError::UnknownExercise("missing".to_string())));
}

#[test]
fn constraint_without_its_bound_is_rejected_at_registration() {
    let broken = LESS_THAN.replace(r#""upper_bound": 50,"#, "");
    let mut catalogue = LocalRangeEvaluator::new();
    let err = catalogue.register(Exercise::from_json(&broken).unwrap()).unwrap_err();
    assert!(matches!(err, ValidationError::MissingBound { bound: "upper_bound", .. }));
    assert!(catalogue.is_empty());
}

#[test]
fn empty_solution_is_an_error_not_a_verdict() {
    let evaluate = EvaluateSolutionUseCase::new(catalogue());
    let err = block_on(evaluate.execute("ex-between", &[])).unwrap_err();
    assert_eq!(err, AppError::Validation(ValidationError::EmptySolution));
}
