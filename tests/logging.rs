use bubble_plot_wasm::application::LoadExerciseUseCase;
use bubble_plot_wasm::domain::exercise::{Exercise, LocalRangeEvaluator, RangeConstraint};
use bubble_plot_wasm::domain::logging::{
    LogComponent, LogEntry, LogLevel, Logger, RecordingLogger, get_logger, init_logger,
};
use bubble_plot_wasm::domain::plot::{BubblePlot, DatasetId, PlotConfig, Point, Viewport};
use futures::executor::block_on;
use std::sync::{Arc, OnceLock};

/// The global logger can only be installed once per test binary.
struct SharedLogger(Arc<RecordingLogger>);

impl Logger for SharedLogger {
    fn log(&self, entry: LogEntry) {
        self.0.log(entry);
    }
}

fn recorder() -> Arc<RecordingLogger> {
    static RECORDER: OnceLock<Arc<RecordingLogger>> = OnceLock::new();
    RECORDER
        .get_or_init(|| {
            let recorder = Arc::new(RecordingLogger::new(LogLevel::Trace));
            init_logger(Box::new(SharedLogger(Arc::clone(&recorder))));
            recorder
        })
        .clone()
}

#[test]
fn use_cases_log_through_the_global_logger() {
    let recorder = recorder();
    let constraint = RangeConstraint::greater_than(5.0);
    let mut catalogue = LocalRangeEvaluator::new();
    catalogue
        .register(Exercise {
            id: "log-ex".to_string(),
            order: 1,
            title: "logged".to_string(),
            description: String::new(),
            constraint_type: constraint.constraint_type,
            lower_bound: constraint.lower_bound,
            upper_bound: constraint.upper_bound,
            is_active: true,
            created_at: None,
            updated_at: None,
            data_points: vec![Point::new("a", 0.0, 1.0, 1.0)],
        })
        .unwrap();

    block_on(LoadExerciseUseCase::new(catalogue).execute(None)).unwrap();

    let loaded = recorder
        .entries()
        .into_iter()
        .find(|entry| entry.message == "loaded exercise log-ex")
        .unwrap();
    assert_eq!(loaded.level, LogLevel::Info);
    assert_eq!(loaded.fields, vec![("points", "1".to_string()), ("next", "none".to_string())]);
}

#[test]
fn plot_diagnostics_only_in_debug_builds() {
    let recorder = recorder();
    let mut plot = BubblePlot::new(Viewport::new(600.0, 500.0).unwrap(), PlotConfig::default()).unwrap();
    plot.load_dataset(DatasetId::from("logged-dataset"), vec![Point::new("a", 1.0, 2.0, 3.0)], Default::default())
        .unwrap();

    let loaded = recorder
        .entries()
        .into_iter()
        .any(|e| e.component == LogComponent::Domain("BubblePlot") && e.message.contains("logged-dataset"));
    assert_eq!(loaded, cfg!(debug_assertions));
}

#[test]
fn warnings_are_never_compiled_out() {
    let recorder = recorder();
    get_logger().warn(LogComponent::Presentation("Test"), "pointer capture lost");
    assert!(recorder.messages_at(LogLevel::Warn).contains(&"pointer capture lost".to_string()));
}
