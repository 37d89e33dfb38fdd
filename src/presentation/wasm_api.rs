use js_sys::Promise;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::application::{EvaluateSolutionUseCase, ExerciseSession, LoadExerciseUseCase, LoadedExercise};
use crate::domain::{
    errors::{AppError, InfrastructureError, ValidationError},
    exercise::Exercise,
    logging::{LogComponent, get_logger},
    plot::{BubblePlot, DragOutcome, PlotConfig, Point, Viewport},
};
use crate::infrastructure::{CanvasRenderer, ExerciseApiClient};

/// JavaScript bridge to the bubble plot. Pointer coordinates are canvas
/// pixels; the plot margin is removed before they reach the drag controller.
#[wasm_bindgen]
pub struct BubblePlotApi {
    session: Rc<RefCell<ExerciseSession>>,
    renderer: Rc<RefCell<CanvasRenderer>>,
}

#[wasm_bindgen]
impl BubblePlotApi {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: String, width: u32, height: u32) -> Result<BubblePlotApi, JsValue> {
        let viewport = Viewport::new(width as f64, height as f64).map_err(AppError::from)?;
        let plot = BubblePlot::new(viewport, PlotConfig::default()).map_err(AppError::from)?;
        get_logger().info(
            LogComponent::Presentation("BubblePlotApi"),
            &format!("created plot on #{} ({}x{})", canvas_id, width, height),
        );
        Ok(Self {
            session: Rc::new(RefCell::new(ExerciseSession::new(plot))),
            renderer: Rc::new(RefCell::new(CanvasRenderer::new(canvas_id, width, height))),
        })
    }

    /// Show an exercise record (API JSON). `next_id` is the id of the
    /// following exercise, if known.
    #[wasm_bindgen(js_name = loadExerciseJson)]
    pub fn load_exercise_json(&self, json: &str, next_id: Option<String>) -> Result<(), JsValue> {
        let exercise = Exercise::from_json(json).map_err(|e| AppError::from(InfrastructureError::from(e)))?;
        self.session
            .borrow_mut()
            .apply_exercise(LoadedExercise { exercise, next: next_id })?;
        self.render()
    }

    /// Replace the points of the current exercise; axes stay as they are.
    #[wasm_bindgen(js_name = loadPointsJson)]
    pub fn load_points_json(&self, json: &str) -> Result<(), JsValue> {
        let points: Vec<Point> =
            serde_json::from_str(json).map_err(|e| AppError::from(InfrastructureError::from(e)))?;
        self.session
            .borrow_mut()
            .plot_mut()
            .replace_points(points)
            .map_err(AppError::from)?;
        self.render()
    }

    /// Fetch an exercise (the first one when `exercise_id` is absent) and show it.
    #[wasm_bindgen(js_name = loadExercise)]
    pub fn load_exercise(&self, base_url: String, exercise_id: Option<String>) -> Promise {
        let session = Rc::clone(&self.session);
        let renderer = Rc::clone(&self.renderer);
        future_to_promise(async move {
            let use_case = LoadExerciseUseCase::new(ExerciseApiClient::new(base_url));
            let loaded = use_case.execute(exercise_id.as_deref()).await?;
            let id = loaded.exercise.id.clone();
            session.borrow_mut().apply_exercise(loaded)?;
            redraw(&session, &renderer)?;
            Ok(JsValue::from_str(&id))
        })
    }

    /// Returns `true` when the press landed on a marker.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, x: f64, y: f64) -> Result<bool, JsValue> {
        let outcome = {
            let mut session = self.session.borrow_mut();
            let local = session.plot().to_local(x, y);
            session.plot_mut().pointer_down(local)
        };
        self.after(outcome)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, x: f64, y: f64) -> Result<bool, JsValue> {
        let outcome = {
            let mut session = self.session.borrow_mut();
            let local = session.plot().to_local(x, y);
            session.plot_mut().pointer_move(local)
        };
        self.after(outcome)
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self, x: f64, y: f64) -> Result<bool, JsValue> {
        let outcome = {
            let mut session = self.session.borrow_mut();
            let local = session.plot().to_local(x, y);
            session.plot_mut().pointer_up(Some(local))
        };
        self.after(outcome)
    }

    #[wasm_bindgen(js_name = cancelDrag)]
    pub fn cancel_drag(&self) -> Result<bool, JsValue> {
        let outcome = self.session.borrow_mut().plot_mut().cancel_drag();
        self.after(outcome)
    }

    pub fn resize(&self, width: u32, height: u32) -> Result<(), JsValue> {
        let viewport = Viewport::new(width as f64, height as f64).map_err(AppError::from)?;
        self.session.borrow_mut().plot_mut().resize(viewport).map_err(AppError::from)?;
        self.renderer.borrow_mut().set_dimensions(width, height);
        self.render()
    }

    pub fn render(&self) -> Result<(), JsValue> {
        redraw(&self.session, &self.renderer)
    }

    /// Current (possibly dragged) points as JSON.
    #[wasm_bindgen(js_name = pointsJson)]
    pub fn points_json(&self) -> Result<String, JsValue> {
        let session = self.session.borrow();
        serde_json::to_string(session.plot().points())
            .map_err(|e| AppError::from(InfrastructureError::Serialization(e.to_string())).into())
    }

    /// `{"min":..,"max":..}` of the current y-values, or `null`.
    #[wasm_bindgen(js_name = rangeJson)]
    pub fn range_json(&self) -> Result<String, JsValue> {
        let session = self.session.borrow();
        let summary = session.plot().annotation().map(|a| a.summary);
        serde_json::to_string(&summary)
            .map_err(|e| AppError::from(InfrastructureError::Serialization(e.to_string())).into())
    }

    pub fn prompt(&self) -> Option<String> {
        self.session.borrow().prompt()
    }

    /// Submit the current points; resolves to the verdict. The verdict is only
    /// kept when no move was committed while the request was in flight.
    pub fn evaluate(&self, base_url: String) -> Promise {
        let session = Rc::clone(&self.session);
        future_to_promise(async move {
            let submission = session
                .borrow()
                .solution()
                .ok_or_else(|| AppError::from(ValidationError::EmptySolution))?;
            let use_case = EvaluateSolutionUseCase::new(ExerciseApiClient::new(base_url));
            let is_correct = use_case.execute(&submission.exercise_id, &submission.points).await?;
            if !session.borrow_mut().record_verdict(submission.revision, is_correct) {
                get_logger().warn(
                    LogComponent::Presentation("BubblePlotApi"),
                    "points changed during evaluation; verdict discarded",
                );
            }
            Ok(JsValue::from_bool(is_correct))
        })
    }
}

impl BubblePlotApi {
    fn after(&self, outcome: DragOutcome) -> Result<bool, JsValue> {
        if outcome == DragOutcome::Ignored {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }
}

fn redraw(session: &Rc<RefCell<ExerciseSession>>, renderer: &Rc<RefCell<CanvasRenderer>>) -> Result<(), JsValue> {
    let list = session.borrow().plot().render();
    renderer.borrow().render(&list).map_err(AppError::from)?;
    Ok(())
}
