use leptos::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;

use crate::{
    application::{EvaluateSolutionUseCase, ExerciseSession, LoadExerciseUseCase, SessionStatus},
    domain::{
        logging::{LogComponent, get_logger},
        plot::{
            BubblePlot, DragOutcome, PlotConfig, RenderCommand, Viewport,
            render::TextAnchor,
        },
    },
    event_utils::GestureListeners,
    global_state::{
        evaluating_signal, is_dragging_signal, last_error_signal, prompt_signal, range_signal,
        scene_signal, status_signal,
    },
    infrastructure::ExerciseApiClient,
};

const PLOT_WIDTH: f64 = 600.0;
const PLOT_HEIGHT: f64 = 500.0;

type SharedSession = Rc<RefCell<ExerciseSession>>;

/// Push the session state into the global signals.
fn publish(session: &SharedSession) {
    let session = session.borrow();
    let plot = session.plot();
    scene_signal().set(plot.render());
    range_signal().set(plot.annotation().map(|a| a.summary));
    is_dragging_signal().set(plot.drag().is_dragging());
    status_signal().set(session.status());
    prompt_signal().set(session.prompt());
}

fn report(error: impl std::fmt::Display) {
    let message = error.to_string();
    get_logger().error(LogComponent::Presentation("App"), &message);
    last_error_signal().set(Some(message));
}

/// Fetch `exercise_id` (or the first exercise) and show it.
fn load_exercise(session: SharedSession, api_base: String, exercise_id: Option<String>) {
    spawn_local(async move {
        let use_case = LoadExerciseUseCase::new(ExerciseApiClient::new(api_base));
        let applied = match use_case.execute(exercise_id.as_deref()).await {
            Ok(loaded) => session.borrow_mut().apply_exercise(loaded),
            Err(e) => Err(e),
        };
        match applied {
            Ok(()) => last_error_signal().set(None),
            Err(e) => report(e),
        }
        publish(&session);
    });
}

fn evaluate(session: SharedSession, api_base: String) {
    let Some(submission) = session.borrow().solution() else {
        return;
    };
    evaluating_signal().set(true);
    spawn_local(async move {
        let use_case = EvaluateSolutionUseCase::new(ExerciseApiClient::new(api_base));
        match use_case.execute(&submission.exercise_id, &submission.points).await {
            Ok(is_correct) => {
                session.borrow_mut().record_verdict(submission.revision, is_correct);
            }
            Err(e) => report(e),
        }
        evaluating_signal().set(false);
        publish(&session);
    });
}

/// Range exercise page: goal, plot, check / next buttons
#[component]
pub fn App(#[prop(into)] api_base: String) -> impl IntoView {
    let plot = match BubblePlot::new(Viewport { width: PLOT_WIDTH, height: PLOT_HEIGHT }, PlotConfig::default()) {
        Ok(plot) => plot,
        Err(e) => {
            report(&e);
            return view! { <div class="error">{e.to_string()}</div> }.into_view();
        }
    };
    let session: SharedSession = Rc::new(RefCell::new(ExerciseSession::new(plot)));
    load_exercise(Rc::clone(&session), api_base.clone(), None);

    let on_check = {
        let session = Rc::clone(&session);
        let api_base = api_base.clone();
        move |_| evaluate(Rc::clone(&session), api_base.clone())
    };
    let on_next = {
        let session = Rc::clone(&session);
        let api_base = api_base.clone();
        move |_| {
            if let SessionStatus::Solved { next } = status_signal().get_untracked() {
                load_exercise(Rc::clone(&session), api_base.clone(), Some(next));
            }
        }
    };

    view! {
        <style>
            {r#"
            .range-exercise { font-family: -apple-system, BlinkMacSystemFont, sans-serif; padding: 20px; color: #111827; }
            .prompt { font-size: 18px; margin-bottom: 12px; }
            .range-readout { font-size: 13px; color: #374151; margin: 8px 0; }
            .verdict-ok { color: #15803d; font-weight: 600; }
            .verdict-retry { color: #b91c1c; font-weight: 600; }
            .error { color: #b91c1c; }
            button { margin-right: 8px; padding: 6px 14px; border-radius: 6px; border: 1px solid #9ca3af; cursor: pointer; }
            "#}
        </style>
        <div class="range-exercise">
            <div class="prompt">{move || prompt_signal().get().unwrap_or_else(|| "Loading exercise...".to_string())}</div>
            <BubblePlotView session=Rc::clone(&session) />
            <div class="range-readout">
                {move || match range_signal().get() {
                    Some(range) => format!("min {:.1} / max {:.1}", range.min, range.max),
                    None => String::new(),
                }}
            </div>
            <button on:click=on_check disabled=move || evaluating_signal().get()>"Check"</button>
            <Show when=move || matches!(status_signal().get(), SessionStatus::Solved { .. })>
                <button on:click=on_next.clone()>"Next exercise"</button>
            </Show>
            <StatusLine />
            <div class="error">{move || last_error_signal().get().unwrap_or_default()}</div>
        </div>
    }
    .into_view()
}

#[component]
fn StatusLine() -> impl IntoView {
    view! {
        {move || match status_signal().get() {
            SessionStatus::NotLoaded | SessionStatus::InProgress => view! { <span></span> }.into_view(),
            SessionStatus::Retry => view! { <span class="verdict-retry">"Not quite, try again."</span> }.into_view(),
            SessionStatus::Solved { .. } => view! { <span class="verdict-ok">"Correct!"</span> }.into_view(),
            SessionStatus::Completed => {
                view! { <span class="verdict-ok">"Correct! That was the last exercise."</span> }.into_view()
            }
        }}
    }
}

/// SVG rendering of the plot with pointer-driven dragging.
///
/// Move/release/Escape are listened for on `window` so a gesture that
/// leaves the plot still ends cleanly.
#[component]
pub fn BubblePlotView(session: SharedSession) -> impl IntoView {
    // top-left of the svg in client coordinates, captured on pointer-down
    let svg_origin = Rc::new(Cell::new((0.0, 0.0)));

    let on_pointer_down = {
        let session = Rc::clone(&session);
        let svg_origin = Rc::clone(&svg_origin);
        move |ev: web_sys::PointerEvent| {
            let Some(target) = ev.current_target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
                return;
            };
            let rect = target.get_bounding_client_rect();
            svg_origin.set((rect.left(), rect.top()));
            let outcome = {
                let mut session = session.borrow_mut();
                let local = session
                    .plot()
                    .to_local(ev.client_x() as f64 - rect.left(), ev.client_y() as f64 - rect.top());
                session.plot_mut().pointer_down(local)
            };
            if outcome != DragOutcome::Ignored {
                ev.prevent_default();
                publish(&session);
            }
        }
    };

    let mut listeners = GestureListeners::new();
    {
        let session = Rc::clone(&session);
        let svg_origin = Rc::clone(&svg_origin);
        listeners.listen(ev::pointermove, move |ev: web_sys::PointerEvent| {
            if !session.borrow().plot().drag().is_dragging() {
                return;
            }
            let (left, top) = svg_origin.get();
            {
                let mut session = session.borrow_mut();
                let local = session.plot().to_local(ev.client_x() as f64 - left, ev.client_y() as f64 - top);
                session.plot_mut().pointer_move(local);
            }
            publish(&session);
        });
    }
    {
        let session = Rc::clone(&session);
        let svg_origin = Rc::clone(&svg_origin);
        listeners.listen(ev::pointerup, move |ev: web_sys::PointerEvent| {
            let (left, top) = svg_origin.get();
            let outcome = {
                let mut session = session.borrow_mut();
                let local = session.plot().to_local(ev.client_x() as f64 - left, ev.client_y() as f64 - top);
                session.plot_mut().pointer_up(Some(local))
            };
            if outcome != DragOutcome::Ignored {
                publish(&session);
            }
        });
    }
    {
        let session = Rc::clone(&session);
        listeners.listen(ev::keydown, move |ev: web_sys::KeyboardEvent| {
            if ev.key() != "Escape" {
                return;
            }
            let outcome = session.borrow_mut().plot_mut().cancel_drag();
            if outcome != DragOutcome::Ignored {
                publish(&session);
            }
        });
    }
    {
        let session = Rc::clone(&session);
        listeners.listen(ev::pointercancel, move |_: web_sys::PointerEvent| {
            let outcome = session.borrow_mut().plot_mut().cancel_drag();
            if outcome != DragOutcome::Ignored {
                publish(&session);
            }
        });
    }
    on_cleanup(move || listeners.detach());

    view! {
        <svg
            width=move || scene_signal().with(|s| s.width)
            height=move || scene_signal().with(|s| s.height)
            style="touch-action: none; user-select: none;"
            class:dragging=move || is_dragging_signal().get()
            on:pointerdown=on_pointer_down
        >
            <g transform=move || scene_signal().with(|s| format!("translate({},{})", s.origin.x, s.origin.y))>
                {move || scene_signal().get().commands.into_iter().map(command_view).collect_view()}
            </g>
        </svg>
    }
}

fn anchor_attr(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

fn command_view(command: RenderCommand) -> View {
    match command {
        RenderCommand::Marker { point_id, cx, cy, r, fill, fill_opacity, stroke, stroke_width } => view! {
            <circle
                data-point-id=point_id.to_string()
                cx=cx
                cy=cy
                r=r
                fill=fill.to_css()
                fill-opacity=fill_opacity
                stroke=stroke.to_css()
                stroke-width=stroke_width
                style="cursor: grab;"
            />
        }
        .into_view(),
        RenderCommand::Line { x1, y1, x2, y2, stroke, stroke_width } => view! {
            <line x1=x1 y1=y1 x2=x2 y2=y2 stroke=stroke.to_css() stroke-width=stroke_width />
        }
        .into_view(),
        RenderCommand::Text { x, y, text, font_size, color, anchor, bold, rotate } => view! {
            <text
                x=x
                y=y
                fill=color.to_css()
                font-size=font_size
                font-weight=if bold { "bold" } else { "normal" }
                text-anchor=anchor_attr(anchor)
                transform=format!("rotate({})", rotate)
            >
                {text}
            </text>
        }
        .into_view(),
        RenderCommand::Tick { .. } => ().into_view(),
    }
}
