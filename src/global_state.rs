use crate::application::SessionStatus;
use crate::domain::plot::{RangeSummary, RenderList};
use leptos::*;
use once_cell::sync::OnceCell;

/// Reactive mirrors of the session, refreshed after every plot change
pub struct Globals {
    pub scene: RwSignal<RenderList>,
    pub range: RwSignal<Option<RangeSummary>>,
    pub is_dragging: RwSignal<bool>,
    pub status: RwSignal<SessionStatus>,
    pub prompt: RwSignal<Option<String>>,
    pub last_error: RwSignal<Option<String>>,
    pub evaluating: RwSignal<bool>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        scene: create_rw_signal(RenderList::default()),
        range: create_rw_signal(None),
        is_dragging: create_rw_signal(false),
        status: create_rw_signal(SessionStatus::NotLoaded),
        prompt: create_rw_signal(None),
        last_error: create_rw_signal(None),
        evaluating: create_rw_signal(false),
    })
}

crate::global_signals! {
    pub scene_signal => scene: RenderList,
    pub range_signal => range: Option<RangeSummary>,
    pub is_dragging_signal => is_dragging: bool,
    pub status_signal => status: SessionStatus,
    pub prompt_signal => prompt: Option<String>,
    pub last_error_signal => last_error: Option<String>,
    pub evaluating_signal => evaluating: bool,
}
