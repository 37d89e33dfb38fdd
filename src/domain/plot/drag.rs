//! Pointer-drag state machine for plot markers.
//!
//! `Idle -> Dragging -> Idle`. A gesture keeps a copy of the scales that were
//! active when it started; whoever changes the scales mid-gesture (resize,
//! data set reset) must call [`DragController::abort`].

use super::scale::Scales;
use super::value_objects::{PixelPoint, Point, PointId};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_trace};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// When dragged positions are written back to the point collection
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CommitPolicy {
    /// Visual feedback while dragging, one commit on release.
    #[default]
    OnEnd,
    /// Commit on every pointer move.
    Continuous,
}

/// The transform proposed to the point collection owner: move one point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMove {
    pub point_id: PointId,
    pub x: f64,
    pub y: f64,
}

impl PointMove {
    /// New collection with only `x`/`y` of the matching point replaced.
    pub fn apply(&self, points: &[Point]) -> Vec<Point> {
        points
            .iter()
            .map(|p| if p.id == self.point_id { p.moved_to(self.x, self.y) } else { p.clone() })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    pub point_id: PointId,
    /// Marker centre when the gesture started.
    pub origin: PixelPoint,
    /// Live marker centre; the grab offset from `press` is preserved.
    pub current: PixelPoint,
    press: PixelPoint,
    moved: bool,
    scales: Scales,
}

impl DragGesture {
    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Marker centre for a pointer at `pointer`, clamped to the bounds.
    fn follow(&mut self, pointer: PixelPoint) {
        let target = PixelPoint::new(
            self.origin.x + (pointer.x - self.press.x),
            self.origin.y + (pointer.y - self.press.y),
        );
        self.current = self.scales.bounds.clamp(target);
        self.moved = true;
    }

    fn proposal(&self) -> PointMove {
        let (x, y) = self.scales.unproject(self.current);
        PointMove { point_id: self.point_id.clone(), x, y }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragGesture),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Event did not apply (no gesture, unknown id, ...).
    Ignored,
    Started { point_id: PointId, origin: PixelPoint },
    /// Visual-only update of the dragged marker.
    Moved { point_id: PointId, position: PixelPoint },
    Committed(PointMove),
    /// Gesture ended without any pointer movement; nothing to commit.
    Released { point_id: PointId },
    Aborted { point_id: PointId },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragController {
    policy: CommitPolicy,
    state: DragState,
}

impl DragController {
    pub fn new(policy: CommitPolicy) -> Self {
        Self { policy, state: DragState::Idle }
    }

    pub fn policy(&self) -> CommitPolicy {
        self.policy
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn dragged_point(&self) -> Option<&PointId> {
        match &self.state {
            DragState::Dragging(gesture) => Some(&gesture.point_id),
            DragState::Idle => None,
        }
    }

    /// Live marker position for `point_id` while it is being dragged.
    pub fn preview(&self, point_id: &PointId) -> Option<PixelPoint> {
        match &self.state {
            DragState::Dragging(gesture) if &gesture.point_id == point_id => Some(gesture.current),
            _ => None,
        }
    }

    /// Start dragging `point_id` grabbed at `pointer`. The marker stays where
    /// it is until the pointer moves. A gesture already in progress is replaced.
    pub fn begin(
        &mut self,
        point_id: &PointId,
        pointer: PixelPoint,
        scales: &Scales,
        points: &[Point],
    ) -> DragOutcome {
        let Some(point) = points.iter().find(|p| &p.id == point_id) else {
            return DragOutcome::Ignored;
        };
        let origin = scales.project(point);
        log_debug!(
            LogComponent::Domain("DragController"),
            "drag start {} at ({:.1}, {:.1})",
            point_id,
            origin.x,
            origin.y
        );
        self.state = DragState::Dragging(DragGesture {
            point_id: point_id.clone(),
            origin,
            current: origin,
            press: pointer,
            moved: false,
            scales: *scales,
        });
        DragOutcome::Started { point_id: point_id.clone(), origin }
    }

    pub fn drag_to(&mut self, pointer: PixelPoint) -> DragOutcome {
        let policy = self.policy;
        let DragState::Dragging(gesture) = &mut self.state else {
            return DragOutcome::Ignored;
        };
        gesture.follow(pointer);
        log_trace!(
            LogComponent::Domain("DragController"),
            "drag {} -> ({:.1}, {:.1})",
            gesture.point_id,
            gesture.current.x,
            gesture.current.y
        );
        match policy {
            CommitPolicy::OnEnd => DragOutcome::Moved {
                point_id: gesture.point_id.clone(),
                position: gesture.current,
            },
            CommitPolicy::Continuous => DragOutcome::Committed(gesture.proposal()),
        }
    }

    /// Finish the gesture; `pointer` is the release position if known.
    /// A press and release at the same spot commits nothing.
    pub fn end(&mut self, pointer: Option<PixelPoint>) -> DragOutcome {
        let DragState::Dragging(mut gesture) = std::mem::take(&mut self.state) else {
            return DragOutcome::Ignored;
        };
        if let Some(pointer) = pointer.filter(|p| gesture.moved || *p != gesture.press) {
            gesture.follow(pointer);
        }
        if !gesture.moved {
            log_debug!(LogComponent::Domain("DragController"), "released {} without moving", gesture.point_id);
            return DragOutcome::Released { point_id: gesture.point_id };
        }
        let proposal = gesture.proposal();
        log_debug!(
            LogComponent::Domain("DragController"),
            "drag end {} -> data ({}, {})",
            proposal.point_id,
            proposal.x,
            proposal.y
        );
        DragOutcome::Committed(proposal)
    }

    /// Drop the gesture and its pending move.
    pub fn abort(&mut self) -> DragOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(gesture) => {
                log_debug!(LogComponent::Domain("DragController"), "drag aborted {}", gesture.point_id);
                DragOutcome::Aborted { point_id: gesture.point_id }
            }
            DragState::Idle => DragOutcome::Ignored,
        }
    }
}
