use crate::domain::plot::{DatasetId, PointId};
use std::fmt::Debug;

/// Base trait for all domain events
pub trait DomainEvent: Debug + Clone {
    fn event_type(&self) -> &'static str;
}

/// Notifications emitted by the bubble plot after each synchronous recomputation
#[derive(Debug, Clone, PartialEq)]
pub enum PlotEvent {
    DatasetLoaded {
        dataset: DatasetId,
        point_count: usize,
    },
    PointsCommitted {
        point_count: usize,
        range: Option<(f64, f64)>,
    },
    ViewportResized {
        width: f64,
        height: f64,
    },
    DragAborted {
        point_id: PointId,
    },
}

impl DomainEvent for PlotEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PlotEvent::DatasetLoaded { .. } => "DatasetLoaded",
            PlotEvent::PointsCommitted { .. } => "PointsCommitted",
            PlotEvent::ViewportResized { .. } => "ViewportResized",
            PlotEvent::DragAborted { .. } => "DragAborted",
        }
    }
}

/// Synchronous in-memory dispatcher; handlers run in subscription order.
#[derive(Default)]
pub struct PlotEventDispatcher {
    handlers: Vec<Box<dyn Fn(&PlotEvent)>>,
}

impl PlotEventDispatcher {
    pub fn new() -> Self {
        Self { handlers: Vec::new() }
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&PlotEvent) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    pub fn publish(&self, event: PlotEvent) {
        for handler in &self.handlers {
            handler(&event);
        }
    }
}

impl Debug for PlotEventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlotEventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
