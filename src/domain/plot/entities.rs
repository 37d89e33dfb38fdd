use super::annotator::{RangeAnnotation, RangeAnnotator};
use super::config::PlotConfig;
use super::drag::{DragController, DragOutcome};
use super::freezer::{DatasetId, DomainFreezer};
use super::render::{RenderList, SceneInput, build_scene, hit_test};
use super::scale::Scales;
use super::value_objects::{Bounds, Domain, PixelPoint, Point, PointId, Targets, Viewport};
use crate::domain::errors::ValidationError;
use crate::domain::events::{PlotEvent, PlotEventDispatcher};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_info};
use std::collections::HashSet;

/// Aggregate - the interactive bubble plot
///
/// Owns the point collection. Every change goes through [`BubblePlot::commit`],
/// which re-derives the size scale and range annotation before notifying
/// subscribers. x/y scales only change on dataset reset or resize.
#[derive(Debug)]
pub struct BubblePlot {
    config: PlotConfig,
    viewport: Viewport,
    bounds: Bounds,
    dataset: Option<DatasetId>,
    targets: Targets,
    points: Vec<Point>,
    freezer: DomainFreezer,
    scales: Option<Scales>,
    annotator: RangeAnnotator,
    drag: DragController,
    events: PlotEventDispatcher,
}

impl BubblePlot {
    pub fn new(viewport: Viewport, config: PlotConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        let bounds = Bounds::from_viewport(viewport, &config.margin)?;
        Ok(Self {
            freezer: DomainFreezer::new(config.target_padding),
            annotator: RangeAnnotator::new(config.palette.range_max, config.palette.range_min),
            drag: DragController::new(config.commit_policy),
            config,
            viewport,
            bounds,
            dataset: None,
            targets: Targets::none(),
            points: Vec::new(),
            scales: None,
            events: PlotEventDispatcher::new(),
        })
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&PlotEvent) + 'static,
    {
        self.events.subscribe(handler);
    }

    /// Replace everything with a new data set; the domain is refrozen
    /// when `dataset` differs from the current one.
    pub fn load_dataset(
        &mut self,
        dataset: DatasetId,
        points: Vec<Point>,
        targets: Targets,
    ) -> Result<(), ValidationError> {
        validate_points(&points)?;
        self.abort_drag();
        self.freezer.reset_on(&dataset, &points, &targets);
        log_info!(
            LogComponent::Domain("BubblePlot"),
            "loaded dataset {} with {} points",
            dataset,
            points.len()
        );
        self.dataset = Some(dataset.clone());
        self.targets = targets;
        self.points = points;
        self.rebuild_scales();
        self.events.publish(PlotEvent::DatasetLoaded {
            dataset,
            point_count: self.points.len(),
        });
        self.publish_commit();
        Ok(())
    }

    /// External replacement of the points of the current data set.
    /// The frozen domain is kept.
    pub fn replace_points(&mut self, points: Vec<Point>) -> Result<(), ValidationError> {
        validate_points(&points)?;
        self.abort_drag();
        self.commit(|_| points);
        Ok(())
    }

    pub fn resize(&mut self, viewport: Viewport) -> Result<(), ValidationError> {
        let bounds = Bounds::from_viewport(viewport, &self.config.margin)?;
        self.abort_drag();
        self.viewport = viewport;
        self.bounds = bounds;
        self.rebuild_scales();
        self.events.publish(PlotEvent::ViewportResized {
            width: viewport.width,
            height: viewport.height,
        });
        Ok(())
    }

    /// The single mutation channel for the point collection.
    pub fn commit<F>(&mut self, transform: F)
    where
        F: FnOnce(&[Point]) -> Vec<Point>,
    {
        self.points = transform(&self.points);
        self.recompute();
        self.publish_commit();
    }

    /// Pointer pressed at `pointer` (bounds-local); starts dragging the
    /// top-most marker underneath, if any.
    pub fn pointer_down(&mut self, pointer: PixelPoint) -> DragOutcome {
        match hit_test(&self.render(), pointer) {
            Some(point_id) => self.pointer_down_on(&point_id, pointer),
            None => DragOutcome::Ignored,
        }
    }

    /// Pointer pressed on the marker of `point_id`.
    pub fn pointer_down_on(&mut self, point_id: &PointId, pointer: PixelPoint) -> DragOutcome {
        let Some(scales) = self.scales else {
            return DragOutcome::Ignored;
        };
        self.drag.begin(point_id, pointer, &scales, &self.points)
    }

    pub fn pointer_move(&mut self, pointer: PixelPoint) -> DragOutcome {
        let outcome = self.drag.drag_to(pointer);
        self.apply_outcome(&outcome);
        outcome
    }

    pub fn pointer_up(&mut self, pointer: Option<PixelPoint>) -> DragOutcome {
        let outcome = self.drag.end(pointer);
        self.apply_outcome(&outcome);
        outcome
    }

    /// Explicit cancel (e.g. Escape). Moves already committed stay.
    pub fn cancel_drag(&mut self) -> DragOutcome {
        self.abort_drag()
    }

    pub fn render(&self) -> RenderList {
        let Some(scales) = self.scales.as_ref() else {
            return RenderList::empty(self.viewport.width, self.viewport.height);
        };
        build_scene(&SceneInput {
            points: &self.points,
            scales,
            annotation: self.annotator.current(),
            drag: &self.drag,
            config: &self.config,
            canvas_width: self.viewport.width,
            canvas_height: self.viewport.height,
        })
    }

    /// Convert canvas pixels into bounds-local pixels.
    pub fn to_local(&self, canvas_x: f64, canvas_y: f64) -> PixelPoint {
        PixelPoint::new(canvas_x - self.config.margin.left, canvas_y - self.config.margin.top)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn dataset(&self) -> Option<&DatasetId> {
        self.dataset.as_ref()
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    pub fn domain(&self) -> Option<&Domain> {
        self.freezer.domain()
    }

    pub fn scales(&self) -> Option<&Scales> {
        self.scales.as_ref()
    }

    pub fn annotation(&self) -> Option<&RangeAnnotation> {
        self.annotator.current()
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    fn apply_outcome(&mut self, outcome: &DragOutcome) {
        if let DragOutcome::Committed(mv) = outcome {
            self.commit(|points| mv.apply(points));
        }
    }

    fn abort_drag(&mut self) -> DragOutcome {
        let outcome = self.drag.abort();
        if let DragOutcome::Aborted { point_id } = &outcome {
            self.events.publish(PlotEvent::DragAborted { point_id: point_id.clone() });
        }
        outcome
    }

    fn rebuild_scales(&mut self) {
        self.scales = self
            .freezer
            .domain()
            .map(|domain| Scales::build(domain, self.bounds, &self.points, &self.config.scale));
        self.recompute();
    }

    fn recompute(&mut self) {
        match self.scales {
            Some(scales) => {
                let scales = scales.with_sizes(&self.points, &self.config.scale);
                self.scales = Some(scales);
                self.annotator.recompute(&self.points, &scales);
            }
            None => self.annotator.clear(),
        }
        log_debug!(
            LogComponent::Domain("BubblePlot"),
            "recomputed annotations for {} points",
            self.points.len()
        );
    }

    fn publish_commit(&self) {
        self.events.publish(PlotEvent::PointsCommitted {
            point_count: self.points.len(),
            range: self.annotator.current().map(|a| (a.summary.min, a.summary.max)),
        });
    }
}

fn validate_points(points: &[Point]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(points.len());
    for point in points {
        point.validate()?;
        if !seen.insert(&point.id) {
            return Err(ValidationError::DuplicatePointId(point.id.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::DomainEvent;
    use crate::domain::plot::drag::CommitPolicy;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn plot() -> BubblePlot {
        BubblePlot::new(Viewport { width: 600.0, height: 500.0 }, PlotConfig::default()).unwrap()
    }

    fn sample() -> Vec<Point> {
        vec![
            Point::new("a", 1.0, 20.0, 5.0),
            Point::new("b", 4.0, 60.0, 1.0),
            Point::new("c", 9.0, 45.0, 2.0),
        ]
    }

    #[test]
    fn nothing_is_drawn_before_a_dataset() {
        let plot = plot();
        assert!(plot.render().commands.is_empty());
        assert!(plot.domain().is_none());
    }

    #[test]
    fn drag_past_top_left_commits_domain_corner() {
        let mut plot = plot();
        plot.load_dataset(DatasetId::from("ex"), sample(), Targets::none()).unwrap();
        let scales = *plot.scales().unwrap();
        let id = PointId::from("b");

        plot.pointer_down_on(&id, scales.project(&plot.points()[1]));
        assert!(matches!(plot.pointer_move(PixelPoint::new(-50.0, -50.0)), DragOutcome::Moved { .. }));
        assert_eq!(plot.points()[1].y, 60.0);
        assert!(matches!(plot.pointer_up(None), DragOutcome::Committed(_)));

        let moved = &plot.points()[1];
        assert_eq!((moved.x, moved.y), (scales.x.domain().min, scales.y.domain().max));
        assert_eq!(moved.size, 1.0);
    }

    #[test]
    fn drag_past_bottom_right_hits_both_minimums() {
        let mut plot = plot();
        plot.load_dataset(DatasetId::from("ex"), sample(), Targets::none()).unwrap();
        let scales = *plot.scales().unwrap();
        let bounds = plot.bounds();

        plot.pointer_down_on(&PointId::from("a"), scales.project(&plot.points()[0]));
        plot.pointer_up(Some(PixelPoint::new(-50.0, bounds.height + 200.0)));

        let moved = &plot.points()[0];
        assert_eq!((moved.x, moved.y), (scales.x.domain().min, scales.y.domain().min));
    }

    #[test]
    fn domain_stays_frozen_while_points_move() {
        let mut plot = plot();
        plot.load_dataset(DatasetId::from("ex"), sample(), Targets::new(Some(30.0), Some(50.0)))
            .unwrap();
        let before = *plot.domain().unwrap();

        plot.commit(|points| points.iter().map(|p| p.moved_to(p.x * 100.0, -1000.0)).collect());

        assert_eq!(*plot.domain().unwrap(), before);
        assert_eq!(plot.annotation().unwrap().summary.max, -1000.0);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut plot = plot();
        let points = vec![Point::new("a", 0.0, 0.0, 1.0), Point::new("a", 1.0, 1.0, 1.0)];
        assert_eq!(
            plot.load_dataset(DatasetId::from("ex"), points, Targets::none()),
            Err(ValidationError::DuplicatePointId("a".to_string()))
        );
    }

    #[test]
    fn resize_aborts_gesture_without_committing() {
        let mut plot = plot();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        plot.subscribe(move |event| sink.borrow_mut().push(event.event_type()));
        plot.load_dataset(DatasetId::from("ex"), sample(), Targets::none()).unwrap();

        plot.pointer_down_on(&PointId::from("c"), PixelPoint::new(0.0, 0.0));
        plot.pointer_move(PixelPoint::new(10.0, 10.0));
        plot.resize(Viewport { width: 800.0, height: 600.0 }).unwrap();

        assert!(!plot.drag().is_dragging());
        assert_eq!(plot.points(), sample().as_slice());
        assert_eq!(plot.pointer_up(None), DragOutcome::Ignored);
        assert_eq!(
            *events.borrow(),
            vec!["DatasetLoaded", "PointsCommitted", "DragAborted", "ViewportResized"]
        );
    }

    #[test]
    fn pointer_down_hits_marker_under_cursor() {
        let mut plot = plot();
        plot.load_dataset(DatasetId::from("ex"), sample(), Targets::none()).unwrap();
        let at = plot.scales().unwrap().project(&plot.points()[2]);

        assert!(matches!(plot.pointer_down(at), DragOutcome::Started { point_id, .. } if point_id.as_str() == "c"));
        assert_eq!(plot.cancel_drag(), DragOutcome::Aborted { point_id: PointId::from("c") });
    }

    #[test]
    fn click_on_marker_leaves_points_untouched() {
        let mut plot = plot();
        let events = Rc::new(RefCell::new(Vec::new()));
        plot.load_dataset(DatasetId::from("ex"), sample(), Targets::none()).unwrap();
        let sink = Rc::clone(&events);
        plot.subscribe(move |event| sink.borrow_mut().push(event.event_type()));
        let centre = plot.scales().unwrap().project(&plot.points()[2]);
        let press = PixelPoint::new(centre.x + 3.0, centre.y - 2.0);

        assert!(matches!(plot.pointer_down(press), DragOutcome::Started { .. }));
        assert_eq!(plot.pointer_up(Some(press)), DragOutcome::Released { point_id: PointId::from("c") });

        assert_eq!(plot.points(), sample().as_slice());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn continuous_policy_commits_each_move() {
        let config = PlotConfig { commit_policy: CommitPolicy::Continuous, ..PlotConfig::default() };
        let mut plot = BubblePlot::new(Viewport { width: 600.0, height: 500.0 }, config).unwrap();
        plot.load_dataset(DatasetId::from("ex"), sample(), Targets::none()).unwrap();
        let scales = *plot.scales().unwrap();

        plot.pointer_down_on(&PointId::from("a"), scales.project(&plot.points()[0]));
        plot.pointer_move(PixelPoint::new(0.0, 0.0));

        assert_eq!(plot.points()[0].y, scales.y.domain().max);
        assert!(plot.drag().is_dragging());
    }

    #[test]
    fn render_is_idempotent() {
        let mut plot = plot();
        plot.load_dataset(DatasetId::from("ex"), sample(), Targets::none()).unwrap();
        assert_eq!(plot.render(), plot.render());
    }
}
