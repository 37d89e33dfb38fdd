use super::scale::{Scales, js_round};
use super::value_objects::{Color, Point};
use serde::{Deserialize, Serialize};

/// Offset of a reference line label from the right edge of the plot.
const LABEL_OFFSET_X: f64 = 10.0;
/// Vertical nudge so the label baseline sits on the line.
const LABEL_OFFSET_Y: f64 = 4.0;

/// Current min/max of the y-values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeSummary {
    pub min: f64,
    pub max: f64,
}

impl RangeSummary {
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let mut ys = points.iter().map(|p| p.y).filter(|y| y.is_finite());
        let first = ys.next()?;
        let (min, max) = ys.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
        Some(Self { min, max })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeEdge {
    Max,
    Min,
}

/// Horizontal line across the plot at one edge of the y-range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub edge: RangeEdge,
    pub value: f64,
    pub y: f64,
    pub x1: f64,
    pub x2: f64,
    pub label: String,
    pub label_x: f64,
    pub label_y: f64,
    pub color: Color,
}

impl ReferenceLine {
    fn new(edge: RangeEdge, value: f64, scales: &Scales, color: Color) -> Self {
        let y = scales.y.apply(value);
        let width = scales.bounds.width;
        let prefix = match edge {
            RangeEdge::Max => "MAX",
            RangeEdge::Min => "MIN",
        };
        Self {
            edge,
            value,
            y,
            x1: 0.0,
            x2: width,
            label: format!("{} ({})", prefix, js_round(value)),
            label_x: width + LABEL_OFFSET_X,
            label_y: y + LABEL_OFFSET_Y,
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeAnnotation {
    pub summary: RangeSummary,
    pub max_line: ReferenceLine,
    pub min_line: ReferenceLine,
}

/// Re-derives the y-range lines after every change to the point collection.
/// It only visualizes; judging the range is the evaluator's job.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeAnnotator {
    max_color: Color,
    min_color: Color,
    current: Option<RangeAnnotation>,
}

impl Default for RangeAnnotator {
    fn default() -> Self {
        Self::new(Color::RANGE_MAX, Color::RANGE_MIN)
    }
}

impl RangeAnnotator {
    pub fn new(max_color: Color, min_color: Color) -> Self {
        Self { max_color, min_color, current: None }
    }

    pub fn recompute(&mut self, points: &[Point], scales: &Scales) -> Option<&RangeAnnotation> {
        self.current = RangeSummary::from_points(points).map(|summary| RangeAnnotation {
            summary,
            max_line: ReferenceLine::new(RangeEdge::Max, summary.max, scales, self.max_color),
            min_line: ReferenceLine::new(RangeEdge::Min, summary.min, scales, self.min_color),
        });
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&RangeAnnotation> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
