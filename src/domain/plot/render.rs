//! Backend-neutral drawing primitives for the bubble plot.
//!
//! Coordinates are local to the drawing rectangle; `RenderList::origin` is
//! the translation to apply on the canvas (the top-left margin).

use super::annotator::RangeAnnotation;
use super::config::PlotConfig;
use super::drag::DragController;
use super::scale::Scales;
use super::value_objects::{Color, PixelPoint, Point, PointId};
use serde::{Deserialize, Serialize};

const TICK_SIZE: f64 = 6.0;
const TICK_LABEL_GAP: f64 = 3.0;
const AXIS_FONT_SIZE: f64 = 10.0;
const AXIS_LABEL_FONT_SIZE: f64 = 14.0;
const RANGE_LABEL_FONT_SIZE: f64 = 12.0;
const X_LABEL_OFFSET: f64 = 40.0;
const Y_LABEL_OFFSET: f64 = 50.0;
const RANGE_LINE_WIDTH: f64 = 2.0;
const MARKER_STROKE_WIDTH: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderCommand {
    Marker {
        point_id: PointId,
        cx: f64,
        cy: f64,
        r: f64,
        fill: Color,
        fill_opacity: f64,
        stroke: Color,
        stroke_width: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Color,
        stroke_width: f64,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
        color: Color,
        anchor: TextAnchor,
        bold: bool,
        /// Rotation in degrees around the text origin.
        rotate: f64,
    },
    Tick {
        axis: Axis,
        position: f64,
        label: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderList {
    pub origin: PixelPoint,
    pub width: f64,
    pub height: f64,
    pub commands: Vec<RenderCommand>,
}

impl RenderList {
    pub fn empty(width: f64, height: f64) -> Self {
        Self { origin: PixelPoint::new(0.0, 0.0), width, height, commands: Vec::new() }
    }

    pub fn markers(&self) -> impl Iterator<Item = (&PointId, PixelPoint, f64)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            RenderCommand::Marker { point_id, cx, cy, r, .. } => {
                Some((point_id, PixelPoint::new(*cx, *cy), *r))
            }
            _ => None,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Everything `build_scene` needs from the plot aggregate
pub struct SceneInput<'a> {
    pub points: &'a [Point],
    pub scales: &'a Scales,
    pub annotation: Option<&'a RangeAnnotation>,
    pub drag: &'a DragController,
    pub config: &'a PlotConfig,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

pub fn build_scene(input: &SceneInput<'_>) -> RenderList {
    let margin = input.config.margin;
    let mut commands = Vec::new();
    push_axes(&mut commands, input.scales, input.config);
    if let Some(annotation) = input.annotation {
        push_range_lines(&mut commands, annotation);
    }
    push_markers(&mut commands, input);
    RenderList {
        origin: PixelPoint::new(margin.left, margin.top),
        width: input.canvas_width,
        height: input.canvas_height,
        commands,
    }
}

fn push_axes(commands: &mut Vec<RenderCommand>, scales: &Scales, config: &PlotConfig) {
    let count = config.scale.tick_count;
    let palette = &config.palette;
    let (width, height) = (scales.bounds.width, scales.bounds.height);

    // bottom axis
    commands.push(RenderCommand::Line {
        x1: 0.0,
        y1: height,
        x2: width,
        y2: height,
        stroke: palette.axis,
        stroke_width: MARKER_STROKE_WIDTH,
    });
    for value in scales.x.ticks(count) {
        let x = scales.x.apply(value);
        let label = scales.x.tick_format(count, value);
        commands.push(RenderCommand::Tick { axis: Axis::X, position: x, label: label.clone() });
        commands.push(RenderCommand::Line {
            x1: x,
            y1: height,
            x2: x,
            y2: height + TICK_SIZE,
            stroke: palette.axis,
            stroke_width: MARKER_STROKE_WIDTH,
        });
        commands.push(RenderCommand::Text {
            x,
            y: height + TICK_SIZE + TICK_LABEL_GAP + AXIS_FONT_SIZE,
            text: label,
            font_size: AXIS_FONT_SIZE,
            color: palette.axis,
            anchor: TextAnchor::Middle,
            bold: false,
            rotate: 0.0,
        });
    }

    // left axis
    commands.push(RenderCommand::Line {
        x1: 0.0,
        y1: 0.0,
        x2: 0.0,
        y2: height,
        stroke: palette.axis,
        stroke_width: MARKER_STROKE_WIDTH,
    });
    for value in scales.y.ticks(count) {
        let y = scales.y.apply(value);
        let label = scales.y.tick_format(count, value);
        commands.push(RenderCommand::Tick { axis: Axis::Y, position: y, label: label.clone() });
        commands.push(RenderCommand::Line {
            x1: -TICK_SIZE,
            y1: y,
            x2: 0.0,
            y2: y,
            stroke: palette.axis,
            stroke_width: MARKER_STROKE_WIDTH,
        });
        commands.push(RenderCommand::Text {
            x: -(TICK_SIZE + TICK_LABEL_GAP),
            y: y + AXIS_FONT_SIZE * 0.32,
            text: label,
            font_size: AXIS_FONT_SIZE,
            color: palette.axis,
            anchor: TextAnchor::End,
            bold: false,
            rotate: 0.0,
        });
    }

    commands.push(RenderCommand::Text {
        x: width / 2.0,
        y: height + X_LABEL_OFFSET,
        text: config.x_label.clone(),
        font_size: AXIS_LABEL_FONT_SIZE,
        color: palette.axis_label,
        anchor: TextAnchor::Middle,
        bold: true,
        rotate: 0.0,
    });
    commands.push(RenderCommand::Text {
        x: -height / 2.0,
        y: -Y_LABEL_OFFSET,
        text: config.y_label.clone(),
        font_size: AXIS_LABEL_FONT_SIZE,
        color: palette.axis_label,
        anchor: TextAnchor::Middle,
        bold: true,
        rotate: -90.0,
    });
}

fn push_range_lines(commands: &mut Vec<RenderCommand>, annotation: &RangeAnnotation) {
    for line in [&annotation.max_line, &annotation.min_line] {
        commands.push(RenderCommand::Line {
            x1: line.x1,
            y1: line.y,
            x2: line.x2,
            y2: line.y,
            stroke: line.color,
            stroke_width: RANGE_LINE_WIDTH,
        });
        commands.push(RenderCommand::Text {
            x: line.label_x,
            y: line.label_y,
            text: line.label.clone(),
            font_size: RANGE_LABEL_FONT_SIZE,
            color: line.color,
            anchor: TextAnchor::Start,
            bold: false,
            rotate: 0.0,
        });
    }
}

/// Largest markers first so small ones stay on top and clickable.
fn push_markers(commands: &mut Vec<RenderCommand>, input: &SceneInput<'_>) {
    let palette = &input.config.palette;
    let mut ordered: Vec<&Point> = input.points.iter().collect();
    ordered.sort_by(|a, b| b.size.total_cmp(&a.size));
    for point in ordered {
        let position = input.drag.preview(&point.id).unwrap_or_else(|| input.scales.project(point));
        commands.push(RenderCommand::Marker {
            point_id: point.id.clone(),
            cx: position.x,
            cy: position.y,
            r: input.scales.radius(point.size),
            fill: palette.marker_fill,
            fill_opacity: palette.marker_fill_opacity,
            stroke: palette.marker_stroke,
            stroke_width: MARKER_STROKE_WIDTH,
        });
    }
}

/// Top-most marker under `pointer` (bounds-local pixels).
pub fn hit_test(list: &RenderList, pointer: PixelPoint) -> Option<PointId> {
    let markers: Vec<_> = list.markers().collect();
    markers
        .into_iter()
        .rev()
        .find(|(_, center, r)| center.distance_to(pointer) <= *r)
        .map(|(id, _, _)| id.clone())
}
