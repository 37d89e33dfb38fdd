pub mod annotator;
pub mod config;
pub mod drag;
pub mod entities;
pub mod freezer;
pub mod render;
pub mod scale;
pub mod value_objects;

pub use annotator::{RangeAnnotation, RangeAnnotator, RangeEdge, RangeSummary, ReferenceLine};
pub use config::{Palette, PlotConfig, ScaleConfig};
pub use drag::{CommitPolicy, DragController, DragOutcome, DragState, PointMove};
pub use entities::BubblePlot;
pub use freezer::{DatasetId, DomainFreezer};
pub use render::{RenderCommand, RenderList, build_scene, hit_test};
pub use scale::{LinearScale, Scales, SqrtScale};
pub use value_objects::*;
