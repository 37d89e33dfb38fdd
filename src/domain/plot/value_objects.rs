use crate::domain::errors::ValidationError;
use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};

/// Value Object - stable identity of a point within a data set
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deref, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(String);

impl PointId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PointId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A weighted, movable data point. Only `x` and `y` change after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl Point {
    pub fn new(id: impl Into<PointId>, x: f64, y: f64, size: f64) -> Self {
        Self { id: id.into(), x, y, size }
    }

    /// Same identity and size, new position.
    pub fn moved_to(&self, x: f64, y: f64) -> Self {
        Self { id: self.id.clone(), x, y, size: self.size }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate { id: self.id.to_string() });
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ValidationError::InvalidPointSize {
                id: self.id.to_string(),
                size: self.size,
            });
        }
        Ok(())
    }
}

/// Closed numeric interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    /// Swaps the bounds when given in reverse order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b { Self { min: a, max: b } } else { Self { min: b, max: a } }
    }

    /// Extent of the finite values, `None` if there are none.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<Extent>, v| match acc {
                None => Some(Extent { min: v, max: v }),
                Some(e) => Some(Extent { min: e.min.min(v), max: e.max.max(v) }),
            })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.span() > 0.0)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Widen around the midpoint so the span is at least `min_span`.
    pub fn with_min_span(&self, min_span: f64) -> Self {
        if self.span() >= min_span {
            return *self;
        }
        let center = self.midpoint();
        let half = min_span * 0.5;
        Self { min: center - half, max: center + half }
    }
}

/// Data-space bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub x: Extent,
    pub y: Extent,
}

impl Domain {
    pub fn new(x: Extent, y: Extent) -> Self {
        Self { x, y }
    }
}

/// Pixel margins around the drawing rectangle (axes and labels live here)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self { top: 30.0, right: 75.0, bottom: 80.0, left: 100.0 }
    }
}

/// Caller-supplied canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Result<Self, ValidationError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(ValidationError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }
}

/// Pixel position local to the drawing rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: PixelPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Usable drawing rectangle after margin reduction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn from_viewport(viewport: Viewport, margin: &Margin) -> Result<Self, ValidationError> {
        let width = viewport.width - margin.left - margin.right;
        let height = viewport.height - margin.top - margin.bottom;
        if !(width > 0.0 && height > 0.0) {
            return Err(ValidationError::ViewportTooSmall {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(Self { width, height })
    }

    /// Pin each axis independently to `[0, limit]`. NaN pins to 0.
    pub fn clamp(&self, point: PixelPoint) -> PixelPoint {
        PixelPoint {
            x: clamp_axis(point.x, self.width),
            y: clamp_axis(point.y, self.height),
        }
    }
}

fn clamp_axis(value: f64, limit: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(limit)
}

/// Externally supplied thresholds that must stay visible
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
}

impl Targets {
    pub fn new(lower_bound: Option<f64>, upper_bound: Option<f64>) -> Self {
        Self { lower_bound, upper_bound }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

/// Value Object - Color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb(((hex >> 16) & 0xFF) as u8, ((hex >> 8) & 0xFF) as u8, (hex & 0xFF) as u8)
    }

    pub fn to_hex(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self { a: alpha, ..*self }
    }

    /// `#rrggbb` when opaque, `rgba(..)` otherwise.
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:06x}", self.to_hex())
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }

    pub const MARKER_FILL: Color = Color::from_hex(0x69b3a2);
    pub const MARKER_STROKE: Color = Color::from_hex(0x333333);
    pub const RANGE_MAX: Color = Color::from_hex(0x3da1e3);
    pub const RANGE_MIN: Color = Color::from_hex(0xe3743d);
    pub const AXIS_LABEL: Color = Color::from_hex(0x374151);
    pub const AXIS: Color = Color::from_hex(0x000000);
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}
