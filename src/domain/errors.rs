use std::fmt::{Display, Formatter, Result as FmtResult};

/// Root error type for the entire application
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    Validation(ValidationError),
    Infrastructure(InfrastructureError),
}

/// Rejected input from the data supplier or the embedding page.
///
/// Degenerate geometry (empty sets, zero-variance axes, pointers outside the
/// plot) is never reported here; it degrades to a renderable state instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    DuplicatePointId(String),
    InvalidPointSize { id: String, size: f64 },
    NonFiniteCoordinate { id: String },
    InvalidViewport { width: f64, height: f64 },
    ViewportTooSmall { width: f64, height: f64 },
    MissingBound { constraint: &'static str, bound: &'static str },
    InvertedBounds { lower: f64, upper: f64 },
    EmptySolution,
    UnknownExercise(String),
    InvalidConfig(String),
}

/// Failures of the browser / network collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum InfrastructureError {
    HttpRequestFailed(String),
    HttpStatus { status: u16, message: String },
    Serialization(String),
    Deserialization(String),
    CanvasAccessFailed(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AppError::Validation(e) => write!(f, "Validation Error: {}", e),
            AppError::Infrastructure(e) => write!(f, "Infrastructure Error: {}", e),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ValidationError::DuplicatePointId(id) => write!(f, "duplicate point id '{}'", id),
            ValidationError::InvalidPointSize { id, size } => {
                write!(f, "point '{}' has invalid size {} (must be > 0)", id, size)
            }
            ValidationError::NonFiniteCoordinate { id } => {
                write!(f, "point '{}' has a non-finite coordinate", id)
            }
            ValidationError::InvalidViewport { width, height } => {
                write!(f, "viewport {}x{} must have positive finite dimensions", width, height)
            }
            ValidationError::ViewportTooSmall { width, height } => {
                write!(f, "viewport {}x{} leaves no drawable area inside the margins", width, height)
            }
            ValidationError::MissingBound { constraint, bound } => {
                write!(f, "when constraint type is {}, {} should be set", constraint, bound)
            }
            ValidationError::InvertedBounds { lower, upper } => {
                write!(f, "lower bound {} can't be greater than upper bound {}", lower, upper)
            }
            ValidationError::EmptySolution => {
                write!(f, "solution must contain at least one data point")
            }
            ValidationError::UnknownExercise(id) => write!(f, "exercise '{}' not found", id),
            ValidationError::InvalidConfig(msg) => write!(f, "invalid plot config: {}", msg),
        }
    }
}

impl Display for InfrastructureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            InfrastructureError::HttpRequestFailed(msg) => write!(f, "HTTP request failed: {}", msg),
            InfrastructureError::HttpStatus { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            InfrastructureError::Serialization(msg) => write!(f, "serialization failed: {}", msg),
            InfrastructureError::Deserialization(msg) => {
                write!(f, "deserialization failed: {}", msg)
            }
            InfrastructureError::CanvasAccessFailed(msg) => write!(f, "canvas unavailable: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for ValidationError {}
impl std::error::Error for InfrastructureError {}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        AppError::Validation(error)
    }
}

impl From<InfrastructureError> for AppError {
    fn from(error: InfrastructureError) -> Self {
        AppError::Infrastructure(error)
    }
}

impl From<serde_json::Error> for InfrastructureError {
    fn from(error: serde_json::Error) -> Self {
        InfrastructureError::Deserialization(error.to_string())
    }
}

impl From<AppError> for wasm_bindgen::JsValue {
    fn from(error: AppError) -> Self {
        wasm_bindgen::JsValue::from_str(&error.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
