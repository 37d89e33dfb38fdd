use super::value_objects::{ConstraintType, RangeConstraint};
use crate::domain::plot::{DatasetId, Point};
use serde::{Deserialize, Serialize};

/// Exercise record as served by the exercises API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    #[serde(default)]
    pub order: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub constraint_type: ConstraintType,
    #[serde(default)]
    pub lower_bound: Option<f64>,
    #[serde(default)]
    pub upper_bound: Option<f64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub data_points: Vec<Point>,
}

fn default_active() -> bool {
    true
}

impl Exercise {
    /// Plot identity; the domain stays frozen for as long as this id is shown.
    pub fn dataset_id(&self) -> DatasetId {
        DatasetId::new(self.id.clone())
    }

    pub fn points(&self) -> Vec<Point> {
        self.data_points.clone()
    }

    pub fn constraint(&self) -> RangeConstraint {
        RangeConstraint::new(self.constraint_type, self.lower_bound, self.upper_bound)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Response of `GET /exercises/{id}/next/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextExercise {
    pub id: Option<String>,
}

/// Body of `POST /exercises/{id}/evaluate/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub solution: Vec<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationVerdict {
    pub is_correct: bool,
}
