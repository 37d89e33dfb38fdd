use crate::domain::errors::ValidationError;
use crate::domain::plot::{Point, RangeSummary, Targets};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// How the achieved y-range is judged against the bounds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, IntoStaticStr, Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConstraintType {
    /// Every y below `upper_bound`.
    Lt,
    /// Every y above `lower_bound`.
    Gt,
    /// Every y within `[lower_bound, upper_bound]`.
    Between,
}

/// Value Object - the numeric goal of a range exercise
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeConstraint {
    pub constraint_type: ConstraintType,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
}

impl RangeConstraint {
    pub fn new(constraint_type: ConstraintType, lower_bound: Option<f64>, upper_bound: Option<f64>) -> Self {
        Self { constraint_type, lower_bound, upper_bound }
    }

    pub fn less_than(upper: f64) -> Self {
        Self::new(ConstraintType::Lt, None, Some(upper))
    }

    pub fn greater_than(lower: f64) -> Self {
        Self::new(ConstraintType::Gt, Some(lower), None)
    }

    pub fn between(lower: f64, upper: f64) -> Self {
        Self::new(ConstraintType::Between, Some(lower), Some(upper))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.checked_bounds().map(|_| ())
    }

    /// Bounds that must stay visible on the plot.
    pub fn targets(&self) -> Targets {
        Targets::new(self.lower_bound, self.upper_bound)
    }

    /// Human-readable goal, e.g. "between 200 and 500".
    pub fn prompt(&self) -> String {
        let fmt = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string());
        match self.constraint_type {
            ConstraintType::Lt => format!("less than {}", fmt(self.upper_bound)),
            ConstraintType::Gt => format!("greater than {}", fmt(self.lower_bound)),
            ConstraintType::Between => {
                format!("between {} and {}", fmt(self.lower_bound), fmt(self.upper_bound))
            }
        }
    }

    /// Strict comparisons for `lt`/`gt`, inclusive for `between`.
    pub fn is_satisfied(&self, solution: &[Point]) -> Result<bool, ValidationError> {
        if solution.is_empty() {
            return Err(ValidationError::EmptySolution);
        }
        let (lower, upper) = self.checked_bounds()?;
        let Some(range) = RangeSummary::from_points(solution) else {
            return Err(ValidationError::EmptySolution);
        };
        Ok(match self.constraint_type {
            ConstraintType::Lt => upper.is_some_and(|u| range.max < u),
            ConstraintType::Gt => lower.is_some_and(|l| range.min > l),
            ConstraintType::Between => match (lower, upper) {
                (Some(l), Some(u)) => range.min >= l && range.max <= u,
                _ => false,
            },
        })
    }

    fn checked_bounds(&self) -> Result<(Option<f64>, Option<f64>), ValidationError> {
        let missing = |bound| ValidationError::MissingBound { constraint: self.constraint_type.into(), bound };
        match self.constraint_type {
            ConstraintType::Lt if self.upper_bound.is_none() => Err(missing("upper_bound")),
            ConstraintType::Gt if self.lower_bound.is_none() => Err(missing("lower_bound")),
            ConstraintType::Between => match (self.lower_bound, self.upper_bound) {
                (None, _) => Err(missing("lower_bound")),
                (_, None) => Err(missing("upper_bound")),
                (Some(lower), Some(upper)) if lower > upper => {
                    Err(ValidationError::InvertedBounds { lower, upper })
                }
                bounds => Ok(bounds),
            },
            _ => Ok((self.lower_bound, self.upper_bound)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ys(values: &[f64]) -> Vec<Point> {
        values
            .iter()
            .enumerate()
            .map(|(i, y)| Point::new(format!("p{}", i).as_str(), i as f64, *y, 1.0))
            .collect()
    }

    #[test]
    fn lt_and_gt_are_strict() {
        assert!(!RangeConstraint::less_than(10.0).is_satisfied(&ys(&[1.0, 10.0])).unwrap());
        assert!(RangeConstraint::less_than(10.0).is_satisfied(&ys(&[1.0, 9.9])).unwrap());
        assert!(!RangeConstraint::greater_than(1.0).is_satisfied(&ys(&[1.0, 5.0])).unwrap());
        assert!(RangeConstraint::greater_than(1.0).is_satisfied(&ys(&[1.1, 5.0])).unwrap());
    }

    #[test]
    fn between_is_inclusive() {
        let c = RangeConstraint::between(200.0, 500.0);
        assert!(c.is_satisfied(&ys(&[200.0, 500.0])).unwrap());
        assert!(!c.is_satisfied(&ys(&[199.0, 300.0])).unwrap());
    }

    #[test]
    fn empty_solution_is_rejected() {
        assert_eq!(
            RangeConstraint::between(0.0, 1.0).is_satisfied(&[]),
            Err(ValidationError::EmptySolution)
        );
    }

    #[test]
    fn required_bounds_are_checked() {
        let lt = RangeConstraint::new(ConstraintType::Lt, Some(1.0), None);
        assert_eq!(
            lt.validate(),
            Err(ValidationError::MissingBound { constraint: "lt", bound: "upper_bound" })
        );
        assert_eq!(
            RangeConstraint::between(5.0, 1.0).validate(),
            Err(ValidationError::InvertedBounds { lower: 5.0, upper: 1.0 })
        );
        assert!(RangeConstraint::greater_than(3.0).validate().is_ok());
    }

    #[test]
    fn prompt_and_wire_names() {
        assert_eq!(RangeConstraint::between(200.0, 500.0).prompt(), "between 200 and 500");
        assert_eq!(RangeConstraint::less_than(2.5).prompt(), "less than 2.5");
        assert_eq!("between".parse::<ConstraintType>().unwrap(), ConstraintType::Between);
        assert_eq!(serde_json::to_string(&ConstraintType::Gt).unwrap(), "\"gt\"");
    }
}
