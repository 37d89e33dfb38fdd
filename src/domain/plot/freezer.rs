use super::value_objects::{Domain, Extent, Point, Targets};
use crate::domain::logging::LogComponent;
use crate::log_debug;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Identity of a loaded data set (e.g. the exercise id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetId(String);

impl DatasetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DatasetId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Fallback extent for an axis without any finite value.
const EMPTY_AXIS: Extent = Extent { min: 0.0, max: 1.0 };

#[derive(Debug, Clone, PartialEq)]
struct FrozenDomain {
    dataset: DatasetId,
    domain: Domain,
}

/// Holds the data-space bounding box fixed for the lifetime of one data set.
///
/// Points move while the learner drags them; the axes must not. The domain is
/// therefore computed from the points as they were at load time and only
/// recomputed when [`DomainFreezer::reset_on`] sees a different data set id.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainFreezer {
    padding: f64,
    frozen: Option<FrozenDomain>,
}

impl DomainFreezer {
    pub fn new(padding: f64) -> Self {
        Self { padding, frozen: None }
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Extent of all point coordinates, with target thresholds pulled
    /// `padding` units inward and added to the y values.
    pub fn freeze(points: &[Point], targets: &Targets, padding: f64) -> Domain {
        let xs = points.iter().map(|p| p.x);
        let mut ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        if let Some(lower) = targets.lower_bound.filter(|v| v.is_finite()) {
            ys.push(lower + padding);
        }
        if let Some(upper) = targets.upper_bound.filter(|v| v.is_finite()) {
            ys.push(upper - padding);
        }
        Domain {
            x: Extent::from_values(xs).unwrap_or(EMPTY_AXIS),
            y: Extent::from_values(ys).unwrap_or(EMPTY_AXIS),
        }
    }

    /// Freeze for `dataset` unless it is already the frozen one.
    /// Returns `true` when the domain was (re)computed.
    pub fn reset_on(&mut self, dataset: &DatasetId, points: &[Point], targets: &Targets) -> bool {
        if self.frozen.as_ref().is_some_and(|f| &f.dataset == dataset) {
            return false;
        }
        let domain = Self::freeze(points, targets, self.padding);
        log_debug!(
            LogComponent::Domain("DomainFreezer"),
            "froze {} -> x [{}, {}] y [{}, {}]",
            dataset,
            domain.x.min,
            domain.x.max,
            domain.y.min,
            domain.y.max
        );
        self.frozen = Some(FrozenDomain { dataset: dataset.clone(), domain });
        true
    }

    pub fn domain(&self) -> Option<&Domain> {
        self.frozen.as_ref().map(|f| &f.domain)
    }

    pub fn dataset(&self) -> Option<&DatasetId> {
        self.frozen.as_ref().map(|f| &f.dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_are_padded_inward() {
        let points = vec![Point::new("a", 0.0, 300.0, 1.0), Point::new("b", 5.0, 400.0, 1.0)];
        let domain =
            DomainFreezer::freeze(&points, &Targets::new(Some(200.0), Some(500.0)), 10.0);
        assert_eq!(domain.y, Extent { min: 210.0, max: 490.0 });
        assert_eq!(domain.x, Extent { min: 0.0, max: 5.0 });
    }

    #[test]
    fn reset_on_same_dataset_keeps_domain() {
        let mut freezer = DomainFreezer::new(10.0);
        let id = DatasetId::from("ex-1");
        let points = vec![Point::new("a", 0.0, 0.0, 1.0), Point::new("b", 10.0, 10.0, 1.0)];
        assert!(freezer.reset_on(&id, &points, &Targets::none()));

        let dragged = vec![points[0].moved_to(-500.0, 900.0), points[1].clone()];
        assert!(!freezer.reset_on(&id, &dragged, &Targets::none()));
        assert_eq!(freezer.domain().unwrap().x, Extent { min: 0.0, max: 10.0 });

        assert!(freezer.reset_on(&DatasetId::from("ex-2"), &dragged, &Targets::none()));
        assert_eq!(freezer.domain().unwrap().x, Extent { min: -500.0, max: 10.0 });
    }

    #[test]
    fn empty_points_fall_back_to_unit_axes() {
        let domain = DomainFreezer::freeze(&[], &Targets::new(Some(100.0), None), 10.0);
        assert_eq!(domain.x, EMPTY_AXIS);
        assert_eq!(domain.y, Extent { min: 110.0, max: 110.0 });
    }
}
