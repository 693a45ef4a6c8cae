//! The immutable problem instance and its tour-length evaluator.

use super::point::{distance, Point};
use crate::error::{Result, TspError};
use crate::route::Route;

/// A set of points to visit, plus the descriptive header of its file.
///
/// The position of a point in [`points`](Self::points) is its internal id;
/// [`Route`]s are permutations of those positions. The instance is never
/// mutated once built, so it can be shared between independent searches.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawProblemInstance")
)]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProblemInstance {
    name: String,
    comments: Vec<String>,
    problem_type: String,
    edge_weight_type: String,
    dimension: usize,
    points: Vec<Point>,
}

/// Unchecked wire form; deserialization goes through [`ProblemInstance::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawProblemInstance {
    #[serde(default)]
    name: String,
    #[serde(default)]
    comments: Vec<String>,
    #[serde(default)]
    problem_type: String,
    #[serde(default)]
    edge_weight_type: String,
    dimension: usize,
    points: Vec<Point>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawProblemInstance> for ProblemInstance {
    type Error = TspError;

    fn try_from(raw: RawProblemInstance) -> Result<Self> {
        let mut instance = ProblemInstance::new(raw.dimension, raw.points)?
            .with_name(raw.name)
            .with_problem_type(raw.problem_type)
            .with_edge_weight_type(raw.edge_weight_type);
        instance.comments = raw.comments;
        Ok(instance)
    }
}

impl ProblemInstance {
    /// Builds an instance, checking that `points.len() == dimension`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tourist::instance::{Point, ProblemInstance};
    ///
    /// let instance = ProblemInstance::new(2, vec![
    ///     Point::new("1", 0.0, 0.0),
    ///     Point::new("2", 0.0, 1.0),
    /// ]).unwrap();
    /// assert_eq!(instance.dimension(), 2);
    /// assert!(ProblemInstance::new(3, vec![]).is_err());
    /// ```
    pub fn new(dimension: usize, points: Vec<Point>) -> Result<Self> {
        if points.len() != dimension {
            return Err(TspError::validation(format!(
                "declared dimension {dimension} but {} points were given",
                points.len()
            )));
        }
        Ok(Self {
            dimension,
            points,
            ..Self::default()
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }

    pub fn with_problem_type(mut self, problem_type: impl Into<String>) -> Self {
        self.problem_type = problem_type.into();
        self
    }

    pub fn with_edge_weight_type(mut self, edge_weight_type: impl Into<String>) -> Self {
        self.edge_weight_type = edge_weight_type.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text comments in file order.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn problem_type(&self) -> &str {
        &self.problem_type
    }

    /// Declared metric. Informational only; distances are always Euclidean.
    pub fn edge_weight_type(&self) -> &str {
        &self.edge_weight_type
    }

    /// Number of points a route over this instance must visit.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Total length of the closed tour described by `route`.
    ///
    /// Sums the distance between consecutive points in route order plus
    /// the closing edge from the last point back to the first.
    ///
    /// # Errors
    ///
    /// [`TspError::Validation`] if `route` is not a permutation of
    /// `0..dimension` (wrong length, out-of-range or repeated index).
    pub fn route_cost(&self, route: &Route) -> Result<f64> {
        route.validate(self.dimension)?;
        Ok(self.tour_length(route.order()))
    }

    /// Tour length without validation. `order` must index into `points`.
    pub(crate) fn tour_length(&self, order: &[usize]) -> f64 {
        let (first, last) = match (order.first(), order.last()) {
            (Some(&f), Some(&l)) => (f, l),
            _ => return 0.0,
        };

        let open: f64 = order
            .windows(2)
            .map(|w| distance(&self.points[w[0]], &self.points[w[1]]))
            .sum();

        open + distance(&self.points[last], &self.points[first])
    }
}
