//! Tour representation and the two route generators the annealer needs.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, TspError};

/// A closed tour: an ordering of point indices where the last index
/// connects back to the first.
///
/// A well-formed route over an instance of dimension `n` is a permutation
/// of `0..n`. Use [`Route::from_order`] to build one from caller data and
/// [`Route::validate`] to re-check it against a dimension.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    order: Vec<usize>,
}

impl Route {
    /// Wraps `order`, rejecting anything that is not a permutation of `0..dimension`.
    pub fn from_order(order: Vec<usize>, dimension: usize) -> Result<Self> {
        let route = Self { order };
        route.validate(dimension)?;
        Ok(route)
    }

    /// A uniformly random permutation of `0..n`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use tourist::Route;
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let route = Route::random(5, &mut rng).unwrap();
    /// assert!(route.validate(5).is_ok());
    /// ```
    ///
    /// # Errors
    ///
    /// [`TspError::Validation`] if the generated order is not a permutation
    /// of `0..n`, which would indicate a bug in the generator.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Self> {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        Self::from_order(order, n)
    }

    /// Returns a copy of this route with two distinct positions swapped.
    ///
    /// Both positions are drawn uniformly; the second is redrawn until it
    /// differs from the first. `self` is left untouched.
    ///
    /// # Errors
    ///
    /// [`TspError::Validation`] if the route has fewer than two positions.
    pub fn neighbor<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Route> {
        let n = self.order.len();
        if n < 2 {
            return Err(TspError::validation(format!(
                "a swap move needs at least 2 positions, route has {n}"
            )));
        }

        let i = rng.random_range(0..n);
        let mut j = rng.random_range(0..n);
        while j == i {
            j = rng.random_range(0..n);
        }

        let mut order = self.order.clone();
        order.swap(i, j);
        Ok(Route { order })
    }

    /// Checks that this route is a permutation of `0..dimension`.
    pub fn validate(&self, dimension: usize) -> Result<()> {
        if self.order.len() != dimension {
            return Err(TspError::validation(format!(
                "route has {} positions but the instance has dimension {dimension}",
                self.order.len()
            )));
        }

        let mut seen = vec![false; dimension];
        for (position, &index) in self.order.iter().enumerate() {
            match seen.get_mut(index) {
                None => {
                    return Err(TspError::validation(format!(
                        "route position {position} holds index {index}, outside 0..{dimension}"
                    )));
                }
                Some(true) => {
                    return Err(TspError::validation(format!(
                        "route visits index {index} more than once"
                    )));
                }
                Some(slot) => *slot = true,
            }
        }
        Ok(())
    }

    /// Point indices in visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_order(self) -> Vec<usize> {
        self.order
    }
}
