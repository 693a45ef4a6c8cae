//! Simulated-annealing solver for the Euclidean Traveling Salesman Problem.
//!
//! - [`instance`]: points, the Euclidean metric, and the problem-file reader.
//! - [`Route`]: a closed tour as a permutation of point indices.
//! - [`sa`]: the annealing engine, its parameters, stop policy and
//!   progress reporting hook.
//!
//! # Example
//!
//! ```
//! use tourist::instance::{Point, ProblemInstance};
//! use tourist::sa::{AnnealingParams, StopPolicy};
//!
//! let instance = ProblemInstance::new(4, vec![
//!     Point::new("1", 0.0, 0.0),
//!     Point::new("2", 1.0, 0.0),
//!     Point::new("3", 1.0, 1.0),
//!     Point::new("4", 0.0, 1.0),
//! ]).unwrap();
//! let params = AnnealingParams::new(10.0, 0.99).unwrap();
//! let stop = StopPolicy::new(4.0, 1000, 1000).unwrap();
//!
//! let result = tourist::solve(&instance, &params, &stop, Some(42)).unwrap();
//! assert_eq!(result.cost, 4.0);
//! ```

pub mod error;
pub mod instance;
pub mod route;
pub mod sa;

pub use error::{Result, TspError};
pub use route::Route;

use rand::rngs::StdRng;
use rand::SeedableRng;

use instance::ProblemInstance;
use sa::{AnnealResult, AnnealRunner, AnnealingParams, LogReporter, StopPolicy};

/// Anneals from a random initial route, reporting progress through `log`.
///
/// With `seed` set the run is reproducible; otherwise the generator is
/// seeded from OS entropy.
pub fn solve(
    instance: &ProblemInstance,
    params: &AnnealingParams,
    stop: &StopPolicy,
    seed: Option<u64>,
) -> Result<AnnealResult> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let initial = Route::random(instance.dimension(), &mut rng)?;
    AnnealRunner::run(instance, initial, params, stop, &mut LogReporter, &mut rng)
}
