//! Simulated Annealing (SA) for tours.
//!
//! Each iteration swaps two positions of the current route and accepts the
//! candidate if it is shorter, or if its cost stays under the Metropolis
//! threshold `c0 - T * ln(u)` with `u` uniform in (0, 1). Temperature cools
//! geometrically. The run stops on a goal cost, an iteration budget or the
//! temperature floor.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod report;
mod runner;

pub use config::{AnnealingParams, StopPolicy, MIN_TEMPERATURE};
pub use report::{LogReporter, Progress, ProgressReporter, SilentReporter};
pub use runner::{AnnealResult, AnnealRunner, StopReason};
