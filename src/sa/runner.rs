//! Annealing loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::distr::Open01;
use rand::Rng;

use super::config::{AnnealingParams, StopPolicy, MIN_TEMPERATURE};
use super::report::{Progress, ProgressReporter};
use crate::error::{Result, TspError};
use crate::instance::ProblemInstance;
use crate::route::Route;

/// Why the loop stopped.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The current route cost reached the goal.
    GoalReached,
    /// `max_iterations` iterations were executed.
    IterationLimit,
    /// Temperature fell below [`MIN_TEMPERATURE`].
    TemperatureFloor,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult {
    /// The route that was current when the loop stopped.
    pub route: Route,

    /// Cost of `route`.
    pub cost: f64,

    /// Lowest-cost route seen during the run.
    pub best: Route,

    /// Cost of `best`.
    pub best_cost: f64,

    /// Number of iterations executed.
    pub iterations: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Number of tour-length evaluations performed, including the one
    /// that fills `cost` when the loop never ran.
    pub evaluations: usize,

    pub stop_reason: StopReason,
}

impl AnnealResult {
    /// Whether cancelled externally.
    pub fn cancelled(&self) -> bool {
        self.stop_reason == StopReason::Cancelled
    }
}

/// Executes simulated annealing over a [`ProblemInstance`].
pub struct AnnealRunner;

impl AnnealRunner {
    /// Runs the search from `initial` until a stop condition holds.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use tourist::instance::{Point, ProblemInstance};
    /// use tourist::sa::{AnnealRunner, AnnealingParams, SilentReporter, StopPolicy};
    /// use tourist::Route;
    ///
    /// let instance = ProblemInstance::new(3, vec![
    ///     Point::new("a", 0.0, 0.0),
    ///     Point::new("b", 3.0, 0.0),
    ///     Point::new("c", 3.0, 4.0),
    /// ]).unwrap();
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let initial = Route::random(3, &mut rng).unwrap();
    /// let result = AnnealRunner::run(
    ///     &instance,
    ///     initial,
    ///     &AnnealingParams::default(),
    ///     &StopPolicy::new(12.0, 100, 10).unwrap(),
    ///     &mut SilentReporter,
    ///     &mut rng,
    /// ).unwrap();
    /// assert!((result.cost - 12.0).abs() < 1e-9);
    /// ```
    pub fn run<R, H>(
        instance: &ProblemInstance,
        initial: Route,
        params: &AnnealingParams,
        stop: &StopPolicy,
        reporter: &mut H,
        rng: &mut R,
    ) -> Result<AnnealResult>
    where
        R: Rng + ?Sized,
        H: ProgressReporter + ?Sized,
    {
        Self::run_with_cancel(instance, initial, params, stop, reporter, rng, None)
    }

    /// Runs the search with an optional cancellation flag, checked before
    /// every iteration.
    pub fn run_with_cancel<R, H>(
        instance: &ProblemInstance,
        initial: Route,
        params: &AnnealingParams,
        stop: &StopPolicy,
        reporter: &mut H,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AnnealResult>
    where
        R: Rng + ?Sized,
        H: ProgressReporter + ?Sized,
    {
        params.validate()?;
        stop.validate()?;
        initial.validate(instance.dimension())?;
        if stop.max_iterations > 0 && instance.dimension() < 2 {
            return Err(TspError::validation(format!(
                "annealing needs at least 2 points, instance has {}",
                instance.dimension()
            )));
        }

        log::debug!(
            "annealing {} points: T0={} beta={} goal={} max_iterations={}",
            instance.dimension(),
            params.initial_temperature,
            params.beta,
            stop.goal_cost,
            stop.max_iterations
        );

        let mut temperature = params.initial_temperature;
        let mut iteration = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut evaluations = 0usize;

        // Cost used by the goal guard. Infinity until the first move is evaluated.
        let mut last_cost = f64::INFINITY;

        let mut current = initial;
        // Evaluated on the first iteration; a run that never iterates evaluates it once at exit.
        let mut current_cost: Option<f64> = None;
        let mut best: Option<(Route, f64)> = None;

        let stop_reason = loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    break StopReason::Cancelled;
                }
            }
            if iteration >= stop.max_iterations {
                break StopReason::IterationLimit;
            }
            if last_cost <= stop.goal_cost {
                break StopReason::GoalReached;
            }
            if temperature < MIN_TEMPERATURE {
                break StopReason::TemperatureFloor;
            }

            let c0 = *current_cost.get_or_insert_with(|| {
                evaluations += 1;
                instance.tour_length(current.order())
            });
            if best.is_none() {
                best = Some((current.clone(), c0));
            }

            let candidate = current.neighbor(rng)?;
            let c1 = instance.tour_length(candidate.order());
            evaluations += 1;
            let delta = c1 - c0;

            let u01: f64 = rng.sample(Open01);
            let threshold = c0 - temperature * u01.ln();

            let accepted = delta < 0.0 || c1 <= threshold;
            if accepted {
                if delta < 0.0 {
                    improving_moves += 1;
                }
                accepted_moves += 1;
                current = candidate;
                current_cost = Some(c1);

                if let Some((best_route, best_cost)) = best.as_mut() {
                    if c1 < *best_cost {
                        *best_route = current.clone();
                        *best_cost = c1;
                    }
                }
            }

            temperature *= params.beta;

            if iteration % stop.report_every == 0 {
                reporter.report(&Progress {
                    iteration,
                    current_cost: c0,
                    candidate_cost: c1,
                    delta,
                    temperature,
                    threshold,
                    accepted,
                });
            }

            last_cost = if accepted { c1 } else { c0 };
            iteration += 1;
        };

        let cost = current_cost.unwrap_or_else(|| {
            evaluations += 1;
            instance.tour_length(current.order())
        });
        let (best, best_cost) = best.unwrap_or_else(|| (current.clone(), cost));

        log::debug!(
            "annealing stopped after {iteration} iterations ({stop_reason:?}): cost={cost} best={best_cost}"
        );

        Ok(AnnealResult {
            route: current,
            cost,
            best,
            best_cost,
            iterations: iteration,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            evaluations,
            stop_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Point;
    use crate::sa::{LogReporter, SilentReporter};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit_square() -> ProblemInstance {
        ProblemInstance::new(
            4,
            vec![
                Point::new("1", 0.0, 0.0),
                Point::new("2", 1.0, 0.0),
                Point::new("3", 1.0, 1.0),
                Point::new("4", 0.0, 1.0),
            ],
        )
        .unwrap()
    }

    /// Points on a circle; the optimal tour follows the circle.
    fn circle(n: usize) -> ProblemInstance {
        let points = (0..n)
            .map(|i| {
                let angle = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
                Point::new(i.to_string(), 100.0 * angle.cos(), 100.0 * angle.sin())
            })
            .collect();
        ProblemInstance::new(n, points).unwrap()
    }

    #[test]
    fn test_square_converges_to_perimeter() {
        let instance = unit_square();
        let mut rng = StdRng::seed_from_u64(42);
        let initial = Route::random(4, &mut rng).unwrap();
        let params = AnnealingParams::new(10.0, 0.99).unwrap();
        let stop = StopPolicy::new(4.0, 1000, 100).unwrap();

        let result =
            AnnealRunner::run(&instance, initial, &params, &stop, &mut SilentReporter, &mut rng)
                .unwrap();

        assert_eq!(result.cost, 4.0);
        assert_eq!(instance.route_cost(&result.route).unwrap(), 4.0);
        assert_eq!(result.stop_reason, StopReason::GoalReached);
        assert!(result.iterations < 1000);
    }

    #[test]
    fn test_zero_iterations_returns_initial() {
        let instance = unit_square();
        let initial = Route::from_order(vec![0, 2, 1, 3], 4).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let stop = StopPolicy::new(0.0, 0, 1).unwrap();
        let mut reports = 0;

        let result = AnnealRunner::run(
            &instance,
            initial.clone(),
            &AnnealingParams::default(),
            &stop,
            &mut |_: &Progress| reports += 1,
            &mut rng,
        )
        .unwrap();

        assert_eq!(result.route, initial);
        assert!((result.cost - (2.0 + 2.0 * 2f64.sqrt())).abs() < 1e-12);
        assert_eq!(result.evaluations, 1);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.accepted_moves, 0);
        assert_eq!(result.stop_reason, StopReason::IterationLimit);
        assert_eq!(reports, 0);
    }

    #[test]
    fn test_temperature_floor_stops_loop() {
        let instance = circle(20);
        let mut rng = StdRng::seed_from_u64(5);
        let initial = Route::random(20, &mut rng).unwrap();
        // 1e-3 * 1e-60^k drops below 1e-200 after 4 iterations.
        let params = AnnealingParams::new(1e-3, 1e-60).unwrap();
        let stop = StopPolicy::new(f64::NEG_INFINITY, 1_000_000, 1).unwrap();

        let result =
            AnnealRunner::run(&instance, initial, &params, &stop, &mut SilentReporter, &mut rng)
                .unwrap();

        assert_eq!(result.stop_reason, StopReason::TemperatureFloor);
        assert_eq!(result.iterations, 4);
        assert!(result.final_temperature < MIN_TEMPERATURE);
    }

    #[test]
    fn test_iteration_limit() {
        let instance = circle(30);
        let mut rng = StdRng::seed_from_u64(9);
        let initial = Route::random(30, &mut rng).unwrap();
        let stop = StopPolicy::new(0.0, 250, 1000).unwrap();

        let result = AnnealRunner::run(
            &instance,
            initial,
            &AnnealingParams::default(),
            &stop,
            &mut SilentReporter,
            &mut rng,
        )
        .unwrap();

        assert_eq!(result.iterations, 250);
        // One evaluation of the initial route, then one per candidate.
        assert_eq!(result.evaluations, 251);
        assert_eq!(result.stop_reason, StopReason::IterationLimit);
        assert!(result.route.validate(30).is_ok());
    }

    #[test]
    fn test_report_cadence() {
        let instance = circle(10);
        let mut rng = StdRng::seed_from_u64(3);
        let initial = Route::random(10, &mut rng).unwrap();
        let stop = StopPolicy::new(f64::NEG_INFINITY, 100, 25).unwrap();
        let mut seen = Vec::new();

        AnnealRunner::run(
            &instance,
            initial,
            &AnnealingParams::default(),
            &stop,
            &mut |p: &Progress| seen.push(*p),
            &mut rng,
        )
        .unwrap();

        let iterations: Vec<usize> = seen.iter().map(|p| p.iteration).collect();
        assert_eq!(iterations, vec![0, 25, 50, 75]);
        for p in &seen {
            assert!((p.delta - (p.candidate_cost - p.current_cost)).abs() < 1e-9);
            assert!(p.threshold >= p.current_cost);
        }
    }

    #[test]
    fn test_deterministic_with_seed() {
        let instance = circle(25);
        let params = AnnealingParams::new(50.0, 0.999).unwrap();
        let stop = StopPolicy::new(0.0, 5000, 5000).unwrap();

        let run = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            let initial = Route::random(25, &mut rng).unwrap();
            AnnealRunner::run(&instance, initial, &params, &stop, &mut SilentReporter, &mut rng)
                .unwrap()
        };

        let a = run(11);
        let b = run(11);
        assert_eq!(a.route, b.route);
        assert_eq!(a.cost, b.cost);
        assert_eq!(a.accepted_moves, b.accepted_moves);
    }

    #[test]
    fn test_best_never_worse_than_final() {
        let instance = circle(40);
        let mut rng = StdRng::seed_from_u64(17);
        let initial = Route::random(40, &mut rng).unwrap();
        let initial_cost = instance.route_cost(&initial).unwrap();
        let params = AnnealingParams::new(100.0, 0.999).unwrap();
        let stop = StopPolicy::new(0.0, 20_000, 1000).unwrap();

        let result =
            AnnealRunner::run(&instance, initial, &params, &stop, &mut LogReporter, &mut rng)
                .unwrap();

        assert!(result.best_cost <= result.cost + 1e-9);
        assert!(result.best_cost <= initial_cost + 1e-9);
        assert!((instance.route_cost(&result.best).unwrap() - result.best_cost).abs() < 1e-9);
        assert!((instance.route_cost(&result.route).unwrap() - result.cost).abs() < 1e-9);
        assert!(result.improving_moves > 0);
        assert!(result.accepted_moves >= result.improving_moves);
    }

    #[test]
    fn test_improves_circle_tour() {
        let n = 30;
        let instance = circle(n);
        let mut rng = StdRng::seed_from_u64(2024);
        let initial = Route::random(n, &mut rng).unwrap();
        let initial_cost = instance.route_cost(&initial).unwrap();
        let params = AnnealingParams::new(50.0, 0.9995).unwrap();
        let stop = StopPolicy::new(0.0, 50_000, 50_000).unwrap();

        let result =
            AnnealRunner::run(&instance, initial, &params, &stop, &mut SilentReporter, &mut rng)
                .unwrap();

        assert!(
            result.best_cost < initial_cost,
            "expected improvement over {initial_cost}, got {}",
            result.best_cost
        );
    }

    #[test]
    fn test_rejects_mismatched_route() {
        let instance = unit_square();
        let route = Route::from_order(vec![0, 1, 2], 3).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let result = AnnealRunner::run(
            &instance,
            route,
            &AnnealingParams::default(),
            &StopPolicy::default(),
            &mut SilentReporter,
            &mut rng,
        );
        assert!(matches!(result, Err(TspError::Validation(_))));
    }

    #[test]
    fn test_rejects_zero_cadence() {
        let instance = unit_square();
        let mut rng = StdRng::seed_from_u64(1);
        let initial = Route::random(4, &mut rng).unwrap();
        let stop = StopPolicy::default().with_report_every(0);
        let result = AnnealRunner::run(
            &instance,
            initial,
            &AnnealingParams::default(),
            &stop,
            &mut SilentReporter,
            &mut rng,
        );
        assert!(matches!(result, Err(TspError::Validation(_))));
    }

    #[test]
    fn test_rejects_single_point_search() {
        let instance = ProblemInstance::new(1, vec![Point::new("a", 0.0, 0.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let initial = Route::random(1, &mut rng).unwrap();
        let result = AnnealRunner::run(
            &instance,
            initial,
            &AnnealingParams::default(),
            &StopPolicy::default(),
            &mut SilentReporter,
            &mut rng,
        );
        assert!(matches!(result, Err(TspError::Validation(_))));
    }

    #[test]
    fn test_cancellation() {
        let instance = circle(10);
        let mut rng = StdRng::seed_from_u64(1);
        let initial = Route::random(10, &mut rng).unwrap();

        // Raised before the run so the outcome does not depend on timing.
        let cancel = Arc::new(AtomicBool::new(true));

        let result = AnnealRunner::run_with_cancel(
            &instance,
            initial,
            &AnnealingParams::default(),
            &StopPolicy::default(),
            &mut SilentReporter,
            &mut rng,
            Some(cancel),
        )
        .unwrap();

        assert!(result.cancelled());
        assert_eq!(result.iterations, 0);
    }
}
