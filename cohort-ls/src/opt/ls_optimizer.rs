use std::time::Instant;

use anyhow::Result;
use log::{debug, info, warn};
use rand::prelude::SmallRng;
use serde::{Deserialize, Serialize};
use thousands::Separable;

use cohort::cost::CostModel;
use cohort::entities::{Assignment, Instance, Item};
use cohort::neighborhood::SwapDistance;

use crate::config::LSConfig;
use crate::opt::construct::{Construction, construct};
use crate::opt::local_search::SteepestDescent;

/// Counters collected over a run of the [`LSOptimizer`]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub n_attempts: usize,
    pub n_constructions: usize,
    pub n_complete: usize,
    pub n_stuck: usize,
    pub n_abandoned: usize,
    /// Improving moves applied by the local search, summed over all attempts
    pub n_descent_steps: usize,
}

/// Multi-restart optimizer: every attempt keeps the cheapest of a number of randomized constructions,
/// improves it to a local optimum and competes with the best assignment of all previous attempts.
pub struct LSOptimizer {
    pub instance: Instance,
    pub config: LSConfig,
    /// SmallRng is a fast, non-cryptographic PRNG <https://rust-random.github.io/book/guide-rngs.html>
    pub rng: SmallRng,
    pub stats: SearchStats,
}

impl LSOptimizer {
    pub fn new(instance: Instance, config: LSConfig, rng: SmallRng) -> Self {
        Self {
            instance,
            config,
            rng,
            stats: SearchStats::default(),
        }
    }

    /// Returns the cheapest complete assignment found, or `None` if no construction was ever completed.
    pub fn solve(&mut self) -> Option<Assignment> {
        let start = Instant::now();
        let descent = SteepestDescent::new(
            self.config.swap_distance,
            self.config.parallel_neighborhood,
        );

        let mut best: Option<Assignment> = None;
        let mut last_improvement = start;

        for attempt in 0..self.config.n_attempts {
            if let Some(limit) = self.config.time_limit_s {
                if start.elapsed().as_secs_f64() >= limit {
                    warn!("[DRIVER] time limit of {limit}s reached after {attempt} attempts");
                    break;
                }
            }
            self.stats.n_attempts += 1;

            let global_bound = best.as_ref().map(|b| b.total_cost());
            let Some(initial) = self.best_construction(global_bound) else {
                debug!("[DRIVER] attempt {attempt}: no complete construction");
                continue;
            };

            let local_opt = descent.descend(&self.instance, initial);
            self.stats.n_descent_steps += local_opt.n_steps;
            let cost = local_opt.assignment.total_cost();

            let improved = global_bound.is_none_or(|best_cost| cost < best_cost);
            if improved {
                let now = Instant::now();
                match global_bound {
                    Some(prev_cost) => info!(
                        "[DRIVER] attempt {attempt}: new best {cost} (-{}, {:.1}/s)",
                        prev_cost - cost,
                        (prev_cost - cost) as f64 / now.duration_since(last_improvement).as_secs_f64()
                    ),
                    None => info!("[DRIVER] attempt {attempt}: first complete assignment, cost {cost}"),
                }
                last_improvement = now;
                best = Some(local_opt.assignment);
            }
        }

        let elapsed = start.elapsed().as_secs_f64();
        info!(
            "[DRIVER] finished {} attempts ({} constructions) in {:.3}s, {:.3}ms per attempt",
            self.stats.n_attempts.separate_with_commas(),
            self.stats.n_constructions.separate_with_commas(),
            elapsed,
            elapsed * 1000.0 / self.stats.n_attempts.max(1) as f64
        );
        info!(
            "[DRIVER] constructions: {} complete, {} stuck, {} abandoned",
            self.stats.n_complete.separate_with_commas(),
            self.stats.n_stuck.separate_with_commas(),
            self.stats.n_abandoned.separate_with_commas()
        );
        match &best {
            Some(b) => info!("[DRIVER] best assignment has cost {}", b.total_cost()),
            None => warn!("[DRIVER] no complete assignment found"),
        }
        best
    }

    /// Runs the configured number of constructions, returning the cheapest complete one.
    fn best_construction(&mut self, global_bound: Option<u64>) -> Option<Assignment> {
        let mut best: Option<Assignment> = None;

        for _ in 0..self.config.n_cycles {
            let local_bound = best.as_ref().map(|b| b.total_cost());
            let bound = match (local_bound, global_bound) {
                (Some(l), Some(g)) => Some(l.min(g)),
                (l, g) => l.or(g),
            };

            self.stats.n_constructions += 1;
            match construct(&self.instance, bound, &mut self.rng) {
                Construction::Complete(a) => {
                    self.stats.n_complete += 1;
                    if local_bound.is_none_or(|l| a.total_cost() < l) {
                        best = Some(a);
                    }
                }
                Construction::Stuck { .. } => self.stats.n_stuck += 1,
                Construction::Abandoned { .. } => self.stats.n_abandoned += 1,
            }
        }
        best
    }
}

/// Runs the multi-restart search on a roster of items and bins of equal capacity.
/// The number of bins is taken from the length of the items' feasibility vectors.
pub fn run(
    n_attempts: usize,
    n_cycles: usize,
    capacity_per_bin: usize,
    items: Vec<Item>,
    rng: SmallRng,
) -> Result<Option<Assignment>> {
    let n_bins = items.first().map_or(0, |item| item.feasible_bins.len());
    let instance =
        Instance::with_uniform_capacity(items, n_bins, capacity_per_bin, CostModel::default())?;
    let config = LSConfig {
        n_attempts,
        n_cycles,
        swap_distance: SwapDistance::Double,
        ..LSConfig::default()
    };
    Ok(LSOptimizer::new(instance, config, rng).solve())
}
