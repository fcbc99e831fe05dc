use itertools::Itertools;
use log::{debug, trace};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use cohort::entities::{Assignment, Instance};
use cohort::neighborhood::{Neighborhood, SwapDistance};

/// Steepest descent over the swap neighborhood: strict improvements only.
///
/// Among equally good improving neighbors the first one in enumeration order is chosen.
/// In parallel mode the cost of the chosen neighbor is the same, but a tie may be broken differently.
#[derive(Debug, Clone, Copy)]
pub struct SteepestDescent {
    pub distance: SwapDistance,
    pub parallel: bool,
}

/// Result of a [`SteepestDescent::descend`] run
#[derive(Debug, Clone)]
pub struct Descent {
    /// Local optimum under the configured neighborhood
    pub assignment: Assignment,
    /// Number of improving moves applied
    pub n_steps: usize,
}

impl SteepestDescent {
    pub fn new(distance: SwapDistance, parallel: bool) -> Self {
        Self { distance, parallel }
    }

    /// The cheapest neighbor, if it is strictly cheaper than `assignment`.
    /// `None` means `assignment` is a local optimum.
    pub fn best_neighbor(&self, instance: &Instance, assignment: &Assignment) -> Option<Assignment> {
        match self.parallel {
            true => self.best_neighbor_par(instance, assignment),
            false => {
                Neighborhood::new(instance, assignment, self.distance)
                    .filter(|n| n.total_cost() < assignment.total_cost())
                    .min_by_key(|n| n.total_cost())
            }
        }
    }

    /// Collects the first hop, then expands every first hop neighbor on the rayon thread pool.
    /// Second hop neighbors are not deduplicated across first hop neighbors,
    /// which does not affect the minimum cost.
    fn best_neighbor_par(&self, instance: &Instance, assignment: &Assignment) -> Option<Assignment> {
        let current_cost = assignment.total_cost();
        let first_hop = Neighborhood::new(instance, assignment, SwapDistance::Single).collect_vec();

        let best_first_hop = first_hop
            .par_iter()
            .filter(|n| n.total_cost() < current_cost)
            .min_by_key(|n| n.total_cost())
            .cloned();

        let best_second_hop = match self.distance {
            SwapDistance::Single => None,
            SwapDistance::Double => first_hop
                .par_iter()
                .filter_map(|center| {
                    Neighborhood::new(instance, center, SwapDistance::Single)
                        .filter(|n| n.total_cost() < current_cost)
                        .min_by_key(|n| n.total_cost())
                })
                .min_by_key(|n| n.total_cost()),
        };

        best_first_hop
            .into_iter()
            .chain(best_second_hop)
            .min_by_key(|n| n.total_cost())
    }

    /// Keeps moving to the best neighbor until none improves.
    pub fn descend(&self, instance: &Instance, start: Assignment) -> Descent {
        let start_cost = start.total_cost();
        let mut current = start;
        let mut n_steps = 0;

        while let Some(next) = self.best_neighbor(instance, &current) {
            trace!(
                "[LS] step {}: {} -> {}",
                n_steps + 1,
                current.total_cost(),
                next.total_cost()
            );
            current = next;
            n_steps += 1;
        }

        debug!(
            "[LS] local optimum after {n_steps} steps: {start_cost} -> {}",
            current.total_cost()
        );
        Descent {
            assignment: current,
            n_steps,
        }
    }
}
