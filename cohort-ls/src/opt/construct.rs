use itertools::Itertools;
use log::trace;
use rand::Rng;
use rand::seq::IndexedRandom;

use cohort::entities::{Assignment, Instance};

/// Outcome of a single randomized construction.
#[derive(Debug, Clone)]
pub enum Construction {
    /// All items were placed
    Complete(Assignment),
    /// An unassigned item had no feasible bin with remaining capacity
    Stuck { item_id: usize, n_placed: usize },
    /// The partial cost reached the cost bound before all items were placed
    Abandoned { cost: u64, n_placed: usize },
}

/// Builds an assignment by repeatedly placing a random unassigned item in a random bin that accepts it.
///
/// Construction is abandoned as soon as the partial cost reaches `cost_bound`:
/// it can no longer improve on the assignment the bound was taken from.
pub fn construct(instance: &Instance, cost_bound: Option<u64>, rng: &mut impl Rng) -> Construction {
    let mut assignment = Assignment::new(instance);

    while let Some(&item_id) = assignment.unassigned().choose(rng) {
        if cost_bound.is_some_and(|bound| assignment.total_cost() >= bound) {
            return Construction::Abandoned {
                cost: assignment.total_cost(),
                n_placed: placed_count(&assignment),
            };
        }

        let item = instance.item(item_id);
        let open_bins = (0..instance.n_bins())
            .filter(|&bin| assignment.can_place(item, bin))
            .collect_vec();

        match open_bins.choose(rng) {
            Some(&bin) => assignment.place(instance, item_id, bin),
            None => {
                trace!("[CONSTR] item {item_id} has no open feasible bin");
                return Construction::Stuck {
                    item_id,
                    n_placed: placed_count(&assignment),
                };
            }
        }
    }

    Construction::Complete(assignment)
}

fn placed_count(assignment: &Assignment) -> usize {
    assignment.placement().len() - assignment.unassigned().len()
}
