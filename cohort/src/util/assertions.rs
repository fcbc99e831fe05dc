use itertools::Itertools;
use log::error;

use crate::entities::{Assignment, Instance};

//Various checks to verify correctness of the state of the system
//Used in debug_assertion!() blocks

/// Occupancy of every bin matches the capacity it has consumed.
pub fn capacities_match_occupancy(instance: &Instance, a: &Assignment) -> bool {
    let counts = a.placed_items().map(|(_, bin)| bin).counts();
    (0..instance.n_bins()).all(|bin| {
        let used = instance.capacities[bin].checked_sub(a.remaining_capacity()[bin]);
        let occupancy = counts.get(&bin).copied().unwrap_or(0);
        if used != Some(occupancy) {
            error!(
                "bin {bin}: capacity {}, remaining {}, occupancy {occupancy}",
                instance.capacities[bin],
                a.remaining_capacity()[bin]
            );
            return false;
        }
        true
    })
}

/// Every placed item resides in a bin it is feasible for.
pub fn placements_feasible(instance: &Instance, a: &Assignment) -> bool {
    a.placed_items()
        .all(|(item_id, bin)| instance.item(item_id).is_feasible(bin))
}

/// The unassigned set is exactly the set of items without a bin.
pub fn unassigned_matches_placement(a: &Assignment) -> bool {
    let without_bin = a
        .placement()
        .iter()
        .positions(|bin| bin.is_none())
        .collect_vec();
    let unassigned = a.unassigned().iter().copied().sorted().collect_vec();
    without_bin == unassigned
}

/// The incrementally tracked cost equals a from-scratch recalculation.
pub fn cost_is_tracked(instance: &Instance, a: &Assignment) -> bool {
    let calculated = a.calculate_cost(instance);
    if calculated != a.total_cost() {
        error!(
            "tracked cost {} differs from calculated cost {calculated}",
            a.total_cost()
        );
        return false;
    }
    true
}

pub fn assignment_is_consistent(instance: &Instance, a: &Assignment) -> bool {
    capacities_match_occupancy(instance, a)
        && placements_feasible(instance, a)
        && unassigned_matches_placement(a)
        && cost_is_tracked(instance, a)
}
