use serde::Serialize;

use crate::entities::{Instance, Item};
use crate::util::assertions;

/// Mapping of every item to a bin (or to none), along with the remaining capacity of every bin
/// and the running total cost.
///
/// During construction it is mutated monotonically through [`Assignment::place`].
/// Once complete, it is treated as a value: neighbors are new [`Assignment`]s,
/// the original is never modified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Assignment {
    placement: Vec<Option<usize>>,
    remaining_capacity: Vec<usize>,
    unassigned: Vec<usize>,
    total_cost: u64,
}

/// Uniquely determined by the placement of all items, in item order.
/// Only meant for deduplication of neighbors.
///
/// Every item takes one byte when there are fewer than 255 bins, two bytes otherwise.
/// The largest code of the width marks an unassigned item.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssignmentKey(Box<[u8]>);

impl AssignmentKey {
    fn encode(placement: impl ExactSizeIterator<Item = Option<usize>>, n_bins: usize) -> Self {
        debug_assert!(n_bins < u16::MAX as usize);
        match n_bins < u8::MAX as usize {
            true => AssignmentKey(
                placement
                    .map(|bin| bin.map_or(u8::MAX, |b| b as u8))
                    .collect(),
            ),
            false => {
                let mut bytes = Vec::with_capacity(placement.len() * 2);
                for bin in placement {
                    let code = bin.map_or(u16::MAX, |b| b as u16);
                    bytes.extend_from_slice(&code.to_le_bytes());
                }
                AssignmentKey(bytes.into_boxed_slice())
            }
        }
    }
}

impl Assignment {
    /// Creates an empty assignment: all items unassigned, all bins at full capacity, zero cost.
    pub fn new(instance: &Instance) -> Self {
        Self {
            placement: vec![None; instance.n_items()],
            remaining_capacity: instance.capacities.clone(),
            unassigned: (0..instance.n_items()).collect(),
            total_cost: 0,
        }
    }

    /// Whether `item` is allowed in `bin` and `bin` still has room.
    pub fn can_place(&self, item: &Item, bin: usize) -> bool {
        item.is_feasible(bin) && self.remaining_capacity[bin] > 0
    }

    /// Places an unassigned item in `bin`.
    /// Does not check [`Assignment::can_place`], the caller is responsible for that.
    ///
    /// # Panics
    /// If there are no unassigned items left, if `item_id` is already placed, or if `bin` is full.
    pub fn place(&mut self, instance: &Instance, item_id: usize, bin: usize) {
        assert!(
            !self.unassigned.is_empty(),
            "no unassigned items left to place (item {item_id}, bin {bin})"
        );
        let pos = self
            .unassigned
            .iter()
            .position(|&i| i == item_id)
            .unwrap_or_else(|| panic!("item {item_id} is already placed in bin {:?}", self.placement[item_id]));

        assert!(
            self.remaining_capacity[bin] > 0,
            "bin {bin} has no remaining capacity for item {item_id}"
        );

        self.unassigned.swap_remove(pos);
        self.placement[item_id] = Some(bin);
        self.remaining_capacity[bin] -= 1;
        self.total_cost += instance.cost(instance.item(item_id), bin);

        debug_assert!(assertions::assignment_is_consistent(instance, self));
    }

    /// Sums the cost of all placed items from scratch.
    pub fn calculate_cost(&self, instance: &Instance) -> u64 {
        self.placed_items()
            .map(|(item_id, bin)| instance.cost(instance.item(item_id), bin))
            .sum()
    }

    /// Replaces the tracked total cost with a from-scratch recalculation.
    pub fn recompute_cost(&mut self, instance: &Instance) -> u64 {
        self.total_cost = self.calculate_cost(instance);
        self.total_cost
    }

    /// Returns a copy in which the bins of items `a` and `b` are exchanged.
    /// Occupancy of every bin is unchanged, so capacities are copied as-is.
    /// Only the costs of `a` and `b` change, the new total is derived from those two terms.
    pub(crate) fn with_swapped(&self, instance: &Instance, a: usize, b: usize) -> Self {
        let (bin_a, bin_b) = (self.placement[a], self.placement[b]);
        let mut placement = self.placement.clone();
        placement.swap(a, b);

        let item_cost = |item_id: usize, bin: Option<usize>| {
            bin.map_or(0, |bin| instance.cost(instance.item(item_id), bin))
        };
        let total_cost = self.total_cost - item_cost(a, bin_a) - item_cost(b, bin_b)
            + item_cost(a, bin_b)
            + item_cost(b, bin_a);

        let swapped = Self {
            placement,
            remaining_capacity: self.remaining_capacity.clone(),
            unassigned: self.unassigned.clone(),
            total_cost,
        };

        debug_assert!(swapped.total_cost == swapped.calculate_cost(instance));
        swapped
    }

    pub fn canonical_key(&self) -> AssignmentKey {
        AssignmentKey::encode(self.placement.iter().copied(), self.remaining_capacity.len())
    }

    /// Key of the assignment [`Assignment::with_swapped`] would produce, without building it.
    pub(crate) fn key_with_swapped(&self, a: usize, b: usize) -> AssignmentKey {
        let placement = (0..self.placement.len()).map(|i| match i {
            i if i == a => self.placement[b],
            i if i == b => self.placement[a],
            i => self.placement[i],
        });
        AssignmentKey::encode(placement, self.remaining_capacity.len())
    }

    pub fn placement_of(&self, item_id: usize) -> Option<usize> {
        self.placement[item_id]
    }

    pub fn placement(&self) -> &[Option<usize>] {
        &self.placement
    }

    /// All (item, bin) pairs of placed items.
    pub fn placed_items(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.placement
            .iter()
            .enumerate()
            .filter_map(|(item_id, bin)| bin.map(|b| (item_id, b)))
    }

    pub fn remaining_capacity(&self) -> &[usize] {
        &self.remaining_capacity
    }

    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    pub fn total_cost(&self) -> u64 {
        self.total_cost
    }

    /// All items are placed.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Number of items currently placed in `bin`.
    pub fn occupancy(&self, bin: usize) -> usize {
        self.placement.iter().filter(|&&b| b == Some(bin)).count()
    }
}
