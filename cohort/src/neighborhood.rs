use std::collections::{HashSet, VecDeque};
use std::iter::FusedIterator;

use anyhow::{Error, Result, bail};
use serde::{Deserialize, Serialize};

use crate::entities::{Assignment, AssignmentKey, Instance};

/// Number of composed pairwise swaps that separate an assignment from its neighbors.
/// Capped at two: every hop is already quadratic in the number of items.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum SwapDistance {
    Single,
    #[default]
    Double,
}

impl TryFrom<u8> for SwapDistance {
    type Error = Error;

    fn try_from(distance: u8) -> Result<Self> {
        match distance {
            1 => Ok(SwapDistance::Single),
            2 => Ok(SwapDistance::Double),
            d => bail!("unsupported swap distance: {d} (supported: 1, 2)"),
        }
    }
}

impl From<SwapDistance> for u8 {
    fn from(distance: SwapDistance) -> Self {
        match distance {
            SwapDistance::Single => 1,
            SwapDistance::Double => 2,
        }
    }
}

/// Exchanges the bins of items `i` and `j`.
/// Returns `None` if either item is not feasible for the other's bin, or if either item is unassigned.
/// Capacities are unaffected, since both bins keep the same occupancy.
pub fn try_swap(instance: &Instance, a: &Assignment, i: usize, j: usize) -> Option<Assignment> {
    swap_is_feasible(instance, a, i, j).then(|| a.with_swapped(instance, i, j))
}

fn swap_is_feasible(instance: &Instance, a: &Assignment, i: usize, j: usize) -> bool {
    match (a.placement_of(i), a.placement_of(j)) {
        (Some(bin_i), Some(bin_j)) => {
            instance.item(i).is_feasible(bin_j) && instance.item(j).is_feasible(bin_i)
        }
        _ => false,
    }
}

/// Lazily enumerates all distinct assignments reachable from an origin within a [`SwapDistance`].
///
/// First all single-swap neighbors of the origin are yielded, then (for [`SwapDistance::Double`])
/// the single-swap neighbors of each of those, in the order they were found.
/// Every yielded assignment is unique within one enumeration, and the origin itself is never yielded.
pub struct Neighborhood<'a> {
    instance: &'a Instance,
    distance: SwapDistance,
    seen: HashSet<AssignmentKey>,
    /// First hop neighbors which still have to be expanded
    frontier: VecDeque<Assignment>,
    /// Assignment whose swaps are currently being enumerated
    center: Assignment,
    expanding_first_hop: bool,
    pair: (usize, usize),
}

impl<'a> Neighborhood<'a> {
    /// # Panics
    /// If `origin` is not complete.
    pub fn new(instance: &'a Instance, origin: &Assignment, distance: SwapDistance) -> Self {
        assert!(
            origin.is_complete(),
            "neighborhood of an incomplete assignment ({} unassigned items)",
            origin.unassigned().len()
        );
        Self {
            instance,
            distance,
            seen: HashSet::from([origin.canonical_key()]),
            frontier: VecDeque::new(),
            center: origin.clone(),
            expanding_first_hop: true,
            pair: (0, 0),
        }
    }

    /// Advances to the next unordered pair (i < j) of items.
    fn next_pair(&mut self) -> Option<(usize, usize)> {
        let n = self.instance.n_items();
        loop {
            let (i, j) = &mut self.pair;
            if *i >= n {
                return None;
            }
            *j += 1;
            if *j < n {
                return Some((*i, *j));
            }
            *i += 1;
            *j = *i;
        }
    }

    /// Moves on to the next first hop neighbor to expand, if the distance allows it.
    fn advance_center(&mut self) -> bool {
        if self.distance != SwapDistance::Double {
            return false;
        }
        match self.frontier.pop_front() {
            Some(next) => {
                self.center = next;
                self.expanding_first_hop = false;
                self.pair = (0, 0);
                true
            }
            None => false,
        }
    }
}

impl Iterator for Neighborhood<'_> {
    type Item = Assignment;

    fn next(&mut self) -> Option<Assignment> {
        loop {
            let Some((i, j)) = self.next_pair() else {
                if self.advance_center() {
                    continue;
                }
                return None;
            };
            //swapping two items of the same bin leaves the placement unchanged
            if self.center.placement_of(i) == self.center.placement_of(j) {
                continue;
            }
            if !swap_is_feasible(self.instance, &self.center, i, j) {
                continue;
            }
            //only build the neighbor once its placement has not been seen before
            if !self.seen.insert(self.center.key_with_swapped(i, j)) {
                continue;
            }
            let neighbor = self.center.with_swapped(self.instance, i, j);
            debug_assert!(self.seen.contains(&neighbor.canonical_key()));

            if self.expanding_first_hop && self.distance == SwapDistance::Double {
                self.frontier.push_back(neighbor.clone());
            }
            return Some(neighbor);
        }
    }
}

impl FusedIterator for Neighborhood<'_> {}
