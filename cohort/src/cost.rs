use serde::{Deserialize, Serialize};

use crate::entities::Item;

/// Cost of placing an item in a bin which matches its `r`-th preference: `r * RANK_WEIGHT`.
pub const RANK_WEIGHT: u64 = 10;

/// Cost of placing an item in a bin which is not among its preferences.
/// Independent of the length of the preference list.
pub const UNPREFERRED_PENALTY: u64 = 100;

/// Maps an (item, bin) pair to a non-negative cost. Lower is better.
/// The total cost of an assignment is the sum over all placed items, there are no cross-item terms.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CostModel {
    /// Cost per rank of a matched preference
    pub rank_weight: u64,
    /// Cost when the bin is not among the item's preferences
    pub unpreferred_penalty: u64,
}

impl CostModel {
    pub fn cost(&self, item: &Item, bin: usize) -> u64 {
        match item.preference_rank(bin) {
            Some(rank) => rank as u64 * self.rank_weight,
            None => self.unpreferred_penalty,
        }
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            rank_weight: RANK_WEIGHT,
            unpreferred_penalty: UNPREFERRED_PENALTY,
        }
    }
}
