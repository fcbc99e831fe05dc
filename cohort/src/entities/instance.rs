use anyhow::{Result, bail};
use itertools::Itertools;

use crate::cost::CostModel;
use crate::entities::Item;

/// The static (unmodifiable) representation of a problem instance:
/// a roster of items to be placed into a set of capacity-bounded bins.
#[derive(Clone, Debug)]
pub struct Instance {
    /// Items to be placed, `items[i].id == i`
    pub items: Vec<Item>,
    /// Initial capacity of every bin
    pub capacities: Vec<usize>,
    pub cost_model: CostModel,
}

impl Instance {
    /// Creates a new instance after validating the items against the bins.
    pub fn new(items: Vec<Item>, capacities: Vec<usize>, cost_model: CostModel) -> Result<Self> {
        let n_bins = capacities.len();
        if n_bins >= u16::MAX as usize {
            bail!("{n_bins} bins exceed the supported maximum of {}", u16::MAX - 1);
        }
        for (i, item) in items.iter().enumerate() {
            if item.id != i {
                bail!("item at position {i} has id {}, expected {i}", item.id);
            }
            if item.feasible_bins.len() != n_bins {
                bail!(
                    "item {i} has a feasibility vector of length {}, expected {n_bins}",
                    item.feasible_bins.len()
                );
            }
            if let Some(bin) = item.preferences.iter().find(|&&b| b >= n_bins) {
                bail!("item {i} prefers bin {bin}, but there are only {n_bins} bins");
            }
            if !item.preferences.iter().all_unique() {
                bail!("item {i} has duplicate preferences: {:?}", item.preferences);
            }
        }
        Ok(Self {
            items,
            capacities,
            cost_model,
        })
    }

    /// Creates an instance in which every bin has the same capacity.
    pub fn with_uniform_capacity(
        items: Vec<Item>,
        n_bins: usize,
        capacity_per_bin: usize,
        cost_model: CostModel,
    ) -> Result<Self> {
        Self::new(items, vec![capacity_per_bin; n_bins], cost_model)
    }

    pub fn item(&self, id: usize) -> &Item {
        &self.items[id]
    }

    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    pub fn n_bins(&self) -> usize {
        self.capacities.len()
    }

    pub fn total_capacity(&self) -> usize {
        self.capacities.iter().sum()
    }

    pub fn cost(&self, item: &Item, bin: usize) -> u64 {
        self.cost_model.cost(item, bin)
    }

    /// Longest preference list among all items.
    pub fn max_preferences(&self) -> usize {
        self.items
            .iter()
            .map(|i| i.preferences.len())
            .max()
            .unwrap_or(0)
    }
}
