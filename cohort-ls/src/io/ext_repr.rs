use anyhow::{Result, bail};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use cohort::cost::CostModel;
use cohort::entities::{Instance, Item};

/// External (serializable) representation of an [`Instance`]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtInstance {
    #[serde(default)]
    pub name: String,
    /// Capacity of every bin, the number of bins is the length of this vector
    pub capacities: Vec<usize>,
    pub items: Vec<ExtItem>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtItem {
    pub id: usize,
    /// Ids of the bins the item may be placed in
    pub feasible_bins: Vec<usize>,
    /// Bin ids, most preferred first
    #[serde(default)]
    pub preferences: Vec<usize>,
}

/// Converts an [`ExtInstance`] into an [`Instance`]. Items may be listed in any order.
pub fn import(ext_instance: &ExtInstance, cost_model: CostModel) -> Result<Instance> {
    let n_bins = ext_instance.capacities.len();
    let items = ext_instance
        .items
        .iter()
        .sorted_by_key(|ext_item| ext_item.id)
        .map(|ext_item| {
            if let Some(bin) = ext_item.feasible_bins.iter().find(|&&b| b >= n_bins) {
                bail!(
                    "item {} is feasible for bin {bin}, but there are only {n_bins} bins",
                    ext_item.id
                );
            }
            Ok(Item::from_feasible_ids(
                ext_item.id,
                n_bins,
                &ext_item.feasible_bins,
                ext_item.preferences.clone(),
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    Instance::new(items, ext_instance.capacities.clone(), cost_model)
}

/// Converts an [`Instance`] into its external representation.
pub fn export(instance: &Instance, name: &str) -> ExtInstance {
    ExtInstance {
        name: name.to_string(),
        capacities: instance.capacities.clone(),
        items: instance
            .items
            .iter()
            .map(|item| ExtItem {
                id: item.id,
                feasible_bins: item.feasible_bin_ids().collect(),
                preferences: item.preferences.clone(),
            })
            .collect(),
    }
}
