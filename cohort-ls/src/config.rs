use serde::{Deserialize, Serialize};

use cohort::cost::CostModel;
use cohort::neighborhood::SwapDistance;

use crate::generators::GeneratorConfig;

/// Configuration for the multi-restart local search optimizer
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct LSConfig {
    /// Seed for the PRNG. If undefined, the algorithm will run in non-deterministic mode using entropy
    pub prng_seed: Option<u64>,
    /// Number of independent {construct, improve} attempts
    pub n_attempts: usize,
    /// Number of randomized constructions per attempt, the cheapest complete one is improved
    pub n_cycles: usize,
    /// Number of composed swaps defining the neighborhood (1 or 2).
    /// A distance 2 neighborhood holds on the order of n⁴ assignments for n items:
    /// about 2M for the default 70 item instance, against about 2k at distance 1
    #[serde(default)]
    pub swap_distance: SwapDistance,
    /// Parameters of the cost of placing an item in a bin
    #[serde(default)]
    pub cost_model: CostModel,
    /// Expand the first hop neighbors on the rayon thread pool. Equally good neighbors may be chosen differently
    #[serde(default)]
    pub parallel_neighborhood: bool,
    /// Wall-clock limit in seconds, checked between attempts. If undefined, only the budgets apply
    #[serde(default)]
    pub time_limit_s: Option<f64>,
    /// Used when no instance file is provided
    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl Default for LSConfig {
    fn default() -> Self {
        Self {
            prng_seed: Some(0),
            n_attempts: 10,
            n_cycles: 1000,
            swap_distance: SwapDistance::Double,
            cost_model: CostModel::default(),
            parallel_neighborhood: false,
            time_limit_s: None,
            generator: GeneratorConfig::default(),
        }
    }
}
