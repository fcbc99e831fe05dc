use anyhow::{Result, bail};
use itertools::Itertools;
use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use cohort::cost::CostModel;
use cohort::entities::{Instance, Item};

use crate::generators::centered::CenteredSampler;
use crate::generators::uniform_range::sample_uniform;

pub mod centered;
pub mod uniform_range;

/// How the preferences of generated items are distributed over the bins
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(tag = "type")]
pub enum PreferenceStrategy {
    /// Every bin is equally likely to be preferred
    UniformRange,
    /// Bins near the middle of the range are preferred more often
    Centered { std_dev: f64 },
}

/// A [`PreferenceStrategy`], ready to generate preferences for instances with a specific number of bins
#[derive(Debug, Clone)]
pub enum PreferenceGenerator {
    UniformRange,
    Centered(CenteredSampler),
}

impl PreferenceGenerator {
    pub fn new(strategy: PreferenceStrategy, n_bins: usize) -> Result<Self> {
        match strategy {
            PreferenceStrategy::UniformRange => Ok(PreferenceGenerator::UniformRange),
            PreferenceStrategy::Centered { std_dev } => Ok(PreferenceGenerator::Centered(
                CenteredSampler::new(n_bins, std_dev)?,
            )),
        }
    }

    /// Generates up to `count` distinct bins out of `candidates` for an item, most preferred first.
    pub fn generate(
        &self,
        item_id: usize,
        count: usize,
        candidates: &[usize],
        rng: &mut impl Rng,
    ) -> Vec<usize> {
        let preferences = match self {
            PreferenceGenerator::UniformRange => sample_uniform(candidates, count, rng),
            PreferenceGenerator::Centered(sampler) => sampler.sample(candidates, count, rng),
        };
        trace!("[GEN] item {item_id} prefers {preferences:?}");
        preferences
    }
}

/// Configuration for generating a synthetic instance
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    pub n_items: usize,
    pub n_bins: usize,
    pub capacity_per_bin: usize,
    /// Probability for every (item, bin) pair to be feasible
    pub feasibility_prob: f64,
    /// Number of preferences per item, fewer if the item is feasible for fewer bins
    pub n_preferences: usize,
    pub strategy: PreferenceStrategy,
    /// Only draw preferences among the bins an item is feasible for
    pub preferences_feasible_only: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            n_items: 70,
            n_bins: 7,
            capacity_per_bin: 10,
            feasibility_prob: 0.99,
            n_preferences: 3,
            strategy: PreferenceStrategy::UniformRange,
            preferences_feasible_only: true,
        }
    }
}

/// Generates a random instance according to the [`GeneratorConfig`].
pub fn generate_instance(
    config: &GeneratorConfig,
    cost_model: CostModel,
    rng: &mut impl Rng,
) -> Result<Instance> {
    if !(0.0..=1.0).contains(&config.feasibility_prob) {
        bail!(
            "feasibility probability must lie in [0, 1], got {}",
            config.feasibility_prob
        );
    }
    let generator = PreferenceGenerator::new(config.strategy, config.n_bins)?;
    let all_bins = (0..config.n_bins).collect_vec();

    let items = (0..config.n_items)
        .map(|id| {
            let feasible_bins = (0..config.n_bins)
                .map(|_| rng.random_bool(config.feasibility_prob))
                .collect_vec();
            let candidates = match config.preferences_feasible_only {
                true => (0..config.n_bins).filter(|&b| feasible_bins[b]).collect_vec(),
                false => all_bins.clone(),
            };
            let preferences = generator.generate(id, config.n_preferences, &candidates, rng);
            Item::new(id, feasible_bins, preferences)
        })
        .collect_vec();

    let instance =
        Instance::with_uniform_capacity(items, config.n_bins, config.capacity_per_bin, cost_model)?;

    debug!(
        "[GEN] generated instance with {} items, {} bins, total capacity {}",
        instance.n_items(),
        instance.n_bins(),
        instance.total_capacity()
    );
    Ok(instance)
}
