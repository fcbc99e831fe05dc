use anyhow::{Result, anyhow, bail};
use log::trace;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::generators::uniform_range::sample_uniform;

/// Maximum number of draws from the normal distribution per requested preference,
/// after which the remaining preferences are drawn uniformly.
pub const MAX_DRAWS_PER_PREFERENCE: usize = 100;

/// Draws bins from a normal distribution centered around the middle of the bin range.
/// Models the situation where some bins are far more popular than others.
#[derive(Debug, Clone)]
pub struct CenteredSampler {
    normal: Normal<f64>,
    n_bins: usize,
}

impl CenteredSampler {
    pub fn new(n_bins: usize, std_dev: f64) -> Result<Self> {
        if n_bins == 0 {
            bail!("cannot center a distribution on zero bins");
        }
        let midpoint = (n_bins - 1) as f64 / 2.0;
        let normal = Normal::new(midpoint, std_dev)
            .map_err(|e| anyhow!("invalid standard deviation {std_dev}: {e}"))?;
        Ok(Self { normal, n_bins })
    }

    /// Draws up to `count` distinct bins from `candidates`, most likely ones near the midpoint.
    pub fn sample(&self, candidates: &[usize], count: usize, rng: &mut impl Rng) -> Vec<usize> {
        let count = count.min(candidates.len());
        let mut bins = Vec::with_capacity(count);

        let mut n_draws = 0;
        while bins.len() < count && n_draws < count * MAX_DRAWS_PER_PREFERENCE {
            n_draws += 1;
            let sample = self.normal.sample(rng).round();
            if sample < 0.0 || sample >= self.n_bins as f64 {
                continue;
            }
            let bin = sample as usize;
            if candidates.contains(&bin) && !bins.contains(&bin) {
                bins.push(bin);
            }
        }

        if bins.len() < count {
            trace!(
                "[GEN] centered sampling exhausted after {n_draws} draws, {} bins drawn uniformly",
                count - bins.len()
            );
            let remaining = candidates
                .iter()
                .copied()
                .filter(|b| !bins.contains(b))
                .collect::<Vec<_>>();
            bins.extend(sample_uniform(&remaining, count - bins.len(), rng));
        }
        bins
    }
}
