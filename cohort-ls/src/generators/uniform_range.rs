use rand::Rng;
use rand::seq::SliceRandom;

/// Draws up to `count` distinct bins from `candidates`, uniformly and without replacement.
/// The order of the result is random as well.
pub fn sample_uniform(candidates: &[usize], count: usize, rng: &mut impl Rng) -> Vec<usize> {
    let mut bins = candidates.to_vec();
    bins.shuffle(rng);
    bins.truncate(count);
    bins
}
