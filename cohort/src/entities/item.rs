/// Entity to be placed in one of the bins.
/// Immutable once part of an [`Instance`](crate::entities::Instance).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: usize,
    /// `feasible_bins[b]` is true if the item may be placed in bin `b`
    pub feasible_bins: Vec<bool>,
    /// Distinct bin ids, most preferred first
    pub preferences: Vec<usize>,
}

impl Item {
    pub fn new(id: usize, feasible_bins: Vec<bool>, preferences: Vec<usize>) -> Self {
        Self {
            id,
            feasible_bins,
            preferences,
        }
    }

    /// Creates an item from the ids of the bins it may be placed in.
    pub fn from_feasible_ids(
        id: usize,
        n_bins: usize,
        feasible_ids: &[usize],
        preferences: Vec<usize>,
    ) -> Self {
        let mut feasible_bins = vec![false; n_bins];
        for &bin in feasible_ids {
            feasible_bins[bin] = true;
        }
        Self::new(id, feasible_bins, preferences)
    }

    pub fn is_feasible(&self, bin: usize) -> bool {
        self.feasible_bins.get(bin).copied().unwrap_or(false)
    }

    /// Rank of the first occurrence of `bin` in the preferences, if any.
    pub fn preference_rank(&self, bin: usize) -> Option<usize> {
        self.preferences.iter().position(|&p| p == bin)
    }

    pub fn feasible_bin_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.feasible_bins
            .iter()
            .enumerate()
            .filter_map(|(bin, &feasible)| feasible.then_some(bin))
    }
}
