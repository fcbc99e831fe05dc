use serde::{Deserialize, Serialize};

use cohort::entities::{Assignment, Instance};

use crate::config::LSConfig;
use crate::io::ext_repr::ExtInstance;
use crate::opt::ls_optimizer::SearchStats;

/// How many items ended up at each of their preference ranks
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RankSummary {
    /// `per_rank[r]`: number of items placed in their rank-`r` preference
    pub per_rank: Vec<usize>,
    /// Placed in a bin not among their preferences
    pub unpreferred: usize,
    pub unassigned: usize,
}

impl RankSummary {
    pub fn new(instance: &Instance, assignment: &Assignment) -> Self {
        let mut summary = RankSummary {
            per_rank: vec![0; instance.max_preferences()],
            unpreferred: 0,
            unassigned: 0,
        };
        for (item, bin) in instance.items.iter().zip(assignment.placement()) {
            match bin.map(|b| item.preference_rank(b)) {
                Some(Some(rank)) => summary.per_rank[rank] += 1,
                Some(None) => summary.unpreferred += 1,
                None => summary.unassigned += 1,
            }
        }
        summary
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ExtSolution {
    /// Bin of every item, in item order
    pub placement: Vec<Option<usize>>,
    pub total_cost: u64,
    pub rank_summary: RankSummary,
    pub stats: SearchStats,
    pub run_time_ms: u64,
}

impl ExtSolution {
    pub fn new(instance: &Instance, assignment: &Assignment, stats: SearchStats, run_time_ms: u64) -> Self {
        Self {
            placement: assignment.placement().to_vec(),
            total_cost: assignment.total_cost(),
            rank_summary: RankSummary::new(instance, assignment),
            stats,
            run_time_ms,
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct LSOutput {
    #[serde(flatten)]
    pub instance: ExtInstance,
    pub solution: ExtSolution,
    pub config: LSConfig,
}
