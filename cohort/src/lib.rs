//! Core of `cohort`: assigning items to capacity-bounded bins under hard feasibility constraints
//! and soft, ranked preferences.

/// Items, instances and assignments
pub mod entities;

/// Cost of placing an item in a bin
pub mod cost;

/// Pairwise swap neighborhoods of complete assignments
pub mod neighborhood;

/// Helper functions which do not belong to any specific module
pub mod util;
