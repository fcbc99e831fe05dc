pub mod construct;
pub mod local_search;
pub mod ls_optimizer;
