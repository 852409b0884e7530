pub mod analyze;
pub mod completions;
pub mod diagnose;
pub mod export;
pub mod graph;
pub mod layers;
