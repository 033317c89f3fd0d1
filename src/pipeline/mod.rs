// Orchestration: remote first, local heuristic on any failure.

pub mod analyze;
pub mod predict;
