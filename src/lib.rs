// Appraise: heuristic account authenticity and energy scenario scoring.
//
// This is the library root. The calculators (account, energy, quota) are
// pure; backend and pipeline wrap the remote services they stand in for.

pub mod account;
pub mod backend;
pub mod config;
pub mod energy;
pub mod output;
pub mod pipeline;
pub mod quota;
pub mod status;
