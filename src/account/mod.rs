// Account authenticity scoring.
//
// A hand-tuned weighted sum over profile attributes stands in for the
// remote ML classifier. The same report shape comes out of both paths so
// callers don't care which one answered.

pub mod features;
pub mod heuristic;
pub mod remote;
pub mod status;
pub mod traits;
