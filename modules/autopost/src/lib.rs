pub mod generator;
pub mod headline;
pub mod links;
pub mod pipeline;
pub mod publisher;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use pipeline::{Pipeline, RunOutcome, Stage};
