pub mod client;
pub mod error;
pub mod retry;
pub mod search;
pub mod stats;

pub use client::ProbeClient;
pub use error::ProbeError;
pub use retry::retry_linear;
pub use search::{investigate, run_probes, Investigation, Searcher};
pub use stats::{ProbeOutcome, ProbeStats, StatsRecorder};
