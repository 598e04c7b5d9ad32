//! WiFi risk assessment: scan nearby access points and score each one for
//! signs of rogue, spoofed or weakly protected networks.

pub mod config;
pub mod logging;
pub mod report;
pub mod scanner;
pub mod scoring;

pub use config::RiskConfig;
pub use scanner::{Network, Snapshot};
pub use scoring::{calculate_score, classify, RiskEngine};
