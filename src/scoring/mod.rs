mod rating;
mod rules;

pub use rating::{classify, RiskLevel, RiskRating};
pub use rules::{RiskIndicator, RuleContext};

use crate::config::RiskConfig;
use crate::scanner::{Network, Snapshot};
use serde::Serialize;
use tracing::debug;

/// Score and explanation for one target. `reasons[i]` describes
/// `triggered[i]`; both follow catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ScoreResult {
    pub score: u32,
    pub reasons: Vec<String>,
    pub triggered: Vec<RiskIndicator>,
}

impl ScoreResult {
    pub fn into_parts(self) -> (u32, Vec<String>) {
        (self.score, self.reasons)
    }
}

/// Full verdict for one network in a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub network: Network,
    pub score: u32,
    pub reasons: Vec<String>,
    pub triggered: Vec<RiskIndicator>,
    pub level: RiskLevel,
    pub tier: &'static str,
    pub rating: u8,
}

/// Stateless rule evaluator. Holds only its configuration, so one engine
/// can score any number of snapshots, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Evaluate every rule against `target` in the context of `snapshot`.
    ///
    /// When `target` is a reference into `snapshot` that exact record is
    /// the one excluded from the open-with-encrypted-duplicate rule. A
    /// target from elsewhere excludes nothing; SSID-based rules still
    /// compare by value.
    pub fn calculate_score(&self, snapshot: &[Network], target: &Network) -> ScoreResult {
        let target_index = snapshot.iter().position(|n| std::ptr::eq(n, target));
        self.evaluate(snapshot, target, target_index)
    }

    /// Score the record at `index`. Out-of-range indices yield `None`.
    pub fn score_at(&self, snapshot: &[Network], index: usize) -> Option<ScoreResult> {
        let target = snapshot.get(index)?;
        Some(self.evaluate(snapshot, target, Some(index)))
    }

    pub fn assess(&self, snapshot: &Snapshot, index: usize) -> Option<Assessment> {
        let result = self.score_at(snapshot.networks(), index)?;
        let network = snapshot.get(index)?.clone();
        Some(build_assessment(network, result))
    }

    /// Assess every record, in snapshot order.
    pub fn assess_all(&self, snapshot: &Snapshot) -> Vec<Assessment> {
        let networks = snapshot.networks();
        networks
            .iter()
            .enumerate()
            .map(|(idx, network)| {
                build_assessment(network.clone(), self.evaluate(networks, network, Some(idx)))
            })
            .collect()
    }

    fn evaluate(
        &self,
        snapshot: &[Network],
        target: &Network,
        target_index: Option<usize>,
    ) -> ScoreResult {
        let ctx = RuleContext::new(&self.config, snapshot, target, target_index);
        let points = &self.config.points;

        let mut result = ScoreResult::default();
        for indicator in RiskIndicator::ALL {
            if indicator.is_triggered(&ctx) {
                result.score += indicator.points(points);
                result.reasons.push(indicator.reason(points));
                result.triggered.push(indicator);
            }
        }

        debug!(
            ssid = target.ssid(),
            bssid = target.bssid(),
            score = result.score,
            triggered = result.triggered.len(),
            "scored network"
        );
        result
    }
}

fn build_assessment(network: Network, result: ScoreResult) -> Assessment {
    let rating = classify(result.score);
    Assessment {
        network,
        score: result.score,
        reasons: result.reasons,
        triggered: result.triggered,
        level: rating.level,
        tier: rating.tier_name(),
        rating: rating.rating,
    }
}

/// Score `target` against `snapshot` with the built-in rule set.
pub fn calculate_score(snapshot: &[Network], target: &Network) -> (u32, Vec<String>) {
    RiskEngine::default()
        .calculate_score(snapshot, target)
        .into_parts()
}
