use crate::config::{RiskConfig, RulePoints};
use crate::scanner::{Network, SecurityType};
use serde::Serialize;
use std::collections::HashSet;

/// A single risk heuristic. `RiskIndicator::ALL` fixes the evaluation
/// order, which is also the order reasons are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskIndicator {
    OpenNetwork,
    HandshakeCapture,
    DuplicateSsid,
    EvilTwinSignal,
    MultiChannel,
    SimilarSsids,
    OpenWithEncrypted,
}

impl RiskIndicator {
    pub const ALL: [RiskIndicator; 7] = [
        RiskIndicator::OpenNetwork,
        RiskIndicator::HandshakeCapture,
        RiskIndicator::DuplicateSsid,
        RiskIndicator::EvilTwinSignal,
        RiskIndicator::MultiChannel,
        RiskIndicator::SimilarSsids,
        RiskIndicator::OpenWithEncrypted,
    ];

    pub fn description(self) -> &'static str {
        match self {
            RiskIndicator::OpenNetwork => "Open network",
            RiskIndicator::HandshakeCapture => "Handshake capture possible",
            RiskIndicator::DuplicateSsid => "Duplicate SSID",
            RiskIndicator::EvilTwinSignal => "Evil twin signal",
            RiskIndicator::MultiChannel => "Multi-channel broadcast",
            RiskIndicator::SimilarSsids => "Similar SSIDs",
            RiskIndicator::OpenWithEncrypted => "Open with encrypted duplicate",
        }
    }

    pub fn points(self, points: &RulePoints) -> u32 {
        match self {
            RiskIndicator::OpenNetwork => points.open_network,
            RiskIndicator::HandshakeCapture => points.handshake_capture,
            RiskIndicator::DuplicateSsid => points.duplicate_ssid,
            RiskIndicator::EvilTwinSignal => points.evil_twin_signal,
            RiskIndicator::MultiChannel => points.multi_channel,
            RiskIndicator::SimilarSsids => points.similar_ssids,
            RiskIndicator::OpenWithEncrypted => points.open_with_encrypted,
        }
    }

    /// Reason line, e.g. `Open network (+7)`.
    pub fn reason(self, points: &RulePoints) -> String {
        format!("{} (+{})", self.description(), self.points(points))
    }

    pub fn is_triggered(self, ctx: &RuleContext<'_>) -> bool {
        match self {
            RiskIndicator::OpenNetwork => ctx.target.security() == SecurityType::Open,
            RiskIndicator::HandshakeCapture => is_handshake_vulnerable(ctx.target.security()),
            RiskIndicator::DuplicateSsid => ctx.same_ssid.len() > 1,
            RiskIndicator::EvilTwinSignal => has_evil_twin_signal(ctx),
            RiskIndicator::MultiChannel => has_multi_channel(ctx),
            RiskIndicator::SimilarSsids => has_similar_ssids(ctx),
            RiskIndicator::OpenWithEncrypted => has_open_with_encrypted_duplicate(ctx),
        }
    }
}

/// Everything a rule may look at: the target, where it sits in the
/// snapshot (if it does), and the records sharing its SSID.
pub struct RuleContext<'a> {
    pub config: &'a RiskConfig,
    pub snapshot: &'a [Network],
    pub target: &'a Network,
    pub target_index: Option<usize>,
    /// `(index, record)` for every snapshot record whose SSID equals the target's
    pub same_ssid: Vec<(usize, &'a Network)>,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        config: &'a RiskConfig,
        snapshot: &'a [Network],
        target: &'a Network,
        target_index: Option<usize>,
    ) -> Self {
        let same_ssid = snapshot
            .iter()
            .enumerate()
            .filter(|(_, n)| n.ssid() == target.ssid())
            .collect();

        Self {
            config,
            snapshot,
            target,
            target_index,
            same_ssid,
        }
    }
}

fn is_handshake_vulnerable(security: SecurityType) -> bool {
    matches!(
        security,
        SecurityType::WPA | SecurityType::WPA2 | SecurityType::WPA_WPA2
    )
}

fn has_evil_twin_signal(ctx: &RuleContext<'_>) -> bool {
    if ctx.same_ssid.len() < 2 {
        return false;
    }

    let signals = ctx.same_ssid.iter().map(|(_, n)| n.signal_dbm());
    let (min, max) = signals.fold((i32::MAX, i32::MIN), |(lo, hi), s| (lo.min(s), hi.max(s)));
    i64::from(max) - i64::from(min) > i64::from(ctx.config.signal_diff_threshold)
}

fn has_multi_channel(ctx: &RuleContext<'_>) -> bool {
    let channels: HashSet<u8> = ctx
        .same_ssid
        .iter()
        .filter_map(|(_, n)| n.channel())
        .filter(|c| *c != 0)
        .collect();
    channels.len() > 1
}

/// Only the first pattern that both matches the target and reaches the
/// threshold counts; later patterns are not consulted once one succeeds.
fn has_similar_ssids(ctx: &RuleContext<'_>) -> bool {
    let target_ssid = ctx.target.ssid().to_lowercase();
    let all_ssids: Vec<String> = ctx.snapshot.iter().map(|n| n.ssid().to_lowercase()).collect();

    ctx.config
        .suspicious_patterns
        .iter()
        .filter(|pattern| target_ssid.contains(pattern.as_str()))
        .any(|pattern| {
            let matches = all_ssids
                .iter()
                .filter(|ssid| ssid.contains(pattern.as_str()))
                .count();
            matches >= ctx.config.similar_ssid_threshold
        })
}

/// Excludes the target by position, not by value: two distinct radios may
/// report identical fields.
fn has_open_with_encrypted_duplicate(ctx: &RuleContext<'_>) -> bool {
    if ctx.target.security() != SecurityType::Open {
        return false;
    }

    ctx.same_ssid
        .iter()
        .filter(|(idx, _)| Some(*idx) != ctx.target_index)
        .any(|(_, n)| n.is_secured())
}
