//! Risk rule configuration
//!
//! Point values, thresholds and the suspicious-name list are bundled into
//! one immutable value handed to the scoring engine at construction.
//! Defaults reproduce the built-in rule set; a JSON file may override any
//! subset of fields.

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Points awarded by each rule when it triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulePoints {
    pub open_network: u32,
    pub handshake_capture: u32,
    pub duplicate_ssid: u32,
    pub evil_twin_signal: u32,
    pub multi_channel: u32,
    pub similar_ssids: u32,
    pub open_with_encrypted: u32,
}

impl Default for RulePoints {
    fn default() -> Self {
        Self {
            open_network: 7,
            handshake_capture: 6,
            duplicate_ssid: 3,
            evil_twin_signal: 4,
            multi_channel: 3,
            similar_ssids: 3,
            open_with_encrypted: 3,
        }
    }
}

pub const DEFAULT_SUSPICIOUS_PATTERNS: [&str; 9] = [
    "free_wifi",
    "freewifi",
    "free wifi",
    "guest",
    "public",
    "wifi",
    "internet",
    "hotspot",
    "access",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub points: RulePoints,
    /// Signal spread (dB) across same-SSID records that must be exceeded
    /// for the evil twin rule.
    pub signal_diff_threshold: i32,
    /// Minimum number of snapshot names sharing a suspicious pattern.
    pub similar_ssid_threshold: usize,
    /// Lower-case substrings checked in order; the first that matches the
    /// target and meets the threshold wins.
    pub suspicious_patterns: Vec<String>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            points: RulePoints::default(),
            signal_diff_threshold: 20,
            similar_ssid_threshold: 3,
            suspicious_patterns: DEFAULT_SUSPICIOUS_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl RiskConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: RiskConfig =
            serde_json::from_str(json).wrap_err("Invalid risk rule configuration")?;
        for pattern in &mut config.suspicious_patterns {
            *pattern = pattern.to_lowercase();
        }
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read rule file {}", path.display()))?;
        Self::from_json(&json).wrap_err_with(|| format!("Failed to load {}", path.display()))
    }
}
