mod platform;

pub use platform::{
    channel_to_frequency, enable_demo_mode, frequency_to_channel, is_demo_mode, parse_channel,
    parse_security, parse_signal, scan_networks, ScanError,
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[allow(clippy::upper_case_acronyms, non_camel_case_types)]
pub enum SecurityType {
    Open,
    WEP,
    WPA,
    WPA2,
    WPA3,
    /// Mixed-mode access point advertising both WPA and WPA2
    WPA_WPA2,
}

impl fmt::Display for SecurityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityType::Open => write!(f, "Open"),
            SecurityType::WEP => write!(f, "WEP"),
            SecurityType::WPA => write!(f, "WPA"),
            SecurityType::WPA2 => write!(f, "WPA2"),
            SecurityType::WPA3 => write!(f, "WPA3"),
            SecurityType::WPA_WPA2 => write!(f, "WPA/WPA2"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "Disconnected"),
            ConnectionState::Connecting => write!(f, "Connecting"),
            ConnectionState::Connected => write!(f, "Connected"),
            ConnectionState::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyBand {
    Band2_4GHz,
    Band5GHz,
    Band6GHz,
    Unknown,
}

impl fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyBand::Band2_4GHz => write!(f, "2.4 GHz"),
            FrequencyBand::Band5GHz => write!(f, "5 GHz"),
            FrequencyBand::Band6GHz => write!(f, "6 GHz"),
            FrequencyBand::Unknown => write!(f, "Unknown"),
        }
    }
}

impl FrequencyBand {
    /// Uses the same 2.4 and 5 GHz ranges as `frequency_to_channel`, so any
    /// frequency with a known band below 6 GHz also has a channel. 6 GHz is
    /// reported by band only.
    pub fn from_frequency(mhz: u32) -> Self {
        match mhz {
            2412..=2484 => FrequencyBand::Band2_4GHz,
            5170..=5825 => FrequencyBand::Band5GHz,
            5925..=7125 => FrequencyBand::Band6GHz,
            _ => FrequencyBand::Unknown,
        }
    }
}

/// One observed access point.
///
/// Identity fields are fixed at construction; everything the scorer needs
/// beyond the raw fields is derived on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Network {
    ssid: String,
    bssid: String,
    signal_dbm: i32,
    frequency: u32,
    security: SecurityType,
    connection_state: ConnectionState,
    channel: Option<u8>,
}

impl Network {
    pub fn new(
        ssid: impl Into<String>,
        bssid: impl Into<String>,
        signal_dbm: i32,
        frequency: u32,
        security: SecurityType,
    ) -> Self {
        Self {
            ssid: ssid.into(),
            bssid: bssid.into(),
            signal_dbm,
            frequency,
            security,
            connection_state: ConnectionState::default(),
            channel: None,
        }
    }

    pub fn with_channel(mut self, channel: Option<u8>) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_connection_state(mut self, state: ConnectionState) -> Self {
        self.connection_state = state;
        self
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn bssid(&self) -> &str {
        &self.bssid
    }

    pub fn signal_dbm(&self) -> i32 {
        self.signal_dbm
    }

    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    pub fn security(&self) -> SecurityType {
        self.security
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection_state
    }

    pub fn channel(&self) -> Option<u8> {
        self.channel
    }

    pub fn band(&self) -> FrequencyBand {
        FrequencyBand::from_frequency(self.frequency)
    }

    /// Signal quality as a percentage.
    /// -30 dBm and above = 100, -90 dBm and below = 0, 2 * (dBm + 100) between.
    pub fn signal_quality(&self) -> u8 {
        match self.signal_dbm {
            s if s >= -30 => 100,
            s if s <= -90 => 0,
            s => (2 * (s + 100)).min(100) as u8,
        }
    }

    pub fn is_secured(&self) -> bool {
        self.security != SecurityType::Open
    }

    pub fn is_connected(&self) -> bool {
        self.connection_state == ConnectionState::Connected
    }

    pub fn signal_bars(&self, segments: usize) -> String {
        let filled = usize::from(self.signal_quality()) * segments / 100;
        let empty = segments - filled;
        format!("{}{}", "\u{2588}".repeat(filled), "\u{2591}".repeat(empty))
    }
}

/// All access points seen by one scan, in acquisition order.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub captured_at: DateTime<Utc>,
    networks: Vec<Network>,
}

impl Snapshot {
    pub fn new(networks: Vec<Network>) -> Self {
        Self::captured(networks, Utc::now())
    }

    pub fn captured(networks: Vec<Network>, captured_at: DateTime<Utc>) -> Self {
        Self {
            captured_at,
            networks,
        }
    }

    pub fn networks(&self) -> &[Network] {
        &self.networks
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Network> {
        self.networks.get(index)
    }

    /// Strongest signal first. The sort is stable, so equal signals keep
    /// their acquisition order.
    pub fn sort_by_signal(&mut self) {
        self.networks
            .sort_by(|a, b| b.signal_dbm.cmp(&a.signal_dbm));
    }

    /// Index of the first record matching the given SSID and/or BSSID.
    /// Both given: both must match. Neither given: no match.
    pub fn find(&self, ssid: Option<&str>, bssid: Option<&str>) -> Option<usize> {
        let matches = |n: &Network| match (ssid, bssid) {
            (Some(s), Some(b)) => n.ssid == s && n.bssid == b,
            (Some(s), None) => n.ssid == s,
            (None, Some(b)) => n.bssid == b,
            (None, None) => false,
        };
        self.networks.iter().position(matches)
    }

    /// First record per SSID, in snapshot order.
    pub fn unique_by_ssid(&self) -> Vec<&Network> {
        let mut seen = HashSet::new();
        self.networks
            .iter()
            .filter(|n| seen.insert(n.ssid.as_str()))
            .collect()
    }

    /// The access point this machine is associated with, if the backend
    /// reported one.
    pub fn connected(&self) -> Option<&Network> {
        self.networks.iter().find(|n| n.is_connected())
    }

    pub fn listing(&self) -> ScanListing<'_> {
        ScanListing {
            captured_at: self.captured_at,
            networks: self.unique_by_ssid(),
        }
    }
}

/// What the `scan` command shows: one record per SSID plus the capture time.
#[derive(Debug, Serialize)]
pub struct ScanListing<'a> {
    pub captured_at: DateTime<Utc>,
    pub networks: Vec<&'a Network>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn net(ssid: &str, bssid: &str, dbm: i32, security: SecurityType) -> Network {
        Network::new(ssid, bssid, dbm, 2437, security)
    }

    #[test]
    fn test_signal_quality() {
        let quality = |dbm| net("t", "aa", dbm, SecurityType::WPA2).signal_quality();
        assert_eq!(quality(-30), 100);
        assert_eq!(quality(-20), 100);
        assert_eq!(quality(-60), 80);
        assert_eq!(quality(-70), 60);
        assert_eq!(quality(-89), 22);
        assert_eq!(quality(-90), 0);
        assert_eq!(quality(-100), 0);
        // Linear segment caps at 100 before the saturation point
        assert_eq!(quality(-45), 100);
    }

    #[test]
    fn test_signal_quality_is_total() {
        assert_eq!(net("t", "aa", i32::MAX, SecurityType::Open).signal_quality(), 100);
        assert_eq!(net("t", "aa", i32::MIN, SecurityType::Open).signal_quality(), 0);
    }

    #[test]
    fn test_predicates() {
        assert!(!net("t", "aa", -50, SecurityType::Open).is_secured());
        for security in [
            SecurityType::WEP,
            SecurityType::WPA,
            SecurityType::WPA2,
            SecurityType::WPA3,
            SecurityType::WPA_WPA2,
        ] {
            assert!(net("t", "aa", -50, security).is_secured());
        }

        let network = net("t", "aa", -50, SecurityType::WPA2);
        assert!(!network.is_connected());
        assert_eq!(network.connection_state(), ConnectionState::Disconnected);
        assert!(network
            .with_connection_state(ConnectionState::Connected)
            .is_connected());
    }

    #[test]
    fn test_channel_defaults_to_absent() {
        let network = net("t", "aa", -50, SecurityType::WPA2);
        assert_eq!(network.channel(), None);
        assert_eq!(network.with_channel(Some(11)).channel(), Some(11));
    }

    #[test]
    fn test_band_from_frequency() {
        assert_eq!(FrequencyBand::from_frequency(2437), FrequencyBand::Band2_4GHz);
        assert_eq!(FrequencyBand::from_frequency(5180), FrequencyBand::Band5GHz);
        assert_eq!(FrequencyBand::from_frequency(5955), FrequencyBand::Band6GHz);
        assert_eq!(FrequencyBand::from_frequency(0), FrequencyBand::Unknown);
    }

    #[test]
    fn test_band_matches_channel_ranges() {
        for mhz in [2400, 2412, 2484, 2500, 5150, 5170, 5180, 5825, 5850, 5895] {
            let has_band = matches!(
                FrequencyBand::from_frequency(mhz),
                FrequencyBand::Band2_4GHz | FrequencyBand::Band5GHz
            );
            assert_eq!(has_band, frequency_to_channel(mhz).is_some(), "{mhz} MHz");
        }
        assert_eq!(FrequencyBand::from_frequency(5850), FrequencyBand::Unknown);
    }

    #[test]
    fn test_signal_bars() {
        assert_eq!(net("t", "aa", -30, SecurityType::Open).signal_bars(10), "\u{2588}".repeat(10));
        assert_eq!(net("t", "aa", -95, SecurityType::Open).signal_bars(10), "\u{2591}".repeat(10));
        let bars = net("t", "aa", -70, SecurityType::Open).signal_bars(10);
        assert_eq!(bars.chars().filter(|c| *c == '\u{2588}').count(), 6);
    }

    #[test]
    fn test_find() {
        let snapshot = Snapshot::new(vec![
            net("Cafe", "aa:01", -40, SecurityType::Open),
            net("Cafe", "aa:02", -60, SecurityType::WPA2),
            net("Home", "bb:01", -50, SecurityType::WPA3),
        ]);

        assert_eq!(snapshot.find(Some("Cafe"), None), Some(0));
        assert_eq!(snapshot.find(Some("Cafe"), Some("aa:02")), Some(1));
        assert_eq!(snapshot.find(None, Some("bb:01")), Some(2));
        assert_eq!(snapshot.find(Some("Home"), Some("aa:01")), None);
        assert_eq!(snapshot.find(None, None), None);
    }

    #[test]
    fn test_connected() {
        let snapshot = Snapshot::new(vec![
            net("Cafe", "aa:01", -40, SecurityType::Open),
            net("Home", "bb:01", -50, SecurityType::WPA3)
                .with_connection_state(ConnectionState::Connected),
        ]);
        assert_eq!(snapshot.connected().map(|n| n.bssid()), Some("bb:01"));

        let idle = Snapshot::new(vec![net("Cafe", "aa:01", -40, SecurityType::Open)]);
        assert!(idle.connected().is_none());
    }

    #[test]
    fn test_listing_carries_capture_time() {
        let captured_at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        let snapshot = Snapshot::captured(
            vec![
                net("Cafe", "aa:01", -40, SecurityType::Open),
                net("Cafe", "aa:02", -70, SecurityType::WPA2),
            ],
            captured_at,
        );

        let listing = snapshot.listing();
        assert_eq!(listing.captured_at, captured_at);
        assert_eq!(listing.networks.len(), 1);

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["captured_at"], "2026-03-14T09:26:53Z");
        assert_eq!(json["networks"][0]["bssid"], "aa:01");
    }

    #[test]
    fn test_sort_and_unique() {
        let mut snapshot = Snapshot::new(vec![
            net("Weak", "aa:01", -80, SecurityType::Open),
            net("Cafe", "aa:02", -60, SecurityType::WPA2),
            net("Cafe", "aa:03", -40, SecurityType::Open),
        ]);
        snapshot.sort_by_signal();

        let order: Vec<&str> = snapshot.networks().iter().map(|n| n.bssid()).collect();
        assert_eq!(order, vec!["aa:03", "aa:02", "aa:01"]);

        let unique: Vec<&str> = snapshot.unique_by_ssid().iter().map(|n| n.bssid()).collect();
        assert_eq!(unique, vec!["aa:03", "aa:01"]);
    }
}
