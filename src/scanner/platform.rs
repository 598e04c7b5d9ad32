use crate::scanner::{ConnectionState, Network, SecurityType, Snapshot};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

static DEMO_MODE: AtomicBool = AtomicBool::new(false);

/// Errors surfaced by snapshot acquisition. A scan is attempted once;
/// nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("WiFi scan failed: {0}\n\nTry running with --demo flag for simulated data.")]
    Acquisition(String),

    #[error("scan task panicked: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Enable demo mode with simulated networks
pub fn enable_demo_mode() {
    DEMO_MODE.store(true, Ordering::SeqCst);
}

/// Check if demo mode is enabled
pub fn is_demo_mode() -> bool {
    DEMO_MODE.load(Ordering::SeqCst)
}

/// Take one snapshot of the visible access points, strongest first.
pub async fn scan_networks() -> Result<Snapshot, ScanError> {
    if is_demo_mode() {
        debug!("demo mode: returning simulated snapshot");
        return Ok(demo_snapshot());
    }

    let raw = tokio::task::spawn_blocking(wifiscanner::scan)
        .await?
        .map_err(|e| ScanError::Acquisition(format!("{:?}", e)))?;

    let total = raw.len();
    let networks: Vec<Network> = raw
        .into_iter()
        .filter_map(|wifi| {
            let ssid = wifi.ssid.trim();
            if ssid.is_empty() {
                return None;
            }

            let channel = parse_channel(&wifi.channel);
            let frequency = channel_to_frequency(channel);
            let security = parse_security(&wifi.security).unwrap_or_else(|| {
                warn!(ssid, security = %wifi.security, "unrecognised security, assuming WPA2");
                SecurityType::WPA2
            });

            Some(
                Network::new(ssid, wifi.mac, parse_signal(&wifi.signal_level), frequency, security)
                    .with_channel(frequency_to_channel(frequency)),
            )
        })
        .collect();

    info!(
        visible = networks.len(),
        hidden = total - networks.len(),
        "scan complete"
    );

    let mut snapshot = Snapshot::new(networks);
    snapshot.sort_by_signal();
    Ok(snapshot)
}

/// Channel number for a centre frequency in MHz.
/// 2412-2484 MHz maps to channels 1-14, 5170-5825 MHz to (freq - 5000) / 5.
pub fn frequency_to_channel(frequency: u32) -> Option<u8> {
    let channel = match frequency {
        2484 => 14,
        2412..=2483 => (frequency - 2412) / 5 + 1,
        5170..=5825 => (frequency - 5000) / 5,
        _ => 0,
    };
    u8::try_from(channel).ok().filter(|c| *c != 0)
}

/// Centre frequency for a channel number; 0 when the channel is unknown.
pub fn channel_to_frequency(channel: u8) -> u32 {
    let channel = u32::from(channel);
    match channel {
        1..=13 => 2407 + channel * 5,
        14 => 2484,
        32..=177 => 5000 + channel * 5,
        _ => 0,
    }
}

/// Primary channel from a backend channel field. Bonded channels such as
/// `36,+1` or `149,80` keep only their leading number; 0 when unparseable.
pub fn parse_channel(channel: &str) -> u8 {
    channel
        .trim()
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .and_then(|digits| digits.parse::<u8>().ok())
        .unwrap_or(0)
}

/// Signal in dBm. Percentage readings (`"72%"`) are offset by -100.
pub fn parse_signal(signal: &str) -> i32 {
    let signal = signal.trim();
    if let Some(percent) = signal.strip_suffix('%') {
        return percent
            .trim()
            .parse::<i32>()
            .map(|strength| strength.clamp(0, 100) - 100)
            .unwrap_or(-100);
    }

    signal
        .trim_end_matches(" dBm")
        .trim_end_matches("dBm")
        .split_whitespace()
        .next()
        .unwrap_or("-100")
        .parse::<i32>()
        .unwrap_or(-100)
}

/// Classify a backend security description. Strongest protocol wins;
/// an access point advertising both WPA1 and WPA2 is mixed mode.
/// Returns `None` for descriptions that name no known protocol.
pub fn parse_security(security: &str) -> Option<SecurityType> {
    let lower = security.to_lowercase();
    let has_wpa2 = lower.contains("wpa2") || lower.contains("rsn");
    let has_wpa1 = lower
        .match_indices("wpa")
        .any(|(i, _)| !matches!(lower[i + 3..].chars().next(), Some('2' | '3')));

    if lower.trim().is_empty() || lower.contains("none") || lower.contains("open") {
        Some(SecurityType::Open)
    } else if lower.contains("wpa3") || lower.contains("sae") {
        Some(SecurityType::WPA3)
    } else if has_wpa2 && has_wpa1 {
        Some(SecurityType::WPA_WPA2)
    } else if has_wpa2 {
        Some(SecurityType::WPA2)
    } else if has_wpa1 {
        Some(SecurityType::WPA)
    } else if lower.contains("wep") {
        Some(SecurityType::WEP)
    } else {
        None
    }
}

/// Deterministic simulated snapshot for demo mode. Contains an evil-twin
/// pair and a cluster of look-alike names so every rule can be seen firing.
fn demo_snapshot() -> Snapshot {
    let base_networks = [
        ("CoffeeShop_Free", SecurityType::Open, 36, -42, "A1:B2:C3:D4:E5:F6"),
        ("Hotel_Guest", SecurityType::Open, 1, -48, "12:34:56:78:9A:BC"),
        ("Airport_WiFi", SecurityType::Open, 6, -55, "11:22:33:44:55:66"),
        ("Library_Public", SecurityType::Open, 149, -58, "DE:AD:BE:EF:CA:FE"),
        ("Starbucks_WiFi", SecurityType::WPA2, 11, -62, "AA:BB:CC:DD:EE:FF"),
        ("Mall_WiFi", SecurityType::WPA_WPA2, 44, -65, "22:33:44:55:66:77"),
        ("xfinitywifi", SecurityType::Open, 1, -72, "EE:FF:00:11:22:33"),
        ("Neighbor_5G", SecurityType::WPA3, 36, -78, "88:99:AA:BB:CC:DD"),
        ("Airport_WiFi", SecurityType::WPA2, 11, -81, "66:55:44:33:22:11"),
        ("OldRouter", SecurityType::WEP, 1, -83, "00:11:22:33:44:55"),
    ];

    let networks = base_networks
        .into_iter()
        .map(|(ssid, security, channel, signal_dbm, mac)| {
            let frequency = channel_to_frequency(channel);
            let state = if ssid == "Neighbor_5G" {
                ConnectionState::Connected
            } else {
                ConnectionState::Disconnected
            };
            Network::new(ssid, mac, signal_dbm, frequency, security)
                .with_channel(frequency_to_channel(frequency))
                .with_connection_state(state)
        })
        .collect();

    Snapshot::new(networks)
}
