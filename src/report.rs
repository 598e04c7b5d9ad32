//! Terminal and JSON output for scan listings and risk assessments.

use crate::scanner::{Network, ScanListing};
use crate::scoring::Assessment;
use color_eyre::Result;
use crossterm::style::{StyledContent, Stylize};
use serde::Serialize;

const MAX_SSID_DISPLAY: usize = 20;
const SIGNAL_BAR_SEGMENTS: usize = 10;

pub fn format_table_row(network: &Network, index: usize) -> String {
    let ssid = truncate(network.ssid(), MAX_SSID_DISPLAY);
    let quality = network.signal_quality();
    let security_icon = if network.is_secured() { "\u{1f512}" } else { "\u{1f513}" };

    format!(
        "{:2} \u{2502} {:<20} \u{2502} {:<17} \u{2502} {} {:3}% \u{2502} {} {:<10} \u{2502} {:>3} \u{2502} {:4}",
        index,
        ssid,
        network.bssid(),
        network.signal_bars(SIGNAL_BAR_SEGMENTS),
        quality,
        security_icon,
        network.security().to_string(),
        network.channel().unwrap_or(0),
        network.frequency(),
    )
}

pub fn print_table(listing: &ScanListing<'_>) {
    let networks = &listing.networks;
    if networks.is_empty() {
        println!("No networks found");
        return;
    }

    println!("{}", listing_summary(listing));
    println!(
        " # \u{2502} {:<20} \u{2502} {:<17} \u{2502} {:<15} \u{2502} {:<13} \u{2502} {:>3} \u{2502} {:4}",
        "SSID", "BSSID", "Signal", "Security", "CH", "Freq"
    );
    println!("{}", "\u{2500}".repeat(101));
    for (i, network) in networks.iter().enumerate() {
        println!("{}", format_table_row(network, i + 1));
    }
}

fn listing_summary(listing: &ScanListing<'_>) -> String {
    format!(
        "Found {} networks at {}",
        listing.networks.len(),
        listing.captured_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// Print one assessment in the same shape as the `score` command output.
pub fn print_assessment(assessment: &Assessment) {
    let network = &assessment.network;
    println!("Target: {}", network.ssid());
    println!("BSSID: {}", network.bssid());
    println!("Security: {}", network.security());
    match network.channel() {
        Some(channel) => println!("Channel: {} ({})", channel, network.band()),
        None => println!("Channel: unknown"),
    }
    if network.is_connected() {
        println!("Status: {}", network.connection_state());
    }
    println!();

    if !assessment.reasons.is_empty() {
        println!("Risk factors:");
        for reason in &assessment.reasons {
            println!("  \u{2022} {}", reason);
        }
        println!();
    }

    println!(
        "Score: {} | Rating: {}/10 | Level: {}",
        assessment.score, assessment.rating, assessment.tier
    );
    println!("{}", verdict(assessment.rating));
}

/// Coarse verdict line for a 1-10 rating
pub fn verdict(rating: u8) -> StyledContent<&'static str> {
    match rating {
        7.. => "\u{26a0}\u{fe0f}  HIGH RISK".red().bold(),
        5..=6 => "\u{26a1} MEDIUM RISK".yellow().bold(),
        _ => "\u{2705} LOW RISK".green().bold(),
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
