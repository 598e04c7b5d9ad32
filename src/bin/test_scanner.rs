//! Quick test for the real WiFi scanner and scoring pipeline

use wifi_risk::scanner::scan_networks;
use wifi_risk::scoring::RiskEngine;

#[tokio::main]
async fn main() {
    wifi_risk::logging::init(true);
    println!("Testing real WiFi scanner (no demo mode)...\n");

    match scan_networks().await {
        Ok(snapshot) => {
            println!("SUCCESS! Found {} networks:\n", snapshot.len());
            let engine = RiskEngine::default();
            for (i, assessment) in engine.assess_all(&snapshot).iter().enumerate() {
                let net = &assessment.network;
                println!(
                    "{}. {} [{}]\n   Channel: {} ({}) | Signal: {} dBm ({}%) | Security: {} | Risk: {} ({}/10)",
                    i + 1,
                    net.ssid(),
                    net.bssid(),
                    net.channel().map_or_else(|| "?".to_string(), |c| c.to_string()),
                    net.band(),
                    net.signal_dbm(),
                    net.signal_quality(),
                    net.security(),
                    assessment.tier,
                    assessment.rating
                );
            }
        }
        Err(e) => {
            println!("FAILED: {}", e);
        }
    }
}
