use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::{bail, eyre};
use std::path::PathBuf;
use tracing::info;
use wifi_risk::config::RiskConfig;
use wifi_risk::report;
use wifi_risk::scanner::{enable_demo_mode, scan_networks, Snapshot};
use wifi_risk::scoring::RiskEngine;

#[derive(Parser, Debug)]
#[command(name = "wifi-risk")]
#[command(author = "Aviv E")]
#[command(version = "0.1.0")]
#[command(about = "Scan nearby WiFi networks and rate how risky each one looks")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Run with simulated WiFi networks (for testing/demo)
    #[arg(short, long, global = true)]
    demo: bool,

    /// JSON file overriding rule points, thresholds and name patterns
    #[arg(long, global = true, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Print machine-readable JSON instead of a report
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan and list nearby networks
    Scan,
    /// Analyze network risk
    Score {
        /// Network SSID
        #[arg(long)]
        ssid: Option<String>,

        /// Network BSSID
        #[arg(long)]
        bssid: Option<String>,

        /// Score every network in the scan
        #[arg(long, conflicts_with_all = ["ssid", "bssid"])]
        all: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    wifi_risk::logging::init(args.verbose);

    if args.demo {
        enable_demo_mode();
    }

    let config = match &args.rules {
        Some(path) => RiskConfig::from_json_file(path)?,
        None => RiskConfig::default(),
    };

    // Validate before paying for a scan
    if let Command::Score { ssid: None, bssid: None, all: false } = &args.command {
        bail!("Must specify --ssid or --bssid");
    }

    if !args.json {
        println!("Scanning...");
    }
    let Some(snapshot) = scan_or_interrupt().await? else {
        println!("Interrupted");
        return Ok(());
    };

    match args.command {
        Command::Scan => cmd_scan(&snapshot, args.json),
        Command::Score { ssid, bssid, all } => {
            let engine = RiskEngine::new(config);
            if all {
                cmd_score_all(&engine, &snapshot, args.json)
            } else {
                cmd_score(&engine, &snapshot, ssid.as_deref(), bssid.as_deref(), args.json)
            }
        }
    }
}

async fn scan_or_interrupt() -> Result<Option<Snapshot>> {
    tokio::select! {
        result = scan_networks() => Ok(Some(result?)),
        _ = tokio::signal::ctrl_c() => Ok(None),
    }
}

fn cmd_scan(snapshot: &Snapshot, json: bool) -> Result<()> {
    let listing = snapshot.listing();
    if json {
        return report::print_json(&listing);
    }
    report::print_table(&listing);
    if let Some(network) = snapshot.connected() {
        println!("\nConnected to: {} ({})", network.ssid(), network.bssid());
    }
    Ok(())
}

fn cmd_score(
    engine: &RiskEngine,
    snapshot: &Snapshot,
    ssid: Option<&str>,
    bssid: Option<&str>,
    json: bool,
) -> Result<()> {
    let index = snapshot
        .find(ssid, bssid)
        .ok_or_else(|| eyre!("Network not found"))?;
    let assessment = engine
        .assess(snapshot, index)
        .ok_or_else(|| eyre!("Network not found"))?;

    info!(
        ssid = assessment.network.ssid(),
        score = assessment.score,
        rating = assessment.rating,
        "assessment complete"
    );

    if json {
        return report::print_json(&assessment);
    }
    report::print_assessment(&assessment);
    Ok(())
}

fn cmd_score_all(engine: &RiskEngine, snapshot: &Snapshot, json: bool) -> Result<()> {
    let mut assessments = engine.assess_all(snapshot);
    assessments.sort_by(|a, b| b.score.cmp(&a.score));

    if json {
        return report::print_json(&assessments);
    }
    if assessments.is_empty() {
        println!("No networks found");
    }
    for assessment in &assessments {
        report::print_assessment(assessment);
        println!();
    }
    Ok(())
}
