//! chaos-monitor
//!
//! Command-line front end for the harness health checks.
//!
//! ```text
//!     chaos-monitor check --tool search      probe the search proxy, wait for it if down
//!     chaos-monitor check                    probe the proxy manager
//!     chaos-monitor classify 503             categorize a status code
//!     chaos-monitor classify '{"status":404}'  categorize an error payload
//!     chaos-monitor config                   print the resolved configuration
//!     chaos-monitor faults                   print the fault parameters (file, then environment)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::json;

use chaos_monitor::classify::{classify, StatusInput};
use chaos_monitor::config::resolve_config;
use chaos_monitor::health::{default_budget, AvailabilityMonitor, HttpProbe, Target};
use chaos_monitor::observability::{logging, metrics};
use chaos_monitor::resilience::BackoffBudget;

#[derive(Parser)]
#[command(name = "chaos-monitor")]
#[command(about = "Liveness checks and failure classification for the chaos harness", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in topology when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Expose Prometheus metrics on the configured address.
    #[arg(long)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a tool proxy (or the proxy manager) is up
    Check {
        /// Tool name; the proxy manager when omitted
        #[arg(short, long)]
        tool: Option<String>,

        /// Wait budget in seconds
        #[arg(short, long)]
        wait: Option<u64>,

        /// Poll interval in seconds
        #[arg(short, long)]
        interval: Option<u64>,
    },
    /// Classify a status code or an error payload
    Classify {
        status: String,
    },
    /// Print the resolved configuration
    Config,
    /// Print the fault-injection parameters (file values with environment overrides)
    Faults,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log = logging::init(logging::BOOTSTRAP_LEVEL);

    let config = resolve_config(cli.config.as_deref())?;
    log.set_level(&config.observability.log_level);

    if cli.metrics || config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    match cli.command {
        Commands::Check { tool, wait, interval } => {
            let target = Target::from_name(tool.as_deref());
            let defaults = default_budget(&config.topology, &target)?;
            let budget = BackoffBudget::new(
                wait.map(Duration::from_secs).unwrap_or(defaults.wait()),
                interval.map(Duration::from_secs).unwrap_or(defaults.interval()),
            )?;

            let monitor = AvailabilityMonitor::new(HttpProbe::new(&config.topology)?);
            let up = monitor.active(budget, &target).await;

            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "target": target.label(),
                    "active": up,
                }))?
            );

            Ok(if up { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Commands::Classify { status } => {
            let input = match status.trim().parse::<i64>() {
                Ok(code) => StatusInput::Numeric(code),
                Err(_) => StatusInput::Opaque(status),
            };
            let result = classify(&input);
            metrics::record_classification(result.category);

            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Faults => {
            println!("{}", serde_json::to_string_pretty(&config.faults)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
