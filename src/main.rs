//! appnet - 应用容器网络配置同步
//!
//! Usage:
//! - Sync network config: `appnet build-config <app>`
//! - Check config exists: `appnet config-exists <app>` (exit 0 if present, 1 otherwise)
//! - Print computed bindings: `appnet report <app>`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use appnet::domain::AppName;
use appnet::infra::AppLayout;
use appnet::{has_network_config, AppResult, EnvConfig, NetworkReconciler, ReconcileReport};

#[derive(Debug, Parser)]
#[command(name = "appnet", version, about = "Keep app container network bindings in sync")]
struct Cli {
    /// Apps root directory (overrides APPNET_ROOT / DOKKU_ROOT)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve IP / port for every running web container and emit network triggers
    BuildConfig { app: String },
    /// Exit 0 when IP.web.1 and PORT.web.1 both exist
    ConfigExists { app: String },
    /// Print the bindings a build-config pass would emit, as JSON
    Report { app: String },
}

/// report 子命令的输出
#[derive(Serialize)]
struct ReportOutput {
    generated_at: chrono::DateTime<chrono::Utc>,
    #[serde(flatten)]
    report: ReconcileReport,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let config = EnvConfig::from_env().with_root(cli.root);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli.command, config)) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: EnvConfig) -> AppResult<ExitCode> {
    match command {
        Command::BuildConfig { app } => {
            let reconciler = NetworkReconciler::from_env(&config)?;
            let report = reconciler.build_config(&app).await?;
            tracing::debug!(
                outcome = ?report.outcome,
                emitted = report.emitted,
                failed = report.failed,
                "Network config pass finished"
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::ConfigExists { app } => {
            let layout = AppLayout::new(config.require_root()?);
            let app = AppName::parse(&app)?;
            if has_network_config(&layout, &app) {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Report { app } => {
            let reconciler = NetworkReconciler::from_env(&config)?;
            let report = reconciler.inspect(&app).await?;
            let output = ReportOutput {
                generated_at: chrono::Utc::now(),
                report,
            };
            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::warn!(error = %e, "Failed to serialize report"),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
