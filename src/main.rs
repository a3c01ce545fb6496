use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tcg_tracker::api::{build_router, state::AppState};
use tcg_tracker::calculate::{compute_global_report_now, compute_project_report};
use tcg_tracker::config::AppConfig;
use tcg_tracker::models::{MatchRecord, Project, ProjectId};
use tcg_tracker::storage::{
    validate_tcg_id, JsonlMatchStore, JsonlReader, MatchStore, StorageConfig,
};

#[derive(Parser)]
#[command(name = "tcg-tracker")]
#[command(about = "Trading card game match tracker and analytics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides config
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the reporting API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Compute an analytics report and print it as JSON
    Report {
        /// TCG to report on
        #[arg(long)]
        tcg: String,

        /// Restrict to a single project
        #[arg(long)]
        project: Option<String>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Import JSONL files of match records and/or projects
    Import {
        /// TCG the files belong to
        #[arg(long)]
        tcg: String,

        /// JSONL file of match records
        #[arg(long)]
        matches: Option<PathBuf>,

        /// JSONL file of projects
        #[arg(long)]
        projects: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting tcg-tracker v{}", env!("CARGO_PKG_VERSION"));

    let store = JsonlMatchStore::new(StorageConfig::new(config.data_dir.clone()));
    let settings = config.analytics_settings();

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState::new(Arc::new(store), settings)
                .with_cors_origin(config.server.cors_origin.clone());
            let app = build_router(state);

            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Reporting API: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Report {
            tcg,
            project,
            pretty,
        } => {
            validate_tcg_id(&tcg)?;
            let records = store.load_matches(&tcg).await?;
            let projects = store.load_projects(&tcg).await?;

            let report = match project {
                Some(project) => {
                    let project_id = ProjectId::from(project);
                    if !projects.iter().any(|p| p.id == project_id) {
                        anyhow::bail!("Project {} not found in {}", project_id, tcg);
                    }
                    compute_project_report(
                        &project_id,
                        &records,
                        &projects,
                        &settings,
                        chrono::Utc::now(),
                    )
                }
                None => compute_global_report_now(&records, &projects, &settings),
            };

            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{}", json);
        }
        Commands::Import {
            tcg,
            matches,
            projects,
        } => {
            validate_tcg_id(&tcg)?;
            if matches.is_none() && projects.is_none() {
                eprintln!("Specify --matches and/or --projects");
                return Ok(());
            }

            if let Some(path) = projects {
                let incoming = JsonlReader::<Project>::new(path.clone()).read_all()?;
                let stray = incoming
                    .iter()
                    .filter(|p| p.tcg_id.as_str() != tcg)
                    .count();
                if stray > 0 {
                    tracing::warn!("{} projects in {:?} belong to another TCG", stray, path);
                }
                let added = store.append_projects(&tcg, incoming)?;
                println!("Projects imported: {}", added);
            }

            if let Some(path) = matches {
                let incoming = JsonlReader::<MatchRecord>::new(path.clone()).read_all()?;
                let unrecognized = incoming
                    .iter()
                    .filter(|r| !r.result.is_recognized())
                    .count();
                if unrecognized > 0 {
                    tracing::warn!(
                        "{} records in {:?} have an unrecognized result and will not be tallied",
                        unrecognized,
                        path
                    );
                }
                let added = store.append_matches(&tcg, incoming)?;
                println!("Matches imported: {}", added);
            }
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
