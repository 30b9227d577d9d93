use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use susu_collector::script::load_scripts_or_empty;
use susu_collector::terminal::{self, RunSummary};
use susu_collector::{
    create_router, AppState, Collector, Config, DatasetRecorder, ExporterFactory, SessionConfig,
};
use tokio::io::BufReader;
use tracing::info;

#[derive(Parser)]
#[command(name = "susu-collector")]
#[command(about = "Collect transcripts for prompt scripts into a dataset file")]
struct Cli {
    /// Config file (without extension)
    #[arg(short, long, default_value = "config/susu-collector")]
    config: String,

    /// Scripts file (overrides config)
    #[arg(short, long, global = true)]
    scripts: Option<PathBuf>,

    /// Dataset file (overrides config)
    #[arg(short, long, global = true)]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Collect transcripts interactively in the terminal (default)
    Run,
    /// Serve the collection session over HTTP
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        bind: Option<String>,
        /// Port (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Show what has been recorded in the dataset
    Status,
}

fn build_collector(cfg: &Config) -> Result<Collector> {
    let scripts = load_scripts_or_empty(&cfg.collector.scripts_path);
    let recorder = DatasetRecorder::new(&cfg.collector.dataset_path)?;

    let session_config = SessionConfig {
        advance_on_write_failure: cfg.collector.advance_on_write_failure,
        ..SessionConfig::default()
    };

    Ok(Collector::new(session_config, scripts, recorder)
        .with_exporter(ExporterFactory::create(&cfg.export), cfg.export.clone()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut cfg = Config::load(&cli.config)?;

    if let Some(scripts) = cli.scripts {
        cfg.collector.scripts_path = scripts;
    }
    if let Some(dataset) = cli.dataset {
        cfg.collector.dataset_path = dataset;
    }

    info!("Susu Collector v{}", env!("CARGO_PKG_VERSION"));
    info!("Loaded config: {}", cfg.service.name);
    info!("Scripts: {}", cfg.collector.scripts_path.display());
    info!("Dataset: {}", cfg.collector.dataset_path.display());

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let collector = build_collector(&cfg)?;
            let input = BufReader::new(tokio::io::stdin());

            match terminal::run(&collector, input, tokio::io::stdout()).await? {
                RunSummary::NoScripts => info!("Nothing to collect"),
                RunSummary::Interrupted { remaining } => {
                    info!("Stopped with {} scripts remaining", remaining)
                }
                RunSummary::Completed { exported } => {
                    info!("Session complete (exported={})", exported)
                }
            }
        }

        Command::Serve { bind, port } => {
            let collector = Arc::new(build_collector(&cfg)?);
            let addr = format!(
                "{}:{}",
                bind.unwrap_or(cfg.service.http.bind),
                port.unwrap_or(cfg.service.http.port)
            );

            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;

            info!("HTTP server listening on {}", addr);

            axum::serve(listener, create_router(AppState::new(collector)))
                .await
                .context("HTTP server error")?;
        }

        Command::Status => {
            let recorder = DatasetRecorder::new(&cfg.collector.dataset_path)?;
            let entries = recorder.entries().await?;

            println!("Dataset: {}", recorder.path().display());
            println!("Entries: {}", entries.len());
            for entry in entries.iter().rev().take(5).rev() {
                println!("  {}", entry);
            }
        }
    }

    Ok(())
}
