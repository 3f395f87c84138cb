use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use taskd::{
    cli::{client::ApiClient, task_ui::TaskUi},
    config::DaemonConfig,
    rest,
    storage::Storage,
    tasks::TaskStorage,
    AppContext,
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "taskd",
    about = "Local task manager daemon with a REST API and terminal UI",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// REST API server port
    #[arg(long, env = "TASKD_PORT")]
    port: Option<u16>,

    /// Data directory for config and the SQLite database
    #[arg(long, env = "TASKD_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TASKD_LOG")]
    log: Option<String>,

    /// Bind address for the REST server (default: 127.0.0.1; use 0.0.0.0 for LAN access)
    #[arg(long, env = "TASKD_BIND")]
    bind_address: Option<String>,

    /// Write logs to this file path (rotated daily). Optional.
    #[arg(long, env = "TASKD_LOG_FILE")]
    log_file: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the API server (default when no subcommand given).
    ///
    /// Runs taskd in the foreground.
    ///
    /// Examples:
    ///   taskd serve
    ///   taskd
    Serve,
    /// Open the terminal client against a running server.
    ///
    /// Examples:
    ///   taskd ui
    ///   taskd ui --url http://localhost:4320
    Ui {
        /// API base URL (default: http://127.0.0.1:{port})
        #[arg(long, env = "TASKD_URL")]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // ── Logging setup ────────────────────────────────────────────────────────
    // Init once, before any tracing calls.
    let log_level = args.log.as_deref().unwrap_or("info").to_owned();
    let log_format = std::env::var("TASKD_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let _file_guard = setup_logging(&log_level, args.log_file.as_deref(), &log_format);

    match args.command {
        Some(Command::Ui { url }) => {
            // Client command: config is only needed for the default port.
            let config = DaemonConfig::new(args.port, args.data_dir, None);
            let url = url.unwrap_or_else(|| config.api_base_url());
            let client = ApiClient::new(&url)?;
            TaskUi::new(client, url).run().await?;
        }
        None | Some(Command::Serve) => {
            run_server(args.port, args.data_dir, args.bind_address).await?;
        }
    }

    Ok(())
}

async fn run_server(
    port: Option<u16>,
    data_dir: Option<std::path::PathBuf>,
    bind_address: Option<String>,
) -> Result<()> {
    let config = Arc::new(DaemonConfig::new(port, data_dir, bind_address));
    info!(data_dir = %config.data_dir.display(), "starting taskd");

    let storage = Storage::new(&config.data_dir).await?;
    let tasks = Arc::new(TaskStorage::new(storage.pool()));

    let ctx = Arc::new(AppContext {
        config,
        tasks,
        started_at: std::time::Instant::now(),
    });

    rest::start_rest_server(ctx).await
}

/// Initialize the tracing subscriber.
/// If `log_file` is set, logs go to both stdout and a daily-rolling file.
/// Returns a `WorkerGuard` that must stay alive for the process lifetime.
///
/// `log_format` may be `"pretty"` (default, human-readable compact format) or
/// `"json"` (structured JSON for log aggregators).
///
/// If the log directory cannot be created, falls back to stdout-only logging
/// with a warning. Never panics.
fn setup_logging(
    log_level: &str,
    log_file: Option<&std::path::Path>,
    log_format: &str,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let use_json = log_format == "json";

    if let Some(path) = log_file {
        let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let filename = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("taskd.log"));

        // Ensure the directory exists before tracing-appender tries to open it.
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!(
                "warn: could not create log directory '{}': {e}, falling back to stdout",
                dir.display()
            );
            if use_json {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(log_level)
                    .init();
            } else {
                tracing_subscriber::fmt()
                    .with_env_filter(log_level)
                    .compact()
                    .init();
            }
            return None;
        }

        let appender = tracing_appender::rolling::daily(dir, filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        if use_json {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().json())
                .with(fmt::layer().json().with_writer(non_blocking))
                .init();
        } else {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().compact())
                .with(fmt::layer().with_writer(non_blocking))
                .init();
        }

        Some(guard)
    } else if use_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(log_level)
            .init();
        None
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(log_level)
            .compact()
            .init();
        None
    }
}
