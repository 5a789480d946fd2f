pub mod cli;
pub mod error;
pub mod models;
pub mod presenters;
pub mod services;
pub mod subsystems;
pub mod traits;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, anyhow};
use tokio_graceful_shutdown::{SubsystemBuilder, SubsystemHandle, Toplevel};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::{Cli, Command, SendArgs};
use crate::presenters::ConsolePresenter;
use crate::services::api_probe::probe_endpoint;
use crate::services::dispatcher::Broadcaster;
use crate::services::extractor::extract_ids_from_file;
use crate::services::settings::{AppConfig, DEFAULT_CONFIG_FILE, apply_env_overrides, load_config};
use crate::services::telegram_client::RealTelegramApi;
use crate::subsystems::broadcast::BroadcastSubsystem;
use crate::traits::presenter::{NoticeLevel, Presenter};
use crate::traits::telegram_api::TelegramApi;

/// Initialize structured logging (default to info if RUST_LOG not set).
///
/// Logs go to stderr so stdout stays clean for ids and progress. With
/// `log_file` a plain-text copy is appended there; keep the guard alive.
pub fn init_logging(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let log_spec = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    match log_file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = path.file_name().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("tgcast.log"));
            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            let _ = tracing_subscriber::registry()
                .with(EnvFilter::new(log_spec))
                .with(console)
                .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer))
                .try_init();
            Some(guard)
        }
        None => {
            let _ = tracing_subscriber::registry()
                .with(EnvFilter::new(log_spec))
                .with(console)
                .try_init();
            None
        }
    }
}

/// High-level entrypoint for the parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Send(args) => run_send(args).await,
        Command::Extract { path } => {
            let _guard = init_logging(None);
            run_extract(&path)
        }
        Command::Probe { url } => {
            let _guard = init_logging(None);
            run_probe(&url).await
        }
    }
}

/// Config file (if any) + env + flags, in increasing priority.
pub fn resolve_config(args: &SendArgs) -> anyhow::Result<AppConfig> {
    let mut cfg = match args.config.as_ref() {
        Some(path) => load_config(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => load_config(DEFAULT_CONFIG_FILE)?,
        None => AppConfig::default(),
    };
    apply_env_overrides(&mut cfg);
    args.apply(&mut cfg);
    Ok(cfg)
}

pub async fn run_send(args: SendArgs) -> anyhow::Result<()> {
    let cfg = resolve_config(&args)?;
    let _guard = init_logging(cfg.log_file().as_deref());
    run_with_config(cfg).await
}

/// Loads recipients and payload from `cfg` and runs one broadcast as a subsystem.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let presenter: Arc<dyn Presenter> = Arc::new(ConsolePresenter::new(cfg.verbose()));

    let recipients = match cfg.load_recipients() {
        Ok(list) => list,
        Err(e) => {
            presenter.notify(NoticeLevel::Error, e.title(), &e.to_string());
            return Err(e.into());
        }
    };
    let request = cfg.build_request().await?;

    let api: Arc<dyn TelegramApi> = Arc::new(RealTelegramApi::new(cfg.api_base_url(), cfg.request_timeout())?);
    let broadcaster = Broadcaster::builder().api(api).presenter(presenter).build();

    let subsystem = BroadcastSubsystem::builder()
        .broadcaster(broadcaster)
        .request(request)
        .recipients(recipients)
        .logs_path(cfg.logs_path())
        .build();

    info!(api_base_url = %cfg.api_base_url(), "tgcast starting");
    Toplevel::new(move |s: SubsystemHandle| async move {
        s.start(SubsystemBuilder::new("broadcast", move |h: SubsystemHandle| subsystem.run(h)));
    })
    .catch_signals()
    .handle_shutdown_requests(Duration::from_secs(5))
    .await
    .map_err(|e| anyhow!("shutdown error: {}", e))
}

pub fn run_extract(path: &Path) -> anyhow::Result<()> {
    let ids = extract_ids_from_file(path).with_context(|| format!("cannot extract ids from {}", path.display()))?;
    for id in ids {
        println!("{}", id);
    }
    Ok(())
}

pub async fn run_probe(url: &str) -> anyhow::Result<()> {
    let presenter = ConsolePresenter::default();
    match probe_endpoint(&reqwest::Client::new(), url).await {
        Ok(outcome) => {
            let (level, title, text) = outcome.notice();
            presenter.notify(level, title, &text);
            Ok(())
        }
        Err(e) => {
            presenter.notify(NoticeLevel::Error, e.title(), &e.to_string());
            Err(e.into())
        }
    }
}
