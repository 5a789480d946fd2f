use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use crate::models::method::{ParseMode, SendMethod};
use crate::services::settings::{
    AppConfig, BroadcastConfig, OutputConfig, RecipientsConfig, TelegramConfig,
};

/// tgcast - рассылка сообщений через Telegram Bot API
#[derive(Parser, Debug)]
#[command(name = "tgcast", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send the payload to every recipient
    Send(SendArgs),
    /// Print the recipient ids found in a Telegram export file
    Extract {
        /// Path to the export `.json` file
        path: PathBuf,
    },
    /// GET an arbitrary Bot API URL and report its `ok` flag
    Probe {
        url: String,
    },
}

/// Flags override the values from the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct SendArgs {
    /// Путь к файлу конфигурации
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bot token (also TELEGRAM_BOT_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Newline separated recipient ids
    #[arg(long)]
    pub ids_file: Option<PathBuf>,

    /// Telegram export file; replaces any other ids
    #[arg(long = "import")]
    pub export_file: Option<PathBuf>,

    /// sendMessage, sendPhoto, sendVideo, ...
    #[arg(short, long)]
    pub method: Option<SendMethod>,

    #[arg(long)]
    pub text: Option<String>,

    #[arg(long)]
    pub caption: Option<String>,

    /// HTML, MarkdownV2 or Markdown
    #[arg(long)]
    pub parse_mode: Option<ParseMode>,

    /// File to upload for media methods
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Pause between batches, milliseconds
    #[arg(long)]
    pub interval: Option<u64>,

    /// Start time, RFC 3339 (e.g. 2026-10-19T18:00:00Z)
    #[arg(long)]
    pub schedule: Option<DateTime<Utc>>,

    /// Delivery log path (default broadcast_logs.json)
    #[arg(long)]
    pub logs: Option<PathBuf>,

    /// Print every outcome
    #[arg(short, long)]
    pub verbose: bool,
}

impl SendArgs {
    /// Copies every flag that was given into `cfg`.
    pub fn apply(&self, cfg: &mut AppConfig) {
        let telegram = cfg.telegram.get_or_insert_with(TelegramConfig::default);
        if let Some(token) = self.token.clone() {
            telegram.bot_token = Some(token);
        }

        let b = cfg.broadcast.get_or_insert_with(BroadcastConfig::default);
        if self.method.is_some() {
            b.method = self.method;
        }
        if let Some(text) = self.text.clone() {
            b.text = Some(text);
        }
        if let Some(caption) = self.caption.clone() {
            b.caption = Some(caption);
        }
        if self.parse_mode.is_some() {
            b.parse_mode = self.parse_mode;
        }
        if let Some(file) = self.file.clone() {
            b.file = Some(file);
        }
        if self.batch_size.is_some() {
            b.batch_size = self.batch_size;
        }
        if self.interval.is_some() {
            b.interval_ms = self.interval;
        }
        if self.schedule.is_some() {
            b.schedule = self.schedule;
        }

        let r = cfg.recipients.get_or_insert_with(RecipientsConfig::default);
        if let Some(path) = self.ids_file.clone() {
            // flag replaces file-configured ids
            r.ids = None;
            r.ids_file = Some(path);
        }
        if let Some(path) = self.export_file.clone() {
            r.export_file = Some(path);
        }

        let o = cfg.output.get_or_insert_with(OutputConfig::default);
        if let Some(path) = self.logs.clone() {
            o.logs_path = Some(path);
        }
        if self.verbose {
            o.verbose = Some(true);
        }
    }
}
