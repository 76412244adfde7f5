//! Command line and config file, merged as flags > file > defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context};
use clap::Parser;
use serde::Deserialize;
use studio_core::Texts;
use studio_engine::ServiceSettings;
use url::Url;

use super::logging::LogDestination;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_DOWNLOAD_DIR: &str = "downloads";
const DEFAULT_LOG_FILE: &str = "studio.log";

#[derive(Parser, Debug, Default)]
#[command(name = "studio", about = "Terminal client for the video processing service")]
pub struct Args {
    /// Base URL of the processing service [default: http://127.0.0.1:5000]
    #[arg(long)]
    pub server_url: Option<String>,
    /// RON file with settings and text overrides
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Status poll period in milliseconds [default: 1000]
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,
    /// Where processed videos are downloaded [default: ./downloads]
    #[arg(long)]
    pub download_dir: Option<PathBuf>,
    /// Where logs go
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    server_url: Option<String>,
    poll_interval_ms: Option<u64>,
    request_timeout_ms: Option<u64>,
    connect_timeout_ms: Option<u64>,
    download_dir: Option<PathBuf>,
    log: Option<LogDestination>,
    log_file: Option<PathBuf>,
    texts: TextOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TextOverrides {
    status_prefix: Option<String>,
    starting: Option<String>,
    stopped: Option<String>,
    saving_note: Option<String>,
    start_failed: Option<String>,
    stop_failed: Option<String>,
    generic_failure: Option<String>,
    delete_file_failed: Option<String>,
    delete_all_failed: Option<String>,
    delete_all_unreachable: Option<String>,
    page_unavailable: Option<String>,
    download_failed: Option<String>,
    download_error: Option<String>,
    confirm_delete_file: Option<String>,
    confirm_delete_all: Option<String>,
}

impl TextOverrides {
    fn apply(self, texts: &mut Texts) {
        let pairs = [
            (self.status_prefix, &mut texts.status_prefix),
            (self.starting, &mut texts.starting),
            (self.stopped, &mut texts.stopped),
            (self.saving_note, &mut texts.saving_note),
            (self.start_failed, &mut texts.start_failed),
            (self.stop_failed, &mut texts.stop_failed),
            (self.generic_failure, &mut texts.generic_failure),
            (self.delete_file_failed, &mut texts.delete_file_failed),
            (self.delete_all_failed, &mut texts.delete_all_failed),
            (self.delete_all_unreachable, &mut texts.delete_all_unreachable),
            (self.page_unavailable, &mut texts.page_unavailable),
            (self.download_failed, &mut texts.download_failed),
            (self.download_error, &mut texts.download_error),
            (self.confirm_delete_file, &mut texts.confirm_delete_file),
            (self.confirm_delete_all, &mut texts.confirm_delete_all),
        ];
        for (value, slot) in pairs {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub download_dir: PathBuf,
    pub log: LogDestination,
    pub log_file: PathBuf,
    pub texts: Texts,
}

pub fn load(args: Args) -> anyhow::Result<AppConfig> {
    let file = match args.config.as_deref() {
        Some(path) => read_file_config(path)?,
        None => FileConfig::default(),
    };
    merge(args, file)
}

fn read_file_config(path: &Path) -> anyhow::Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    ron::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
}

fn merge(args: Args, file: FileConfig) -> anyhow::Result<AppConfig> {
    let server_url = args
        .server_url
        .or(file.server_url)
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
    let base_url =
        Url::parse(&server_url).with_context(|| format!("invalid server url {server_url:?}"))?;
    ensure!(
        matches!(base_url.scheme(), "http" | "https"),
        "server url must be http or https, got {server_url:?}"
    );

    let mut service = ServiceSettings::new(base_url);
    if let Some(ms) = args.poll_interval_ms.or(file.poll_interval_ms) {
        ensure!(ms > 0, "poll interval must be positive");
        service.poll_interval = Duration::from_millis(ms);
    }
    service.connect_timeout = file.connect_timeout_ms.map(Duration::from_millis);
    service.request_timeout = file.request_timeout_ms.map(Duration::from_millis);

    let mut texts = Texts::default();
    file.texts.apply(&mut texts);

    Ok(AppConfig {
        service,
        download_dir: args
            .download_dir
            .or(file.download_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIR)),
        log: args.log.or(file.log).unwrap_or_default(),
        log_file: file
            .log_file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        texts,
    })
}
