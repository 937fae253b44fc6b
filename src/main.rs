use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use url::Url;

use chat_widget::app::App;
use chat_widget::config::Config;
use chat_widget::controller::ChatController;
use chat_widget::delay::FixedDelay;
use chat_widget::handler;
use chat_widget::reply::HttpReplyService;
use chat_widget::tui::{self, EventHandler, Tui};
use chat_widget::ui;

#[derive(Parser, Debug)]
#[command(name = "chat-widget", version)]
#[command(about = "Terminal chat widget backed by an HTTP reply service")]
struct Cli {
    /// Reply service URL (overrides the config file)
    #[arg(long, env = "CHAT_WIDGET_ENDPOINT")]
    endpoint: Option<Url>,
    /// Delay before each request is sent, in milliseconds
    #[arg(long, env = "CHAT_WIDGET_DELAY_MS")]
    delay_ms: Option<u64>,
    /// Config file to read instead of the per-user one
    #[arg(long)]
    config: Option<PathBuf>,
    /// Where to write the log
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Write the effective endpoint and delay back to the config file
    #[arg(long)]
    save: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(delay_ms) = self.delay_ms {
            config.reply_delay_ms = delay_ms;
        }
        Ok(config)
    }

    /// The resolved config, written back to the config file when `--save`
    /// was given.
    fn effective_config(&self) -> Result<Config> {
        let config = self.resolve_config()?;
        if self.save {
            let path = config.save(self.config.as_deref())?;
            info!(path = %path.display(), "saved configuration");
        }
        Ok(config)
    }
}

fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("chat-widget")
        .join("chat-widget.log")
}

fn init_tracing(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    // The terminal belongs to the UI, so logs go to a file
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,chat_widget=debug")),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    init_tracing(&log_path)?;

    let config = cli.effective_config()?;
    info!(
        endpoint = %config.endpoint,
        delay_ms = config.reply_delay_ms,
        "starting chat widget"
    );

    let service = Arc::new(HttpReplyService::new(config.endpoint.clone()));
    let delay = Arc::new(FixedDelay(config.reply_delay()));
    let controller = ChatController::new(service, delay);
    let app = App::new(controller, config.endpoint.as_str());

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, app).await;
    tui::restore()?;

    if let Err(e) = &result {
        error!(error = %e, "chat widget exited with an error");
    }
    result
}

async fn run(terminal: &mut Tui, mut app: App) -> Result<()> {
    let mut events = EventHandler::new();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        tokio::select! {
            Some(event) = events.next() => handler::handle_event(&mut app, event),
            Some(turn) = app.controller.next_event() => app.controller.apply(turn),
            else => break,
        }
    }

    info!("chat widget closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_widget::config::{DEFAULT_ENDPOINT, DEFAULT_REPLY_DELAY_MS};
    use tempfile::tempdir;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["chat-widget"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn write_config(path: &Path, json: &str) {
        fs::write(path, json).unwrap();
    }

    #[test]
    fn config_file_values_apply_without_flags() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        write_config(
            &path,
            r#"{"endpoint": "http://example.test:9000/chat", "reply_delay_ms": 250}"#,
        );

        let config = cli(&["--config", path.to_str().unwrap()])
            .resolve_config()
            .unwrap();
        assert_eq!(config.endpoint.as_str(), "http://example.test:9000/chat");
        assert_eq!(config.reply_delay_ms, 250);
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        write_config(
            &path,
            r#"{"endpoint": "http://example.test:9000/chat", "reply_delay_ms": 250}"#,
        );

        let config = cli(&[
            "--config",
            path.to_str().unwrap(),
            "--endpoint",
            "http://127.0.0.1:5000/chat",
            "--delay-ms",
            "0",
        ])
        .resolve_config()
        .unwrap();
        assert_eq!(config.endpoint.as_str(), "http://127.0.0.1:5000/chat");
        assert_eq!(config.reply_delay_ms, 0);
    }

    #[test]
    fn partial_config_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        write_config(&path, r#"{"reply_delay_ms": 10}"#);

        let config = cli(&["--config", path.to_str().unwrap()])
            .resolve_config()
            .unwrap();
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.reply_delay_ms, 10);
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let config = cli(&["--config", path.to_str().unwrap()])
            .effective_config()
            .unwrap();
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.reply_delay_ms, DEFAULT_REPLY_DELAY_MS);
        assert!(!path.exists());
    }

    #[test]
    fn save_writes_effective_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let saved = cli(&[
            "--config",
            path.to_str().unwrap(),
            "--endpoint",
            "http://127.0.0.1:5000/chat",
            "--save",
        ])
        .effective_config()
        .unwrap();

        let reloaded = Config::load(Some(&path)).unwrap();
        assert_eq!(reloaded, saved);
        assert_eq!(reloaded.endpoint.as_str(), "http://127.0.0.1:5000/chat");
        assert_eq!(reloaded.reply_delay_ms, DEFAULT_REPLY_DELAY_MS);
    }

    #[test]
    fn invalid_endpoint_flag_is_rejected() {
        let result = Cli::try_parse_from(["chat-widget", "--endpoint", "not a url"]);
        assert!(result.is_err());
    }
}
