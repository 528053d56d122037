use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Real-time channel
    pub chat_reply_delay: Duration,
    pub notify_channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web_host: "0.0.0.0".to_string(),
            web_port: 5000,
            chat_reply_delay: Duration::from_millis(1500),
            notify_channel_capacity: 64,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    /// A `.env` file in the working directory is honoured if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            web_host: env::var("WEB_HOST").unwrap_or(defaults.web_host),
            web_port: parsed_env("WEB_PORT")?.unwrap_or(defaults.web_port),
            chat_reply_delay: parsed_env::<u64>("CHAT_REPLY_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.chat_reply_delay),
            notify_channel_capacity: parsed_env("NOTIFY_CHANNEL_CAPACITY")?
                .unwrap_or(defaults.notify_channel_capacity),
        };

        if config.notify_channel_capacity == 0 {
            anyhow::bail!("NOTIFY_CHANNEL_CAPACITY must be greater than zero");
        }

        tracing::info!(
            host = %config.web_host,
            port = config.web_port,
            chat_reply_delay_ms = config.chat_reply_delay.as_millis() as u64,
            notify_channel_capacity = config.notify_channel_capacity,
            "Config loaded"
        );
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web_host, self.web_port)
    }
}

fn parsed_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{key} must be a number, got {raw:?}")),
        Err(_) => Ok(None),
    }
}
