use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LogConfig;

/// Install the global subscriber: console output, plus `config.file` when set
/// (JSON lines unless `config.json_file` is off).
///
/// `RUST_LOG` wins over `config.level`.
pub fn init(config: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("invalid log level {:?}", config.level))?;

    let (json_layer, text_layer) = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            let writer = Mutex::new(file);
            if config.json_file {
                (Some(fmt::layer().json().with_ansi(false).with_writer(writer)), None)
            } else {
                (None, Some(fmt::layer().with_ansi(false).with_writer(writer)))
            }
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}
