// logging.rs - tracing subscriber setup.
//
// Logs go to the configured file when there is one. Otherwise one-shot
// commands log to stderr and the terminal UI installs no subscriber, since
// anything written to the terminal would corrupt the screen.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use grt_tracker::LogConfig;
use tracing_subscriber::EnvFilter;

pub fn init(config: &LogConfig, interactive: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(format!(
            "grt_cli={level},grt_tracker={level},grt_suggest={level}",
            level = config.level
        ))
    })?;

    match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None if interactive => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
