//! File logging setup.
//!
//! The terminal owns stdout while the TUI runs, so log output goes to a file
//! configured in `[logging]`. When logging is disabled the `log` macros are
//! no-ops.

use anyhow::{Context, Result};

use crate::config::LoggingConfig;

/// Initialize the global logger from configuration.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ));
        })
        .level(log::LevelFilter::Info)
        .chain(fern::log_file(&config.file).with_context(|| format!("Failed to open log file: {}", config.file))?)
        .apply()
        .context("Failed to initialize logger")?;

    Ok(())
}
