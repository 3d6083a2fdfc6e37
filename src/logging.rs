use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::path::Path;

pub const LOG_ENV: &str = "POMOFLOW_LOG";

/// Filter used when `POMOFLOW_LOG` is unset. Stderr only gets warnings so
/// the one-shot subcommands print clean output.
fn default_filter(log_file: Option<&Path>) -> &'static str {
    if log_file.is_some() {
        "info"
    } else {
        "warn"
    }
}

/// Installs the global logger. With `log_file` set, output is appended there
/// instead of stderr so it stays out of the terminal UI.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let mut builder = Builder::from_env(Env::new().filter_or(LOG_ENV, default_filter(log_file)));

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}
