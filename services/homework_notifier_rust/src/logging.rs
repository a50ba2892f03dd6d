//! Logger setup: every line goes to the persistent log file and to stdout.

use anyhow::{Context, Result};
use chrono::Local;
use env_logger::{Builder, Env, Target};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

pub const DEFAULT_FILTER: &str = "info,homework_notifier_rust=debug,homework_rust_core=debug";

/// Writes every buffer to both the log file and stdout.
struct TeeWriter {
    file: File,
    stdout: io::Stdout,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        // stdout is best-effort; the file is the record.
        let _ = self.stdout.write_all(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let _ = self.stdout.flush();
        self.file.flush()
    }
}

/// Render one log line as `timestamp, LEVEL, target, message`.
pub fn format_line(timestamp: &str, level: log::Level, target: &str, message: &str) -> String {
    format!("{timestamp}, {level}, {target}, {message}")
}

pub fn init(log_path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%d %H:%M:%S,%3f").to_string();
            let line = format_line(&ts, record.level(), record.target(), &record.args().to_string());
            writeln!(buf, "{line}")
        })
        .target(Target::Pipe(Box::new(TeeWriter {
            file,
            stdout: io::stdout(),
        })))
        .try_init()
        .context("Failed to initialize logger")?;

    Ok(())
}
