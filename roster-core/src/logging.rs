//! src/logging.rs
//! ============================================================================
//! # Logging: rolling file output for the terminal UI
//!
//! The UI owns stdout/stderr while it runs, so events go to a daily rolling
//! file (`<dir>/<prefix>.YYYY-MM-DD`) through a non-blocking writer. Keep the
//! returned [`WorkerGuard`] alive until shutdown or buffered lines are lost.
//!
//! Line format: `SEQ TIMESTAMP LEVEL [file:line module] message fields`

use std::{
    path::{Component, Path, PathBuf},
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use compact_str::CompactString;
use tokio::fs as TokioFs;
use tracing::{Event, Metadata, Subscriber};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::Directive,
    fmt::{
        self, FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

use crate::config::LogConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub log_dir: PathBuf,
    pub file_prefix: CompactString,
    pub level: CompactString,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            file_prefix: CompactString::const_new("roster"),
            level: CompactString::const_new("info"),
        }
    }
}

impl From<&LogConfig> for LoggerConfig {
    fn from(config: &LogConfig) -> Self {
        Self {
            log_dir: config.dir.clone(),
            level: config.level.clone(),
            ..Self::default()
        }
    }
}

pub struct Logger;

impl Logger {
    /// Install the global subscriber. Call once near the start of `main`.
    pub async fn init_tracing(config: &LoggerConfig) -> Result<WorkerGuard> {
        validate_log_directory(&config.log_dir)?;
        setup_log_directory(&config.log_dir).await?;

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(config.file_prefix.as_str())
            .build(&config.log_dir)
            .context("Failed to create rolling log file")?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let filter = EnvFilter::from_default_env().add_directive(
            Directive::from_str(&config.level).context("Invalid log level in config")?,
        );

        let file_layer = fmt::layer()
            .event_format(SeqFileMod)
            .with_writer(writer)
            .with_ansi(false)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(file_layer)
            .try_init()
            .context("Failed to install global tracing subscriber")?;

        Ok(guard)
    }
}

fn validate_log_directory(path: &Path) -> Result<()> {
    if path.components().count() == 0 {
        bail!("Invalid log directory: empty path");
    }

    if path.components().any(|c| c == Component::ParentDir) {
        bail!(
            "Invalid log directory {}: path contains parent directory references",
            path.display()
        );
    }

    Ok(())
}

async fn setup_log_directory(log_dir: &Path) -> Result<()> {
    TokioFs::create_dir_all(log_dir)
        .await
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))
}

static SEQ: AtomicU64 = AtomicU64::new(1);

/// `[SEQ] TIMESTAMP LEVEL [file:line mod::path] message`
struct SeqFileMod;

impl<S, N> FormatEvent<S, N> for SeqFileMod
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut w: Writer<'_>,
        ev: &Event<'_>,
    ) -> std::fmt::Result {
        let seq = SEQ.fetch_add(1, Ordering::Relaxed);

        let meta: &'static Metadata<'static> = ev.metadata();
        write!(
            w,
            "{seq:06} {} {:5} [{}:{} {}] ",
            Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            meta.level(),
            meta.file().unwrap_or("??"),
            meta.line().unwrap_or(0),
            meta.module_path().unwrap_or("???"),
        )?;

        ctx.field_format().format_fields(w.by_ref(), ev)?;
        writeln!(w)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for SharedBuf {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_rejects_parent_dir_and_empty() {
        assert!(validate_log_directory(Path::new("")).is_err());
        assert!(validate_log_directory(Path::new("../logs")).is_err());
        assert!(validate_log_directory(Path::new("logs/app")).is_ok());
    }

    #[test]
    fn test_line_format() {
        let buf = SharedBuf::default();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .event_format(SeqFileMod)
                .with_writer(buf.clone())
                .with_ansi(false),
        );

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(rows = 3, "Page rendered");
        });

        let out = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(out.contains("INFO"));
        assert!(out.contains("logging.rs:"));
        assert!(out.contains("roster_core::logging::tests"));
        assert!(out.contains("Page rendered"));
        assert!(out.contains("rows=3"));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_from_log_config() {
        let cfg = LogConfig {
            dir: PathBuf::from("var/log"),
            level: CompactString::const_new("debug"),
        };
        let logger = LoggerConfig::from(&cfg);
        assert_eq!(logger.log_dir, PathBuf::from("var/log"));
        assert_eq!(logger.level, "debug");
        assert_eq!(logger.file_prefix, "roster");
    }
}
