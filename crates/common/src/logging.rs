//! Logging and tracing initialization.
//!
//! Events go to stderr, to a rotating log file, or both. The level filter
//! comes from `RUST_LOG` when set, otherwise from [`LoggingConfig::level`].

use std::path::Path;

use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::{LogRotation, LoggingConfig};
use crate::error::{GroupingError, GroupingResult};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the global tracing subscriber with the given configuration.
///
/// Calling this more than once is harmless; only the first subscriber is
/// installed.
pub fn init_logging(config: &LoggingConfig) -> GroupingResult<()> {
    let subscriber = build_subscriber(config)?;
    tracing::subscriber::set_global_default(subscriber).ok();
    Ok(())
}

/// Build the subscriber described by `config` without installing it.
pub fn build_subscriber(
    config: &LoggingConfig,
) -> GroupingResult<impl Subscriber + Send + Sync + 'static> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.stderr {
        layers.push(format_layer(config.json, std::io::stderr, true));
    }
    if let Some(path) = &config.file {
        let appender = file_appender(path, config)?;
        layers.push(format_layer(config.json, appender, false));
    }

    Ok(tracing_subscriber::registry()
        .with(layers)
        .with(env_filter))
}

fn format_layer<W>(json: bool, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

fn file_appender(path: &Path, config: &LoggingConfig) -> GroupingResult<RollingFileAppender> {
    let prefix = path.file_name().ok_or_else(|| {
        GroupingError::config(format!("log file path {} has no file name", path.display()))
    })?;
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let rotation = match config.rotation {
        LogRotation::Minutely => Rotation::MINUTELY,
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
        LogRotation::Never => Rotation::NEVER,
    };

    RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(prefix.to_string_lossy().into_owned())
        .max_log_files(config.max_files)
        .build(dir)
        .map_err(|e| GroupingError::config(format!("cannot open log file {}: {e}", path.display())))
}
