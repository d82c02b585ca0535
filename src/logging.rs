//! Logging setup.
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::subscriber::set_global_default;
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

/// Output format of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormat {
    /// Human-readable, one event per line.
    Full,

    /// Like `full`, but shorter.
    Compact,

    /// One JSON object per event.
    Json,
}

/// Logging CLI config.
#[derive(Debug, Clone, Args)]
pub(crate) struct LoggingCLIConfig {
    /// Log filter, in `EnvFilter` directive syntax.
    #[clap(long, default_value = "warn", env = "RUST_LOG")]
    log_filter: String,

    /// Log format.
    #[clap(
        long,
        value_enum,
        default_value_t = LogFormat::Full,
        env = "BUILD_STAMP_LOG_FORMAT"
    )]
    log_format: LogFormat,
}

impl LoggingCLIConfig {
    fn filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.log_filter)
            .with_context(|| format!("invalid log filter: {}", self.log_filter))
    }
}

/// Install global logger.
///
/// Logs go to stderr so that stdout only carries command output.
pub(crate) fn setup_logging(config: LoggingCLIConfig) -> Result<()> {
    let filter = config.filter()?;

    LogTracer::init().context("bridge `log` records")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Full => set_global_default(builder.finish()),
        LogFormat::Compact => set_global_default(builder.compact().finish()),
        LogFormat::Json => set_global_default(builder.json().finish()),
    }
    .context("set global subscriber")?;

    Ok(())
}
