use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use constants::{GIT_REVISION, GIT_VERSION, VERSION, VERSION_STRING};
use itertools::Itertools;
use logging::{LoggingCLIConfig, setup_logging};
use stamp::BuildStamp;
use tracing::{debug, info, warn};

// used in integration tests
#[cfg(test)]
use assert_cmd as _;
#[cfg(test)]
use predicates as _;
#[cfg(test)]
use tempfile as _;

#[cfg(test)]
mod build_env;
mod constants;
mod logging;
mod stamp;

/// Reports and verifies the version metadata stamped into this build.
///
/// `GIT_VERSION` and `GIT_REVISION` are fixed at compile time.
#[derive(Debug, Parser)]
#[command(version = VERSION_STRING)]
struct Args {
    #[clap(subcommand)]
    command: Cmd,

    /// Logging config.
    #[clap(flatten)]
    logging_cfg: LoggingCLIConfig,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Print the build stamp.
    Show {
        /// Output format.
        #[clap(
            long,
            value_enum,
            default_value_t = OutputFormat::Text,
            env = "BUILD_STAMP_FORMAT"
        )]
        format: OutputFormat,
    },

    /// Verify that the build stamp was populated.
    ///
    /// Fails and names every constant that is empty.
    Check {
        /// Also reject the `unknown` placeholder.
        #[clap(long, env = "BUILD_STAMP_STRICT")]
        strict: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let dotenv_path = match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(e) if e.not_found() => None,
        Err(e) => {
            return Err(e).context("load dotenv");
        }
    };
    let args = Args::parse();
    setup_logging(args.logging_cfg).context("logging setup")?;
    debug!(
        package_version = VERSION,
        version = GIT_VERSION,
        revision = GIT_REVISION,
        dotenv_path = dotenv_path
            .as_ref()
            .map(|p| tracing::field::display(p.display())),
        "start build stamp"
    );

    let stamp = BuildStamp::current();
    match args.command {
        Cmd::Show { format } => show(stamp, format),
        Cmd::Check { strict } => check(stamp, strict),
    }
}

fn show(stamp: BuildStamp<'_>, format: OutputFormat) -> Result<()> {
    let out = match format {
        OutputFormat::Text => stamp.to_string(),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&stamp).context("serialize build stamp")?
        }
    };
    println!("{out}");
    Ok(())
}

fn check(stamp: BuildStamp<'_>, strict: bool) -> Result<()> {
    let res = if strict {
        stamp.validate_strict()
    } else {
        stamp.validate()
    };

    if let Err(e) = &res {
        let fields = e.fields().iter().join(",");
        warn!(%fields, strict, "build stamp check failed");
    }
    res.context("check build stamp")?;

    info!(%stamp, strict, "build stamp complete");
    Ok(())
}
