//! Logging setup for binaries embedding the mutation chain.

use std::path::PathBuf;

use snafu::{ResultExt, Snafu};
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to initialize rolling file appender in {directory:?}"))]
    InitRollingFileAppender {
        source: InitError,
        directory: PathBuf,
    },

    #[snafu(display("failed to install the global tracing subscriber"))]
    InstallSubscriber { source: TryInitError },
}

/// Initializes `tracing` logging with the filter read from the environment variable `env`.
///
/// We encourage `env` to be the operator name plus `_LOG`, e.g. `PLATFORM_CONFIG_OPERATOR_LOG`.
/// If the variable is unset or invalid, the maximum log level is INFO.
///
/// Log output is additionally written to daily rotated files if `{env}_DIRECTORY` points to a
/// directory.
pub fn initialize_logging(env: &str, app_name: &str) -> Result<(), Error> {
    let log_directory = std::env::var_os(format!("{env}_DIRECTORY")).map(PathBuf::from);

    let file_layer = log_directory
        .as_ref()
        .map(|directory| {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_suffix(format!("{app_name}.log"))
                .max_log_files(6)
                .build(directory)
                .context(InitRollingFileAppenderSnafu { directory })
        })
        .transpose()?
        .map(|appender| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(appender)
        });

    Registry::default()
        .with(env_filter(env))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(file_layer)
        .try_init()
        .context(InstallSubscriberSnafu)?;

    // Only log once the subscriber is installed
    match log_directory {
        Some(directory) => tracing::info!(directory = %directory.display(), "file logging enabled"),
        None => tracing::debug!("file logging disabled, because no log directory set"),
    }

    Ok(())
}

fn env_filter(env: &str) -> EnvFilter {
    EnvFilter::try_from_env(env).unwrap_or_else(|_| {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .parse_lossy("")
    })
}
