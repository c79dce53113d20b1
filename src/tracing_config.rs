use std::{env, io};

use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, fmt::MakeWriter, layer::SubscriberExt, registry::LookupSpan,
    util::SubscriberInitExt,
};

use crate::{config::GeneralSettings, schema::LogFormat};

/// Environment variable selecting the log format (`pretty` or `json`).
pub const LOG_FORMAT_ENV: &str = "CONFDOC_LOG_FORMAT";

/// Initialize tracing for the tool
///
/// Logs are written to stderr, so stdout only carries the documentation
/// model. `RUST_LOG` overrides `settings.log_level` and `CONFDOC_LOG_FORMAT`
/// overrides `settings.log_format`.
///
/// # Errors
/// Returns error if tracing subscriber initialization fails
pub fn init(settings: &GeneralSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(env_filter(settings))
        .with(fmt_layer(log_format(settings), io::stderr))
        .try_init()?;

    Ok(())
}

/// Runs `f` with a stderr subscriber built from `settings`, without touching
/// the global one.
///
/// Covers work that happens before [`init`] can run, such as loading the
/// configuration that carries the log settings.
pub fn scoped<T>(settings: &GeneralSettings, f: impl FnOnce() -> T) -> T {
    scoped_with(env_filter(settings), log_format(settings), io::stderr, f)
}

fn scoped_with<T, W>(filter: EnvFilter, format: LogFormat, writer: W, f: impl FnOnce() -> T) -> T
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer(format, writer));

    tracing::subscriber::with_default(subscriber, f)
}

fn env_filter(settings: &GeneralSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.to_string()))
}

fn log_format(settings: &GeneralSettings) -> LogFormat {
    env::var(LOG_FORMAT_ENV)
        .ok()
        .and_then(|format| format.parse().ok())
        .unwrap_or(settings.log_format)
}

fn fmt_layer<S, W>(format: LogFormat, writer: W) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_level(true)
            .with_writer(writer)
            .boxed(),
    }
}
