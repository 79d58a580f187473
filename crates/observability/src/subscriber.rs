//! Subscriber installation.

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::SystemTime;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogFormat, ObservabilityConfig};

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

/// Install the global fmt subscriber described by `config`.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &ObservabilityConfig) {
    let installed = build(config, std::io::stdout, true).try_init();

    if installed.is_ok() {
        tracing::debug!(filter = %config.filter, format = ?config.format, "tracing initialized");
    }
}

/// An invalid filter falls back to `info`.
fn build<W>(config: &ObservabilityConfig, writer: W, ansi: bool) -> BoxedSubscriber
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi);

    match config.format {
        LogFormat::Json => {
            let json = builder.json().with_timer(SystemTime).with_target(false);
            Box::new(json.finish())
        }
        LogFormat::Pretty => Box::new(builder.pretty().with_target(true).finish()),
    }
}
