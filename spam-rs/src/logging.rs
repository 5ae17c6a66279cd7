//! Tracing subscriber setup

use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
///
/// Logs go to stderr; stdout is reserved for CLI output.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let dispatch = dispatch(config, std::io::stderr)?;
    tracing::dispatcher::set_global_default(dispatch)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))
}

fn dispatch<W>(config: &LoggingConfig, writer: W) -> anyhow::Result<Dispatch>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer);
    Ok(match config.format.as_str() {
        "json" => Dispatch::new(builder.json().finish()),
        "compact" => Dispatch::new(builder.compact().finish()),
        _ => Dispatch::new(builder.pretty().finish()),
    })
}
