//! Log output for the binary.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// The filter directive to install.
///
/// `-v` forces debug (`-vv` trace); otherwise `RUST_LOG` wins over the
/// configured level.
pub fn filter(config_level: &str, verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(config_level))
            .unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber, writing to stderr.
pub fn init(config_level: &str, verbose: u8) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(filter(config_level, verbose))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}
