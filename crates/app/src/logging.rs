//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies to the
/// apiprobe crates and `warn` to everything else.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,apiprobe={default_level},apiprobe_application={default_level},apiprobe_infrastructure={default_level}"
        ))
    });

    // A second call (tests) leaves the first subscriber in place.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
