use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default filter for a `-v` count: warn, info, debug, trace.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "form_builder=warn",
        1 => "form_builder=info",
        2 => "form_builder=debug",
        _ => "form_builder=trace",
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over the verbosity flag.
/// Returns false when a subscriber was already installed.
pub fn init(verbose: u8) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );

    if subscriber.try_init().is_err() {
        return false;
    }
    tracing::debug!(verbose, "tracing initialized");
    true
}
