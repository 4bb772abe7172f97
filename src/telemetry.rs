use tracing::Subscriber;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// JSON-formatted subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter` when the variable is unset or invalid.
pub fn get_subscriber(default_filter: &str) -> impl Subscriber + Send + Sync {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let formatting_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .json();

    Registry::default().with(env_filter).with(formatting_layer)
}

/// Install the subscriber globally. `log` records (actix-web's access log
/// among them) are bridged into it.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync + 'static) {
    subscriber.init();
}
