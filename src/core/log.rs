use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Picks the active filter. `RUST_LOG` replaces the built-in targets when present.
fn log_filter<S>(verbose: bool, env_filter: Option<EnvFilter>) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber,
{
    if let Some(env_filter) = env_filter {
        return Box::new(env_filter);
    }

    let targets = if verbose {
        Targets::new()
            .with_target("tickerview", LevelFilter::DEBUG)
            .with_default(LevelFilter::WARN)
    } else {
        Targets::new().with_default(LevelFilter::OFF)
    };
    Box::new(targets)
}

/// Installs the global subscriber. Logging stays off unless `verbose` or `RUST_LOG` is set.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().ok();

    tracing_subscriber::registry()
        .with(log_filter(verbose, env_filter))
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .init();
}
