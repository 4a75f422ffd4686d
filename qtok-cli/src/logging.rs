use qtok_config::LogLevel;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{filter, fmt, Layer, Registry};

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Off => LevelFilter::OFF,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}

/// Install a stderr subscriber so stdout stays reserved for query output
pub fn start(level: LogLevel) {
    let fmt_filter = filter::Targets::new().with_default(level_filter(level));
    let fmt = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_filter(fmt_filter);

    let subscriber = Registry::default().with(fmt);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: a logger was already installed");
    }
}
