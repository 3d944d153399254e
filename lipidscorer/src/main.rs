use std::fs;
use std::io;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lipidscorer::{LipidScorer, LipidScorerError};

fn make_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy()
}

fn main() -> Result<(), LipidScorerError> {
    let args = LipidScorer::parse();

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .compact()
            .with_writer(io::stderr)
            .with_filter(make_filter()),
    );

    let _guard = if let Some(log_path) = args.log_file.as_ref() {
        let (log_file, guard) = tracing_appender::non_blocking(fs::File::create(log_path)?);
        subscriber
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(false)
                    .with_writer(log_file)
                    .with_filter(make_filter()),
            )
            .init();
        Some(guard)
    } else {
        subscriber.init();
        None
    };

    args.main()
}
