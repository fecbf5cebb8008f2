mod compose;
mod config;
mod favicon;
mod manifest;

fn setup_logging() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::fmt::writer::MakeWriterExt;
    use tracing_subscriber::prelude::*;

    // Progress lines go to stdout; warnings and errors to stderr.
    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stdout.with_min_level(tracing::Level::INFO));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr.with_max_level(tracing::Level::WARN));

    tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .with(stdout_layer)
        .with(stderr_layer)
        .init();
}

fn main() {
    setup_logging();

    let config = config::Config::default();
    match favicon::generate(&config) {
        // A missing logo is already reported inside generate; no trace.
        Ok(false) => std::process::exit(1),
        Ok(true) => {}
        Err(e) => {
            tracing::error!("favicon generation failed: {:?}", e);
            std::process::exit(1);
        }
    }
}
