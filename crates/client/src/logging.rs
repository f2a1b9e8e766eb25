//! Logging setup for the sheet binary.
//!
//! Logs go to stderr so stdout carries only the printed sheet. `RUST_LOG`
//! filters as usual; the default level is `info`.

pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
