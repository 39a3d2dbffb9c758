use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Human-readable output; `RUST_LOG` overrides `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(fmt_layer)
        .init();
}

/// One JSON object per line, for piping into log tooling.
pub fn init_tracing_json(default_filter: &str) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json();

    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(fmt_layer)
        .init();
}
