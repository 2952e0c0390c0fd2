use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const DEBUG_TARGETS: &str = "refwidget=debug,refwidget_core=debug,refwidget_config=debug";
const DEFAULT_FILTER: &str = "error";

/// Install the stderr subscriber. `RUST_LOG` wins over `--debug`.
pub(crate) fn initialize_tracing(debug: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if debug { DEBUG_TARGETS } else { DEFAULT_FILTER })
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(debug);

    let init_result = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();

    if let Err(err) = init_result {
        tracing::warn!(error = %err, "tracing already initialized; skipping setup");
    }
}
