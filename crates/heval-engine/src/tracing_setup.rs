//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

use heval_core::config::defaults::ENV_LOG;
use heval_core::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Initialize logging with the default configuration.
///
/// Reads `HEVAL_LOG` for per-crate levels, e.g.
/// `HEVAL_LOG=heval_knowledge=debug,heval_explain=info`.
/// Falls back to `heval=info`. Idempotent.
pub fn init_tracing() {
    init_tracing_from_config(&ObservabilityConfig::default());
}

/// Initialize logging from `config`. `HEVAL_LOG` still wins over `log_filter`.
pub fn init_tracing_from_config(config: &ObservabilityConfig) {
    let filter =
        EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    install(filter, config.json_logs);
}

/// Initialize logging with an explicit filter (for tests or embedding hosts).
pub fn init_tracing_with_filter(filter: &str) {
    install(EnvFilter::new(filter), false);
}

fn install(filter: EnvFilter, json: bool) {
    INIT.call_once(|| {
        let builder = fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true);
        // A host may already own the global subscriber.
        let _ = if json {
            builder.json().try_init()
        } else {
            builder.with_file(true).with_line_number(true).try_init()
        };
    });
}
