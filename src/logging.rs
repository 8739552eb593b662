// 📜 Logging - tracing subscriber setup
//
// LEAK_LEDGER_LOG=leak_ledger=debug   (default: leak_ledger=info)

use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

pub const LOG_ENV: &str = "LEAK_LEDGER_LOG";

/// Idempotent; later calls are no-ops
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new("leak_ledger=info,leak_server=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .init();
    });
}
