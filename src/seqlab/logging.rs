//! Tracing setup for the binary.
//!
//! Library code only emits `tracing` events. The CLI calls [`init_logging`]
//! once; events go to stderr so stdout stays parseable (`--json`).
//!
//! The filter comes from `SEQLAB_LOG` when set (any `EnvFilter` directive),
//! otherwise `warn`, or `debug` with `--verbose`.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "SEQLAB_LOG";

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Subsequent calls are ignored.
pub fn init_logging(verbose: bool) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let default_level = if verbose { "debug" } else { "warn" };
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(format!("seqlab={}", default_level)));

        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .ok();
    });
}
