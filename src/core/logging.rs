//! Diagnostic logging
//!
//! Report lines go to stdout through the renderer; `tracing` output goes to
//! stderr and is only for diagnosing a run.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

static INIT: OnceLock<()> = OnceLock::new();

/// Default filter directive for the given verbosity flags
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    match (verbose, quiet) {
        (true, _) => "debug",
        (false, true) => "error",
        (false, false) => "warn",
    }
}

/// Initialize the global subscriber once. `RUST_LOG` wins over the flags.
pub fn init(verbose: bool, quiet: bool) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));
        let subscriber = Registry::default().with(filter).with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        );
        // A subscriber may already be installed (tests).
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
