//! Tracing subscriber setup for the `superpages` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the application. Logs always go to stderr so command output on stdout stays
//! clean for piping.

use std::io::{self, IsTerminal};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for a verbosity level.
///
/// `quiet` wins over `verbose`: only errors are shown.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "superpages=error";
    }
    match verbose {
        0 => "superpages=warn",
        1 => "superpages=info",
        2 => "superpages=debug",
        _ => "superpages=trace",
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` overrides the verbosity flags when set.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    // A second init (e.g. from tests) is not an error worth failing over.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
