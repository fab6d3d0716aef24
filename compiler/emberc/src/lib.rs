//! Ember CLI - lex, parse, check and run Ember scripts.
//!
//! ```text
//! source text
//!     │
//!     ▼
//! ember_lexer::lex ──► TokenList        (ember lex)
//!     │
//!     ▼
//! ember_parse::parse ──► Program        (ember parse / ember check)
//!     │
//!     ▼
//! ember_eval ──► Value                  (ember run)
//! ```
//!
//! Commands return `CliError`; the binary renders it with `reporting` and
//! exits with status 1.

pub mod commands;
mod error;
pub mod reporting;

use std::sync::Once;

pub use error::CliError;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber writing to stderr.
///
/// The filter comes from `EMBER_LOG`, falling back to `RUST_LOG`
/// (e.g. `EMBER_LOG=ember_eval=debug`). Without either variable nothing is
/// installed. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let directives = std::env::var("EMBER_LOG").or_else(|_| std::env::var("RUST_LOG"));
        if let Ok(directives) = directives {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(EnvFilter::new(directives))
                .init();
        }
    });
}
