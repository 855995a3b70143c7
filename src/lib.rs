#[macro_use]
extern crate pest_derive;

pub mod ast;
pub mod cli;
pub mod error;
pub mod lang;
pub mod parser;
pub mod repl;
pub mod sequence;
pub mod session;

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize a tracing subscriber at DEBUG level, unless `RUST_LOG` says
    /// otherwise. Safe to call from every test.
    pub fn init_test_logging() {
        use tracing_subscriber::{fmt, EnvFilter};

        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
