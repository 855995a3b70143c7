use std::process::ExitCode;

use clap::Parser;
use seqview::cli::Cli;
use seqview::error::Result;
use seqview::lang::Interpreter;
use seqview::session::{Session, Source};

fn init_logging(session: &Session) {
    use tracing_subscriber::{fmt, EnvFilter};

    // RUST_LOG takes precedence over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(session.log_level.to_string()));

    fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

#[cfg(feature = "repl")]
fn repl(session: &Session) -> Result<()> {
    seqview::repl::repl(session)
}

#[cfg(not(feature = "repl"))]
fn repl(_session: &Session) -> Result<()> {
    seqview::err!("interactive sessions require the 'repl' feature")
}

fn run(session: &Session) -> Result<()> {
    let interp = Interpreter::from(session);
    let mut stdout = std::io::stdout();

    match &session.source {
        Source::Expr(expr) => interp.run(expr, &mut stdout),
        Source::File(path) => {
            tracing::info!(?path, "running script");
            let input = std::fs::read_to_string(path)?;
            interp.run(&input, &mut stdout)
        }
        Source::Repl => repl(session),
    }
}

fn main() -> ExitCode {
    let session = Session::from(Cli::parse());
    init_logging(&session);

    match run(&session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
