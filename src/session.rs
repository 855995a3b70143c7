use std::path::PathBuf;

use crate::cli::{Cli, LogLevel};
use crate::lang::DEFAULT_PREVIEW;

/// What to run
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Repl,
    File(PathBuf),
    Expr(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub source: Source,
    pub preview: usize,
    pub history: Option<PathBuf>,
    pub log_level: LogLevel,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            source: Source::Repl,
            preview: DEFAULT_PREVIEW,
            history: None,
            log_level: LogLevel::default(),
        }
    }
}

impl From<Cli> for Session {
    fn from(value: Cli) -> Self {
        let source = match (value.expr, value.file) {
            (Some(expr), _) => Source::Expr(expr),
            (None, Some(file)) => Source::File(file),
            (None, None) => Source::Repl,
        };

        Session {
            source,
            preview: value.preview,
            history: value.history,
            log_level: value.log_level,
        }
    }
}
