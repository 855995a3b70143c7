use std::path::PathBuf;

#[derive(Debug, Copy, Clone, Default, PartialEq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

/// Build lazy views over sequences and poke at them
#[derive(clap::Parser, Debug, Clone)]
#[command(version, about)]
pub struct Cli {
    /// Script to run; starts an interactive session when omitted
    pub file: Option<PathBuf>,

    /// Run a script given on the command line
    #[arg(short, long, conflicts_with = "file")]
    pub expr: Option<String>,

    /// Number of elements printed for unbounded sequences
    #[arg(long, default_value_t = 6)]
    pub preview: usize,

    /// File used to persist interactive history
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Log verbosity, overridden by RUST_LOG. Release builds only keep
    /// warnings and errors.
    #[arg(long, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,
}
