//! `seqlinq` command: load a JSON document, run an operator pipeline over it
//! and print the result.

pub mod json;
pub mod pipeline;
mod render;
#[cfg(test)]
mod test_support;

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::pipeline::{Op, Terminal};

#[derive(Parser, Debug)]
#[command(name = "seqlinq", version, about = "Run deferred query operators over a JSON document")]
pub struct Cli {
    #[command(flatten)]
    pub query: QueryArgs,
    /// Overrides `RUST_LOG` when set.
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevel>,
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
    /// Operator applied in order, e.g. `skip:1`, `of-type:string`, `cast:Number:primitive`.
    #[arg(long = "op", value_name = "OP")]
    pub ops: Vec<Op>,
    #[arg(long = "terminal", value_enum, default_value_t = Terminal::ToArray)]
    pub terminal: Terminal,
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);
    let output = pipeline::run(&cli.query)?;
    println!("{output}");
    Ok(())
}

fn init_tracing(level: Option<LogLevel>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level.as_str()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}
