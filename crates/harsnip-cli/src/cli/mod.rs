//! CLI for harsnip.

mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use harsnip_core::config;
use std::path::PathBuf;

use commands::{run_convert, run_prepare, run_targets, ConvertArgs};

/// Top-level CLI for harsnip.
#[derive(Debug, Parser)]
#[command(name = "harsnip")]
#[command(about = "harsnip: turn HAR requests into code snippets", long_about = None)]
pub struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Convert every request in a HAR file (or a single request object) to snippets.
    Convert {
        /// Path to the HAR / request JSON, or `-` for stdin.
        input: PathBuf,

        /// Target language; defaults to `default_target` from the config file.
        #[arg(long, short)]
        target: Option<String>,

        /// Client within the target; the target's default when omitted or unknown.
        #[arg(long, short)]
        client: Option<String>,

        /// Indentation unit for generated code.
        #[arg(long)]
        indent: Option<String>,

        /// Write one file per request into DIR instead of printing.
        #[arg(long, short, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// List available targets and their clients.
    Targets {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the normalized requests as JSON.
    Prepare {
        /// Path to the HAR / request JSON, or `-` for stdin.
        input: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub fn run(self) -> Result<()> {
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::Convert {
                input,
                target,
                client,
                indent,
                output,
            } => run_convert(
                &cfg,
                ConvertArgs {
                    input,
                    target,
                    client,
                    indent,
                    output,
                },
            )?,
            CliCommand::Targets { json } => run_targets(json)?,
            CliCommand::Prepare { input } => run_prepare(&input)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
