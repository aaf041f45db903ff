//! qecsim Command-Line Interface
//!
//! Drives the statevector simulator through exhaustive single-error
//! verification runs and reports code structure.

use clap::{Parser, Subcommand};
use console::style;
use qecsim_codes::Code;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{info, verify, version};
use config::{InputState, Overrides};

/// qecsim - statevector simulation of quantum error-correcting codes
#[derive(Parser)]
#[command(name = "qecsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode, inject every single-qubit error, correct and check fidelity
    Verify {
        /// Code to verify (repeatable; bit-flip, shor, steane)
        #[arg(short, long = "code")]
        codes: Vec<Code>,

        /// Input state (repeatable; zero, one, plus, minus)
        #[arg(short, long = "input")]
        inputs: Vec<InputState>,

        /// YAML configuration file
        #[arg(long)]
        config: Option<String>,

        /// Random unitary errors per input and qubit
        #[arg(short, long)]
        trials: Option<usize>,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Minimum acceptable fidelity
        #[arg(long)]
        threshold: Option<f64>,

        /// Print a JSON report instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show block layout and gate counts
    Info {
        /// Restrict to one code
        #[arg(short, long)]
        code: Option<Code>,

        /// Number of logical qubits
        #[arg(short, long, default_value = "1")]
        blocks: usize,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Verify {
            codes,
            inputs,
            config,
            trials,
            seed,
            threshold,
            json,
        } => {
            let overrides = Overrides {
                codes,
                inputs,
                trials,
                seed,
                threshold,
            };
            verify::execute(config.as_deref(), &overrides, json)
        }

        Commands::Info { code, blocks, json } => info::execute(code, blocks, json),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verify_flags() {
        let cli = Cli::try_parse_from([
            "qecsim", "-vv", "verify", "-c", "shor", "--code", "steane", "-i", "plus", "--seed",
            "9", "--json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Verify {
                codes,
                inputs,
                seed,
                json,
                trials,
                ..
            } => {
                assert_eq!(codes, vec![Code::Shor, Code::Steane]);
                assert_eq!(inputs, vec![InputState::Plus]);
                assert_eq!(seed, Some(9));
                assert_eq!(trials, None);
                assert!(json);
            }
            _ => panic!("expected verify"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_code() {
        assert!(Cli::try_parse_from(["qecsim", "verify", "--code", "toric"]).is_err());
    }

    #[test]
    fn test_parse_info_defaults() {
        let cli = Cli::try_parse_from(["qecsim", "info"]).unwrap();
        match cli.command {
            Commands::Info { code, blocks, json } => {
                assert_eq!(code, None);
                assert_eq!(blocks, 1);
                assert!(!json);
            }
            _ => panic!("expected info"),
        }
    }
}
