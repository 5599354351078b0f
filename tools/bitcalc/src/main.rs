//! bitcalc - IEEE-754 Bit Calculator
//!
//! Converts decimal numbers to their 64-bit binary representation and back,
//! extracts the sign bit and breaks a value into its IEEE-754 fields.

mod commands;
mod config;
mod logging;
mod repl;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use voltage_bits::session::ERROR_DISPLAY;
use voltage_bits::Precision;

use crate::config::BitcalcConfig;

#[derive(Parser)]
#[command(name = "bitcalc")]
#[command(about = "IEEE-754 Bit Calculator")]
#[command(long_about = "IEEE-754 Bit Calculator

Conversions:
  to-bin      Decimal number to 64-bit binary string
  to-dec      64-bit binary string to decimal number
  sign        Sign bit of a binary string or decimal number
  inspect     Sign / exponent / mantissa breakdown
  repl        Interactive calculator session

Examples:
  bitcalc to-bin 1                      # 0011111111110000...0000
  bitcalc to-dec <64 bits> --places 4   # Decode with 4 decimal places
  bitcalc sign -5                       # 1
  bitcalc inspect 0.1                   # Field breakdown

Configuration is read from bitcalc.yaml (or --config) and BITCALC_* environment variables.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file (default: ./bitcalc.yaml if present)
    #[arg(short = 'c', long = "config", global = true)]
    config_path: Option<PathBuf>,

    /// Decimal places for decoded values: a number or 'shortest'
    #[arg(short = 'p', long = "places", global = true)]
    places: Option<Precision>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a decimal number to its 64-bit binary string
    ToBin {
        /// Decimal value (e.g. 1, -5.25, 1e-3, inf, nan)
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Convert a 64-bit binary string to a decimal number
    ToDec {
        /// Exactly 64 characters of 0/1
        binary: String,
    },

    /// Print the sign bit of a binary string or decimal number
    Sign {
        /// 64-bit binary string or decimal value
        #[arg(allow_hyphen_values = true)]
        input: String,
    },

    /// Show sign, exponent, mantissa and class of a value
    Inspect {
        /// 64-bit binary string or decimal value
        #[arg(allow_hyphen_values = true)]
        input: String,
    },

    /// Start an interactive calculator session
    Repl,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = BitcalcConfig::load(cli.config_path.as_deref())?;
    if let Some(places) = cli.places {
        config.decimal_places = places;
    }
    if cli.no_color {
        config.color = false;
    }
    if !config.color {
        colored::control::set_override(false);
    }

    let log_level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    logging::init(log_level, config.color)?;
    debug!(?config, "configuration loaded");

    let result = match cli.command {
        Commands::ToBin { value } => commands::to_binary(&value),
        Commands::ToDec { binary } => commands::to_decimal(&binary, config.decimal_places),
        Commands::Sign { input } => commands::sign(&input),
        Commands::Inspect { input } => commands::inspect(&input),
        Commands::Repl => {
            repl::run(config.decimal_places, config.history_size)
                .context("REPL terminated with an error")?;
            return Ok(ExitCode::SUCCESS);
        },
    };

    match result {
        Ok(text) => {
            println!("{}", text);
            Ok(ExitCode::SUCCESS)
        },
        Err(e) => {
            // Users see a generic failure; the detail is for -v
            debug!("conversion failed: {}", e);
            println!("{}", ERROR_DISPLAY.red());
            Ok(ExitCode::FAILURE)
        },
    }
}
