//! m8prep - WAV sample library preparation for the Dirtywave M8
//!
//! This binary provides commands for normalizing the bit depth of a
//! directory tree of WAV samples and for verifying that no file exceeds the
//! bit depth the device can load.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use m8prep_cli::commands;

/// m8prep - WAV sample library bit-depth normalization
#[derive(Parser)]
#[command(name = "m8prep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite every WAV file above the target bit depth, in place
    Convert {
        /// Directory to recursively scan for .wav files
        #[arg(long)]
        input_dir: String,

        /// Target bit depth
        #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u16))]
        bits: u16,

        /// Clear the read-only permission bit before rewriting
        #[arg(long)]
        force: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Verify that no WAV file is at or above 32 bits per sample
    Check {
        /// Directory to recursively scan for .wav files
        #[arg(long)]
        input_dir: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input_dir,
            bits,
            force,
            json,
        } => commands::convert::run(&input_dir, bits, force, json),
        Commands::Check { input_dir, json } => commands::check::run(&input_dir, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cli_parses_convert_defaults() {
        let cli = Cli::try_parse_from(["m8prep", "convert", "--input-dir", "samples"]).unwrap();
        match cli.command {
            Commands::Convert {
                input_dir,
                bits,
                force,
                json,
            } => {
                assert_eq!(input_dir, "samples");
                assert_eq!(bits, 16);
                assert!(!force);
                assert!(!json);
            }
            _ => panic!("expected convert command"),
        }
    }

    #[test]
    fn test_cli_parses_convert_flags() {
        let cli = Cli::try_parse_from([
            "m8prep",
            "convert",
            "--input-dir",
            "samples",
            "--bits",
            "8",
            "--force",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Convert {
                bits, force, json, ..
            } => {
                assert_eq!(bits, 8);
                assert!(force);
                assert!(json);
            }
            _ => panic!("expected convert command"),
        }
    }

    #[test]
    fn test_cli_parses_check() {
        let cli = Cli::try_parse_from(["m8prep", "check", "--input-dir", "samples", "--json"])
            .unwrap();
        match cli.command {
            Commands::Check { input_dir, json } => {
                assert_eq!(input_dir, "samples");
                assert!(json);
            }
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn test_cli_requires_input_dir() {
        assert!(Cli::try_parse_from(["m8prep", "convert"]).is_err());
    }
}
