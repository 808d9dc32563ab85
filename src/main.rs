use clap::{Parser, Subcommand};
use miette::{miette, Result};
use std::path::PathBuf;

use uscript_dec_rs::cli;

#[derive(Parser)]
#[command(name = "uscript-dec-rs")]
#[command(about = "Decompiler for compiled UnrealScript classes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the import/export directory of a package model
    Inspect {
        /// Input package model (JSON)
        input: PathBuf,
    },

    /// List every function body as flat tokens, without structuring
    Disasm {
        /// Input package model (JSON)
        input: PathBuf,

        /// Only list functions of this class
        #[arg(long)]
        class: Option<String>,
    },

    /// Decompile classes to UnrealScript source
    Decompile {
        /// Input package model (JSON)
        input: PathBuf,

        /// Class to decompile (all classes if not specified)
        #[arg(long)]
        class: Option<String>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Qualify in-package object paths with the level container
        #[arg(long)]
        map: bool,

        /// Use LF line endings instead of CRLF
        #[arg(long)]
        lf: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { input } => cli::inspect::inspect(&input).map_err(|e| miette!("{}", e)),
        Commands::Disasm { input, class } => {
            cli::disasm::disasm(&input, class.as_deref()).map_err(|e| miette!("{}", e))
        }
        Commands::Decompile {
            input,
            class,
            output,
            map,
            lf,
        } => {
            let args = cli::decompile::DecompileArgs {
                input_path: input,
                class,
                output_path: output,
                map,
                lf,
            };
            cli::decompile::decompile(&args).map_err(|e| miette!("{}", e))
        }
    }
}
