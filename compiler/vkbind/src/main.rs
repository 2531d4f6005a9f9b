//! vkbind CLI
//!
//! Generates Rust FFI bindings from an API registry document.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use vkbind::{
    generate, init_tracing, registry_stats, resolve_types, Artifact, EmitOptions,
    GenerateError, GenerateOptions,
};

#[derive(Parser)]
#[command(name = "vkbind")]
#[command(version)]
#[command(about = "Generate Rust FFI bindings from a Vulkan-style API registry", long_about = None)]
struct Cli {
    /// Log at debug level (overridden by VKBIND_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate binding artifacts into a directory
    Generate {
        /// Registry document (JSON)
        registry: PathBuf,

        /// Output directory, created if missing
        #[arg(short, long, value_name = "DIR")]
        out: PathBuf,

        /// Only emit these artifacts (comma separated or repeated)
        #[arg(long, value_name = "ARTIFACT", value_delimiter = ',')]
        only: Vec<Artifact>,

        /// Emission threads; 1 emits sequentially
        #[arg(short, long)]
        jobs: Option<NonZeroUsize>,
    },

    /// Show how type names resolve through typedefs and base types
    Resolve {
        /// Registry document (JSON)
        registry: PathBuf,

        /// Type names to resolve
        #[arg(required = true, value_name = "TYPE")]
        types: Vec<String>,
    },

    /// Print collection sizes
    Stats {
        /// Registry document (JSON)
        registry: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), GenerateError> {
    match command {
        Command::Generate {
            registry,
            out,
            only,
            jobs,
        } => {
            let artifacts = if only.is_empty() {
                Artifact::ALL.to_vec()
            } else {
                let mut artifacts: Vec<Artifact> = Vec::with_capacity(only.len());
                for artifact in only {
                    if !artifacts.contains(&artifact) {
                        artifacts.push(artifact);
                    }
                }
                artifacts
            };
            let options = GenerateOptions {
                registry,
                out_dir: out,
                emit: EmitOptions {
                    artifacts,
                    parallel: jobs.map_or(true, |j| j.get() > 1),
                },
                jobs,
            };
            for path in generate(&options)? {
                println!("wrote {}", path.display());
            }
        }
        Command::Resolve { registry, types } => {
            for resolution in resolve_types(&registry, &types)? {
                println!("{resolution}");
            }
        }
        Command::Stats { registry } => {
            print!("{}", registry_stats(&registry)?);
        }
    }
    Ok(())
}
