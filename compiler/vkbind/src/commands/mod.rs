//! Command handlers for the vkbind CLI.
//!
//! Each submodule implements one subcommand. Handlers return values and
//! errors; printing and exit codes are left to the binary.

mod generate;
mod resolve;
mod stats;

pub use generate::{generate, GenerateOptions};
pub use resolve::{resolve_in, resolve_types, Resolution};
pub use stats::{registry_stats, RegistryStats};
