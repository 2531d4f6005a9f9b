//! vkbind driver.
//!
//! Wires the registry builder and the Rust emitters together:
//!
//! ```text
//! registry.json ─→ Registry::load ─→ vkbind_codegen::emit ─→ <out>/*.rs
//! ```
//!
//! The binary is a thin clap layer over [`commands`]; everything it does is
//! reachable from here for tests and build scripts.

pub mod commands;
mod error;
mod logging;

pub use commands::{
    generate, registry_stats, resolve_in, resolve_types, GenerateOptions, RegistryStats,
    Resolution,
};
pub use error::GenerateError;
pub use logging::{init_tracing, LOG_ENV};
pub use vkbind_codegen::{Artifact, EmitOptions};
