//! Rust projection of a registry.
//!
//! One module per artifact. Every artifact is plain Rust source meant to be
//! `include!`d into a single module, so entities refer to each other by bare
//! name and only `core` and `bitflags` are reached through absolute paths.

mod aggregates;
mod commands;
mod constants;
mod delegates;
mod enums;
mod handles;
pub mod literal;
pub mod names;
pub mod types;

pub use commands::TABLE as COMMAND_TABLE;
pub use types::RustTypeMapper;

use crate::context::EmitContext;
use crate::Artifact;

/// Emit the banner and body of one artifact.
pub(crate) fn emit_artifact(ctx: &mut EmitContext<'_>, artifact: Artifact) {
    ctx.writeln(&format!(
        "// {}: generated by vkbind from the API registry. Do not edit.",
        artifact.file_name()
    ));
    ctx.newline();

    match artifact {
        Artifact::Constants => constants::emit_constants(ctx),
        Artifact::Delegates => delegates::emit_delegates(ctx),
        Artifact::Enums => enums::emit_enums(ctx),
        Artifact::Unions => aggregates::emit_unions(ctx),
        Artifact::Structs => aggregates::emit_structs(ctx),
        Artifact::Handles => handles::emit_handles(ctx),
        Artifact::Commands => commands::emit_commands(ctx),
    }
}
