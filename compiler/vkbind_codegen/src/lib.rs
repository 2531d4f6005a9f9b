//! Rust binding emitters for vkbind.
//!
//! Turns a built [`Registry`] into Rust source, one artifact per entity
//! family:
//!
//! ```text
//! Registry
//!    ↓
//! TypeResolver      (shared, memoized)
//!    ↓
//! emit_artifact     (one EmitContext per artifact, optionally in parallel)
//!    ↓
//! GeneratedFile     (file name + source text)
//! ```
//!
//! Emission never fails. The registry has already been checked by the
//! builder; member and parameter types that name nothing the registry
//! declares are passed through as written and logged at `debug`.

mod context;
pub mod rust;

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use vkbind_registry::{Registry, TypeResolver};

pub use context::EmitContext;

/// One output file of the generator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Artifact {
    Constants,
    Delegates,
    Enums,
    Unions,
    Structs,
    Handles,
    Commands,
}

impl Artifact {
    pub const ALL: [Artifact; 7] = [
        Artifact::Constants,
        Artifact::Delegates,
        Artifact::Enums,
        Artifact::Unions,
        Artifact::Structs,
        Artifact::Handles,
        Artifact::Commands,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Artifact::Constants => "constants",
            Artifact::Delegates => "delegates",
            Artifact::Enums => "enums",
            Artifact::Unions => "unions",
            Artifact::Structs => "structs",
            Artifact::Handles => "handles",
            Artifact::Commands => "commands",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::Constants => "constants.rs",
            Artifact::Delegates => "delegates.rs",
            Artifact::Enums => "enums.rs",
            Artifact::Unions => "unions.rs",
            Artifact::Structs => "structs.rs",
            Artifact::Handles => "handles.rs",
            Artifact::Commands => "commands.rs",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Artifact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Artifact::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Artifact::ALL.iter().map(|a| a.as_str()).collect();
                format!("unknown artifact `{s}`, expected one of: {}", known.join(", "))
            })
    }
}

/// Source text of one artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    pub artifact: Artifact,
    pub code: String,
}

impl GeneratedFile {
    pub fn file_name(&self) -> &'static str {
        self.artifact.file_name()
    }
}

/// Which artifacts to emit, and how.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitOptions {
    /// Artifacts to emit, in output order.
    pub artifacts: Vec<Artifact>,
    /// Emit artifacts on the rayon pool.
    pub parallel: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            artifacts: Artifact::ALL.to_vec(),
            parallel: true,
        }
    }
}

/// Emit a single artifact.
pub fn emit_artifact(registry: &Registry, resolver: &TypeResolver<'_>, artifact: Artifact) -> String {
    let _span = tracing::debug_span!("emit", %artifact).entered();
    let mut ctx = EmitContext::new(registry, resolver);
    rust::emit_artifact(&mut ctx, artifact);
    let code = ctx.take_output();
    tracing::debug!(bytes = code.len(), "artifact emitted");
    code
}

/// Emit the artifacts selected by `options`, in the order given there.
///
/// Artifacts are independent of each other; with `parallel` set they are
/// emitted concurrently and share one resolver.
#[tracing::instrument(level = "debug", skip_all, fields(artifacts = options.artifacts.len()))]
pub fn emit(registry: &Registry, options: &EmitOptions) -> Vec<GeneratedFile> {
    let resolver = TypeResolver::new(registry);
    let emit_one = |&artifact: &Artifact| GeneratedFile {
        artifact,
        code: emit_artifact(registry, &resolver, artifact),
    };

    let files: Vec<GeneratedFile> = if options.parallel {
        options.artifacts.par_iter().map(emit_one).collect()
    } else {
        options.artifacts.iter().map(emit_one).collect()
    };
    tracing::debug!(resolved = resolver.cached(), "emission complete");
    files
}
