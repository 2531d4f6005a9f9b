//! The `generate` command: build the registry, emit artifacts, write them.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use vkbind_codegen::{emit, EmitOptions, GeneratedFile};
use vkbind_registry::Registry;

use crate::GenerateError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Registry document to read.
    pub registry: PathBuf,
    /// Directory the artifacts are written to; created if missing.
    pub out_dir: PathBuf,
    pub emit: EmitOptions,
    /// Size of a dedicated emission pool. `None` uses the global rayon pool.
    pub jobs: Option<NonZeroUsize>,
}

impl GenerateOptions {
    pub fn new(registry: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry: registry.into(),
            out_dir: out_dir.into(),
            emit: EmitOptions::default(),
            jobs: None,
        }
    }
}

/// Generate every selected artifact. Returns the paths written, in artifact
/// order.
///
/// The registry is fully built before the output directory is touched, so an
/// invalid registry leaves no files behind.
#[tracing::instrument(level = "info", skip_all, fields(registry = %options.registry.display()))]
pub fn generate(options: &GenerateOptions) -> Result<Vec<PathBuf>, GenerateError> {
    let registry = Registry::load(&options.registry)?;

    let files = match options.jobs {
        Some(jobs) if jobs.get() > 1 && options.emit.parallel => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs.get())
            .build()?
            .install(|| emit(&registry, &options.emit)),
        _ => emit(&registry, &options.emit),
    };

    fs::create_dir_all(&options.out_dir).map_err(|source| GenerateError::Io {
        path: options.out_dir.clone(),
        source,
    })?;

    let mut written = Vec::with_capacity(files.len());
    for file in &files {
        let path = options.out_dir.join(file.file_name());
        write_artifact(&path, file)?;
        tracing::info!(path = %path.display(), bytes = file.code.len(), "wrote artifact");
        written.push(path);
    }
    Ok(written)
}

/// Write one artifact. The writer is flushed before returning, so a
/// successful return means the file is complete on disk.
fn write_artifact(path: &Path, file: &GeneratedFile) -> Result<(), GenerateError> {
    let io_error = |source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    writer.write_all(file.code.as_bytes()).map_err(io_error)?;
    writer.flush().map_err(io_error)
}
