//! Driver errors.

use std::io;
use std::path::PathBuf;

use vkbind_registry::{BuildError, Problem};

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The registry could not be read or failed to build. Nothing was written.
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("failed to write `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start the emission thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl GenerateError {
    /// Registry problems; empty unless the registry was invalid.
    pub fn problems(&self) -> &[Problem] {
        match self {
            GenerateError::Build(err) => err.problems(),
            GenerateError::Io { .. } | GenerateError::ThreadPool(_) => &[],
        }
    }
}
