use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the hot reload machinery.
///
/// Only [`Error::Configuration`] is expected to reach callers during setup;
/// everything else is caught inside the reload routine, turned into a report
/// on the configured sink, and answered by keeping the previous resource.
#[derive(Debug, Error)]
pub enum Error {
    /// The watched source file does not exist at construction time.
    ///
    /// Fatal to the playground being set up, not to the whole application.
    #[error("watched shader source not found: {0}")]
    Configuration(PathBuf),

    /// The external compiler exited with a non-zero status.
    #[error("shader build failed with status {status}:\n{diagnostics}")]
    BuildFailure {
        /// Exit status reported by the compiler process.
        status: i32,
        /// Captured stdout and stderr of the failed invocation.
        diagnostics: String,
    },

    /// The build succeeded but the expected output artifact is missing
    /// or more than one candidate matches the source's base name.
    #[error("expected one build artifact named '{stem}', found {matches}")]
    ArtifactResolution {
        /// Base name the artifact was resolved against.
        stem: String,
        /// Number of candidates found in the build output directory.
        matches: usize,
    },

    /// Directory, file or subprocess I/O failed during a reload.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// No compiled artifact exists for the requested logical name and no
    /// prior successful build has produced one.
    #[error("no compiled resource available for '{0}'")]
    ResourceNotFound(String),
}
