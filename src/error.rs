/// Crate-level error types for symref diagnostics.
use std::path::PathBuf;

/// All errors in symref carry enough context to produce a useful diagnostic
/// without a debugger. Unresolved cross-references and duplicate symbol
/// registrations are deliberately not here: they are defined, non-fatal
/// outcomes carried as `types::Diagnostic` and `types::Resolution`.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A discovered documentation source file could not be read.
    #[error("cannot read document: {}: {reason}", path.display())]
    DocumentUnreadable {
        /// Path to the unreadable document.
        path: PathBuf,
        /// Description of the read failure.
        reason: String,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}
