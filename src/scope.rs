//! Ambient-scope tracking: the symbol currently being defined, per document.
//!
//! The source grammar does not nest definitions. Opening a second
//! definition while one is open replaces the value outright; the handle
//! identity check on `close` keeps the replaced definition's later
//! cleanup from erasing the replacement.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Proof of having opened a scope. Only the handle that set the current
/// value may clear it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeHandle {
    /// Document the scope was opened in.
    document: PathBuf,
    /// Identity of this open, compared on close.
    id: u64,
}

/// The innermost open definition per document.
struct OpenScope {
    /// Fullname of the open definition.
    fullname: String,
    /// Handle identity of the open that set this value.
    id: u64,
}

/// Per-document ambient scope state for one build pass.
#[derive(Default)]
pub struct ScopeTracker {
    /// Monotonic handle id source.
    next_id: u64,
    /// At most one open scope per document.
    scopes: HashMap<PathBuf, OpenScope>,
}

impl ScopeTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current scope for `document` to `fullname`.
    ///
    /// Always replaces whatever was open; the displaced scope's handle
    /// becomes stale and its later `close` is a no-op.
    pub fn open(&mut self, document: &Path, fullname: &str) -> ScopeHandle {
        self.next_id += 1;
        let id = self.next_id;
        self.scopes.insert(
            document.to_path_buf(),
            OpenScope {
                fullname: fullname.to_string(),
                id,
            },
        );
        ScopeHandle {
            document: document.to_path_buf(),
            id,
        }
    }

    /// Clear the scope set by `handle`. A stale or already-closed handle
    /// is a no-op, not an error — this protects against double-clearing
    /// from cleanup paths.
    pub fn close(&mut self, handle: &ScopeHandle) {
        let owned = self
            .scopes
            .get(&handle.document)
            .is_some_and(|open| open.id == handle.id);
        if owned {
            self.scopes.remove(&handle.document);
        }
    }

    /// The fullname of the currently open definition for `document`.
    pub fn read(&self, document: &Path) -> Option<&str> {
        self.scopes.get(document).map(|open| open.fullname.as_str())
    }
}
