//! Index-text generation and global index assembly.

use std::path::PathBuf;

use crate::registry::Registry;
use crate::types::SymbolKind;

/// One row of the global index, ready for an alphabetical indexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Display label produced by `index_text`.
    pub display: String,
    /// Document the symbol was declared in.
    pub document: PathBuf,
    /// The registry key, also the link anchor.
    pub fullname: String,
    /// Kind the symbol was declared as.
    pub kind: SymbolKind,
}

/// Display label for one symbol in the global index.
///
/// `owner` is the empty-string sentinel for unbound names. Definition
/// kinds ignore it; method and member entries mention it when present;
/// provide and require always have one by construction.
pub fn index_text(kind: SymbolKind, owner: &str, leaf: &str) -> String {
    match kind {
        SymbolKind::Type | SymbolKind::Trait | SymbolKind::Thread => {
            format!("{leaf} ({})", kind.as_str())
        },
        SymbolKind::Method | SymbolKind::Member => {
            if owner.is_empty() {
                format!("{leaf}() (method)")
            } else {
                format!("{leaf}() ({owner} member)")
            }
        },
        SymbolKind::Provide | SymbolKind::Require => {
            format!("{leaf}() ({owner} {})", kind.as_str())
        },
    }
}

/// Build the global index from the finished registry, sorted by fullname.
pub fn build_index(registry: &Registry) -> Vec<IndexEntry> {
    registry
        .all_entries()
        .into_iter()
        .map(|(fullname, entry)| {
            let (owner, leaf) = match fullname.rsplit_once("->") {
                Some((owner, leaf)) => (owner, leaf),
                None => ("", fullname),
            };
            IndexEntry {
                display: index_text(entry.kind, owner, leaf),
                document: entry.document.clone(),
                fullname: fullname.to_string(),
                kind: entry.kind,
            }
        })
        .collect()
}
