//! Build-wide symbol registry: fullname to (declaring document, kind).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::{Diagnostic, SymbolKind};

/// What the registry knows about one declared symbol.
#[derive(Debug, Clone)]
pub struct SymbolEntry {
    /// Document the symbol was declared in.
    pub document: PathBuf,
    /// Kind the symbol was declared as.
    pub kind: SymbolKind,
}

/// Exact-match map from fullname to its declaring document and kind.
/// At most one entry per fullname at any instant; uniqueness is
/// per-build, not per-document.
#[derive(Default)]
pub struct Registry {
    /// The entries, keyed by fullname.
    entries: HashMap<String, SymbolEntry>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        return Self::default();
    }

    /// Register a symbol declaration.
    ///
    /// Re-registering the same fullname from the same document (the same
    /// directive re-processed) is a silent no-op. A registration from a
    /// different document overwrites the earlier entry and returns a
    /// `DuplicateSymbol` diagnostic naming the displaced document; the
    /// caller surfaces it as a warning and the build continues.
    pub fn register(
        &mut self,
        fullname: &str,
        document: &Path,
        kind: SymbolKind,
    ) -> Option<Diagnostic> {
        if let Some(existing) = self.entries.get(fullname) {
            if existing.document == document {
                return None;
            }
            let previous = existing.document.clone();
            self.entries.insert(
                fullname.to_string(),
                SymbolEntry {
                    document: document.to_path_buf(),
                    kind,
                },
            );
            return Some(Diagnostic::DuplicateSymbol {
                fullname: fullname.to_string(),
                previous_document: previous,
            });
        }

        self.entries.insert(
            fullname.to_string(),
            SymbolEntry {
                document: document.to_path_buf(),
                kind,
            },
        );
        return None;
    }

    /// Delete every entry declared by `document`. Called before
    /// re-processing an edited document so stale entries cannot shadow
    /// the fresh ones.
    pub fn remove_all_from(&mut self, document: &Path) {
        self.entries.retain(|_, entry| return entry.document != document);
    }

    /// Exact-match lookup. No partial or fuzzy matching.
    pub fn lookup(&self, fullname: &str) -> Option<&SymbolEntry> {
        return self.entries.get(fullname);
    }

    /// All entries sorted lexicographically by fullname.
    ///
    /// Ordering is an explicit contract here so index output is
    /// deterministic across builds.
    pub fn all_entries(&self) -> Vec<(&str, &SymbolEntry)> {
        let mut entries: Vec<(&str, &SymbolEntry)> = self
            .entries
            .iter()
            .map(|(name, entry)| return (name.as_str(), entry))
            .collect();
        entries.sort_by_key(|(name, _)| return *name);
        return entries;
    }

    /// Number of registered symbols.
    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }
}

#[cfg(test)]
mod tests {
    use super::Registry;
    use crate::types::{Diagnostic, SymbolKind};
    use std::path::Path;

    #[test]
    fn register_then_remove_leaves_lookup_absent() {
        let mut registry = Registry::new();
        let doc = Path::new("methods.rst");

        registry.register("array->sort", doc, SymbolKind::Method);
        assert!(registry.lookup("array->sort").is_some());

        registry.remove_all_from(doc);
        assert!(registry.lookup("array->sort").is_none());
    }

    #[test]
    fn duplicate_across_documents_warns_and_later_wins() {
        let mut registry = Registry::new();
        let doc_a = Path::new("a.rst");
        let doc_b = Path::new("b.rst");

        let first = registry.register("X->m", doc_a, SymbolKind::Method);
        assert_eq!(first, None);

        let second = registry.register("X->m", doc_b, SymbolKind::Method);
        assert_eq!(
            second,
            Some(Diagnostic::DuplicateSymbol {
                fullname: "X->m".to_string(),
                previous_document: doc_a.to_path_buf(),
            })
        );

        let entry = registry.lookup("X->m").unwrap();
        assert_eq!(entry.document, doc_b);
    }

    #[test]
    fn same_document_reregistration_is_silent() {
        let mut registry = Registry::new();
        let doc = Path::new("a.rst");

        registry.register("X->m", doc, SymbolKind::Method);
        let again = registry.register("X->m", doc, SymbolKind::Method);
        assert_eq!(again, None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_only_touches_the_given_document() {
        let mut registry = Registry::new();
        registry.register("a", Path::new("a.rst"), SymbolKind::Type);
        registry.register("b", Path::new("b.rst"), SymbolKind::Type);

        registry.remove_all_from(Path::new("a.rst"));
        assert!(registry.lookup("a").is_none());
        assert!(registry.lookup("b").is_some());
    }

    #[test]
    fn all_entries_sorted_by_fullname() {
        let mut registry = Registry::new();
        let doc = Path::new("a.rst");
        registry.register("zip", doc, SymbolKind::Method);
        registry.register("array", doc, SymbolKind::Type);
        registry.register("bytes", doc, SymbolKind::Type);

        let names: Vec<&str> = registry.all_entries().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["array", "bytes", "zip"]);
    }
}
