//! Two-phase build driver.
//!
//! Phase 1 walks each document sequentially, feeding declaration
//! signatures through the parser, maintaining ambient scope, and
//! writing the registry. Phase 2 resolves the captured cross-reference
//! requests against the finished registry, read-only, so forward
//! references across documents work.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Error;
use crate::registry::Registry;
use crate::scanner::{self, DocItem};
use crate::scope::{ScopeHandle, ScopeTracker};
use crate::signature;
use crate::types::{CrossReferenceRequest, Diagnostic, Resolution};
use crate::xref;

/// A registration problem with the location it surfaced at.
#[derive(Debug, Clone)]
pub struct Warning {
    /// The underlying diagnostic.
    pub diagnostic: Diagnostic,
    /// Document being processed when the diagnostic surfaced.
    pub document: PathBuf,
    /// One-based line of the offending directive.
    pub line: u32,
}

/// One build's worth of symbol state and pending references.
#[derive(Default)]
pub struct Project {
    registry: Registry,
    requests: Vec<CrossReferenceRequest>,
    scopes: ScopeTracker,
    warnings: Vec<Warning>,
}

impl Project {
    /// Create an empty project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan and process every configured document under `root`.
    ///
    /// # Errors
    ///
    /// Returns `Error::DocumentUnreadable` if a discovered document
    /// cannot be read.
    pub fn load(root: &Path, config: &Config) -> Result<Self, Error> {
        let mut project = Self::new();
        for document in scanner::find_documents(root, config) {
            let text = std::fs::read_to_string(root.join(&document)).map_err(|e| {
                Error::DocumentUnreadable {
                    path: document.clone(),
                    reason: e.to_string(),
                }
            })?;
            project.process_document(&document, &text);
        }
        Ok(project)
    }

    /// Phase 1 for one document: register declarations and capture
    /// cross-reference requests with their ambient scope snapshots.
    ///
    /// Prior registry entries for this document are purged first, so
    /// re-processing an edited document is idempotent and cannot leave
    /// stale entries or spurious duplicate diagnostics behind.
    pub fn process_document(&mut self, document: &Path, text: &str) {
        self.registry.remove_all_from(document);

        // Open definitions, innermost last, with the indent they opened at.
        let mut open: Vec<(ScopeHandle, usize)> = Vec::new();

        for item in scanner::scan_document(text) {
            match item {
                DocItem::Directive(directive) => {
                    close_dedented(&mut self.scopes, &mut open, directive.indent);

                    let ambient = self.scopes.read(document).map(str::to_string);
                    let sig =
                        signature::parse(directive.kind, &directive.signature, ambient.as_deref());

                    if let Some(diagnostic) =
                        self.registry.register(&sig.fullname, document, directive.kind)
                    {
                        self.warnings.push(Warning {
                            diagnostic,
                            document: document.to_path_buf(),
                            line: directive.line,
                        });
                    }

                    if directive.kind.spec().hosts_scope {
                        let handle = self.scopes.open(document, &sig.fullname);
                        open.push((handle, directive.indent));
                    }
                },
                DocItem::Role(role) => {
                    close_dedented(&mut self.scopes, &mut open, role.indent);

                    let ambient = self.scopes.read(document);
                    self.requests.push(xref::normalize(
                        &role.raw_target,
                        role.explicit_title.as_deref(),
                        role.kind_hint,
                        ambient,
                        document,
                        role.line,
                    ));
                },
            }
        }

        // Ambient scope never outlives one document pass.
        while let Some((handle, _)) = open.pop() {
            self.scopes.close(&handle);
        }
    }

    /// Phase 2: resolve every captured request against the finished
    /// registry. Read-only; requests are independent of each other.
    pub fn resolve_all(&self) -> Vec<(CrossReferenceRequest, Resolution)> {
        self.requests
            .iter()
            .map(|request| (request.clone(), xref::resolve(request, &self.registry)))
            .collect()
    }

    /// The build-wide symbol registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Non-fatal registration warnings collected during phase 1.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

/// Close every open definition whose body the current line has left.
///
/// A line at or left of a definition's indent ends that definition's
/// body. Handles are closed innermost-first; stale handles (displaced
/// by a nested definition) close as no-ops.
fn close_dedented(
    scopes: &mut ScopeTracker,
    open: &mut Vec<(ScopeHandle, usize)>,
    indent: usize,
) {
    while open.last().is_some_and(|(_, open_indent)| indent <= *open_indent) {
        if let Some((handle, _)) = open.pop() {
            scopes.close(&handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Project;
    use crate::types::{Resolution, SymbolKind};
    use std::path::Path;

    const TYPES_DOC: &str = "\
.. type:: array

   An ordered collection. Use :meth:`->sort()` to order it.

   .. method:: sort(ascending)::array

   .. method:: insert(value, position)

.. method:: abort
";

    #[test]
    fn definitions_qualify_their_tags() {
        let mut project = Project::new();
        project.process_document(Path::new("types.rst"), TYPES_DOC);

        let registry = project.registry();
        assert!(registry.lookup("array").is_some());
        assert!(registry.lookup("array->sort").is_some());
        assert!(registry.lookup("array->insert").is_some());
        // Dedented back to column zero: unbound.
        assert!(registry.lookup("abort").is_some());
        assert!(registry.lookup("array->abort").is_none());
    }

    #[test]
    fn role_inside_body_resolves_against_open_scope() {
        let mut project = Project::new();
        project.process_document(Path::new("types.rst"), TYPES_DOC);

        let resolutions = project.resolve_all();
        assert_eq!(resolutions.len(), 1);
        let (request, resolution) = &resolutions[0];
        assert!(request.prefer_local);
        assert_eq!(request.ambient.as_deref(), Some("array"));
        assert!(matches!(
            resolution,
            Resolution::Resolved { fullname, kind, .. }
                if fullname == "array->sort" && *kind == SymbolKind::Method
        ));
    }

    #[test]
    fn forward_references_resolve_across_documents() {
        let mut project = Project::new();
        project.process_document(
            Path::new("guide.rst"),
            "Start with :type:`duration` values.\n",
        );
        project.process_document(Path::new("types.rst"), ".. type:: duration\n");

        let resolutions = project.resolve_all();
        assert!(matches!(
            &resolutions[0].1,
            Resolution::Resolved { fullname, .. } if fullname == "duration"
        ));
    }

    #[test]
    fn reprocessing_a_document_is_idempotent() {
        let mut project = Project::new();
        project.process_document(Path::new("types.rst"), TYPES_DOC);
        project.process_document(Path::new("types.rst"), TYPES_DOC);

        assert!(project.warnings().is_empty());
        assert!(project.registry().lookup("array->sort").is_some());
    }

    #[test]
    fn duplicate_across_documents_is_a_warning_and_later_wins() {
        let mut project = Project::new();
        project.process_document(Path::new("a.rst"), ".. method:: abort\n");
        project.process_document(Path::new("b.rst"), ".. method:: abort\n");

        assert_eq!(project.warnings().len(), 1);
        let entry = project.registry().lookup("abort").unwrap();
        assert_eq!(entry.document, Path::new("b.rst"));
    }

    #[test]
    fn load_scans_configured_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".symref.toml"), "exclude = [\"skip/\"]\n").unwrap();
        std::fs::write(dir.path().join("types.rst"), ".. type:: widget\n").unwrap();
        std::fs::create_dir(dir.path().join("skip")).unwrap();
        std::fs::write(dir.path().join("skip/other.rst"), ".. type:: gadget\n").unwrap();

        let config = crate::config::Config::load(dir.path()).unwrap();
        let project = Project::load(dir.path(), &config).unwrap();
        assert!(project.registry().lookup("widget").is_some());
        assert!(project.registry().lookup("gadget").is_none());
    }

    #[test]
    fn nested_definition_overwrites_scope_without_restoring() {
        let doc = "\
.. type:: outer

   .. type:: inner

      .. method:: deep

   .. method:: shallow
";
        let mut project = Project::new();
        project.process_document(Path::new("n.rst"), doc);

        let registry = project.registry();
        // The inner definition is itself ambient-qualified, and its tags
        // see the replaced scope value.
        assert!(registry.lookup("outer->inner").is_some());
        assert!(registry.lookup("outer->inner->deep").is_some());
        // The grammar does not nest: leaving `inner` clears the scope
        // entirely rather than restoring `outer`.
        assert!(registry.lookup("shallow").is_some());
        assert!(registry.lookup("outer->shallow").is_none());
    }
}
