//! Directive and role scanning over documentation source files.
//!
//! The scanner extracts declaration directives (`.. type:: name`),
//! inline cross-reference roles (``:meth:`->go()` ``), and recognized
//! metadata field lines from reST-style sources. It produces flat,
//! line-ordered items; all registry and scope state lives in the
//! project driver.

use std::path::{Path, PathBuf};

use regex::Regex;
use walkdir::WalkDir;

use crate::config::Config;
use crate::types::SymbolKind;

/// A declaration directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Leading-whitespace width of the directive line.
    pub indent: usize,
    /// Symbol kind named by the directive.
    pub kind: SymbolKind,
    /// One-based line number in the document.
    pub line: u32,
    /// Raw signature text after the `::`.
    pub signature: String,
}

/// An inline cross-reference role occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRef {
    /// Author-supplied title from the `title <target>` form, if any.
    pub explicit_title: Option<String>,
    /// Leading-whitespace width of the containing line.
    pub indent: usize,
    /// Advisory kind hint derived from the role name.
    pub kind_hint: Option<SymbolKind>,
    /// One-based line number in the document.
    pub line: u32,
    /// Raw target text between the backticks.
    pub raw_target: String,
}

/// One scanned item, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocItem {
    /// A declaration directive.
    Directive(Directive),
    /// A cross-reference role.
    Role(RoleRef),
}

/// Map a metadata field name to its display label.
///
/// These field names are recognized verbatim; their free-form text is
/// passed through to the renderer, never interpreted here.
pub fn field_label(name: &str) -> Option<&'static str> {
    match name {
        "param" | "parameter" => Some("Parameters"),
        "ptype" | "paramtype" | "type" => Some("Parameters"),
        "return" | "returns" => Some("Returns"),
        "returnas" | "returnsas" | "rtype" | "returntype" => Some("Returns as"),
        "author" | "authors" => Some("Author"),
        "see" | "url" => Some("See also"),
        "parent" | "super" => Some("Parent"),
        "import" | "imports" => Some("Imports"),
        _ => None,
    }
}

/// Scan one document's text into line-ordered items.
///
/// Unknown directive names and unknown roles are skipped, as are
/// metadata field lines (recognized but renderer-owned).
///
/// # Panics
///
/// Panics if a hardcoded pattern is invalid (compile-time invariant).
pub fn scan_document(text: &str) -> Vec<DocItem> {
    let directive = Regex::new(r"^(\s*)\.\.\s+([a-z]+)::\s*(.*)$").expect("valid regex");
    let role = Regex::new(r":([a-z]+):`([^`]+)`").expect("valid regex");
    let mut items = Vec::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = u32::try_from(idx + 1).unwrap_or(u32::MAX);

        if let Some(cap) = directive.captures(raw_line) {
            if let Some(kind) = SymbolKind::from_directive(&cap[2]) {
                items.push(DocItem::Directive(Directive {
                    indent: cap[1].len(),
                    kind,
                    line,
                    signature: cap[3].trim().to_string(),
                }));
            }
            continue;
        }

        let indent = line_indent(raw_line);
        for cap in role.captures_iter(raw_line) {
            let Some(kind_hint) = role_kind_hint(&cap[1]) else {
                continue;
            };
            let (explicit_title, raw_target) = split_explicit_title(&cap[2]);
            items.push(DocItem::Role(RoleRef {
                explicit_title,
                indent,
                kind_hint,
                line,
                raw_target,
            }));
        }
    }

    items
}

/// Discover documentation source files under `root`, filtered by the
/// config's extension and include/exclude prefixes. Paths come back
/// relative to `root`, sorted for deterministic processing order.
/// Unreadable directory entries are skipped.
pub fn find_documents(root: &Path, config: &Config) -> Vec<PathBuf> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == config.extension()))
    {
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        if config.should_scan(&relative.to_string_lossy()) {
            documents.push(relative);
        }
    }

    documents.sort();
    documents
}

/// Width of a line's leading whitespace.
fn line_indent(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Map a role name to its advisory kind hint.
///
/// Returns `None` for roles outside this domain; `Some(None)` for the
/// generic `obj` role, which carries no hint.
fn role_kind_hint(name: &str) -> Option<Option<SymbolKind>> {
    match name {
        "meth" => Some(Some(SymbolKind::Method)),
        "obj" => Some(None),
        "thread" => Some(Some(SymbolKind::Thread)),
        "trait" => Some(Some(SymbolKind::Trait)),
        "type" => Some(Some(SymbolKind::Type)),
        _ => None,
    }
}

/// Split the `title <target>` role form into its parts.
fn split_explicit_title(content: &str) -> (Option<String>, String) {
    if content.ends_with('>') {
        if let Some(open) = content.rfind('<') {
            let title = content[..open].trim();
            let target = content[open + 1..content.len() - 1].trim();
            if !title.is_empty() {
                return (Some(title.to_string()), target.to_string());
            }
        }
    }
    (None, content.to_string())
}

#[cfg(test)]
mod tests {
    use super::{DocItem, field_label, scan_document};
    use crate::types::SymbolKind;

    #[test]
    fn directive_with_indented_body_role() {
        let text = "\
.. type:: array

   Holds an ordered collection. See :meth:`->sort()`.
";
        let items = scan_document(text);
        assert_eq!(items.len(), 2);

        let DocItem::Directive(directive) = &items[0] else {
            panic!("expected a directive first");
        };
        assert_eq!(directive.kind, SymbolKind::Type);
        assert_eq!(directive.signature, "array");
        assert_eq!(directive.indent, 0);

        let DocItem::Role(role) = &items[1] else {
            panic!("expected a role second");
        };
        assert_eq!(role.raw_target, "->sort()");
        assert_eq!(role.kind_hint, Some(SymbolKind::Method));
        assert_eq!(role.line, 3);
        assert_eq!(role.indent, 3);
    }

    #[test]
    fn unknown_directives_and_roles_are_skipped() {
        let text = "\
.. note:: not ours

See :ref:`elsewhere` and :obj:`duration`.
";
        let items = scan_document(text);
        assert_eq!(items.len(), 1);
        let DocItem::Role(role) = &items[0] else {
            panic!("expected only the obj role");
        };
        assert_eq!(role.raw_target, "duration");
        assert_eq!(role.kind_hint, None);
    }

    #[test]
    fn explicit_title_form_is_split() {
        let items = scan_document("See :meth:`the sorter <array->sort>`.\n");
        let DocItem::Role(role) = &items[0] else {
            panic!("expected a role");
        };
        assert_eq!(role.explicit_title.as_deref(), Some("the sorter"));
        assert_eq!(role.raw_target, "array->sort");
    }

    #[test]
    fn metadata_field_names_are_recognized_verbatim() {
        assert_eq!(field_label("param"), Some("Parameters"));
        assert_eq!(field_label("returnsas"), Some("Returns as"));
        assert_eq!(field_label("url"), Some("See also"));
        assert_eq!(field_label("super"), Some("Parent"));
        assert_eq!(field_label("imports"), Some("Imports"));
        assert_eq!(field_label("frobnicate"), None);
    }
}
