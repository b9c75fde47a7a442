//! Cross-reference resolution, split into two phases.
//!
//! Normalization happens at the reference's original site and snapshots
//! the ambient scope there. Resolution runs later, against the finished
//! registry, so forward references work. Resolution is a pure lookup:
//! it never errors, and an unresolved reference degrades to plain text
//! at the render site.

use std::path::Path;

use crate::registry::Registry;
use crate::types::{CrossReferenceRequest, Resolution, SymbolKind};

/// Normalize a raw role target into a resolution request.
///
/// Markers handled on the target: a leading `->` marks the reference as
/// scope-relative (`prefer_local`), a leading `~` asks for an
/// abbreviated display title. When the author supplied an explicit
/// title, all display derivation is skipped.
pub fn normalize(
    raw_target: &str,
    explicit_title: Option<&str>,
    kind_hint: Option<SymbolKind>,
    ambient: Option<&str>,
    source: &Path,
    source_line: u32,
) -> CrossReferenceRequest {
    let mut target = raw_target.to_string();
    let mut display = match explicit_title {
        Some(title) => title.to_string(),
        None => derive_display(&mut target),
    };

    let mut prefer_local = false;
    if let Some(rest) = target.strip_prefix("->") {
        target = rest.to_string();
        prefer_local = true;
        if explicit_title.is_none() && display.is_empty() {
            display = target.clone();
        }
    }

    CrossReferenceRequest {
        ambient: ambient.map(str::to_string),
        display,
        kind_hint,
        prefer_local,
        source: source.to_path_buf(),
        source_line,
        target,
    }
}

/// Derive the display title from the raw target, stripping resolution
/// markers from `target` as a side effect.
///
/// Display drops one leading `->`; the resolution target drops one
/// leading `~`. A display still starting with `~` is abbreviated: drop
/// the marker and keep only the text after the last `->`.
fn derive_display(target: &mut String) -> String {
    let mut display = target
        .strip_prefix("->")
        .unwrap_or(target.as_str())
        .to_string();

    if target.starts_with('~') {
        target.remove(0);
    }

    if let Some(rest) = display.strip_prefix('~') {
        display = match rest.rfind("->") {
            Some(arrow) => rest[arrow + 2..].to_string(),
            None => rest.to_string(),
        };
    }

    display
}

/// Resolve one request against the finished registry.
///
/// One exact lookup per candidate, first hit wins. The kind hint is
/// advisory only: a name registered under any kind satisfies a lookup
/// for any role.
pub fn resolve(request: &CrossReferenceRequest, registry: &Registry) -> Resolution {
    // Call sugar: `method()` and `method` resolve identically.
    let target = request.target.strip_suffix("()").unwrap_or(&request.target);

    let scoped = request
        .ambient
        .as_deref()
        .map(|scope| format!("{scope}->{target}"));

    let candidates: [Option<&str>; 2] = if request.prefer_local {
        [scoped.as_deref(), Some(target)]
    } else {
        [Some(target), scoped.as_deref()]
    };

    for candidate in candidates.into_iter().flatten() {
        if let Some(entry) = registry.lookup(candidate) {
            return Resolution::Resolved {
                document: entry.document.clone(),
                fullname: candidate.to_string(),
                kind: entry.kind,
            };
        }
    }

    Resolution::Unresolved
}

#[cfg(test)]
mod tests {
    use super::{normalize, resolve};
    use crate::registry::Registry;
    use crate::types::{Resolution, SymbolKind};
    use std::path::Path;

    fn request(target: &str, ambient: Option<&str>) -> crate::types::CrossReferenceRequest {
        normalize(target, None, None, ambient, Path::new("guide.rst"), 1)
    }

    #[test]
    fn leading_arrow_sets_prefer_local() {
        let req = request("->foo", Some("Bar"));
        assert!(req.prefer_local);
        assert_eq!(req.target, "foo");
        assert_eq!(req.display, "foo");
    }

    #[test]
    fn prefer_local_tries_scoped_candidate_first() {
        let mut registry = Registry::new();
        let doc = Path::new("bar.rst");
        registry.register("Bar->foo", doc, SymbolKind::Method);
        registry.register("foo", Path::new("other.rst"), SymbolKind::Method);

        let req = request("->foo", Some("Bar"));
        let resolved = resolve(&req, &registry);
        assert_eq!(
            resolved,
            Resolution::Resolved {
                document: doc.to_path_buf(),
                fullname: "Bar->foo".to_string(),
                kind: SymbolKind::Method,
            }
        );
    }

    #[test]
    fn bare_target_wins_without_prefer_local() {
        let mut registry = Registry::new();
        registry.register("Bar->foo", Path::new("bar.rst"), SymbolKind::Method);
        let bare_doc = Path::new("other.rst");
        registry.register("foo", bare_doc, SymbolKind::Method);

        let resolved = resolve(&request("foo", Some("Bar")), &registry);
        let Resolution::Resolved { document, fullname, .. } = resolved else {
            panic!("expected a match");
        };
        assert_eq!(fullname, "foo");
        assert_eq!(document, bare_doc);
    }

    #[test]
    fn falls_back_to_scoped_candidate() {
        let mut registry = Registry::new();
        registry.register("Bar->foo", Path::new("bar.rst"), SymbolKind::Method);

        let resolved = resolve(&request("foo", Some("Bar")), &registry);
        assert!(matches!(
            resolved,
            Resolution::Resolved { fullname, .. } if fullname == "Bar->foo"
        ));
    }

    #[test]
    fn call_sugar_is_stripped_before_lookup() {
        let mut registry = Registry::new();
        registry.register("abort", Path::new("m.rst"), SymbolKind::Method);

        let resolved = resolve(&request("abort()", None), &registry);
        assert!(matches!(resolved, Resolution::Resolved { .. }));
    }

    #[test]
    fn unresolved_is_an_outcome_not_an_error() {
        let registry = Registry::new();
        let resolved = resolve(&request("nonexistent", None), &registry);
        assert_eq!(resolved, Resolution::Unresolved);
    }

    #[test]
    fn tilde_abbreviates_display_to_trailing_leaf() {
        let req = request("~array->sort()", None);
        assert_eq!(req.target, "array->sort()");
        assert_eq!(req.display, "sort()");
        assert!(!req.prefer_local);
    }

    #[test]
    fn explicit_title_skips_display_derivation() {
        let req = normalize(
            "~array->sort",
            Some("the sort method"),
            Some(SymbolKind::Method),
            None,
            Path::new("guide.rst"),
            4,
        );
        assert_eq!(req.display, "the sort method");
        // Explicit titles leave the target untouched apart from markers.
        assert_eq!(req.target, "~array->sort");
    }

    #[test]
    fn kind_hint_does_not_gate_matches() {
        let mut registry = Registry::new();
        registry.register("duration", Path::new("t.rst"), SymbolKind::Type);

        let req = normalize(
            "duration",
            None,
            Some(SymbolKind::Method),
            None,
            Path::new("guide.rst"),
            9,
        );
        assert!(matches!(resolve(&req, &registry), Resolution::Resolved { .. }));
    }
}
