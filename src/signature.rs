//! Signature parsing: raw directive text into structured name components.
//!
//! Grammar accepted, informally:
//!
//! ```text
//! body   := prefix ["(" arglist ")"] ["::" returnType]
//! prefix := [ownerPath "->"] leafName
//! ```
//!
//! Parsing never fails past the directive boundary: malformed text
//! degrades to "the whole text is the leaf name" so one bad declaration
//! cannot abort a build.

use crate::types::{ParsedSignature, SymbolKind};

/// Parse a raw signature string into its name components.
///
/// `ambient` is the fullname of the enclosing open definition, if any.
/// An explicit owner prefix in the signature fully overrides it; the two
/// are never combined.
pub fn parse(kind: SymbolKind, raw: &str, ambient: Option<&str>) -> ParsedSignature {
    let text = raw.trim();
    let spec = kind.spec();

    let (body, return_type) = split_return_type(text);

    let (prefix, arg_text) = match split_arg_list(body) {
        Some(split) => split,
        // Unbalanced parentheses: degrade to leaf-only so the directive
        // still renders something.
        None => {
            return degraded(kind, text);
        },
    };

    let (owner_path, leaf) = match prefix.rsplit_once("->") {
        Some((owner, leaf)) => (Some(owner.trim()), leaf.trim()),
        None => (None, prefix.trim()),
    };

    // Explicit prefix wins over ambient scope. The two are intentionally
    // never combined into `ambient->prefix->leaf`.
    let (owner, fullname) = match (owner_path, ambient) {
        (Some(owner), _) => (owner.to_string(), format!("{owner}->{leaf}")),
        (None, Some(scope)) => (scope.to_string(), format!("{scope}->{leaf}")),
        (None, None) => (String::new(), leaf.to_string()),
    };

    ParsedSignature {
        arg_text: arg_text.map(str::to_string),
        fullname,
        keyword: spec.keyword,
        leaf: leaf.to_string(),
        needs_arg_list: spec.needs_arg_list,
        owner,
        return_type: return_type.map(str::to_string),
    }
}

/// Split off a trailing return type.
///
/// With parentheses present, only a `::` after the final `)` counts
/// (`run(a::b)` has no return type). Without parentheses, the rightmost
/// `::` splits.
fn split_return_type(text: &str) -> (&str, Option<&str>) {
    if let Some(close) = text.rfind(')') {
        if let Some(rel) = text[close..].rfind("::") {
            let at = close + rel;
            return (text[..at].trim_end(), Some(text[at + 2..].trim()));
        }
        return (text, None);
    }
    match text.rfind("::") {
        Some(at) => (text[..at].trim_end(), Some(text[at + 2..].trim())),
        None => (text, None),
    }
}

/// Split `prefix(arglist)` into prefix and trimmed argument text.
///
/// Returns `Some((body, None))` when no `(` is present, and `None` when a
/// `(` exists but the body does not end with `)` (malformed).
fn split_arg_list(body: &str) -> Option<(&str, Option<&str>)> {
    let open = match body.find('(') {
        Some(i) => i,
        None => return Some((body, None)),
    };
    if !body.ends_with(')') {
        return None;
    }
    let args = body[open + 1..body.len() - 1].trim();
    Some((&body[..open], Some(args)))
}

/// Fallback parse for malformed text: whole trimmed text as the leaf,
/// no owner, no argument text, no return type.
fn degraded(kind: SymbolKind, text: &str) -> ParsedSignature {
    let spec = kind.spec();
    ParsedSignature {
        arg_text: None,
        fullname: text.to_string(),
        keyword: spec.keyword,
        leaf: text.to_string(),
        needs_arg_list: spec.needs_arg_list,
        owner: String::new(),
        return_type: None,
    }
}
