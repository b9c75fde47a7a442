/// Core domain types for symref signatures, symbols, and resolution.
use std::path::PathBuf;

/// The seven symbol kinds recognized by reference-manual directives.
///
/// Definition-kinds (`Type`, `Trait`, `Thread`) can host ambient scope;
/// tag-kinds (`Method`, `Member`, `Provide`, `Require`) only read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// A member tag inside a type definition.
    Member,
    /// A method, bound or unbound.
    Method,
    /// A provided method inside a trait definition.
    Provide,
    /// A required method inside a trait definition.
    Require,
    /// A thread object definition.
    Thread,
    /// A trait definition.
    Trait,
    /// A type definition.
    Type,
}

/// Data-driven configuration for one symbol kind.
///
/// Every kind-specific decision (scope hosting, argument-list rendering,
/// signature keyword) lives in this table and nowhere else.
pub struct KindSpec {
    /// Whether a definition of this kind opens ambient scope for its body.
    pub hosts_scope: bool,
    /// Signature keyword shown before the name, e.g. `type` or `provide`.
    pub keyword: Option<&'static str>,
    /// Whether an argument-list node must be rendered even when the
    /// signature text carries none.
    pub needs_arg_list: bool,
}

impl SymbolKind {
    /// Look up the configuration row for this kind.
    pub const fn spec(self) -> &'static KindSpec {
        match self {
            SymbolKind::Member => &KindSpec {
                hosts_scope: false,
                keyword: None,
                needs_arg_list: true,
            },
            SymbolKind::Method => &KindSpec {
                hosts_scope: false,
                keyword: None,
                needs_arg_list: true,
            },
            SymbolKind::Provide => &KindSpec {
                hosts_scope: false,
                keyword: Some("provide"),
                needs_arg_list: true,
            },
            SymbolKind::Require => &KindSpec {
                hosts_scope: false,
                keyword: Some("require"),
                needs_arg_list: true,
            },
            SymbolKind::Thread => &KindSpec {
                hosts_scope: true,
                keyword: Some("thread"),
                needs_arg_list: false,
            },
            SymbolKind::Trait => &KindSpec {
                hosts_scope: true,
                keyword: Some("trait"),
                needs_arg_list: false,
            },
            SymbolKind::Type => &KindSpec {
                hosts_scope: true,
                keyword: Some("type"),
                needs_arg_list: false,
            },
        }
    }

    /// The directive name for this kind, as written in documentation source.
    pub const fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Member => "member",
            SymbolKind::Method => "method",
            SymbolKind::Provide => "provide",
            SymbolKind::Require => "require",
            SymbolKind::Thread => "thread",
            SymbolKind::Trait => "trait",
            SymbolKind::Type => "type",
        }
    }

    /// Parse a directive name into a kind. Returns `None` for unknown names.
    pub fn from_directive(name: &str) -> Option<Self> {
        match name {
            "member" => Some(SymbolKind::Member),
            "method" => Some(SymbolKind::Method),
            "provide" => Some(SymbolKind::Provide),
            "require" => Some(SymbolKind::Require),
            "thread" => Some(SymbolKind::Thread),
            "trait" => Some(SymbolKind::Trait),
            "type" => Some(SymbolKind::Type),
            _ => None,
        }
    }
}

/// Structured output of signature parsing.
///
/// `owner` is the empty string, not `None`, when the name is explicitly
/// unbound — the registry keys on `fullname` either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSignature {
    /// Raw argument text between the parentheses, trimmed. Absent when the
    /// signature carried no parenthesized list.
    pub arg_text: Option<String>,
    /// The registry key: `owner->leaf`, or bare `leaf` when unbound.
    pub fullname: String,
    /// Keyword shown before the name for definition and trait-tag kinds.
    pub keyword: Option<&'static str>,
    /// The rightmost name component. Always present.
    pub leaf: String,
    /// Whether the renderer must emit an argument-list node even when
    /// `arg_text` is absent.
    pub needs_arg_list: bool,
    /// Owning scope of the symbol: explicit prefix, ambient scope, or the
    /// empty-string sentinel for unbound names.
    pub owner: String,
    /// Raw return type text following `::`, if any.
    pub return_type: Option<String>,
}

/// A cross-reference captured at its original site, before resolution.
///
/// The ambient scope is snapshotted here because references are written
/// during document parsing but resolved only after every document has
/// been processed — forward references must work.
#[derive(Debug, Clone)]
pub struct CrossReferenceRequest {
    /// Ambient scope open at the reference site, if any.
    pub ambient: Option<String>,
    /// Text shown to the reader, derived during normalization unless the
    /// author supplied an explicit title.
    pub display: String,
    /// Advisory role hint. A name registered under any kind satisfies a
    /// lookup for any role.
    pub kind_hint: Option<SymbolKind>,
    /// Whether scope-qualified candidates are tried before bare names.
    pub prefer_local: bool,
    /// Document containing the reference.
    pub source: PathBuf,
    /// One-based line number of the reference in the source document.
    pub source_line: u32,
    /// The name to resolve, after marker stripping.
    pub target: String,
}

/// Outcome of resolving one cross-reference request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The request matched a registered symbol.
    Resolved {
        /// Document that declared the matched symbol.
        document: PathBuf,
        /// The matched registry key.
        fullname: String,
        /// Kind the symbol was registered under.
        kind: SymbolKind,
    },
    /// No registered symbol matched. A defined outcome, not an error —
    /// consumers render the display text as plain text.
    Unresolved,
}

/// A non-fatal problem surfaced during registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The same fullname was registered from two different documents.
    /// The later registration won.
    DuplicateSymbol {
        /// The contested registry key.
        fullname: String,
        /// Document whose earlier registration was overwritten.
        previous_document: PathBuf,
    },
}
