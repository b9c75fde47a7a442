use crate::error::Error;
use crate::project::Warning;
use crate::types::{CrossReferenceRequest, Diagnostic, SymbolKind};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and how to fix it.
/// Designed to be readable by both humans and LLM agents.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::DocumentUnreadable { path, reason } => format!("\
# Error: Document Unreadable

Could not read `{}`: {reason}
", path.display()),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),

        Error::TomlDe(e) => format!("\
# Error: Invalid TOML

{e}

## Fix

Check the syntax of your `.symref.toml`.
"),
    }
}

/// One-line warning for a non-fatal registration diagnostic.
///
/// The build continues; the later registration has already won.
pub fn render_warning(warning: &Warning) -> String {
    match &warning.diagnostic {
        Diagnostic::DuplicateSymbol { fullname, previous_document } => format!(
            "warning: {}:{}: duplicate description of `{fullname}`, other instance in {}",
            warning.document.display(),
            warning.line,
            previous_document.display(),
        ),
    }
}

/// One-line notice for a reference that resolved to nothing.
///
/// Unresolved references are a defined outcome: the renderer falls back
/// to the display text as plain text, and the build never aborts.
pub fn render_unresolved(request: &CrossReferenceRequest) -> String {
    let role = request.kind_hint.map_or("obj", SymbolKind::as_str);
    format!(
        "UNRESOLVED  {}:{}  `{}` ({role} role, shown as \"{}\")",
        request.source.display(),
        request.source_line,
        request.target,
        request.display,
    )
}
