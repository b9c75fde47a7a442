mod config;
mod diagnostics;
mod error;
mod index;
mod project;
mod registry;
mod scanner;
mod scope;
mod signature;
mod types;
mod xref;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::project::Project;
use crate::types::Resolution;

#[derive(Parser)]
#[command(name = "symref", about = "Qualified-name resolution for language reference manuals")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every cross-reference against the declared symbols
    Check,
    /// Print the global symbol index, sorted by fullname
    Index {
        /// Emit JSON instead of the text table
        #[arg(long)]
        json: bool,
    },
    /// Resolve a single target string against the scanned registry
    Resolve {
        /// The reference target, e.g. `array->sort()` or `duration`
        target: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check => cmd_check(),
        Commands::Index { json } => cmd_index(json),
        Commands::Resolve { target } => cmd_resolve(&target),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
    }
}

/// Load the configured project from the current directory.
///
/// # Errors
///
/// Returns errors from config loading or document reading.
fn load_project(root: &Path) -> Result<Project, error::Error> {
    let config = config::Config::load(root)?;
    Project::load(root, &config)
}

/// Scan sources, register every declaration, resolve every reference.
///
/// # Errors
///
/// Returns errors from config loading or document reading.
fn cmd_check() -> Result<ExitCode, error::Error> {
    let root = PathBuf::from(".");
    let project = load_project(&root)?;

    for warning in project.warnings() {
        eprintln!("{}", diagnostics::render_warning(warning));
    }

    let mut unresolved_count = 0u32;
    let mut resolved_count = 0u32;
    for (request, resolution) in project.resolve_all() {
        match resolution {
            Resolution::Resolved { .. } => resolved_count += 1,
            Resolution::Unresolved => {
                unresolved_count += 1;
                println!("{}", diagnostics::render_unresolved(&request));
            },
        }
    }

    if unresolved_count > 0 {
        println!();
        println!("{unresolved_count} unresolved, {resolved_count} resolved");
        return Ok(ExitCode::from(1));
    }

    println!(
        "All {resolved_count} references resolved ({} symbols)",
        project.registry().len()
    );
    Ok(ExitCode::SUCCESS)
}

/// JSON shape for one `index --json` row.
#[derive(serde::Serialize)]
struct IndexEntryJson {
    display: String,
    document: String,
    fullname: String,
    kind: &'static str,
}

/// Print the global index, sorted by fullname.
///
/// # Errors
///
/// Returns errors from config loading or document reading.
fn cmd_index(json: bool) -> Result<ExitCode, error::Error> {
    let root = PathBuf::from(".");
    let project = load_project(&root)?;
    let entries = index::build_index(project.registry());

    if json {
        let rows: Vec<IndexEntryJson> = entries
            .into_iter()
            .map(|entry| IndexEntryJson {
                display: entry.display,
                document: entry.document.display().to_string(),
                fullname: entry.fullname,
                kind: entry.kind.as_str(),
            })
            .collect();
        // serde_json::to_string_pretty won't fail on this structure.
        let out = serde_json::to_string_pretty(&rows).unwrap_or_default();
        println!("{out}");
        return Ok(ExitCode::SUCCESS);
    }

    for entry in &entries {
        println!(
            "{:<40} {:<30} {}",
            entry.display,
            entry.fullname,
            entry.document.display()
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Resolve one target string as if written in a document with no open scope.
///
/// # Errors
///
/// Returns errors from config loading or document reading.
fn cmd_resolve(target: &str) -> Result<ExitCode, error::Error> {
    let root = PathBuf::from(".");
    let project = load_project(&root)?;

    let request = xref::normalize(target, None, None, None, Path::new("<cli>"), 0);
    match xref::resolve(&request, project.registry()) {
        Resolution::Resolved { document, fullname, kind } => {
            println!("{fullname} ({}) declared in {}", kind.as_str(), document.display());
            Ok(ExitCode::SUCCESS)
        },
        Resolution::Unresolved => {
            println!("unresolved: `{target}`");
            Ok(ExitCode::from(1))
        },
    }
}
