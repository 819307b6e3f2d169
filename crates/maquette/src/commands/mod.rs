//! Subcommands and the helpers they share.

pub mod ancestry;
pub mod components;
pub mod extract;

use clap::ValueEnum;
use ignore::Walk;
use maquette_esquisse::{Diagnostic, ExtractError, SourceKind};
use std::path::{Path, PathBuf};

/// File extensions scanned for components
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum SourceKindArg {
    /// Classic script
    Script,
    /// ES module
    #[default]
    Module,
    /// Detect from import/export usage
    Unambiguous,
}

impl From<SourceKindArg> for SourceKind {
    fn from(arg: SourceKindArg) -> Self {
        match arg {
            SourceKindArg::Script => SourceKind::Script,
            SourceKindArg::Module => SourceKind::Module,
            SourceKindArg::Unambiguous => SourceKind::Unambiguous,
        }
    }
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Expand files and directories into the sorted list of source files.
///
/// Directories are walked honoring `.gitignore`; files given explicitly are
/// kept whatever their extension.
pub fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }

        for entry in Walk::new(path).flatten() {
            let entry_path = entry.path();
            if entry_path.is_file() && is_source_file(entry_path) {
                files.push(entry_path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    files
}

/// 1-based line and column of a byte offset.
pub fn line_col(source: &str, offset: u32) -> (usize, usize) {
    let offset = (offset as usize).min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(newline) => before[newline + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, column)
}

/// Render a fatal extraction error with its component and source position.
pub fn format_error(path: &Path, source: &str, err: &ExtractError) -> String {
    let label = match err.component() {
        Some(component) => format!("error[{}]", component),
        None => "error".to_string(),
    };
    match err.offset() {
        Some(offset) => {
            let (line, column) = line_col(source, offset);
            format!("{}: {}:{}:{}: {}", label, path.display(), line, column, err)
        }
        None => format!("{}: {}: {}", label, path.display(), err),
    }
}

/// Print a fatal extraction error.
pub fn report_error(path: &Path, source: &str, err: &ExtractError) {
    eprintln!("{}", format_error(path, source, err));
}

/// Print a recoverable diagnostic.
pub fn report_diagnostic(path: &Path, source: &str, diagnostic: &Diagnostic) {
    let severity = diagnostic.severity.display_name();
    if diagnostic.start == 0 && diagnostic.end == 0 {
        eprintln!("{}: {}: {}", severity, path.display(), diagnostic.message);
    } else {
        let (line, column) = line_col(source, diagnostic.start);
        eprintln!(
            "{}: {}:{}:{}: {}",
            severity,
            path.display(),
            line,
            column,
            diagnostic.message
        );
    }
}
