//! Parser collaborator: turns source text into an oxc syntax tree.

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType;
use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, ExtractResult};

/// How the parser should treat the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Classic script (no import/export)
    Script,
    /// ES module
    #[default]
    Module,
    /// Detect from the presence of import/export
    Unambiguous,
}

/// Options for [`parse_program`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    pub kind: SourceKind,
    /// Accept TypeScript syntax (`.ts` / `.tsx` input)
    pub typescript: bool,
}

impl ParseOptions {
    /// Options for a module, with TypeScript enabled based on the file name.
    pub fn for_path(path: &std::path::Path, kind: SourceKind) -> Self {
        let typescript = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext, "ts" | "tsx" | "mts" | "cts"));
        Self { kind, typescript }
    }

    /// oxc source type for these options. JSX is always enabled.
    pub fn source_type(&self) -> SourceType {
        let source_type = SourceType::default()
            .with_jsx(true)
            .with_typescript(self.typescript);
        match self.kind {
            SourceKind::Script => source_type.with_script(true),
            SourceKind::Module => source_type.with_module(true),
            SourceKind::Unambiguous => source_type.with_unambiguous(true),
        }
    }
}

/// Parse `source` into a program allocated in `allocator`.
///
/// Any parser diagnostic makes the whole input malformed; no partial tree
/// is returned.
pub fn parse_program<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    options: ParseOptions,
) -> ExtractResult<Program<'a>> {
    let ret = Parser::new(allocator, source, options.source_type()).parse();

    if ret.panicked || !ret.errors.is_empty() {
        let mut messages: Vec<String> = ret.errors.iter().map(|e| e.to_string()).collect();
        if messages.is_empty() {
            messages.push("parser aborted".to_string());
        }
        tracing::debug!("parse failed with {} diagnostic(s)", messages.len());
        return Err(ExtractError::Parse { messages });
    }

    Ok(ret.program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_parse_jsx_module() {
        let allocator = Allocator::default();
        let program = parse_program(
            &allocator,
            "export const A = () => <div className=\"a\" />;",
            ParseOptions::default(),
        )
        .unwrap();
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn test_parse_error_is_malformed_input() {
        let allocator = Allocator::default();
        let err = parse_program(&allocator, "const = <div", ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ExtractError::Parse { ref messages } if !messages.is_empty()));
    }

    #[test]
    fn test_typescript_from_path() {
        let opts = ParseOptions::for_path(Path::new("src/Card.tsx"), SourceKind::Module);
        assert!(opts.typescript);
        let opts = ParseOptions::for_path(Path::new("src/Card.jsx"), SourceKind::Script);
        assert!(!opts.typescript);
        assert_eq!(opts.kind, SourceKind::Script);
    }

    #[test]
    fn test_parse_typescript_props() {
        let allocator = Allocator::default();
        let options = ParseOptions {
            kind: SourceKind::Module,
            typescript: true,
        };
        let program = parse_program(
            &allocator,
            "function Card({ id }: { id: string }) { return <div id={id} />; }",
            options,
        );
        assert!(program.is_ok());
    }
}
