//! Recoverable extraction diagnostics.
//!
//! Fatal problems are reported through [`ExtractError`](crate::ExtractError);
//! everything else is accumulated here and returned alongside a best-effort
//! result.

use maquette_carton::CompactString;
use serde::Serialize;

use crate::boundary::DeclarationKind;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum DiagnosticSeverity {
    /// Error - output for the affected item is incomplete.
    Error = 0,
    /// Warning - input was skipped.
    Warning = 1,
}

impl DiagnosticSeverity {
    /// Get display name.
    #[inline]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// Kind of extraction diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// A declaration encloses markup but has no discoverable name.
    /// Anonymous function declarations and arrows not bound to a variable.
    InvalidDeclaration { kind: DeclarationKind },
    /// A discovered semantic type has no entry in the type mapping.
    UnmappedType {
        component: CompactString,
        property: CompactString,
        semantic_type: CompactString,
    },
}

/// A diagnostic produced during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub kind: DiagnosticKind,
    pub message: String,
    /// Source offset of the offending node (0 when not tied to source).
    pub start: u32,
    pub end: u32,
}

impl Diagnostic {
    pub fn invalid_declaration(kind: DeclarationKind, start: u32, end: u32) -> Self {
        let message = match kind {
            DeclarationKind::Arrow => {
                "Arrow function is not bound to a named variable; markup inside it is not a component"
            }
            DeclarationKind::Functional => {
                "Anonymous function declaration cannot be a component"
            }
            DeclarationKind::Class => "Anonymous class declaration cannot be a component",
        };
        Self {
            severity: DiagnosticSeverity::Warning,
            kind: DiagnosticKind::InvalidDeclaration { kind },
            message: message.to_string(),
            start,
            end,
        }
    }

    pub fn unmapped_type(component: &str, property: &str, semantic_type: &str) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            message: format!(
                "No type mapping for `{}` (property `{}` of component `{}`)",
                semantic_type, property, component
            ),
            kind: DiagnosticKind::UnmappedType {
                component: CompactString::new(component),
                property: CompactString::new(property),
                semantic_type: CompactString::new(semantic_type),
            },
            start: 0,
            end: 0,
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}
