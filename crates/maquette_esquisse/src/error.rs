//! Error types for component extraction.

use maquette_carton::CompactString;
use thiserror::Error;

/// Fatal errors that abort an extraction run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The parser could not produce a syntax tree
    #[error("Failed to parse source: {}", .messages.join("; "))]
    Parse { messages: Vec<String> },

    /// An expression attribute references a name the component never declared
    #[error("Undefined property `{name}` referenced in component `{component}` at {start}..{end}")]
    UndefinedProperty {
        component: CompactString,
        name: CompactString,
        start: u32,
        end: u32,
    },

    /// An array property would wrap another array
    #[error("Property `{name}` is an array of arrays, which is not supported")]
    ArrayOfArrays { name: CompactString },

    /// A computed expression attribute was found while inline expressions are disabled
    #[error(
        "Inline expression in attribute `{attribute}` of component `{component}` at {start}..{end} is not allowed"
    )]
    InlineExpression {
        component: CompactString,
        attribute: CompactString,
        start: u32,
        end: u32,
    },
}

impl ExtractError {
    /// Byte offset of the offending node, when the error carries one.
    pub fn offset(&self) -> Option<u32> {
        match self {
            Self::UndefinedProperty { start, .. } | Self::InlineExpression { start, .. } => {
                Some(*start)
            }
            Self::Parse { .. } | Self::ArrayOfArrays { .. } => None,
        }
    }

    /// Component the error was raised in, when known.
    pub fn component(&self) -> Option<&str> {
        match self {
            Self::UndefinedProperty { component, .. } | Self::InlineExpression { component, .. } => {
                Some(component.as_str())
            }
            Self::Parse { .. } | Self::ArrayOfArrays { .. } => None,
        }
    }
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
