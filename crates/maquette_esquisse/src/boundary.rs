//! Component boundary location.
//!
//! A component boundary is the span and declared-parameter summary of one
//! function, arrow function or class that renders markup. Candidates are
//! captured as [`Declaration`]s while walking down the tree; when markup is
//! reached, the innermost enclosing candidate is [located](Declaration::locate)
//! into a [`ComponentBoundary`].

use maquette_carton::CompactString;
use oxc_ast::ast::{ArrowFunctionExpression, Class, Expression, Function};
use oxc_span::Span;
use serde::Serialize;

use crate::error::ExtractResult;
use crate::params::{extract_class_params, extract_function_params, ParameterSet};
use crate::property::PropertySet;

/// Declaration shape of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclarationKind {
    /// `function Card(props) { ... }`
    Functional,
    /// `const Card = (props) => ...`
    Arrow,
    /// `class Card extends Component { ... }`
    Class,
}

impl DeclarationKind {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Functional => "functional",
            Self::Arrow => "arrow",
            Self::Class => "class",
        }
    }
}

/// A discovered component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentBoundary {
    pub kind: DeclarationKind,
    pub name: CompactString,
    /// Declaration span start (inclusive byte offset)
    pub start: u32,
    /// Declaration span end (exclusive byte offset)
    pub end: u32,
    pub properties: PropertySet,
    pub has_children: bool,
}

impl ComponentBoundary {
    /// True when `[start, end]` lies within this boundary.
    #[inline]
    pub fn contains(&self, start: u32, end: u32) -> bool {
        self.start <= start && self.end >= end
    }

    /// True when the component declared at least one non-children property.
    #[inline]
    pub fn needs_props(&self) -> bool {
        self.properties.has_declared()
    }
}

/// Outcome of locating the component for a markup element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located {
    Boundary(ComponentBoundary),
    /// A class whose superclass is not a recognized component base
    NotComponent,
    /// The declaration has no discoverable name
    Unnamed(DeclarationKind),
}

/// A candidate component declaration enclosing the current traversal point
#[derive(Debug, Clone)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: Option<CompactString>,
    pub span: Span,
    /// False for classes that do not extend a component base
    pub qualifies: bool,
    /// Deferred until located, so non-component functions never fail extraction
    params: ExtractResult<ParameterSet>,
}

impl Declaration {
    /// Function declaration. Anonymous declarations (`export default function () {}`)
    /// are kept so they can be reported.
    pub fn function(func: &Function<'_>) -> Self {
        Self {
            kind: DeclarationKind::Functional,
            name: func
                .id
                .as_ref()
                .map(|id| CompactString::new(id.name.as_str())),
            span: func.span,
            qualifies: true,
            params: extract_function_params(&func.params),
        }
    }

    /// Arrow function, named after the variable it is bound to.
    pub fn arrow(arrow: &ArrowFunctionExpression<'_>, binding: Option<CompactString>) -> Self {
        Self {
            kind: DeclarationKind::Arrow,
            name: binding,
            span: arrow.span,
            qualifies: true,
            params: extract_function_params(&arrow.params),
        }
    }

    /// Class declaration. Qualifies only when its superclass resolves to one
    /// of `is_base`'s accepted names.
    pub fn class(class: &Class<'_>, is_base: impl Fn(&str) -> bool) -> Self {
        let qualifies = class
            .super_class
            .as_ref()
            .and_then(superclass_name)
            .is_some_and(is_base);

        Self {
            kind: DeclarationKind::Class,
            name: class
                .id
                .as_ref()
                .map(|id| CompactString::new(id.name.as_str())),
            span: class.span,
            qualifies,
            params: extract_class_params(class),
        }
    }

    /// Turn this declaration into a component boundary.
    pub fn locate(&self) -> ExtractResult<Located> {
        if !self.qualifies {
            return Ok(Located::NotComponent);
        }

        let Some(name) = self.name.as_ref().filter(|name| !name.is_empty()) else {
            return Ok(Located::Unnamed(self.kind));
        };

        let params = self.params.clone()?;

        Ok(Located::Boundary(ComponentBoundary {
            kind: self.kind,
            name: name.clone(),
            start: self.span.start,
            end: self.span.end,
            properties: params.properties,
            has_children: params.has_children,
        }))
    }
}

/// Rightmost name of a superclass reference: `Component` or `React.Component`.
pub fn superclass_name<'b>(expr: &'b Expression<'_>) -> Option<&'b str> {
    match expr {
        Expression::Identifier(id) => Some(id.name.as_str()),
        Expression::StaticMemberExpression(member) => Some(member.property.name.as_str()),
        Expression::ParenthesizedExpression(paren) => superclass_name(&paren.expression),
        _ => None,
    }
}
