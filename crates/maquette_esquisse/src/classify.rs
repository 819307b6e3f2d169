//! Literal type classification.
//!
//! Maps literal syntax nodes onto [`PrimitiveKind`]s, and array/object
//! literals onto composite property types.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use maquette_carton::{to_pascal_case, CompactString};
use oxc_ast::ast::{ArrayExpressionElement, Expression};
use oxc_syntax::number::NumberBase;
use oxc_syntax::operator::UnaryOperator;

use crate::error::ExtractResult;
use crate::property::{PrimitiveKind, Property};

/// Date-only and date-time layouts accepted as `datetime` strings
const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Result of classifying a literal-valued node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Primitive(PrimitiveKind),
    Array(Box<Classification>),
    /// Object literal, with the synthesized nested view-model name
    Model(CompactString),
    Unknown,
}

impl Classification {
    /// Build the property named `name` for this classification.
    ///
    /// `Unknown` yields `None`; an array wrapping an array is an error.
    pub fn into_property(self, name: &str) -> ExtractResult<Option<Property>> {
        match self {
            Self::Primitive(kind) => Ok(Some(Property::primitive(name, kind))),
            Self::Model(model) => Ok(Some(Property::model(name, model))),
            Self::Array(inner) => match inner.into_property(name)? {
                Some(inner) => Property::array(name, inner).map(Some),
                None => Ok(Some(Property::array(
                    name,
                    Property::primitive(name, PrimitiveKind::String),
                )?)),
            },
            Self::Unknown => Ok(None),
        }
    }
}

/// Classify a string value: `datetime` if it parses as a date, else `string`.
pub fn classify_str(value: &str) -> PrimitiveKind {
    if parses_as_datetime(value) {
        PrimitiveKind::DateTime
    } else {
        PrimitiveKind::String
    }
}

/// Classify a single literal node into a primitive kind.
///
/// Order: decimal, integer, string (date-time aware), boolean. Anything
/// else is `None` and left to the composite handling in
/// [`classify_expression`].
pub fn classify_literal(expr: &Expression<'_>) -> Option<PrimitiveKind> {
    match expr {
        Expression::NumericLiteral(lit) => Some(if lit.base == NumberBase::Float {
            PrimitiveKind::Decimal
        } else {
            PrimitiveKind::Int
        }),
        Expression::BigIntLiteral(_) => Some(PrimitiveKind::Int),
        Expression::StringLiteral(lit) => Some(classify_str(lit.value.as_str())),
        Expression::BooleanLiteral(_) => Some(PrimitiveKind::Boolean),
        // -1, +2.5
        Expression::UnaryExpression(unary)
            if matches!(
                unary.operator,
                UnaryOperator::UnaryNegation | UnaryOperator::UnaryPlus
            ) && matches!(
                unary.argument,
                Expression::NumericLiteral(_) | Expression::BigIntLiteral(_)
            ) =>
        {
            classify_literal(&unary.argument)
        }
        Expression::ParenthesizedExpression(paren) => classify_literal(&paren.expression),
        Expression::TSAsExpression(ts_as) => classify_literal(&ts_as.expression),
        _ => None,
    }
}

/// Classify a literal-valued expression for the property `name`.
///
/// Arrays classify by their first element; an empty array, or one whose
/// first element is not a literal, falls back to a string array. Object
/// literals become nested models named after the property.
pub fn classify_expression(expr: &Expression<'_>, name: &str) -> Classification {
    if let Some(kind) = classify_literal(expr) {
        return Classification::Primitive(kind);
    }

    match expr {
        Expression::ArrayExpression(arr) => {
            let inner = arr
                .elements
                .first()
                .and_then(ArrayExpressionElement::as_expression)
                .map(|first| classify_expression(first, name))
                .filter(|inner| *inner != Classification::Unknown)
                .unwrap_or(Classification::Primitive(PrimitiveKind::String));
            Classification::Array(Box::new(inner))
        }
        Expression::ObjectExpression(_) => Classification::Model(to_pascal_case(name)),
        Expression::ParenthesizedExpression(paren) => classify_expression(&paren.expression, name),
        Expression::TSAsExpression(ts_as) => classify_expression(&ts_as.expression, name),
        _ => Classification::Unknown,
    }
}

fn parses_as_datetime(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }

    DateTime::parse_from_rfc3339(value).is_ok()
        || DateTime::parse_from_rfc2822(value).is_ok()
        || NAIVE_DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
        || NAIVE_DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(value, fmt).is_ok())
}
