//! Attribute-usage refinement.
//!
//! Each opening tag is resolved to its innermost enclosing component by
//! span, and its attributes then extend or check that component's property
//! set:
//!
//! - `status="active"`, `count={5}`, `items={[..]}`, bare `disabled`:
//!   classified and inferred (first inference wins)
//! - `id={id}`: must name a declared parameter property
//! - `title={user.name}`: skipped, or rejected when inline expressions are
//!   disabled
//! - `{...rest}`: ignored

use maquette_carton::CompactString;
use oxc_ast::ast::{
    JSXAttribute, JSXAttributeItem, JSXAttributeName, JSXAttributeValue, JSXExpression,
    JSXOpeningElement,
};
use oxc_span::{GetSpan, Span};

use crate::classify::{classify_expression, classify_str, Classification};
use crate::error::{ExtractError, ExtractResult};
use crate::index::BoundaryIndex;
use crate::property::PrimitiveKind;
use crate::rules::ModelRules;

/// How one attribute uses data
#[derive(Debug)]
enum AttributeUsage<'b> {
    Literal(Classification),
    /// `attr={ident}`
    Reference(&'b str, Span),
    /// Computed expression
    Inline(Span),
    Skip,
}

fn attribute_usage<'b>(attr: &'b JSXAttribute<'_>, name: &str) -> AttributeUsage<'b> {
    let Some(value) = &attr.value else {
        return AttributeUsage::Literal(Classification::Primitive(PrimitiveKind::Boolean));
    };

    match value {
        JSXAttributeValue::StringLiteral(lit) => {
            AttributeUsage::Literal(Classification::Primitive(classify_str(lit.value.as_str())))
        }
        JSXAttributeValue::ExpressionContainer(container) => match &container.expression {
            JSXExpression::EmptyExpression(_) => AttributeUsage::Skip,
            JSXExpression::Identifier(ident) => {
                AttributeUsage::Reference(ident.name.as_str(), ident.span)
            }
            other => match other.as_expression() {
                Some(expr) => match classify_expression(expr, name) {
                    Classification::Unknown => AttributeUsage::Inline(expr.span()),
                    classification => AttributeUsage::Literal(classification),
                },
                None => AttributeUsage::Skip,
            },
        },
        // Markup passed as a prop is walked as markup of its own
        JSXAttributeValue::Element(_) | JSXAttributeValue::Fragment(_) => AttributeUsage::Skip,
    }
}

/// Refine the component enclosing `opening` with its attributes.
///
/// Tags outside every registered boundary are skipped. Returns the number of
/// properties that were added or typed.
pub fn refine_opening_element(
    index: &mut BoundaryIndex,
    opening: &JSXOpeningElement<'_>,
    rules: &ModelRules,
) -> ExtractResult<usize> {
    let Some(boundary) = index.resolve_mut(opening.span.start, opening.span.end) else {
        tracing::trace!(
            "no component encloses tag at {}..{}",
            opening.span.start,
            opening.span.end
        );
        return Ok(0);
    };

    let mut changed = 0;

    for item in opening.attributes.iter() {
        let JSXAttributeItem::Attribute(attr) = item else {
            continue;
        };
        // Namespaced names (`xlink:href`) are not valid identifiers
        let JSXAttributeName::Identifier(ident) = &attr.name else {
            continue;
        };
        let name = ident.name.as_str();

        if rules.is_ignored_attribute(name) {
            continue;
        }

        match attribute_usage(attr, name) {
            AttributeUsage::Literal(classification) => {
                let Some(property) = classification.into_property(name)? else {
                    continue;
                };
                let type_name = property.type_name();
                if boundary.properties.infer(property) {
                    tracing::debug!(
                        "inferred `{}: {}` on component `{}`",
                        name,
                        type_name,
                        boundary.name
                    );
                    changed += 1;
                }
            }
            AttributeUsage::Reference(reference, span) => {
                if !boundary.properties.is_declared(reference) {
                    return Err(ExtractError::UndefinedProperty {
                        component: boundary.name.clone(),
                        name: CompactString::new(reference),
                        start: span.start,
                        end: span.end,
                    });
                }
            }
            AttributeUsage::Inline(span) => {
                if !rules.allow_inline_expressions {
                    return Err(ExtractError::InlineExpression {
                        component: boundary.name.clone(),
                        attribute: CompactString::new(name),
                        start: span.start,
                        end: span.end,
                    });
                }
                tracing::trace!("skipping inline expression in `{}`", name);
            }
            AttributeUsage::Skip => {}
        }
    }

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{ComponentBoundary, DeclarationKind};
    use crate::property::PropertySet;
    use crate::source::{parse_program, ParseOptions};
    use oxc_allocator::Allocator;
    use oxc_ast::ast::{Expression, Statement};

    /// Refine `<tag .../>` (the initializer of `const el = ...;`) against a
    /// single component spanning the whole source.
    fn refine(
        markup: &str,
        declared: &[&str],
        rules: &ModelRules,
    ) -> (ExtractResult<usize>, BoundaryIndex) {
        let allocator = Allocator::default();
        let source = format!("const el = {};", markup);
        let program = parse_program(&allocator, &source, ParseOptions::default()).unwrap();

        let mut properties = PropertySet::new();
        for name in declared {
            properties.declare(*name);
        }
        let mut index = BoundaryIndex::new();
        index.register(ComponentBoundary {
            kind: DeclarationKind::Arrow,
            name: "Widget".into(),
            start: 0,
            end: source.len() as u32,
            properties,
            has_children: false,
        });

        let Statement::VariableDeclaration(decl) = &program.body[0] else {
            panic!("expected a variable declaration");
        };
        let Some(Expression::JSXElement(element)) = &decl.declarations[0].init else {
            panic!("expected a JSX element");
        };
        let result = refine_opening_element(&mut index, &element.opening_element, rules);
        (result, index)
    }

    fn type_of(index: &BoundaryIndex, name: &str) -> Option<String> {
        index
            .get("Widget")
            .and_then(|b| b.properties.get(name))
            .map(|p| p.type_name())
    }

    #[test]
    fn test_string_literal_adds_property() {
        let (result, index) = refine(r#"<span status="active" />"#, &[], &ModelRules::default());
        assert_eq!(result.unwrap(), 1);
        assert_eq!(type_of(&index, "status").as_deref(), Some("string"));
        assert!(!index.get("Widget").unwrap().needs_props());
    }

    #[test]
    fn test_literal_expressions_are_classified() {
        let (result, index) = refine(
            r#"<Chart count={3} ratio={0.5} visible={false} since="2024-01-02" points={[1, 2]} options={{ a: 1 }} disabled />"#,
            &[],
            &ModelRules::default(),
        );
        assert_eq!(result.unwrap(), 7);
        assert_eq!(type_of(&index, "count").as_deref(), Some("int"));
        assert_eq!(type_of(&index, "ratio").as_deref(), Some("decimal"));
        assert_eq!(type_of(&index, "visible").as_deref(), Some("boolean"));
        assert_eq!(type_of(&index, "since").as_deref(), Some("datetime"));
        assert_eq!(type_of(&index, "points").as_deref(), Some("int[]"));
        assert_eq!(type_of(&index, "options").as_deref(), Some("model"));
        assert_eq!(type_of(&index, "disabled").as_deref(), Some("boolean"));
    }

    #[test]
    fn test_declared_reference_is_accepted() {
        let (result, index) = refine("<div id={id} />", &["id"], &ModelRules::default());
        assert_eq!(result.unwrap(), 0);
        assert_eq!(type_of(&index, "id"), None);
    }

    #[test]
    fn test_undeclared_reference_fails() {
        let (result, _) = refine("<Child enabled={missing} />", &["id"], &ModelRules::default());
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            ExtractError::UndefinedProperty { ref component, ref name, .. }
                if component == "Widget" && name == "missing"
        ));
    }

    #[test]
    fn test_inline_expressions() {
        let markup = "<h1 title={user.name} />";
        let (result, index) = refine(markup, &[], &ModelRules::default());
        assert_eq!(result.unwrap(), 0);
        assert!(index.get("Widget").unwrap().properties.is_empty());

        let rules = ModelRules {
            allow_inline_expressions: false,
            ..Default::default()
        };
        let (result, _) = refine(markup, &[], &rules);
        assert!(matches!(
            result.unwrap_err(),
            ExtractError::InlineExpression { ref attribute, .. } if attribute == "title"
        ));
    }

    #[test]
    fn test_spread_and_reserved_attributes_are_ignored() {
        let (result, index) = refine(
            r#"<li key="a" ref="b" {...rest} />"#,
            &[],
            &ModelRules::default(),
        );
        assert_eq!(result.unwrap(), 0);
        assert!(index.get("Widget").unwrap().properties.is_empty());
    }

    #[test]
    fn test_nested_array_attribute_fails() {
        let (result, _) = refine("<Grid cells={[[1]]} />", &[], &ModelRules::default());
        assert_eq!(
            result.unwrap_err(),
            ExtractError::ArrayOfArrays {
                name: "cells".into()
            }
        );
    }

    #[test]
    fn test_tag_outside_every_component_is_skipped() {
        let allocator = Allocator::default();
        let source = r#"const el = <span status="x" />;"#;
        let program = parse_program(&allocator, source, ParseOptions::default()).unwrap();
        let Statement::VariableDeclaration(decl) = &program.body[0] else {
            panic!("expected a variable declaration");
        };
        let Some(Expression::JSXElement(element)) = &decl.declarations[0].init else {
            panic!("expected a JSX element");
        };
        let mut index = BoundaryIndex::new();
        let result =
            refine_opening_element(&mut index, &element.opening_element, &ModelRules::default());
        assert_eq!(result.unwrap(), 0);
        assert!(index.is_empty());
    }
}
