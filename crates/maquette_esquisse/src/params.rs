//! Parameter set extraction.
//!
//! Derives the declared property names of a component from its parameter
//! list: a single object pattern `({ id, title })` declares one property per
//! key. A plain `props` identifier declares nothing statically.

use maquette_carton::CompactString;
use oxc_ast::ast::{
    BindingPattern, BindingPatternKind, Class, ClassElement, FormalParameters,
    MethodDefinitionKind, ObjectPattern, PropertyKey,
};

use crate::classify::classify_expression;
use crate::error::ExtractResult;
use crate::property::PropertySet;

/// Reserved parameter key for nested markup
pub const CHILDREN: &str = "children";

/// Declared properties of one component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    pub properties: PropertySet,
    pub has_children: bool,
}

/// Extract the parameter set of a function or arrow function.
///
/// Only a container with exactly one parameter that destructures an object
/// contributes properties. Rest parameters never count.
pub fn extract_function_params(params: &FormalParameters<'_>) -> ExtractResult<ParameterSet> {
    let mut set = ParameterSet::default();

    if params.items.len() != 1 {
        return Ok(set);
    }

    if let Some(pattern) = object_pattern(&params.items[0].pattern) {
        collect_object_pattern(&mut set, pattern)?;
    }

    Ok(set)
}

/// Extract the parameter set of a class component from its constructor.
///
/// A class without a constructor declares nothing.
pub fn extract_class_params(class: &Class<'_>) -> ExtractResult<ParameterSet> {
    let constructor = class.body.body.iter().find_map(|element| match element {
        ClassElement::MethodDefinition(method)
            if method.kind == MethodDefinitionKind::Constructor =>
        {
            Some(method)
        }
        _ => None,
    });

    match constructor {
        Some(method) => extract_function_params(&method.value.params),
        None => Ok(ParameterSet::default()),
    }
}

/// Object pattern of a parameter, looking through a default value
/// (`({ id } = {}) => ...`).
fn object_pattern<'p, 'a>(pattern: &'p BindingPattern<'a>) -> Option<&'p ObjectPattern<'a>> {
    match &pattern.kind {
        BindingPatternKind::ObjectPattern(obj) => Some(obj),
        BindingPatternKind::AssignmentPattern(assign) => object_pattern(&assign.left),
        _ => None,
    }
}

fn collect_object_pattern(set: &mut ParameterSet, pattern: &ObjectPattern<'_>) -> ExtractResult<()> {
    for prop in pattern.properties.iter() {
        let Some(name) = property_key_name(&prop.key) else {
            continue;
        };

        if name == CHILDREN {
            set.has_children = true;
            continue;
        }

        // { count = 5 } - the default value's literal shape types the property
        if let BindingPatternKind::AssignmentPattern(assign) = &prop.value.kind {
            if let Some(property) = classify_expression(&assign.right, &name).into_property(&name)? {
                tracing::debug!("typed parameter `{}` as {}", name, property.type_name());
                set.properties.declare_typed(property);
                continue;
            }
        }

        set.properties.declare(name);
    }

    // `...rest` contributes nothing
    Ok(())
}

fn property_key_name(key: &PropertyKey<'_>) -> Option<CompactString> {
    match key {
        PropertyKey::StaticIdentifier(id) => Some(CompactString::new(id.name.as_str())),
        PropertyKey::StringLiteral(s) => Some(CompactString::new(s.value.as_str())),
        _ => None,
    }
}
