//! Model and template synthesis.
//!
//! Turns the completed boundary index into the generated artifact set: one
//! view [`Model`] and one template path per component. Configuration
//! problems (a semantic type without a target mapping) are reported as
//! diagnostics and never abort the run.

use std::collections::BTreeMap;
use std::path::PathBuf;

use maquette_carton::{CompactString, FxHashSet};
use serde::Serialize;

use crate::boundary::ComponentBoundary;
use crate::diagnostics::Diagnostic;
use crate::rules::{ExtractOptions, ModelRules, TemplateRules};
use crate::walker::Extraction;

/// One property of a generated view model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelProperty {
    /// Transformed property name
    pub name: CompactString,
    /// Property name as written in the component
    pub source_name: CompactString,
    /// Target type name; `None` while the type is unknown or unmapped
    #[serde(rename = "type")]
    pub type_name: Option<CompactString>,
    pub is_complex_type: bool,
    pub is_array: bool,
    /// Rendered declaration template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration: Option<String>,
}

/// Generated view model of one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub name: CompactString,
    pub component: CompactString,
    pub properties: Vec<ModelProperty>,
    pub needs_props: bool,
}

impl Model {
    pub fn property(&self, name: &str) -> Option<&ModelProperty> {
        self.properties.iter().find(|property| property.name == name)
    }

    /// Rendered declarations of every typed property, in discovery order.
    pub fn declarations(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter_map(|property| property.declaration.as_deref())
    }
}

/// Output of one extraction call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedArtifacts {
    pub components: BTreeMap<CompactString, ComponentBoundary>,
    pub models: BTreeMap<CompactString, Model>,
    pub templates: BTreeMap<CompactString, PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratedArtifacts {
    /// True when any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Reference to `component` for use inside another component's template.
    ///
    /// `None` when nested components are disabled or the component is unknown.
    pub fn nested_reference(&self, component: &str, rules: &TemplateRules) -> Option<String> {
        if !rules.use_nested_components {
            return None;
        }
        let template = self.templates.get(component)?;
        let model = self.models.get(component)?;
        Some(rules.render_nested(&template.to_string_lossy(), &model.name))
    }
}

fn synthesize_model(
    boundary: &ComponentBoundary,
    rules: &ModelRules,
    diagnostics: &mut Vec<Diagnostic>,
) -> Model {
    let mut properties = Vec::with_capacity(boundary.properties.len());
    let mut seen = FxHashSet::default();

    for slot in boundary.properties.iter() {
        let name = rules.property_name(&slot.name);
        if !seen.insert(name.clone()) {
            tracing::warn!(
                "property `{}` of `{}` collides with another property as `{}`, keeping the first",
                slot.name,
                boundary.name,
                name
            );
            continue;
        }

        let (type_name, is_complex_type, is_array) = match &slot.property {
            None => (None, false, false),
            Some(property) => match rules.map_type(&property.ty) {
                Ok(mapped) => {
                    let complex = !rules.is_primitive_type_name(&mapped);
                    (Some(mapped), complex, property.is_array())
                }
                Err(kind) => {
                    tracing::warn!(
                        "no type mapping for `{}` (property `{}` of `{}`)",
                        kind,
                        slot.name,
                        boundary.name
                    );
                    diagnostics.push(Diagnostic::unmapped_type(
                        &boundary.name,
                        &slot.name,
                        &property.type_name(),
                    ));
                    (None, property.is_complex_type(), property.is_array())
                }
            },
        };

        let declaration = type_name
            .as_deref()
            .map(|ty| rules.render_declaration(&name, ty));

        properties.push(ModelProperty {
            name,
            source_name: slot.name.clone(),
            type_name,
            is_complex_type,
            is_array,
            declaration,
        });
    }

    Model {
        name: rules.model_name(&boundary.name),
        component: boundary.name.clone(),
        properties,
        needs_props: boundary.needs_props(),
    }
}

/// Build models and template paths for every extracted component.
pub fn synthesize(extraction: Extraction, options: &ExtractOptions) -> GeneratedArtifacts {
    let Extraction { index, diagnostics } = extraction;
    let mut artifacts = GeneratedArtifacts {
        diagnostics,
        ..Default::default()
    };

    for boundary in index.iter() {
        let root = options.model.root_name(&boundary.name);
        let template = options.out_dir.join(options.template.file_name(&root));
        let model = synthesize_model(boundary, &options.model, &mut artifacts.diagnostics);

        artifacts.templates.insert(boundary.name.clone(), template);
        artifacts.models.insert(boundary.name.clone(), model);
    }

    artifacts.components = index.into_map();
    artifacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::DeclarationKind;
    use crate::index::BoundaryIndex;
    use crate::property::{PrimitiveKind, Property, PropertySet};
    use crate::rules::{CaseStyle, NameRule};

    fn extraction(properties: PropertySet) -> Extraction {
        let mut index = BoundaryIndex::new();
        index.register(ComponentBoundary {
            kind: DeclarationKind::Functional,
            name: "userCard".into(),
            start: 0,
            end: 10,
            properties,
            has_children: false,
        });
        Extraction {
            index,
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn test_model_properties() {
        let mut properties = PropertySet::new();
        properties.declare("id");
        properties.infer(Property::primitive("age", PrimitiveKind::Int));
        properties.infer(
            Property::array("tags", Property::primitive("tags", PrimitiveKind::String)).unwrap(),
        );
        properties.infer(Property::model("address", "Address"));

        let artifacts = synthesize(extraction(properties), &ExtractOptions::default());
        let model = &artifacts.models["userCard"];
        assert_eq!(model.name, "UserCardModel");
        assert!(model.needs_props);

        let id = model.property("Id").unwrap();
        assert_eq!(id.type_name, None);
        assert!(!id.is_complex_type);
        assert_eq!(id.declaration, None);

        let age = model.property("Age").unwrap();
        assert_eq!(age.type_name.as_deref(), Some("int"));
        assert!(!age.is_complex_type);

        let tags = model.property("Tags").unwrap();
        assert_eq!(tags.type_name.as_deref(), Some("string[]"));
        assert!(tags.is_complex_type);
        assert!(tags.is_array);

        let address = model.property("Address").unwrap();
        assert_eq!(address.type_name.as_deref(), Some("AddressModel"));
        assert!(address.is_complex_type);
        assert!(!address.is_array);

        assert_eq!(
            model.declarations().collect::<Vec<_>>(),
            vec![
                "public int Age { get; set; }",
                "public string[] Tags { get; set; }",
                "public AddressModel Address { get; set; }",
            ]
        );
        assert!(!artifacts.has_errors());
    }

    #[test]
    fn test_template_path() {
        let options = ExtractOptions {
            out_dir: PathBuf::from("/views"),
            ..Default::default()
        };
        let artifacts = synthesize(extraction(PropertySet::new()), &options);
        assert_eq!(
            artifacts.templates["userCard"],
            PathBuf::from("/views/UserCard.cshtml")
        );
        assert!(!artifacts.models["userCard"].needs_props);
        assert_eq!(
            artifacts.nested_reference("userCard", &options.template),
            Some(r#"@{Html.RenderPartial("/views/UserCard.cshtml", Model.UserCardModel);}"#.to_string())
        );
    }

    #[test]
    fn test_nested_reference_disabled() {
        let mut options = ExtractOptions::default();
        options.template.use_nested_components = false;
        let artifacts = synthesize(extraction(PropertySet::new()), &options);
        assert_eq!(artifacts.nested_reference("userCard", &options.template), None);
        assert_eq!(artifacts.nested_reference("Missing", &TemplateRules::default()), None);
    }

    #[test]
    fn test_unmapped_type_is_reported_per_property() {
        let mut properties = PropertySet::new();
        properties.infer(Property::primitive("since", PrimitiveKind::DateTime));
        properties.infer(Property::primitive("until", PrimitiveKind::DateTime));
        properties.infer(Property::primitive("label", PrimitiveKind::String));

        let mut options = ExtractOptions::default();
        options
            .model
            .language_type_mapping
            .remove(&PrimitiveKind::DateTime);

        let artifacts = synthesize(extraction(properties), &options);
        assert_eq!(artifacts.diagnostics.len(), 2);
        assert!(artifacts.has_errors());

        let model = &artifacts.models["userCard"];
        assert_eq!(model.property("Since").unwrap().type_name, None);
        assert_eq!(
            model.property("Label").unwrap().type_name.as_deref(),
            Some("string")
        );
    }

    #[test]
    fn test_colliding_property_names_keep_the_first() {
        let mut properties = PropertySet::new();
        properties.infer(Property::primitive("first_name", PrimitiveKind::String));
        properties.infer(Property::primitive("firstName", PrimitiveKind::Int));

        let mut options = ExtractOptions::default();
        options.model.property_name_transformation = NameRule::new(CaseStyle::Pascal);

        let artifacts = synthesize(extraction(properties), &options);
        let model = &artifacts.models["userCard"];
        assert_eq!(model.properties.len(), 1);
        assert_eq!(model.properties[0].source_name, "first_name");
        assert_eq!(model.properties[0].type_name.as_deref(), Some("string"));
    }
}
