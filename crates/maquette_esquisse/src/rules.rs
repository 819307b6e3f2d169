//! Model and template extraction rules.
//!
//! Decides how discovered components and properties are named and typed in
//! the generated view models, and where their templates are written.

use std::collections::BTreeMap;
use std::path::PathBuf;

use maquette_carton::{capitalize, to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};
use maquette_carton::CompactString;
use serde::{Deserialize, Serialize};

use crate::property::{PrimitiveKind, PropertyType};
use crate::source::ParseOptions;

/// Placeholder for the mapped type in templates
pub const TYPE_PLACEHOLDER: &str = "[type]";
/// Placeholder for the transformed name in templates
pub const NAME_PLACEHOLDER: &str = "[name]";
/// Placeholder for a nested component's template path
pub const TEMPLATE_PLACEHOLDER: &str = "[template]";
/// Placeholder for a nested component's model name
pub const MODEL_PLACEHOLDER: &str = "[model]";

/// Case conversion applied by a [`NameRule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStyle {
    /// Keep the name as written
    Preserve,
    /// Upper-case the first character only
    #[default]
    Capitalize,
    Pascal,
    Camel,
    Snake,
    Kebab,
}

/// Name transformation: case conversion plus an optional prefix/suffix
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NameRule {
    pub case: CaseStyle,
    #[serde(skip_serializing_if = "CompactString::is_empty")]
    pub prefix: CompactString,
    #[serde(skip_serializing_if = "CompactString::is_empty")]
    pub suffix: CompactString,
}

impl NameRule {
    pub fn new(case: CaseStyle) -> Self {
        Self {
            case,
            ..Default::default()
        }
    }

    pub fn apply(&self, name: &str) -> CompactString {
        let converted = match self.case {
            CaseStyle::Preserve => CompactString::new(name),
            CaseStyle::Capitalize => capitalize(name),
            CaseStyle::Pascal => to_pascal_case(name),
            CaseStyle::Camel => to_camel_case(name),
            CaseStyle::Snake => to_snake_case(name),
            CaseStyle::Kebab => to_kebab_case(name),
        };

        if self.prefix.is_empty() && self.suffix.is_empty() {
            return converted;
        }

        let mut result =
            CompactString::with_capacity(self.prefix.len() + converted.len() + self.suffix.len());
        result.push_str(&self.prefix);
        result.push_str(&converted);
        result.push_str(&self.suffix);
        result
    }
}

/// Default primitive-type mapping (C# flavoured)
fn default_type_mapping() -> BTreeMap<PrimitiveKind, CompactString> {
    BTreeMap::from([
        (PrimitiveKind::String, CompactString::const_new("string")),
        (PrimitiveKind::Int, CompactString::const_new("int")),
        (PrimitiveKind::Decimal, CompactString::const_new("decimal")),
        (PrimitiveKind::Boolean, CompactString::const_new("bool")),
        (PrimitiveKind::DateTime, CompactString::const_new("DateTime")),
    ])
}

/// How discovered data is turned into view models
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelRules {
    /// Renames a component to its generated-artifact name.
    pub root_name_transformation: NameRule,
    /// Renames a property for the target model.
    pub property_name_transformation: NameRule,
    /// Primitive kind to target type name. Replaced wholesale when configured.
    pub language_type_mapping: BTreeMap<PrimitiveKind, CompactString>,
    /// Array type, with `[type]` standing for the mapped element type.
    pub array_type_template: CompactString,
    /// Appended to root-transformed names to form model names.
    pub model_name_suffix: CompactString,
    /// Per-property declaration, with `[name]` and `[type]` placeholders.
    pub declaration_template: CompactString,
    /// Permit computed expression attributes (`title={user.name}`).
    pub allow_inline_expressions: bool,
    /// Superclass names that make a class a component.
    pub component_bases: Vec<CompactString>,
    /// Attribute names never treated as properties.
    pub ignored_attributes: Vec<CompactString>,
}

impl Default for ModelRules {
    fn default() -> Self {
        Self {
            root_name_transformation: NameRule::new(CaseStyle::Capitalize),
            property_name_transformation: NameRule::new(CaseStyle::Capitalize),
            language_type_mapping: default_type_mapping(),
            array_type_template: CompactString::const_new("[type][]"),
            model_name_suffix: CompactString::const_new("Model"),
            declaration_template: CompactString::new("public [type] [name] { get; set; }"),
            allow_inline_expressions: true,
            component_bases: vec![CompactString::const_new("Component")],
            ignored_attributes: vec![
                CompactString::const_new("key"),
                CompactString::const_new("ref"),
            ],
        }
    }
}

impl ModelRules {
    #[inline]
    pub fn is_component_base(&self, name: &str) -> bool {
        self.component_bases.iter().any(|base| base == name)
    }

    #[inline]
    pub fn is_ignored_attribute(&self, name: &str) -> bool {
        self.ignored_attributes.iter().any(|attr| attr == name)
    }

    /// Generated-artifact name of a component.
    #[inline]
    pub fn root_name(&self, component: &str) -> CompactString {
        self.root_name_transformation.apply(component)
    }

    /// Model name for a component or nested view model.
    pub fn model_name(&self, name: &str) -> CompactString {
        let mut model = self.root_name(name);
        model.push_str(&self.model_name_suffix);
        model
    }

    #[inline]
    pub fn property_name(&self, name: &str) -> CompactString {
        self.property_name_transformation.apply(name)
    }

    /// Target type name of a semantic type.
    ///
    /// Returns the primitive kind lacking a mapping entry on failure.
    pub fn map_type(&self, ty: &PropertyType) -> Result<CompactString, PrimitiveKind> {
        match ty {
            PropertyType::Primitive(kind) => self
                .language_type_mapping
                .get(kind)
                .cloned()
                .ok_or(*kind),
            PropertyType::Model(name) => Ok(self.model_name(name)),
            PropertyType::Array(inner) => {
                let inner = self.map_type(inner)?;
                Ok(CompactString::new(
                    self.array_type_template.replace(TYPE_PLACEHOLDER, &inner),
                ))
            }
        }
    }

    /// True when `type_name` is one of the mapped primitive type names.
    pub fn is_primitive_type_name(&self, type_name: &str) -> bool {
        self.language_type_mapping
            .values()
            .any(|mapped| mapped == type_name)
    }

    /// Render the declaration template for one property.
    pub fn render_declaration(&self, name: &str, type_name: &str) -> String {
        self.declaration_template
            .replace(NAME_PLACEHOLDER, name)
            .replace(TYPE_PLACEHOLDER, type_name)
    }
}

/// Where and how component templates are referenced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateRules {
    /// Appended to the root-transformed component name.
    pub file_extension: CompactString,
    /// Whether nested components are rendered through `nested_component_template`.
    pub use_nested_components: bool,
    /// Reference to a nested component, with `[template]` and `[model]` placeholders.
    pub nested_component_template: CompactString,
}

impl Default for TemplateRules {
    fn default() -> Self {
        Self {
            file_extension: CompactString::const_new(".cshtml"),
            use_nested_components: true,
            nested_component_template: CompactString::new(
                "@{Html.RenderPartial(\"[template]\", Model.[model]);}",
            ),
        }
    }
}

impl TemplateRules {
    pub fn file_name(&self, root_name: &str) -> String {
        format!("{}{}", root_name, self.file_extension)
    }

    pub fn render_nested(&self, template: &str, model: &str) -> String {
        self.nested_component_template
            .replace(TEMPLATE_PLACEHOLDER, template)
            .replace(MODEL_PLACEHOLDER, model)
    }
}

/// Everything one extraction call needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub parse: ParseOptions,
    pub model: ModelRules,
    pub template: TemplateRules,
    /// Directory the template paths are resolved against.
    pub out_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_rule_apply() {
        assert_eq!(NameRule::new(CaseStyle::Capitalize).apply("age"), "Age");
        assert_eq!(NameRule::new(CaseStyle::Preserve).apply("age"), "age");
        assert_eq!(NameRule::new(CaseStyle::Snake).apply("firstName"), "first_name");

        let rule = NameRule {
            case: CaseStyle::Pascal,
            prefix: "I".into(),
            suffix: "View".into(),
        };
        assert_eq!(rule.apply("user-card"), "IUserCardView");
    }

    #[test]
    fn test_map_type() {
        let rules = ModelRules::default();
        let ty = PropertyType::Array(Box::new(PropertyType::Primitive(PrimitiveKind::DateTime)));
        assert_eq!(rules.map_type(&ty).unwrap(), "DateTime[]");
        assert_eq!(
            rules
                .map_type(&PropertyType::Model("options".into()))
                .unwrap(),
            "OptionsModel"
        );
        assert!(rules.is_primitive_type_name("bool"));
        assert!(!rules.is_primitive_type_name("bool[]"));
    }

    #[test]
    fn test_missing_mapping_reports_kind() {
        let mut rules = ModelRules::default();
        rules.language_type_mapping.remove(&PrimitiveKind::Decimal);
        let ty = PropertyType::Array(Box::new(PropertyType::Primitive(PrimitiveKind::Decimal)));
        assert_eq!(rules.map_type(&ty), Err(PrimitiveKind::Decimal));
    }

    #[test]
    fn test_render_declaration() {
        let rules = ModelRules::default();
        insta::assert_snapshot!(
            rules.render_declaration("Age", "int"),
            @"public int Age { get; set; }"
        );
    }

    #[test]
    fn test_render_nested_reference() {
        let rules = TemplateRules::default();
        assert_eq!(rules.file_name("Card"), "Card.cshtml");
        insta::assert_snapshot!(
            rules.render_nested("Card.cshtml", "CardModel"),
            @r#"@{Html.RenderPartial("Card.cshtml", Model.CardModel);}"#
        );
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let rules: ModelRules = serde_json::from_str(
            r#"{ "allowInlineExpressions": false, "languageTypeMapping": { "string": "String" } }"#,
        )
        .unwrap();
        assert!(!rules.allow_inline_expressions);
        assert_eq!(rules.language_type_mapping.len(), 1);
        assert_eq!(rules.declaration_template, "public [type] [name] { get; set; }");
        assert!(rules.is_component_base("Component"));
    }
}
