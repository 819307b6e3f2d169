//! Property and property-set types.
//!
//! A [`Property`] is one named, typed data input a component consumes.
//! Property types form a small closed set: five primitives, a nested model
//! reference, and an array wrapping exactly one non-array type.

use std::fmt;

use maquette_carton::CompactString;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{ExtractError, ExtractResult};

/// Primitive property kinds recognized by the classifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    String,
    Int,
    Decimal,
    Boolean,
    DateTime,
}

impl PrimitiveKind {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::DateTime => "datetime",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic type of a property
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Primitive(PrimitiveKind),
    /// Nested view model, by its unsuffixed name (e.g. `Options`)
    Model(CompactString),
    /// Never wraps another array, see [`Property::array`]
    Array(Box<PropertyType>),
}

impl PropertyType {
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Models and arrays are complex.
    #[inline]
    pub fn is_complex(&self) -> bool {
        !matches!(self, Self::Primitive(_))
    }

    /// Nested model name, looking through an array wrapper.
    pub fn model_name(&self) -> Option<&str> {
        match self {
            Self::Model(name) => Some(name.as_str()),
            Self::Array(inner) => inner.model_name(),
            Self::Primitive(_) => None,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => f.write_str(kind.as_str()),
            Self::Model(_) => f.write_str("model"),
            Self::Array(inner) => write!(f, "{}[]", inner),
        }
    }
}

/// A named, typed component input
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    pub name: CompactString,
    pub ty: PropertyType,
}

impl Property {
    #[inline]
    pub fn primitive(name: impl Into<CompactString>, kind: PrimitiveKind) -> Self {
        Self {
            name: name.into(),
            ty: PropertyType::Primitive(kind),
        }
    }

    #[inline]
    pub fn model(name: impl Into<CompactString>, model: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            ty: PropertyType::Model(model.into()),
        }
    }

    /// Wrap `inner` in an array property named `name`.
    ///
    /// Fails when `inner` is itself an array.
    pub fn array(name: impl Into<CompactString>, inner: Property) -> ExtractResult<Self> {
        let name = name.into();
        if inner.is_array() {
            return Err(ExtractError::ArrayOfArrays { name });
        }
        Ok(Self {
            name,
            ty: PropertyType::Array(Box::new(inner.ty)),
        })
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        self.ty.is_array()
    }

    #[inline]
    pub fn is_complex_type(&self) -> bool {
        self.ty.is_complex()
    }

    /// Semantic type name, e.g. `int`, `model`, `string[]`.
    #[inline]
    pub fn type_name(&self) -> String {
        self.ty.to_string()
    }
}

impl Serialize for Property {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Property", 5)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("type", &self.type_name())?;
        state.serialize_field("isComplexType", &self.is_complex_type())?;
        state.serialize_field("isArray", &self.is_array())?;
        state.serialize_field("modelName", &self.ty.model_name())?;
        state.end()
    }
}

/// Where a property was first discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyOrigin {
    /// Destructured from the component's parameter
    Parameter,
    /// Inferred from a literal attribute in the component's markup
    Attribute,
}

/// One entry of a [`PropertySet`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySlot {
    pub name: CompactString,
    pub origin: PropertyOrigin,
    /// `None` while the type is not yet known
    pub property: Option<Property>,
}

/// Ordered, de-duplicated property set of one component.
///
/// Entries keep discovery order. The first inferred type for a name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    slots: Vec<PropertySlot>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.slot(name).is_some()
    }

    /// True when `name` came from the component's parameter list.
    #[inline]
    pub fn is_declared(&self, name: &str) -> bool {
        self.slot(name)
            .is_some_and(|slot| slot.origin == PropertyOrigin::Parameter)
    }

    /// True when at least one property came from the parameter list.
    pub fn has_declared(&self) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.origin == PropertyOrigin::Parameter)
    }

    #[inline]
    pub fn slot(&self, name: &str) -> Option<&PropertySlot> {
        self.slots.iter().find(|slot| slot.name == name)
    }

    /// Known type of `name`, if any.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.slot(name).and_then(|slot| slot.property.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertySlot> {
        self.slots.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.name.as_str())
    }

    /// Declare a parameter property with an unset type. No-op if already known.
    pub fn declare(&mut self, name: impl Into<CompactString>) {
        let name = name.into();
        if !self.contains(&name) {
            self.slots.push(PropertySlot {
                name,
                origin: PropertyOrigin::Parameter,
                property: None,
            });
        }
    }

    /// Declare a parameter property whose type is known from the declaration.
    pub fn declare_typed(&mut self, property: Property) {
        if !self.contains(&property.name) {
            self.slots.push(PropertySlot {
                name: property.name.clone(),
                origin: PropertyOrigin::Parameter,
                property: Some(property),
            });
        }
    }

    /// Record an inferred property.
    ///
    /// Unknown names are added, known names with an unset type are filled
    /// in, and names that already carry a type are left untouched. Returns
    /// whether the set changed.
    pub fn infer(&mut self, property: Property) -> bool {
        match self.slots.iter_mut().find(|slot| slot.name == property.name) {
            Some(slot) if slot.property.is_none() => {
                slot.property = Some(property);
                true
            }
            Some(_) => false,
            None => {
                self.slots.push(PropertySlot {
                    name: property.name.clone(),
                    origin: PropertyOrigin::Attribute,
                    property: Some(property),
                });
                true
            }
        }
    }
}

impl Serialize for PropertySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for slot in &self.slots {
            map.serialize_entry(&slot.name, &slot.property)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_type_names() {
        assert_eq!(
            Property::primitive("age", PrimitiveKind::Int).type_name(),
            "int"
        );
        assert_eq!(
            Property::primitive("at", PrimitiveKind::DateTime).type_name(),
            "datetime"
        );
        assert_eq!(Property::model("opts", "Opts").type_name(), "model");

        let tags = Property::array("tags", Property::primitive("tags", PrimitiveKind::String))
            .unwrap();
        assert_eq!(tags.type_name(), "string[]");
        assert!(tags.is_array());
        assert!(tags.is_complex_type());
    }

    #[test]
    fn test_array_of_arrays_rejected() {
        let inner =
            Property::array("grid", Property::primitive("grid", PrimitiveKind::Int)).unwrap();
        let err = Property::array("grid", inner).unwrap_err();
        assert_eq!(
            err,
            ExtractError::ArrayOfArrays {
                name: "grid".into()
            }
        );
    }

    #[test]
    fn test_model_array_keeps_model_name() {
        let items = Property::array("items", Property::model("items", "Items")).unwrap();
        assert_eq!(items.type_name(), "model[]");
        assert_eq!(items.ty.model_name(), Some("Items"));
    }

    #[test]
    fn test_declare_is_idempotent() {
        let mut set = PropertySet::new();
        set.declare("id");
        set.declare("id");
        assert_eq!(set.len(), 1);
        assert!(set.is_declared("id"));
        assert!(set.get("id").is_none());
    }

    #[test]
    fn test_first_inference_wins() {
        let mut set = PropertySet::new();
        assert!(set.infer(Property::primitive("status", PrimitiveKind::String)));
        assert!(!set.infer(Property::primitive("status", PrimitiveKind::Int)));
        assert_eq!(
            set.get("status").map(|p| p.ty.clone()),
            Some(PropertyType::Primitive(PrimitiveKind::String))
        );
        assert!(!set.is_declared("status"));
        assert!(!set.has_declared());
    }

    #[test]
    fn test_infer_fills_unset_declared_property() {
        let mut set = PropertySet::new();
        set.declare("age");
        assert!(set.infer(Property::primitive("age", PrimitiveKind::Int)));
        assert!(set.is_declared("age"));
        assert_eq!(set.get("age").map(Property::type_name).as_deref(), Some("int"));
    }

    #[test]
    fn test_serializes_in_discovery_order() {
        let mut set = PropertySet::new();
        set.declare("b");
        set.infer(Property::primitive("a", PrimitiveKind::Boolean));
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(
            json,
            r#"{"b":null,"a":{"name":"a","type":"boolean","isComplexType":false,"isArray":false,"modelName":null}}"#
        );
    }
}
