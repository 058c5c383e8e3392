//! Schema definitions
//!
//! The flat, declarative configuration a [`Schema`](crate::Schema) is built
//! from. The shape follows GraphQL introspection results, so an introspection
//! `__schema` object deserializes directly:
//!
//! ```json
//! {
//!   "queryType": { "name": "Query" },
//!   "types": [
//!     { "kind": "OBJECT", "name": "Query", "fields": [
//!       { "name": "hero", "type": { "kind": "NON_NULL", "ofType": { "name": "Character" } } }
//!     ] }
//!   ],
//!   "directives": []
//! }
//! ```
//!
//! Definitions are plain data. Nothing is checked until the schema is built.

use serde::{Deserialize, Serialize};

use crate::types::{DirectiveLocation, TypeKind};

/// Top-level schema definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_type: Option<TypeRefDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutation_type: Option<TypeRefDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_type: Option<TypeRefDefinition>,

    /// Type declarations, in declaration order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub types: Vec<TypeDefinition>,

    /// Directive declarations, in declaration order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub directives: Vec<DirectiveDefinition>,
}

impl SchemaDefinition {
    /// Create a definition with the given query root type name
    pub fn new(query_type: impl Into<String>) -> Self {
        Self {
            query_type: Some(TypeRefDefinition::named(query_type)),
            ..Self::default()
        }
    }

    pub fn with_mutation_type(mut self, name: impl Into<String>) -> Self {
        self.mutation_type = Some(TypeRefDefinition::named(name));
        self
    }

    pub fn with_subscription_type(mut self, name: impl Into<String>) -> Self {
        self.subscription_type = Some(TypeRefDefinition::named(name));
        self
    }

    pub fn with_type(mut self, ty: TypeDefinition) -> Self {
        self.types.push(ty);
        self
    }

    pub fn with_directive(mut self, directive: DirectiveDefinition) -> Self {
        self.directives.push(directive);
        self
    }

    /// Parse an introspection result
    ///
    /// Accepts the bare `__schema` object as well as the `{"__schema": ...}`
    /// and `{"data": {"__schema": ...}}` envelopes a server responds with.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(data) = value.get_mut("data") {
            value = data.take();
        }
        if let Some(schema) = value.get_mut("__schema") {
            value = schema.take();
        }
        serde_json::from_value(value)
    }
}

/// A declared type
///
/// Only the sub-structures matching `kind` are read; the others are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    pub kind: TypeKind,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// OBJECT and INTERFACE
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDefinition>,

    /// OBJECT only
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeRefDefinition>,

    /// UNION only; ignored on INTERFACE, whose possible types are derived
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub possible_types: Vec<TypeRefDefinition>,

    /// ENUM only
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<EnumValueDefinition>,

    /// INPUT_OBJECT only
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub input_fields: Vec<InputValueDefinition>,
}

impl TypeDefinition {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: None,
            fields: Vec::new(),
            interfaces: Vec::new(),
            possible_types: Vec::new(),
            enum_values: Vec::new(),
            input_fields: Vec::new(),
        }
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Scalar, name)
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Object, name)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Interface, name)
    }

    pub fn union(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Union, name)
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Enum, name)
    }

    pub fn input_object(name: impl Into<String>) -> Self {
        Self::new(TypeKind::InputObject, name)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_interface(mut self, name: impl Into<String>) -> Self {
        self.interfaces.push(TypeRefDefinition::named(name));
        self
    }

    pub fn with_possible_type(mut self, ty: TypeRefDefinition) -> Self {
        self.possible_types.push(ty);
        self
    }

    pub fn with_enum_value(mut self, value: EnumValueDefinition) -> Self {
        self.enum_values.push(value);
        self
    }

    pub fn with_input_field(mut self, input_field: InputValueDefinition) -> Self {
        self.input_fields.push(input_field);
        self
    }
}

/// A reference to a type
///
/// `kind` LIST or NON_NULL makes this a wrapper around `of_type`. Any other
/// kind (or none) makes it a reference by `name`; the kind given for a named
/// reference is not trusted and is always looked up in the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRefDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TypeKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub of_type: Option<Box<TypeRefDefinition>>,
}

impl TypeRefDefinition {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            kind: None,
            name: Some(name.into()),
            of_type: None,
        }
    }

    pub fn list(of_type: TypeRefDefinition) -> Self {
        Self {
            kind: Some(TypeKind::List),
            name: None,
            of_type: Some(Box::new(of_type)),
        }
    }

    pub fn non_null(of_type: TypeRefDefinition) -> Self {
        Self {
            kind: Some(TypeKind::NonNull),
            name: None,
            of_type: Some(Box::new(of_type)),
        }
    }

    /// Whether this reference wraps another one
    pub fn is_wrapper(&self) -> bool {
        self.kind.map(|k| k.is_wrapper()).unwrap_or(false)
    }
}

/// A field of an OBJECT or INTERFACE type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<InputValueDefinition>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeRefDefinition>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_deprecated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, ty: TypeRefDefinition) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_arg(mut self, arg: InputValueDefinition) -> Self {
        self.args.push(arg);
        self
    }

    pub fn deprecated(mut self, reason: Option<&str>) -> Self {
        self.is_deprecated = true;
        self.deprecation_reason = reason.map(String::from);
        self
    }
}

/// An argument or input field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValueDefinition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeRefDefinition>,

    /// Kept verbatim, never parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl InputValueDefinition {
    pub fn new(name: impl Into<String>, ty: TypeRefDefinition) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            ..Self::default()
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// A value of an ENUM type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueDefinition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_deprecated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
}

impl EnumValueDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn deprecated(mut self, reason: Option<&str>) -> Self {
        self.is_deprecated = true;
        self.deprecation_reason = reason.map(String::from);
        self
    }
}

/// A directive declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveDefinition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub locations: Vec<DirectiveLocation>,

    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<InputValueDefinition>,
}

impl DirectiveDefinition {
    pub fn new(name: impl Into<String>, locations: &[DirectiveLocation]) -> Self {
        Self {
            name: name.into(),
            locations: locations.to_vec(),
            ..Self::default()
        }
    }

    pub fn with_arg(mut self, arg: InputValueDefinition) -> Self {
        self.args.push(arg);
        self
    }
}

/// Introspection results use `null` for lists that do not apply to a kind
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null` reads as the zero value; a `null` name is then rejected by the builder
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_introspection_shape() {
        let def: SchemaDefinition = serde_json::from_value(json!({
            "queryType": { "name": "Query" },
            "mutationType": null,
            "types": [
                {
                    "kind": "OBJECT",
                    "name": "Query",
                    "description": null,
                    "fields": [{
                        "name": "ids",
                        "args": [],
                        "type": {
                            "kind": "NON_NULL",
                            "name": null,
                            "ofType": { "kind": "LIST", "name": null, "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null } }
                        },
                        "isDeprecated": false,
                        "deprecationReason": null
                    }],
                    "interfaces": [],
                    "possibleTypes": null,
                    "enumValues": null,
                    "inputFields": null
                }
            ],
            "directives": [
                { "name": "skip", "locations": ["FIELD", "INLINE_FRAGMENT"], "args": [] }
            ]
        }))
        .unwrap();

        assert!(def.mutation_type.is_none());
        let field = &def.types[0].fields[0];
        let ty = field.ty.as_ref().unwrap();
        assert!(ty.is_wrapper());
        let inner = ty.of_type.as_ref().unwrap().of_type.as_ref().unwrap();
        assert_eq!(inner.name.as_deref(), Some("ID"));
        assert_eq!(def.directives[0].locations.len(), 2);
    }

    #[test]
    fn test_from_json_unwraps_envelopes() {
        let bare = r#"{ "queryType": { "name": "Query" }, "types": [] }"#;
        let wrapped = r#"{ "data": { "__schema": { "queryType": { "name": "Query" }, "types": [] } } }"#;
        assert_eq!(
            SchemaDefinition::from_json(bare).unwrap(),
            SchemaDefinition::from_json(wrapped).unwrap()
        );
        assert!(SchemaDefinition::from_json("42").is_err());
    }

    #[test]
    fn test_missing_name_deserializes_empty() {
        let def: TypeDefinition = serde_json::from_value(json!({ "kind": "SCALAR" })).unwrap();
        assert!(def.name.is_empty());
    }

    #[test]
    fn test_nulls_read_as_zero_values() {
        let def = SchemaDefinition::from_json(
            r#"{
                "queryType": { "name": "Query" },
                "types": [{
                    "kind": "ENUM",
                    "name": null,
                    "enumValues": [{ "name": "A", "isDeprecated": null }]
                }, {
                    "kind": "OBJECT",
                    "name": "Query",
                    "fields": [{ "name": null, "type": { "name": "A" }, "isDeprecated": null }]
                }],
                "directives": null
            }"#,
        )
        .unwrap();

        assert!(def.types[0].name.is_empty());
        assert!(!def.types[0].enum_values[0].is_deprecated);
        assert!(def.types[1].fields[0].name.is_empty());
        assert!(!def.types[1].fields[0].is_deprecated);
        assert!(def.directives.is_empty());

        let def = SchemaDefinition::from_json(r#"{ "queryType": null, "types": null }"#).unwrap();
        assert!(def.query_type.is_none());
        assert!(def.types.is_empty());
    }

    #[test]
    fn test_builders() {
        let def = SchemaDefinition::new("Query")
            .with_mutation_type("Mutation")
            .with_type(
                TypeDefinition::object("Query").with_field(
                    FieldDefinition::new("hero", TypeRefDefinition::named("Character"))
                        .with_arg(InputValueDefinition::new(
                            "episode",
                            TypeRefDefinition::non_null(TypeRefDefinition::named("Episode")),
                        )),
                ),
            );
        assert_eq!(def.query_type.unwrap().name.as_deref(), Some("Query"));
        assert_eq!(def.types[0].fields[0].args[0].name, "episode");
    }
}
