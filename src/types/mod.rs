//! Type system model
//!
//! Declared types are stored as [`NamedType`] with one [`TypeDef`] payload
//! per declarable kind. List and NonNull only exist inside a [`TypeRef`], so
//! a declared type can never carry a wrapper kind.

pub mod directive;
pub mod kind;
pub mod named_list;
pub mod type_ref;
pub mod values;

pub use directive::Directive;
pub use kind::{DirectiveLocation, TypeKind};
pub use named_list::{Named, NamedList};
pub use type_ref::TypeRef;
pub use values::{Deprecation, EnumValue, Field, InputValue};

use std::collections::HashSet;

use tracing::debug;

use crate::definition::TypeDefinition;
use crate::error::{Declaration, Result, SchemaError, Scope, ScopeSegment, UnionMemberProblem};
use values::{build_input_values, require_name};

/// Kind-specific payload of a declared type
#[derive(Debug, Clone)]
pub enum TypeDef {
    Scalar,
    Object {
        fields: NamedList<Field>,
        interfaces: Vec<TypeRef>,
    },
    Interface {
        fields: NamedList<Field>,
    },
    Union {
        possible_types: Vec<TypeRef>,
    },
    Enum {
        values: NamedList<EnumValue>,
    },
    InputObject {
        input_fields: NamedList<InputValue>,
    },
}

impl TypeDef {
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDef::Scalar => TypeKind::Scalar,
            TypeDef::Object { .. } => TypeKind::Object,
            TypeDef::Interface { .. } => TypeKind::Interface,
            TypeDef::Union { .. } => TypeKind::Union,
            TypeDef::Enum { .. } => TypeKind::Enum,
            TypeDef::InputObject { .. } => TypeKind::InputObject,
        }
    }
}

/// A type declared at the top level of a schema
#[derive(Debug, Clone)]
pub struct NamedType {
    name: String,
    description: Option<String>,
    def: TypeDef,
}

impl NamedType {
    /// Build a declared type from its definition
    ///
    /// Checks everything that is local to the type: names, duplicates within
    /// the type, type reference structure and wrapper union members. Names of
    /// other types are not looked up here.
    pub(crate) fn build(def: &TypeDefinition) -> Result<Self> {
        let name = require_name(&def.name, &Scope::schema())?;
        let scope = Scope::from(ScopeSegment::Type(name.to_string()));

        let payload = match def.kind {
            TypeKind::Scalar => TypeDef::Scalar,
            TypeKind::Object => TypeDef::Object {
                fields: build_fields(def, &scope)?,
                interfaces: build_interfaces(def, &scope)?,
            },
            TypeKind::Interface => {
                if !def.possible_types.is_empty() {
                    debug!(
                        interface = name,
                        "ignoring declared possible types, they are derived from implementers"
                    );
                }
                TypeDef::Interface {
                    fields: build_fields(def, &scope)?,
                }
            }
            TypeKind::Union => TypeDef::Union {
                possible_types: build_possible_types(def, &scope)?,
            },
            TypeKind::Enum => {
                let mut values = NamedList::with_capacity(def.enum_values.len());
                for value_def in &def.enum_values {
                    let value = EnumValue::build(value_def, &scope)?;
                    if let Err(duplicate) = values.try_insert(value) {
                        return Err(SchemaError::DuplicateDeclaration {
                            scope,
                            declaration: Declaration::EnumValue,
                            name: duplicate.name().to_string(),
                        });
                    }
                }
                TypeDef::Enum { values }
            }
            TypeKind::InputObject => TypeDef::InputObject {
                input_fields: build_input_values(
                    &def.input_fields,
                    &scope,
                    Declaration::InputField,
                )?,
            },
            kind @ (TypeKind::List | TypeKind::NonNull) => {
                return Err(SchemaError::UnsupportedTopLevelKind {
                    name: name.to_string(),
                    kind,
                });
            }
        };

        Ok(Self {
            name: name.to_string(),
            description: def.description.clone(),
            def: payload,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn kind(&self) -> TypeKind {
        self.def.kind()
    }

    pub fn def(&self) -> &TypeDef {
        &self.def
    }

    /// Fields of an object or interface, empty for every other kind
    pub fn fields(&self) -> &[Field] {
        match &self.def {
            TypeDef::Object { fields, .. } | TypeDef::Interface { fields } => fields.as_slice(),
            _ => &[],
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        match &self.def {
            TypeDef::Object { fields, .. } | TypeDef::Interface { fields } => fields.get(name),
            _ => None,
        }
    }

    /// Interface references of an object, empty for every other kind
    pub fn interfaces(&self) -> &[TypeRef] {
        match &self.def {
            TypeDef::Object { interfaces, .. } => interfaces,
            _ => &[],
        }
    }

    /// Stored possible types of a union
    ///
    /// Interfaces have no stored possible types; use
    /// [`TypeHandle::possible_types`](crate::TypeHandle::possible_types).
    pub fn union_members(&self) -> &[TypeRef] {
        match &self.def {
            TypeDef::Union { possible_types } => possible_types,
            _ => &[],
        }
    }

    pub fn enum_values(&self) -> &[EnumValue] {
        match &self.def {
            TypeDef::Enum { values } => values.as_slice(),
            _ => &[],
        }
    }

    pub fn enum_value(&self, name: &str) -> Option<&EnumValue> {
        match &self.def {
            TypeDef::Enum { values } => values.get(name),
            _ => None,
        }
    }

    pub fn input_fields(&self) -> &[InputValue] {
        match &self.def {
            TypeDef::InputObject { input_fields } => input_fields.as_slice(),
            _ => &[],
        }
    }

    pub fn input_field(&self, name: &str) -> Option<&InputValue> {
        match &self.def {
            TypeDef::InputObject { input_fields } => input_fields.get(name),
            _ => None,
        }
    }
}

impl Named for NamedType {
    fn name(&self) -> &str {
        &self.name
    }
}

fn build_fields(def: &TypeDefinition, scope: &Scope) -> Result<NamedList<Field>> {
    let mut fields = NamedList::with_capacity(def.fields.len());
    for field_def in &def.fields {
        let field = Field::build(field_def, scope)?;
        if let Err(duplicate) = fields.try_insert(field) {
            return Err(SchemaError::DuplicateDeclaration {
                scope: scope.clone(),
                declaration: Declaration::Field,
                name: duplicate.name().to_string(),
            });
        }
    }
    Ok(fields)
}

/// Interface references must be plain names; repeats are collapsed
fn build_interfaces(def: &TypeDefinition, scope: &Scope) -> Result<Vec<TypeRef>> {
    let mut seen = HashSet::new();
    let mut interfaces = Vec::with_capacity(def.interfaces.len());
    for (i, iface_def) in def.interfaces.iter().enumerate() {
        let iface_scope = scope.child(ScopeSegment::Interface(i));
        let iface = TypeRef::build(iface_def, &iface_scope)?;
        let Some(name) = iface.name() else {
            return Err(SchemaError::MissingRequiredField {
                scope: iface_scope,
                field: "interface name",
            });
        };
        if seen.insert(name.to_string()) {
            interfaces.push(iface);
        }
    }
    Ok(interfaces)
}

/// Union members must be plain names; repeats are collapsed
///
/// Whether each name is a declared object type is only known once every type
/// is registered, so that check happens when the schema is linked.
fn build_possible_types(def: &TypeDefinition, scope: &Scope) -> Result<Vec<TypeRef>> {
    let mut seen = HashSet::new();
    let mut possible_types = Vec::with_capacity(def.possible_types.len());
    for (i, member_def) in def.possible_types.iter().enumerate() {
        let member = TypeRef::build(member_def, &scope.child(ScopeSegment::PossibleType(i)))?;
        if let Some(kind) = member.wrapper_kind() {
            return Err(SchemaError::InvalidUnionMember {
                union: def.name.clone(),
                problem: UnionMemberProblem::Wrapper { kind },
            });
        }
        if seen.insert(member.named_type().to_string()) {
            possible_types.push(member);
        }
    }
    Ok(possible_types)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{
        EnumValueDefinition, FieldDefinition, InputValueDefinition, TypeRefDefinition,
    };

    fn named(name: &str) -> TypeRefDefinition {
        TypeRefDefinition::named(name)
    }

    #[test]
    fn test_object_with_self_reference() {
        let def = TypeDefinition::object("Node")
            .with_field(FieldDefinition::new("parent", named("Node")))
            .with_interface("Entity")
            .with_interface("Entity");
        let ty = NamedType::build(&def).unwrap();
        assert_eq!(ty.kind(), TypeKind::Object);
        assert_eq!(ty.field("parent").unwrap().type_ref().name(), Some("Node"));
        assert_eq!(ty.interfaces().len(), 1);
    }

    #[test]
    fn test_duplicate_field() {
        let def = TypeDefinition::interface("Character")
            .with_field(FieldDefinition::new("id", named("ID")))
            .with_field(FieldDefinition::new("id", named("String")));
        let err = NamedType::build(&def).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateDeclaration {
                scope: ScopeSegment::Type("Character".into()).into(),
                declaration: Declaration::Field,
                name: "id".into(),
            }
        );
    }

    #[test]
    fn test_duplicate_enum_value() {
        let def = TypeDefinition::enumeration("Episode")
            .with_enum_value(EnumValueDefinition::new("JEDI"))
            .with_enum_value(EnumValueDefinition::new("JEDI"));
        let err = NamedType::build(&def).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::DuplicateDeclaration {
                declaration: Declaration::EnumValue,
                ref name,
                ..
            } if name == "JEDI"
        ));
    }

    #[test]
    fn test_duplicate_input_field() {
        let def = TypeDefinition::input_object("ReviewInput")
            .with_input_field(InputValueDefinition::new("stars", named("Int")))
            .with_input_field(InputValueDefinition::new("stars", named("Int")));
        let err = NamedType::build(&def).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type \"ReviewInput\": input field \"stars\" declared more than once"
        );
    }

    #[test]
    fn test_wrapper_interface_rejected() {
        let mut def = TypeDefinition::object("Human")
            .with_field(FieldDefinition::new("id", named("ID")));
        def.interfaces.push(TypeRefDefinition::non_null(named("Character")));
        let err = NamedType::build(&def).unwrap_err();
        assert!(matches!(err, SchemaError::MissingRequiredField { field: "interface name", .. }));
    }

    #[test]
    fn test_union_members() {
        let def = TypeDefinition::union("SearchResult")
            .with_possible_type(named("Human"))
            .with_possible_type(named("Droid"))
            .with_possible_type(named("Human"));
        let ty = NamedType::build(&def).unwrap();
        let names: Vec<_> = ty.union_members().iter().map(|r| r.named_type()).collect();
        assert_eq!(names, vec!["Human", "Droid"]);

        let def = TypeDefinition::union("SearchResult")
            .with_possible_type(TypeRefDefinition::list(named("Human")));
        let err = NamedType::build(&def).unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidUnionMember {
                union: "SearchResult".into(),
                problem: UnionMemberProblem::Wrapper { kind: TypeKind::List },
            }
        );
    }

    #[test]
    fn test_wrapper_kinds_not_declarable() {
        for kind in [TypeKind::List, TypeKind::NonNull] {
            let err = NamedType::build(&TypeDefinition::new(kind, "Wrapped")).unwrap_err();
            assert_eq!(
                err,
                SchemaError::UnsupportedTopLevelKind { name: "Wrapped".into(), kind }
            );
        }
    }

    #[test]
    fn test_wrong_kind_accessors_are_empty() {
        let scalar = NamedType::build(&TypeDefinition::scalar("ID")).unwrap();
        assert!(scalar.fields().is_empty());
        assert!(scalar.field("id").is_none());
        assert!(scalar.enum_values().is_empty());
        assert!(scalar.input_fields().is_empty());
        assert!(scalar.union_members().is_empty());
        assert!(scalar.interfaces().is_empty());
    }
}
