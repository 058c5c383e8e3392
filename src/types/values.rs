//! Fields, input values and enum values

use crate::definition::{EnumValueDefinition, FieldDefinition, InputValueDefinition};
use crate::error::{Declaration, Result, SchemaError, Scope, ScopeSegment};
use crate::types::named_list::{Named, NamedList};
use crate::types::type_ref::TypeRef;

/// Deprecation status of a field or enum value
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Deprecation {
    #[default]
    Current,
    Deprecated(Option<String>),
}

impl Deprecation {
    fn from_parts(is_deprecated: bool, reason: Option<&String>) -> Self {
        if is_deprecated {
            Deprecation::Deprecated(reason.cloned())
        } else {
            Deprecation::Current
        }
    }

    pub fn is_deprecated(&self) -> bool {
        matches!(self, Deprecation::Deprecated(_))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Deprecation::Deprecated(reason) => reason.as_deref(),
            Deprecation::Current => None,
        }
    }
}

pub(crate) fn require_name<'a>(name: &'a str, scope: &Scope) -> Result<&'a str> {
    if name.is_empty() {
        return Err(SchemaError::MissingRequiredField {
            scope: scope.clone(),
            field: "name",
        });
    }
    Ok(name)
}

/// Build an ordered, name-unique argument or input field list
pub(crate) fn build_input_values(
    defs: &[InputValueDefinition],
    scope: &Scope,
    declaration: Declaration,
) -> Result<NamedList<InputValue>> {
    let mut values = NamedList::with_capacity(defs.len());
    for def in defs {
        let value = InputValue::build(def, scope, declaration)?;
        if let Err(duplicate) = values.try_insert(value) {
            return Err(SchemaError::DuplicateDeclaration {
                scope: scope.clone(),
                declaration,
                name: duplicate.name,
            });
        }
    }
    Ok(values)
}

/// A field of an object or interface type
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    description: Option<String>,
    args: NamedList<InputValue>,
    ty: TypeRef,
    deprecation: Deprecation,
}

impl Field {
    pub(crate) fn build(def: &FieldDefinition, parent: &Scope) -> Result<Self> {
        let name = require_name(&def.name, parent)?;
        let scope = parent.child(ScopeSegment::Field(name.to_string()));

        let ty = def.ty.as_ref().ok_or_else(|| SchemaError::MissingRequiredField {
            scope: scope.clone(),
            field: "type",
        })?;
        let ty = TypeRef::build(ty, &scope)?;
        let args = build_input_values(&def.args, &scope, Declaration::Argument)?;

        Ok(Self {
            name: name.to_string(),
            description: def.description.clone(),
            args,
            ty,
            deprecation: Deprecation::from_parts(
                def.is_deprecated,
                def.deprecation_reason.as_ref(),
            ),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn args(&self) -> &NamedList<InputValue> {
        &self.args
    }

    /// The declared result type, unresolved
    pub fn type_ref(&self) -> &TypeRef {
        &self.ty
    }

    pub fn deprecation(&self) -> &Deprecation {
        &self.deprecation
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_deprecated()
    }

    pub fn deprecation_reason(&self) -> Option<&str> {
        self.deprecation.reason()
    }
}

impl Named for Field {
    fn name(&self) -> &str {
        &self.name
    }
}

/// An argument, input field or directive argument
#[derive(Debug, Clone)]
pub struct InputValue {
    name: String,
    description: Option<String>,
    ty: TypeRef,
    default_value: Option<String>,
}

impl InputValue {
    pub(crate) fn build(
        def: &InputValueDefinition,
        parent: &Scope,
        declaration: Declaration,
    ) -> Result<Self> {
        let name = require_name(&def.name, parent)?;
        let segment = match declaration {
            Declaration::InputField => ScopeSegment::InputField(name.to_string()),
            _ => ScopeSegment::Argument(name.to_string()),
        };
        let scope = parent.child(segment);

        let ty = def.ty.as_ref().ok_or_else(|| SchemaError::MissingRequiredField {
            scope: scope.clone(),
            field: "type",
        })?;

        Ok(Self {
            name: name.to_string(),
            description: def.description.clone(),
            ty: TypeRef::build(ty, &scope)?,
            default_value: def.default_value.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.ty
    }

    /// The default value exactly as declared
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }
}

impl Named for InputValue {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A value of an enum type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    name: String,
    description: Option<String>,
    deprecation: Deprecation,
}

impl EnumValue {
    pub(crate) fn build(def: &EnumValueDefinition, parent: &Scope) -> Result<Self> {
        let name = require_name(&def.name, parent)?;
        Ok(Self {
            name: name.to_string(),
            description: def.description.clone(),
            deprecation: Deprecation::from_parts(
                def.is_deprecated,
                def.deprecation_reason.as_ref(),
            ),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_deprecated()
    }

    pub fn deprecation_reason(&self) -> Option<&str> {
        self.deprecation.reason()
    }
}

impl Named for EnumValue {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::TypeRefDefinition;

    fn type_scope() -> Scope {
        ScopeSegment::Type("Query".into()).into()
    }

    #[test]
    fn test_field_with_args() {
        let def = FieldDefinition::new("hero", TypeRefDefinition::named("Character"))
            .with_arg(
                InputValueDefinition::new("episode", TypeRefDefinition::named("Episode"))
                    .with_default("JEDI"),
            )
            .deprecated(Some("use heroes"));
        let field = Field::build(&def, &type_scope()).unwrap();
        assert_eq!(field.name(), "hero");
        assert_eq!(field.type_ref(), &TypeRef::named("Character"));
        assert_eq!(field.args().get("episode").unwrap().default_value(), Some("JEDI"));
        assert!(field.is_deprecated());
        assert_eq!(field.deprecation_reason(), Some("use heroes"));
    }

    #[test]
    fn test_duplicate_arg() {
        let def = FieldDefinition::new("droid", TypeRefDefinition::named("Droid"))
            .with_arg(InputValueDefinition::new("id", TypeRefDefinition::named("ID")))
            .with_arg(InputValueDefinition::new("id", TypeRefDefinition::named("String")));
        let err = Field::build(&def, &type_scope()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type \"Query\" > field \"droid\": argument \"id\" declared more than once"
        );
    }

    #[test]
    fn test_field_requires_name_and_type() {
        let unnamed = FieldDefinition::new("", TypeRefDefinition::named("ID"));
        assert!(matches!(
            Field::build(&unnamed, &type_scope()),
            Err(SchemaError::MissingRequiredField { field: "name", .. })
        ));

        let untyped = FieldDefinition {
            name: "id".into(),
            ..FieldDefinition::default()
        };
        assert!(matches!(
            Field::build(&untyped, &type_scope()),
            Err(SchemaError::MissingRequiredField { field: "type", .. })
        ));
    }

    #[test]
    fn test_reason_dropped_when_not_deprecated() {
        let def = EnumValueDefinition {
            name: "NEWHOPE".into(),
            deprecation_reason: Some("stale".into()),
            ..EnumValueDefinition::default()
        };
        let value = EnumValue::build(&def, &type_scope()).unwrap();
        assert!(!value.is_deprecated());
        assert_eq!(value.deprecation_reason(), None);
    }
}
