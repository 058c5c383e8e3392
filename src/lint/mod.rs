//! Schema Reference Linting
//!
//! Construction only checks references it must resolve eagerly (root types
//! and union members). Everything else resolves lazily, and a dangling or
//! wrongly-kinded reference is accepted. The linter walks a built schema and
//! reports those references.
//!
//! ## Lints
//! 1. **Unresolved references**: a field, argument, input field or interface
//!    names a type that is not declared
//! 2. **Input kinds**: arguments and input fields must reference SCALAR, ENUM
//!    or INPUT_OBJECT types
//! 3. **Output kinds**: field results must not reference INPUT_OBJECT types
//! 4. **Interface kinds**: an object's interfaces must be INTERFACE types
//! 5. **Names** (optional): every declared name matches the GraphQL name
//!    grammar
//!
//! Interfaces without any implementing object type are reported as warnings.

use regex::Regex;

use crate::error::{SchemaError, Scope, ScopeSegment};
use crate::registry::Schema;
use crate::types::{Field, InputValue, NamedType, TypeDef, TypeKind, TypeRef};

/// Result of linting a schema
#[derive(Debug, Default)]
pub struct LintResult {
    pub errors: Vec<LintError>,
    pub warnings: Vec<LintWarning>,
}

impl LintResult {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintError {
    pub code: &'static str,
    pub message: String,
    pub scope: Scope,
}

impl LintError {
    pub fn into_schema_error(self) -> SchemaError {
        SchemaError::StrictValidation {
            scope: self.scope,
            code: self.code,
            message: self.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintWarning {
    pub code: &'static str,
    pub message: String,
    pub scope: Scope,
}

/// Which lints to run
#[derive(Debug, Clone, Copy)]
pub struct LintOptions {
    pub references: bool,
    pub names: bool,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            references: true,
            names: true,
        }
    }
}

/// What a reference position accepts
#[derive(Debug, Clone, Copy)]
enum Position {
    Input,
    Output,
    Interface,
}

impl Position {
    fn accepts(&self, kind: TypeKind) -> bool {
        match self {
            Position::Input => kind.is_input(),
            Position::Output => kind.is_output(),
            Position::Interface => kind == TypeKind::Interface,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Position::Input => "INPUT_KIND_MISMATCH",
            Position::Output => "OUTPUT_KIND_MISMATCH",
            Position::Interface => "INTERFACE_KIND_MISMATCH",
        }
    }

    fn expectation(&self) -> &'static str {
        match self {
            Position::Input => "an input type",
            Position::Output => "an output type",
            Position::Interface => "an INTERFACE type",
        }
    }
}

/// The schema reference linter
pub struct ReferenceLinter {
    options: LintOptions,
    /// GraphQL `Name` production
    name_pattern: Regex,
}

impl Default for ReferenceLinter {
    fn default() -> Self {
        Self::new(&LintOptions::default())
    }
}

impl ReferenceLinter {
    pub fn new(options: &LintOptions) -> Self {
        Self {
            options: *options,
            name_pattern: Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$")
                .expect("GraphQL name pattern is a valid regex"),
        }
    }

    /// Lint every type and directive of a built schema
    pub fn lint(&self, schema: &Schema) -> LintResult {
        let mut result = LintResult::default();

        for handle in schema.types() {
            let Some(ty) = handle.target() else {
                continue;
            };
            self.lint_type(schema, ty, &mut result);
        }

        for directive in schema.directives() {
            let scope = Scope::from(ScopeSegment::Directive(directive.name().to_string()));
            self.check_name(directive.name(), &scope, &mut result);
            for arg in directive.get().args() {
                let segment = ScopeSegment::Argument(arg.name().to_string());
                self.lint_input_value(schema, arg, &scope, segment, &mut result);
            }
        }

        result
    }

    fn lint_type(&self, schema: &Schema, ty: &NamedType, result: &mut LintResult) {
        let scope = Scope::from(ScopeSegment::Type(ty.name().to_string()));
        self.check_name(ty.name(), &scope, result);

        match ty.def() {
            TypeDef::Scalar | TypeDef::Union { .. } => {}
            TypeDef::Object { fields, interfaces } => {
                for field in fields {
                    self.lint_field(schema, field, &scope, result);
                }
                for (i, iface) in interfaces.iter().enumerate() {
                    let iface_scope = scope.child(ScopeSegment::Interface(i));
                    self.check_ref(schema, iface, Position::Interface, &iface_scope, result);
                }
            }
            TypeDef::Interface { fields } => {
                for field in fields {
                    self.lint_field(schema, field, &scope, result);
                }
                if schema.interface_index().implementers(ty.name()).is_empty() {
                    result.warnings.push(LintWarning {
                        code: "UNIMPLEMENTED_INTERFACE",
                        message: format!("no OBJECT type implements interface \"{}\"", ty.name()),
                        scope: scope.clone(),
                    });
                }
            }
            TypeDef::Enum { values } => {
                for value in values {
                    let value_scope =
                        scope.child(ScopeSegment::EnumValue(value.name().to_string()));
                    self.check_name(value.name(), &value_scope, result);
                }
            }
            TypeDef::InputObject { input_fields } => {
                for input_field in input_fields {
                    let segment = ScopeSegment::InputField(input_field.name().to_string());
                    self.lint_input_value(schema, input_field, &scope, segment, result);
                }
            }
        }
    }

    fn lint_field(&self, schema: &Schema, field: &Field, parent: &Scope, result: &mut LintResult) {
        let scope = parent.child(ScopeSegment::Field(field.name().to_string()));
        self.check_name(field.name(), &scope, result);
        self.check_ref(schema, field.type_ref(), Position::Output, &scope, result);
        for arg in field.args() {
            let segment = ScopeSegment::Argument(arg.name().to_string());
            self.lint_input_value(schema, arg, &scope, segment, result);
        }
    }

    fn lint_input_value(
        &self,
        schema: &Schema,
        value: &InputValue,
        parent: &Scope,
        segment: ScopeSegment,
        result: &mut LintResult,
    ) {
        let scope = parent.child(segment);
        self.check_name(value.name(), &scope, result);
        self.check_ref(schema, value.type_ref(), Position::Input, &scope, result);
    }

    fn check_ref(
        &self,
        schema: &Schema,
        type_ref: &TypeRef,
        position: Position,
        scope: &Scope,
        result: &mut LintResult,
    ) {
        if !self.options.references {
            return;
        }

        let name = type_ref.named_type();
        match schema.lookup(name) {
            None => result.errors.push(LintError {
                code: "UNRESOLVED_REFERENCE",
                message: format!("references non-existing type \"{}\"", name),
                scope: scope.clone(),
            }),
            Some(target) if !position.accepts(target.kind()) => result.errors.push(LintError {
                code: position.code(),
                message: format!(
                    "must reference {}, found {} type \"{}\"",
                    position.expectation(),
                    target.kind(),
                    name
                ),
                scope: scope.clone(),
            }),
            Some(_) => {}
        }
    }

    fn check_name(&self, name: &str, scope: &Scope, result: &mut LintResult) {
        if self.options.names && !self.name_pattern.is_match(name) {
            result.errors.push(LintError {
                code: "INVALID_NAME",
                message: format!("\"{}\" is not a valid GraphQL name", name),
                scope: scope.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{
        FieldDefinition, InputValueDefinition, SchemaDefinition, TypeDefinition, TypeRefDefinition,
    };

    fn named(name: &str) -> TypeRefDefinition {
        TypeRefDefinition::named(name)
    }

    fn lint(def: SchemaDefinition) -> LintResult {
        let schema = Schema::build(&def).unwrap();
        ReferenceLinter::default().lint(&schema)
    }

    fn base() -> SchemaDefinition {
        SchemaDefinition::new("Query")
            .with_type(TypeDefinition::scalar("String"))
            .with_type(TypeDefinition::input_object("Filter").with_input_field(
                InputValueDefinition::new("text", named("String")),
            ))
    }

    #[test]
    fn test_clean_schema() {
        let result = lint(base().with_type(
            TypeDefinition::object("Query").with_field(
                FieldDefinition::new("search", TypeRefDefinition::list(named("String")))
                    .with_arg(InputValueDefinition::new("filter", named("Filter"))),
            ),
        ));
        assert!(result.is_clean(), "{:?}", result.errors);
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_unresolved_field_type() {
        let result = lint(base().with_type(
            TypeDefinition::object("Query")
                .with_field(FieldDefinition::new("ghost", named("Ghost"))),
        ));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, "UNRESOLVED_REFERENCE");
        assert_eq!(
            result.errors[0].scope.to_string(),
            "type \"Query\" > field \"ghost\""
        );
    }

    #[test]
    fn test_kind_mismatches() {
        let def = base().with_type(TypeDefinition::interface("Node")).with_type(
            TypeDefinition::object("Query").with_interface("String").with_field(
                FieldDefinition::new("filter", named("Filter"))
                    .with_arg(InputValueDefinition::new("parent", named("Query"))),
            ),
        );
        let result = lint(def);
        let codes: Vec<_> = result.errors.iter().map(|e| e.code).collect();
        assert_eq!(
            codes,
            vec!["OUTPUT_KIND_MISMATCH", "INPUT_KIND_MISMATCH", "INTERFACE_KIND_MISMATCH"]
        );
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, "UNIMPLEMENTED_INTERFACE");
    }

    #[test]
    fn test_invalid_names() {
        let def = base().with_type(
            TypeDefinition::object("Query")
                .with_field(FieldDefinition::new("first-name", named("String"))),
        );
        let result = lint(def.clone());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, "INVALID_NAME");

        let schema = Schema::build(&def).unwrap();
        let relaxed = ReferenceLinter::new(&LintOptions {
            references: true,
            names: false,
        });
        assert!(relaxed.lint(&schema).is_clean());
    }
}
