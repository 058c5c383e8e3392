//! Schema Registry
//!
//! Builds an immutable [`Schema`] from a [`SchemaDefinition`] and owns the
//! name-indexed registry every named type reference resolves against.
//!
//! Construction runs in two passes and stops at the first error:
//!
//! 1. every declared type, then every directive, is built and indexed by name
//! 2. root types are bound, union members are checked against the registry
//!    and the interface implementer index is derived
//!
//! Field, argument and interface references are not checked for existence;
//! they resolve lazily and a dangling one reads as empty. Strict reference
//! linting can be enabled on the [`SchemaBuilder`].

use tracing::{debug, trace, warn};

use crate::config::BuilderConfig;
use crate::definition::{SchemaDefinition, TypeRefDefinition};
use crate::error::{
    Declaration, Result, RootOperation, RootTypeProblem, SchemaError, Scope, ScopeSegment,
    UnionMemberProblem,
};
use crate::interfaces::InterfaceIndex;
use crate::lint::{LintOptions, ReferenceLinter};
use crate::types::{Directive, NamedList, NamedType, TypeDef, TypeKind, TypeRef};
use crate::view::{Bound, TypeHandle};

/// An immutable, introspectable type system
///
/// Nothing can be added, removed or changed once built. The schema holds no
/// interior mutability, so one instance can be shared across threads by
/// reference or behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Schema {
    types: NamedList<NamedType>,
    directives: NamedList<Directive>,
    query_type: usize,
    mutation_type: Option<usize>,
    subscription_type: Option<usize>,
    interfaces: InterfaceIndex,
}

impl Schema {
    /// Build a schema with the default, lenient settings
    pub fn build(def: &SchemaDefinition) -> Result<Self> {
        SchemaBuilder::new().build(def)
    }

    // ========== Public API ==========

    pub fn query_type(&self) -> TypeHandle<'_> {
        self.handle_at(self.query_type)
    }

    pub fn mutation_type(&self) -> Option<TypeHandle<'_>> {
        self.mutation_type.map(|position| self.handle_at(position))
    }

    pub fn subscription_type(&self) -> Option<TypeHandle<'_>> {
        self.subscription_type.map(|position| self.handle_at(position))
    }

    /// Root type for the given operation
    pub fn root_type(&self, operation: RootOperation) -> Option<TypeHandle<'_>> {
        match operation {
            RootOperation::Query => Some(self.query_type()),
            RootOperation::Mutation => self.mutation_type(),
            RootOperation::Subscription => self.subscription_type(),
        }
    }

    /// All declared types, in declaration order
    pub fn types(&self) -> impl ExactSizeIterator<Item = TypeHandle<'_>> + '_ {
        self.types.iter().map(move |ty| TypeHandle::declared(self, ty))
    }

    pub fn get_type(&self, name: &str) -> Option<TypeHandle<'_>> {
        self.lookup(name).map(|ty| TypeHandle::declared(self, ty))
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// All declared directives, in declaration order
    pub fn directives(&self) -> impl ExactSizeIterator<Item = Bound<'_, Directive>> + '_ {
        self.directives.iter().map(move |directive| Bound::new(self, directive))
    }

    pub fn get_directive(&self, name: &str) -> Option<Bound<'_, Directive>> {
        self.directives.get(name).map(|directive| Bound::new(self, directive))
    }

    pub fn directive_count(&self) -> usize {
        self.directives.len()
    }

    /// Bind a type reference to this schema
    pub fn resolve<'s>(&'s self, type_ref: &'s TypeRef) -> TypeHandle<'s> {
        TypeHandle::reference(self, type_ref)
    }

    /// Object types listing `interface` among their interfaces
    pub fn implementers(&self, interface: &str) -> Vec<TypeHandle<'_>> {
        self.interfaces
            .implementers(interface)
            .iter()
            .map(|&position| self.handle_at(position))
            .collect()
    }

    pub(crate) fn interface_index(&self) -> &InterfaceIndex {
        &self.interfaces
    }

    /// Registry lookup backing every named reference
    pub(crate) fn lookup(&self, name: &str) -> Option<&NamedType> {
        self.types.get(name)
    }

    fn handle_at(&self, position: usize) -> TypeHandle<'_> {
        TypeHandle::declared(self, &self.types[position])
    }
}

/// Configurable schema construction
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    strict_references: bool,
    check_names: bool,
    warn_dangling_interfaces: bool,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            strict_references: false,
            check_names: false,
            warn_dangling_interfaces: true,
        }
    }

    /// Take validation settings from loaded configuration
    pub fn from_config(config: &BuilderConfig) -> Self {
        Self {
            strict_references: config.validation.strict_references,
            check_names: config.validation.check_names,
            warn_dangling_interfaces: config.validation.warn_dangling_interfaces,
        }
    }

    /// Fail on references that do not resolve or resolve to the wrong kind
    pub fn strict_references(mut self, enabled: bool) -> Self {
        self.strict_references = enabled;
        self
    }

    /// Fail on names outside the GraphQL name grammar
    pub fn check_names(mut self, enabled: bool) -> Self {
        self.check_names = enabled;
        self
    }

    pub fn warn_dangling_interfaces(mut self, enabled: bool) -> Self {
        self.warn_dangling_interfaces = enabled;
        self
    }

    pub fn build(&self, def: &SchemaDefinition) -> Result<Schema> {
        // Pass 1: construct and index
        let mut types = NamedList::with_capacity(def.types.len());
        for type_def in &def.types {
            let ty = NamedType::build(type_def)?;
            trace!(name = ty.name(), kind = %ty.kind(), "registered type");
            if let Err(duplicate) = types.try_insert(ty) {
                return Err(SchemaError::DuplicateDeclaration {
                    scope: Scope::schema(),
                    declaration: Declaration::Type,
                    name: duplicate.name().to_string(),
                });
            }
        }

        let mut directives = NamedList::with_capacity(def.directives.len());
        for directive_def in &def.directives {
            let directive = Directive::build(directive_def)?;
            trace!(name = directive.name(), "registered directive");
            if let Err(duplicate) = directives.try_insert(directive) {
                return Err(SchemaError::DuplicateDeclaration {
                    scope: Scope::schema(),
                    declaration: Declaration::Directive,
                    name: duplicate.name().to_string(),
                });
            }
        }

        // Pass 2: bind roots, check unions, derive the interface index
        let query_type = match def.query_type.as_ref() {
            Some(root) => bind_root(&types, RootOperation::Query, root)?,
            None => {
                return Err(SchemaError::InvalidRootType {
                    root: RootOperation::Query,
                    problem: RootTypeProblem::NotSpecified,
                })
            }
        };
        let mutation_type = def
            .mutation_type
            .as_ref()
            .map(|root| bind_root(&types, RootOperation::Mutation, root))
            .transpose()?;
        let subscription_type = def
            .subscription_type
            .as_ref()
            .map(|root| bind_root(&types, RootOperation::Subscription, root))
            .transpose()?;

        for ty in &types {
            if let TypeDef::Union { possible_types } = ty.def() {
                check_union_members(&types, ty.name(), possible_types)?;
            }
        }

        let interfaces = InterfaceIndex::build(&types);
        if self.warn_dangling_interfaces {
            for name in interfaces.interface_names() {
                if !types.contains(name) {
                    warn!(
                        interface = name,
                        "object types implement an interface that is not declared"
                    );
                }
            }
        }

        let schema = Schema {
            types,
            directives,
            query_type,
            mutation_type,
            subscription_type,
            interfaces,
        };

        if self.strict_references || self.check_names {
            let options = LintOptions {
                references: self.strict_references,
                names: self.check_names,
            };
            let result = ReferenceLinter::new(&options).lint(&schema);
            if let Some(error) = result.errors.into_iter().next() {
                return Err(error.into_schema_error());
            }
        }

        debug!(
            types = schema.type_count(),
            directives = schema.directive_count(),
            "schema built"
        );
        Ok(schema)
    }
}

/// Resolve a root reference eagerly; it must name a registered object type
fn bind_root(
    types: &NamedList<NamedType>,
    root: RootOperation,
    def: &TypeRefDefinition,
) -> Result<usize> {
    let type_ref = TypeRef::build(def, &Scope::from(ScopeSegment::Root(root)))?;
    if let Some(kind) = type_ref.wrapper_kind() {
        return Err(SchemaError::InvalidRootType {
            root,
            problem: RootTypeProblem::WrongKind { name: None, kind },
        });
    }

    let name = type_ref.named_type();
    let Some(position) = types.position(name) else {
        return Err(SchemaError::InvalidRootType {
            root,
            problem: RootTypeProblem::Missing { name: name.to_string() },
        });
    };
    let kind = types[position].kind();
    if kind != TypeKind::Object {
        return Err(SchemaError::InvalidRootType {
            root,
            problem: RootTypeProblem::WrongKind {
                name: Some(name.to_string()),
                kind,
            },
        });
    }
    Ok(position)
}

fn check_union_members(
    types: &NamedList<NamedType>,
    union: &str,
    possible_types: &[TypeRef],
) -> Result<()> {
    for member in possible_types {
        let name = member.named_type();
        match types.get(name) {
            None => {
                return Err(SchemaError::InvalidUnionMember {
                    union: union.to_string(),
                    problem: UnionMemberProblem::Missing { name: name.to_string() },
                })
            }
            Some(ty) if ty.kind() != TypeKind::Object => {
                return Err(SchemaError::InvalidUnionMember {
                    union: union.to_string(),
                    problem: UnionMemberProblem::WrongKind {
                        name: name.to_string(),
                        kind: ty.kind(),
                    },
                })
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{FieldDefinition, TypeDefinition};

    fn minimal() -> SchemaDefinition {
        SchemaDefinition::new("Query")
            .with_type(TypeDefinition::object("Query").with_field(FieldDefinition::new(
                "version",
                TypeRefDefinition::named("String"),
            )))
            .with_type(TypeDefinition::scalar("String"))
    }

    #[test]
    fn test_build_minimal() {
        let schema = Schema::build(&minimal()).unwrap();
        assert_eq!(schema.query_type().kind(), Some(TypeKind::Object));
        assert!(schema.mutation_type().is_none());
        assert!(schema.subscription_type().is_none());
        assert_eq!(schema.type_count(), 2);
        assert_eq!(schema.directive_count(), 0);
    }

    #[test]
    fn test_duplicate_type() {
        let def = minimal().with_type(TypeDefinition::enumeration("String"));
        let err = Schema::build(&def).unwrap_err();
        assert_eq!(err.to_string(), "schema: type \"String\" declared more than once");
    }

    #[test]
    fn test_query_root_required() {
        let mut def = minimal();
        def.query_type = None;
        assert_eq!(
            Schema::build(&def).unwrap_err(),
            SchemaError::InvalidRootType {
                root: RootOperation::Query,
                problem: RootTypeProblem::NotSpecified,
            }
        );
    }

    #[test]
    fn test_root_must_be_object() {
        let def = minimal().with_subscription_type("String");
        let err = Schema::build(&def).unwrap_err();
        assert_eq!(
            err.to_string(),
            "subscription type must reference an OBJECT type, found SCALAR type \"String\""
        );
    }

    #[test]
    fn test_root_wrapper_rejected() {
        let mut def = minimal();
        def.query_type = Some(TypeRefDefinition::list(TypeRefDefinition::named("Query")));
        assert_eq!(
            Schema::build(&def).unwrap_err().to_string(),
            "query type must reference an OBJECT type, found LIST type"
        );
    }

    #[test]
    fn test_root_nested_non_null_is_type_ref_error() {
        let mut def = minimal();
        def.mutation_type = Some(TypeRefDefinition::non_null(TypeRefDefinition::non_null(
            TypeRefDefinition::named("Query"),
        )));
        let err = Schema::build(&def).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidTypeRef { .. }));
        assert!(err.to_string().starts_with("mutation type: "));
    }

    #[test]
    fn test_roots_may_share_a_type() {
        let def = minimal().with_mutation_type("Query");
        let schema = Schema::build(&def).unwrap();
        assert_eq!(schema.mutation_type().unwrap().name(), Some("Query"));
        assert_eq!(
            schema.root_type(RootOperation::Mutation).unwrap().name(),
            Some("Query")
        );
    }

    #[test]
    fn test_dangling_interface_warning_toggle() {
        let def = minimal().with_type(TypeDefinition::object("Leaf").with_interface("Node"));

        for warn in [true, false] {
            let schema = SchemaBuilder::new()
                .warn_dangling_interfaces(warn)
                .build(&def)
                .unwrap();
            assert!(schema.get_type("Node").is_none());
            assert_eq!(schema.interface_index().implementers("Node"), &[2]);
            let implementers: Vec<_> = schema
                .implementers("Node")
                .iter()
                .filter_map(|ty| ty.name())
                .collect();
            assert_eq!(implementers, vec!["Leaf"]);
        }
    }

    #[test]
    fn test_strict_builder_rejects_dangling_field() {
        let def = minimal().with_type(
            TypeDefinition::object("Orphan")
                .with_field(FieldDefinition::new("ghost", TypeRefDefinition::named("Ghost"))),
        );
        assert!(Schema::build(&def).is_ok());

        let err = SchemaBuilder::new().strict_references(true).build(&def).unwrap_err();
        assert!(matches!(err, SchemaError::StrictValidation { .. }));
        assert!(err.to_string().contains("\"Ghost\""));
    }
}
