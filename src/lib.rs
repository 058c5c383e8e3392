//! GraphQL Type Graph
//!
//! Builds an immutable, introspectable GraphQL type system from a declarative
//! definition tree (the shape of a GraphQL introspection result).
//!
//! ## Features
//!
//! - **Lazy References**: named type references are stored by name and resolved
//!   against the schema on access, so cyclic and self-referential types need no
//!   special handling
//! - **Fail-Fast Construction**: the first structural error is reported with
//!   the scope and name it concerns
//! - **Derived Possible Types**: an interface's implementers are indexed from
//!   the object types that declare it
//! - **Strict Linting**: opt-in checks for dangling and wrongly-kinded references
//!
//! ## Architecture
//!
//! ```text
//! SchemaDefinition ──► SchemaBuilder ──► Schema
//!  (serde, JSON)       │                  ├── types: NamedList<NamedType>
//!                      │ pass 1           ├── directives: NamedList<Directive>
//!                      │  build + index   ├── query / mutation / subscription
//!                      │ pass 2           └── InterfaceIndex
//!                      │  roots, unions,
//!                      │  interfaces      TypeHandle<'s> / Bound<'s, T>
//!                      └─ lint (opt-in)    └── &'s Schema: lookups by name
//! ```
//!
//! ## Example
//!
//! ```
//! use gql_typegraph::{FieldDefinition, Schema, SchemaDefinition, TypeDefinition, TypeRefDefinition};
//!
//! let def = SchemaDefinition::new("Query")
//!     .with_type(TypeDefinition::scalar("String"))
//!     .with_type(
//!         TypeDefinition::object("Query")
//!             .with_field(FieldDefinition::new("hello", TypeRefDefinition::named("String"))),
//!     );
//!
//! let schema = Schema::build(&def).unwrap();
//! let hello = schema.query_type().field("hello").unwrap();
//! assert_eq!(hello.ty().name(), Some("String"));
//! ```

pub mod config;
pub mod definition;
pub mod error;
mod interfaces;
pub mod lint;
pub mod registry;
pub mod types;
pub mod view;

pub use config::{BuilderConfig, ValidationConfig};
pub use definition::{
    DirectiveDefinition, EnumValueDefinition, FieldDefinition, InputValueDefinition,
    SchemaDefinition, TypeDefinition, TypeRefDefinition,
};
pub use error::{Result, RootOperation, SchemaError, Scope, ScopeSegment};
pub use lint::{LintOptions, LintResult, ReferenceLinter};
pub use registry::{Schema, SchemaBuilder};
pub use types::{
    Deprecation, Directive, DirectiveLocation, EnumValue, Field, InputValue, NamedType, TypeDef,
    TypeKind, TypeRef,
};
pub use view::{Bound, TypeHandle};
