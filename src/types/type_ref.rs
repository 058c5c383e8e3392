//! Type references
//!
//! A reference is either a wrapper (List or NonNull) that owns the reference
//! it wraps, or a reference to a declared type by name. Named references are
//! never looked up when they are built: the name is resolved against the
//! schema each time a [`TypeHandle`](crate::TypeHandle) accessor needs the
//! target. This is what lets a field name a type declared further down the
//! definition, or its own enclosing type.

use std::fmt;

use crate::definition::TypeRefDefinition;
use crate::error::{Result, SchemaError, Scope, TypeRefProblem};
use crate::types::TypeKind;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn list(of_type: TypeRef) -> Self {
        TypeRef::List(Box::new(of_type))
    }

    /// Fails if `of_type` is itself NonNull
    pub fn non_null(of_type: TypeRef) -> std::result::Result<Self, TypeRefProblem> {
        if matches!(of_type, TypeRef::NonNull(_)) {
            return Err(TypeRefProblem::NestedNonNull);
        }
        Ok(TypeRef::NonNull(Box::new(of_type)))
    }

    /// Build a reference from its definition
    ///
    /// Wrappers are built eagerly and recursively; NON_NULL of NON_NULL is
    /// rejected wherever it occurs.
    pub(crate) fn build(def: &TypeRefDefinition, scope: &Scope) -> Result<Self> {
        match def.kind {
            Some(kind @ (TypeKind::List | TypeKind::NonNull)) => {
                let inner = def.of_type.as_deref().ok_or_else(|| SchemaError::MissingRequiredField {
                    scope: scope.clone(),
                    field: "ofType",
                })?;
                let inner = TypeRef::build(inner, scope)?;
                if kind == TypeKind::List {
                    return Ok(TypeRef::list(inner));
                }
                TypeRef::non_null(inner).map_err(|problem| SchemaError::InvalidTypeRef {
                    scope: scope.clone(),
                    problem,
                })
            }
            _ => match def.name.as_deref() {
                Some(name) if !name.is_empty() => Ok(TypeRef::Named(name.to_string())),
                _ => Err(SchemaError::InvalidTypeRef {
                    scope: scope.clone(),
                    problem: TypeRefProblem::EmptyName,
                }),
            },
        }
    }

    /// The referenced name, for named references only
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeRef::Named(name) => Some(name),
            _ => None,
        }
    }

    /// Name of the innermost named reference
    pub fn named_type(&self) -> &str {
        let mut current = self;
        loop {
            match current {
                TypeRef::Named(name) => return name,
                TypeRef::List(inner) | TypeRef::NonNull(inner) => current = inner,
            }
        }
    }

    pub fn of_type(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::List(inner) | TypeRef::NonNull(inner) => Some(inner),
            TypeRef::Named(_) => None,
        }
    }

    pub fn wrapper_kind(&self) -> Option<TypeKind> {
        match self {
            TypeRef::List(_) => Some(TypeKind::List),
            TypeRef::NonNull(_) => Some(TypeKind::NonNull),
            TypeRef::Named(_) => None,
        }
    }

    pub fn is_wrapper(&self) -> bool {
        !matches!(self, TypeRef::Named(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::List(inner) => write!(f, "[{}]", inner),
            TypeRef::NonNull(inner) => write!(f, "{}!", inner),
        }
    }
}
