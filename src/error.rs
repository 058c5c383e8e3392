//! Error types for schema construction

use std::fmt;

use thiserror::Error;

use crate::types::TypeKind;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema construction errors
///
/// Construction is fail-fast: the first problem found is returned and no
/// partially built schema is ever exposed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{scope}: missing {field}")]
    MissingRequiredField { scope: Scope, field: &'static str },

    #[error("{scope}: {declaration} \"{name}\" declared more than once")]
    DuplicateDeclaration {
        scope: Scope,
        declaration: Declaration,
        name: String,
    },

    #[error("{root} type {problem}")]
    InvalidRootType {
        root: RootOperation,
        problem: RootTypeProblem,
    },

    #[error("in UNION type \"{union}\": {problem}")]
    InvalidUnionMember {
        union: String,
        problem: UnionMemberProblem,
    },

    #[error("{scope}: {problem}")]
    InvalidTypeRef { scope: Scope, problem: TypeRefProblem },

    #[error("type \"{name}\": kind {kind} can only be used inside a type reference")]
    UnsupportedTopLevelKind { name: String, kind: TypeKind },

    #[error("{scope}: [{code}] {message}")]
    StrictValidation {
        scope: Scope,
        code: &'static str,
        message: String,
    },
}

/// The kind of declaration a duplicate name was found for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Declaration {
    Type,
    Directive,
    Field,
    Argument,
    EnumValue,
    InputField,
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Type => "type",
            Self::Directive => "directive",
            Self::Field => "field",
            Self::Argument => "argument",
            Self::EnumValue => "enum value",
            Self::InputField => "input field",
        };
        f.write_str(label)
    }
}

/// One of the three schema entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootOperation {
    Query,
    Mutation,
    Subscription,
}

impl fmt::Display for RootOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Mutation => write!(f, "mutation"),
            Self::Subscription => write!(f, "subscription"),
        }
    }
}

/// Why a root type could not be bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootTypeProblem {
    /// Only reachable for the query root, which is mandatory
    NotSpecified,
    Missing { name: String },
    /// `name` is `None` when the root reference is a List/NonNull wrapper
    WrongKind { name: Option<String>, kind: TypeKind },
}

impl fmt::Display for RootTypeProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSpecified => write!(f, "is not specified"),
            Self::Missing { name } => write!(f, "references non-existing type \"{}\"", name),
            Self::WrongKind { name: Some(name), kind } => write!(
                f,
                "must reference an OBJECT type, found {} type \"{}\"",
                kind, name
            ),
            Self::WrongKind { name: None, kind } => {
                write!(f, "must reference an OBJECT type, found {} type", kind)
            }
        }
    }
}

/// Why a union member was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnionMemberProblem {
    Wrapper { kind: TypeKind },
    Missing { name: String },
    WrongKind { name: String, kind: TypeKind },
}

impl fmt::Display for UnionMemberProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wrapper { kind } => write!(
                f,
                "all possible types must reference OBJECT types, found {} type",
                kind
            ),
            Self::Missing { name } => {
                write!(f, "possible type references non-existing type \"{}\"", name)
            }
            Self::WrongKind { name, kind } => write!(
                f,
                "all possible types must reference OBJECT types, found {} type \"{}\"",
                kind, name
            ),
        }
    }
}

/// Structural problems in a type reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRefProblem {
    NestedNonNull,
    EmptyName,
}

impl fmt::Display for TypeRefProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NestedNonNull => write!(f, "NON_NULL type can not wrap another NON_NULL type"),
            Self::EmptyName => write!(f, "type reference is missing a name"),
        }
    }
}

// =============================================================================
// Scope
// =============================================================================

/// A segment of the path to the declaration an error is about
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeSegment {
    Type(String),
    Directive(String),
    Field(String),
    Argument(String),
    InputField(String),
    EnumValue(String),
    Interface(usize),
    PossibleType(usize),
    Root(RootOperation),
}

impl fmt::Display for ScopeSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => write!(f, "type \"{}\"", name),
            Self::Directive(name) => write!(f, "directive \"{}\"", name),
            Self::Field(name) => write!(f, "field \"{}\"", name),
            Self::Argument(name) => write!(f, "argument \"{}\"", name),
            Self::InputField(name) => write!(f, "input field \"{}\"", name),
            Self::EnumValue(name) => write!(f, "enum value \"{}\"", name),
            Self::Interface(i) => write!(f, "interface #{}", i),
            Self::PossibleType(i) => write!(f, "possible type #{}", i),
            Self::Root(op) => write!(f, "{} type", op),
        }
    }
}

/// Path from the schema root to a declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Scope(Vec<ScopeSegment>);

impl Scope {
    /// The schema itself
    pub fn schema() -> Self {
        Self(Vec::new())
    }

    /// A new scope one level below this one
    pub fn child(&self, segment: ScopeSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }

    pub fn segments(&self) -> &[ScopeSegment] {
        &self.0
    }

    pub fn is_schema(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ScopeSegment> for Scope {
    fn from(segment: ScopeSegment) -> Self {
        Self(vec![segment])
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("schema");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
