//! Schema-bound views
//!
//! Types, fields and arguments are stored without any pointer to the types
//! they reference. [`TypeHandle`] and [`Bound`] pair a stored item with a
//! borrowed `&Schema`, and every accessor that needs another type looks its
//! name up in that schema at call time. A reference whose name is not
//! registered yields empty results instead of an error.

use std::fmt;
use std::ops::Deref;

use crate::registry::Schema;
use crate::types::{Directive, EnumValue, Field, InputValue, NamedType, TypeDef, TypeKind, TypeRef};

/// A type as seen through a schema
///
/// Either a declared type, or a type reference (named or wrapper) that is
/// resolved lazily.
#[derive(Clone, Copy)]
pub struct TypeHandle<'s> {
    schema: &'s Schema,
    node: Node<'s>,
}

#[derive(Clone, Copy)]
enum Node<'s> {
    Declared(&'s NamedType),
    Ref(&'s TypeRef),
}

impl<'s> TypeHandle<'s> {
    pub(crate) fn declared(schema: &'s Schema, ty: &'s NamedType) -> Self {
        Self {
            schema,
            node: Node::Declared(ty),
        }
    }

    pub(crate) fn reference(schema: &'s Schema, type_ref: &'s TypeRef) -> Self {
        Self {
            schema,
            node: Node::Ref(type_ref),
        }
    }

    /// The declared type behind this handle
    ///
    /// `None` for wrappers and for names that are not registered.
    pub fn target(&self) -> Option<&'s NamedType> {
        match self.node {
            Node::Declared(ty) => Some(ty),
            Node::Ref(TypeRef::Named(name)) => self.schema.lookup(name),
            Node::Ref(_) => None,
        }
    }

    /// The underlying reference, if this handle was reached through one
    pub fn type_ref(&self) -> Option<&'s TypeRef> {
        match self.node {
            Node::Ref(type_ref) => Some(type_ref),
            Node::Declared(_) => None,
        }
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// `None` for a named reference that does not resolve
    pub fn kind(&self) -> Option<TypeKind> {
        match self.node {
            Node::Ref(TypeRef::List(_)) => Some(TypeKind::List),
            Node::Ref(TypeRef::NonNull(_)) => Some(TypeKind::NonNull),
            _ => self.target().map(NamedType::kind),
        }
    }

    /// Whether the handle is a wrapper or names a registered type
    pub fn is_resolved(&self) -> bool {
        self.kind().is_some()
    }

    /// The type name; wrappers have none
    ///
    /// A dangling named reference still reports the name it was declared with.
    pub fn name(&self) -> Option<&'s str> {
        match self.node {
            Node::Declared(ty) => Some(ty.name()),
            Node::Ref(type_ref) => type_ref.name(),
        }
    }

    pub fn description(&self) -> Option<&'s str> {
        self.target().and_then(NamedType::description)
    }

    pub fn fields(&self) -> Vec<Bound<'s, Field>> {
        self.target()
            .map(|ty| self.bind_all(ty.fields()))
            .unwrap_or_default()
    }

    pub fn field(&self, name: &str) -> Option<Bound<'s, Field>> {
        let field = self.target()?.field(name)?;
        Some(Bound::new(self.schema, field))
    }

    pub fn interfaces(&self) -> Vec<TypeHandle<'s>> {
        self.target()
            .map(|ty| {
                ty.interfaces()
                    .iter()
                    .map(|iface| self.schema.resolve(iface))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Object types that can stand in for this abstract type
    ///
    /// For a union, its declared members. For an interface, the registered
    /// object types that list it, in their declaration order.
    pub fn possible_types(&self) -> Vec<TypeHandle<'s>> {
        let Some(ty) = self.target() else {
            return Vec::new();
        };
        match ty.def() {
            TypeDef::Union { possible_types } => possible_types
                .iter()
                .map(|member| self.schema.resolve(member))
                .collect(),
            TypeDef::Interface { .. } => self.schema.implementers(ty.name()),
            _ => Vec::new(),
        }
    }

    pub fn enum_values(&self) -> &'s [EnumValue] {
        self.target().map(NamedType::enum_values).unwrap_or_default()
    }

    pub fn enum_value(&self, name: &str) -> Option<&'s EnumValue> {
        self.target()?.enum_value(name)
    }

    pub fn input_fields(&self) -> Vec<Bound<'s, InputValue>> {
        self.target()
            .map(|ty| self.bind_all(ty.input_fields()))
            .unwrap_or_default()
    }

    pub fn input_field(&self, name: &str) -> Option<Bound<'s, InputValue>> {
        let input_field = self.target()?.input_field(name)?;
        Some(Bound::new(self.schema, input_field))
    }

    /// The wrapped type, for List and NonNull only
    pub fn of_type(&self) -> Option<TypeHandle<'s>> {
        match self.node {
            Node::Ref(type_ref) => type_ref.of_type().map(|inner| self.schema.resolve(inner)),
            Node::Declared(_) => None,
        }
    }

    /// Strip every List/NonNull wrapper
    pub fn innermost(&self) -> TypeHandle<'s> {
        let mut current = *self;
        while let Some(inner) = current.of_type() {
            current = inner;
        }
        current
    }

    fn bind_all<T>(&self, items: &'s [T]) -> Vec<Bound<'s, T>> {
        items.iter().map(|item| Bound::new(self.schema, item)).collect()
    }
}

impl fmt::Display for TypeHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node {
            Node::Declared(ty) => f.write_str(ty.name()),
            Node::Ref(type_ref) => write!(f, "{}", type_ref),
        }
    }
}

impl fmt::Debug for TypeHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeHandle")
            .field("type", &self.to_string())
            .field("kind", &self.kind())
            .finish()
    }
}

/// A stored item paired with the schema its references resolve against
pub struct Bound<'s, T> {
    schema: &'s Schema,
    item: &'s T,
}

impl<'s, T> Bound<'s, T> {
    pub(crate) fn new(schema: &'s Schema, item: &'s T) -> Self {
        Self { schema, item }
    }

    /// The plain item, with the schema's lifetime
    pub fn get(&self) -> &'s T {
        self.item
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }
}

impl<T> Clone for Bound<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Bound<'_, T> {}

impl<T> Deref for Bound<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.item
    }
}

impl<T: fmt::Debug> fmt::Debug for Bound<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.item, f)
    }
}

impl<'s> Bound<'s, Field> {
    /// The field's result type
    pub fn ty(&self) -> TypeHandle<'s> {
        self.schema.resolve(self.item.type_ref())
    }

    pub fn args(&self) -> Vec<Bound<'s, InputValue>> {
        bind_inputs(self.schema, self.item.args().as_slice())
    }

    pub fn arg(&self, name: &str) -> Option<Bound<'s, InputValue>> {
        self.item.args().get(name).map(|arg| Bound::new(self.schema, arg))
    }
}

impl<'s> Bound<'s, InputValue> {
    pub fn ty(&self) -> TypeHandle<'s> {
        self.schema.resolve(self.item.type_ref())
    }
}

impl<'s> Bound<'s, Directive> {
    pub fn args(&self) -> Vec<Bound<'s, InputValue>> {
        bind_inputs(self.schema, self.item.args().as_slice())
    }

    pub fn arg(&self, name: &str) -> Option<Bound<'s, InputValue>> {
        self.item.args().get(name).map(|arg| Bound::new(self.schema, arg))
    }
}

fn bind_inputs<'s>(schema: &'s Schema, inputs: &'s [InputValue]) -> Vec<Bound<'s, InputValue>> {
    inputs.iter().map(|input| Bound::new(schema, input)).collect()
}
