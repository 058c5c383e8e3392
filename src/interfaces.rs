//! Interface implementer index

use std::collections::HashMap;

use crate::types::{NamedList, NamedType, TypeDef};

/// Reverse map from interface name to the object types that list it
///
/// Positions refer to the schema's type list, so every bucket is in the
/// objects' declaration order. Buckets are keyed by the referenced name
/// whether or not a type with that name exists.
#[derive(Debug, Clone, Default)]
pub(crate) struct InterfaceIndex {
    implementers: HashMap<String, Vec<usize>>,
}

impl InterfaceIndex {
    pub(crate) fn build(types: &NamedList<NamedType>) -> Self {
        let mut implementers: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, ty) in types.iter().enumerate() {
            if let TypeDef::Object { interfaces, .. } = ty.def() {
                for iface in interfaces {
                    implementers
                        .entry(iface.named_type().to_string())
                        .or_default()
                        .push(position);
                }
            }
        }
        Self { implementers }
    }

    /// Positions of the object types implementing `interface`
    pub(crate) fn implementers(&self, interface: &str) -> &[usize] {
        self.implementers
            .get(interface)
            .map(|positions| positions.as_slice())
            .unwrap_or_default()
    }

    /// Referenced interface names, in no particular order
    pub(crate) fn interface_names(&self) -> impl Iterator<Item = &str> {
        self.implementers.keys().map(|name| name.as_str())
    }
}
