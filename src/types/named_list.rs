//! Ordered, name-unique collections

use std::collections::HashMap;

/// Anything addressable by a unique name within its scope
pub trait Named {
    fn name(&self) -> &str;
}

/// Items in declaration order plus a name index
///
/// Insertion rejects a name that is already present, so every list built
/// through [`NamedList::try_insert`] is unique by name.
#[derive(Debug, Clone)]
pub struct NamedList<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for NamedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Named> NamedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Append `item`, handing it back if its name is already taken
    pub(crate) fn try_insert(&mut self, item: T) -> Result<usize, T> {
        if self.index.contains_key(item.name()) {
            return Err(item);
        }
        let position = self.items.len();
        self.index.insert(item.name().to_string(), position);
        self.items.push(item);
        Ok(position)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&i| &self.items[i])
    }

    /// Declaration position of `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> std::ops::Index<usize> for NamedList<T> {
    type Output = T;

    fn index(&self, position: usize) -> &T {
        &self.items[position]
    }
}

impl<'a, T: Named> IntoIterator for &'a NamedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
