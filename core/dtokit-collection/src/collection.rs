use std::collections::HashMap;
use std::sync::Arc;

use dtokit_model::value::checked_mapping;
use dtokit_model::{Dto, Error, Mapping, Result};
use dtokit_serializer::Serializer;
use serde_json::Value;
use tracing::debug;

const OWNER: &str = "IndexedCollection";

/// Canonical map key for an index value; keeps `"1"` and `1` apart.
fn canonical(key: &Value) -> String {
    key.to_string()
}

/// Human-readable form of an index value for error messages.
fn display_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn not_found(operation: &str, key: &Value) -> Error {
    Error::NotFound {
        owner: format!("{OWNER}.{operation}"),
        key: display_key(key),
    }
}

/// DTOs keyed by the value of one designated field.
///
/// Keys are unique and iteration follows insertion order; replacing an
/// entry keeps its position.
#[derive(Debug)]
pub struct IndexedCollection<T: Dto> {
    index: String,
    items: Vec<T>,
    positions: HashMap<String, usize>,
}

impl<T: Dto> IndexedCollection<T> {
    /// An empty collection keyed by the field named `index`.
    pub fn new(index: impl Into<String>) -> Result<Self> {
        let index = index.into();
        if index.is_empty() {
            return Err(Error::EmptyInput {
                owner: OWNER.to_string(),
                operation: "new",
                what: "index field name",
            });
        }
        Ok(Self {
            index,
            items: Vec::new(),
            positions: HashMap::new(),
        })
    }

    /// Builds a collection by adding each item in order; see [`Self::add`].
    pub fn from_items<I>(items: I, index: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut collection = Self::new(index)?;
        for item in items {
            collection.add(item)?;
        }
        Ok(collection)
    }

    pub fn index_field(&self) -> &str {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, key: impl Into<Value>) -> bool {
        self.positions.contains_key(&canonical(&key.into()))
    }

    pub fn get(&self, key: impl Into<Value>) -> Result<&T> {
        let key = key.into();
        self.positions
            .get(&canonical(&key))
            .map(|&pos| &self.items[pos])
            .ok_or_else(|| not_found("get", &key))
    }

    /// Inserts `item`, or merges it into the stored item with the same key.
    ///
    /// Fails with [`Error::UnknownField`] when the item has no index field.
    pub fn add(&mut self, item: T) -> Result<()> {
        self.update(item)
    }

    /// Merges `item` into the stored item with the same key.
    ///
    /// If the two are equal nothing happens. Otherwise every field left
    /// unset on `item` takes the stored value, and the filled-in `item`
    /// replaces the stored one in place. When no item is stored under the
    /// key, `item` is inserted as-is.
    pub fn update(&mut self, item: T) -> Result<()> {
        let key = self.key_of(&item)?;
        match self.positions.get(&canonical(&key)).copied() {
            Some(pos) => self.merge_at(pos, &key, item),
            None => {
                self.insert(&key, item);
                Ok(())
            }
        }
    }

    /// Removes the stored item sharing `item`'s key and returns it.
    pub fn remove(&mut self, item: &T) -> Result<T> {
        let key = self.key_of(item)?;
        self.take("remove", &key)
    }

    pub fn remove_key(&mut self, key: impl Into<Value>) -> Result<T> {
        self.take("remove", &key.into())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Normalized form of every item, in collection order.
    pub fn to_mappings(&self) -> Vec<Mapping> {
        self.items.iter().map(Dto::to_mapping).collect()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    fn key_of(&self, item: &T) -> Result<Value> {
        item.get(&self.index)
    }

    fn insert(&mut self, key: &Value, item: T) {
        debug!(index = %self.index, key = %key, "item inserted");
        self.positions.insert(canonical(key), self.items.len());
        self.items.push(item);
    }

    fn merge_at(&mut self, pos: usize, key: &Value, mut item: T) -> Result<()> {
        let current = &self.items[pos];
        if current.equals(&item) {
            debug!(index = %self.index, key = %key, "item unchanged");
            return Ok(());
        }
        let schema = Arc::clone(item.schema());
        let mut inherited = 0usize;
        for field in schema.iter() {
            if !field.read(&item).is_null() {
                continue;
            }
            let Some(previous) = current.schema().field(field.name()) else {
                continue;
            };
            let value = previous.read(current);
            if !value.is_null() {
                field.write(&mut item, value)?;
                inherited += 1;
            }
        }
        debug!(index = %self.index, key = %key, inherited, "item merged");
        self.items[pos] = item;
        Ok(())
    }

    fn take(&mut self, operation: &str, key: &Value) -> Result<T> {
        let pos = self
            .positions
            .remove(&canonical(key))
            .ok_or_else(|| not_found(operation, key))?;
        let item = self.items.remove(pos);
        for p in self.positions.values_mut() {
            if *p > pos {
                *p -= 1;
            }
        }
        debug!(index = %self.index, key = %key, "item removed");
        Ok(item)
    }
}

impl<T: Dto + Clone> IndexedCollection<T> {
    /// Applies a partial mapping to the stored item it names.
    ///
    /// `source` must carry the index field to locate the item; the other
    /// keys are written through [`Serializer::denormalize`] on a copy,
    /// which replaces the stored item only when every key was accepted.
    pub fn patch(&mut self, source: &Value) -> Result<&T> {
        let mapping = checked_mapping(OWNER, "patch", source)?;
        let key = mapping
            .get(&self.index)
            .cloned()
            .ok_or_else(|| Error::MissingKey {
                owner: OWNER.to_string(),
                field: self.index.clone(),
            })?;
        let pos = self
            .positions
            .get(&canonical(&key))
            .copied()
            .ok_or_else(|| not_found("patch", &key))?;

        let mut patched = self.items[pos].clone();
        Serializer::new(&mut patched).denormalize(source)?;
        debug!(index = %self.index, key = %key, fields = mapping.len(), "item patched");
        self.items[pos] = patched;
        Ok(&self.items[pos])
    }
}

impl<'a, T: Dto> IntoIterator for &'a IndexedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Dto> IntoIterator for IndexedCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
