//! Tag tables: a fixed set of tag -> factory entries, with numeric ids
//! assigned by a loaded record.
//!
//! Both sides of a connection build the same static table; the record only
//! carries `tag -> id`, so ids stay compact on the wire while unknown tags
//! are rejected when the record is loaded rather than on first use.

use rustc_hash::FxHashMap;

use crate::error::{DataStoreError, DataStoreResult};
use crate::store::DataVisitor;

pub type Factory<T> = fn() -> T;

pub struct TagRegistry<T> {
    factories: FxHashMap<&'static str, Factory<T>>,
    ids: FxHashMap<&'static str, u32>,
    tags: FxHashMap<u32, &'static str>,
    /// Assignments of the record being visited; committed by `end`.
    staged: Assignments,
}

#[derive(Default)]
struct Assignments {
    ids: FxHashMap<&'static str, u32>,
    tags: FxHashMap<u32, &'static str>,
}

impl<T> TagRegistry<T> {
    pub fn new(table: &[(&'static str, Factory<T>)]) -> DataStoreResult<Self> {
        let mut factories = FxHashMap::default();
        for &(tag, factory) in table {
            if factories.insert(tag, factory).is_some() {
                return Err(DataStoreError::DuplicateTag {
                    tag: tag.to_string(),
                });
            }
        }
        Ok(TagRegistry {
            factories,
            ids: FxHashMap::default(),
            tags: FxHashMap::default(),
            staged: Assignments::default(),
        })
    }

    pub fn id_of(&self, tag: &str) -> DataStoreResult<u32> {
        self.ids
            .get(tag)
            .copied()
            .ok_or_else(|| DataStoreError::UnassignedTag(tag.to_string()))
    }

    pub fn tag_of(&self, id: u32) -> Option<&'static str> {
        self.tags.get(&id).copied()
    }

    /// Instantiate the entry the active record assigned `id` to.
    pub fn create(&self, id: u32) -> DataStoreResult<T> {
        let tag = self.tag_of(id).ok_or(DataStoreError::UnknownId(id))?;
        let factory = self
            .factories
            .get(tag)
            .ok_or_else(|| DataStoreError::UnknownTag(tag.to_string()))?;
        Ok(factory())
    }

    /// Number of ids assigned by the last record.
    pub fn assigned(&self) -> usize {
        self.ids.len()
    }
}

impl<T> DataVisitor<String, u32> for TagRegistry<T> {
    fn begin(&mut self, size: usize) -> DataStoreResult<()> {
        self.staged = Assignments::default();
        self.staged.ids.reserve(size.min(self.factories.len()));
        Ok(())
    }

    fn entry(&mut self, key: &String, value: &u32) -> DataStoreResult<()> {
        let Some((&tag, _)) = self.factories.get_key_value(key.as_str()) else {
            return Err(DataStoreError::UnknownTag(key.clone()));
        };
        let staged = &mut self.staged;
        if let Some(&first) = staged.tags.get(value) {
            if first != tag {
                return Err(DataStoreError::DuplicateId {
                    id: *value,
                    first: first.to_string(),
                    second: tag.to_string(),
                });
            }
        }
        if let Some(previous) = staged.ids.insert(tag, *value) {
            staged.tags.remove(&previous);
        }
        staged.tags.insert(*value, tag);
        Ok(())
    }

    /// Only a fully accepted record replaces the live assignments.
    fn end(&mut self) -> DataStoreResult<()> {
        let staged = std::mem::take(&mut self.staged);
        self.ids = staged.ids;
        self.tags = staged.tags;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
