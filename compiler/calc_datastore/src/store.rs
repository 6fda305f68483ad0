//! Immutable stores and their activation.

use std::cell::RefCell;
use std::hash::Hash;
use std::io::{Read, Write};
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::codec::{StreamReadable, StreamWritable};
use crate::error::DataStoreResult;
use crate::vli::{read_vli, write_len};

/// Upper bound on entries preallocated before any have been decoded.
const PREALLOCATE_LIMIT: usize = 1024;

/// Receives the contents of an activated store.
pub trait DataVisitor<K, V> {
    fn begin(&mut self, size: usize) -> DataStoreResult<()> {
        let _ = size;
        Ok(())
    }

    fn entry(&mut self, key: &K, value: &V) -> DataStoreResult<()>;

    fn end(&mut self) -> DataStoreResult<()> {
        Ok(())
    }
}

pub type SharedVisitor<K, V> = Rc<RefCell<dyn DataVisitor<K, V>>>;

/// Key/value entries in first-insertion order. A repeated key keeps its
/// position and takes the later value.
#[derive(Clone, Debug)]
pub struct DataStore<K, V> {
    entries: Vec<(K, V)>,
    index: FxHashMap<K, usize>,
}

impl<K: Clone + Eq + Hash, V> DataStore<K, V> {
    pub fn new() -> Self {
        DataStore {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        let mut store = DataStore::new();
        for (key, value) in entries {
            store.insert(key, value);
        }
        store
    }

    fn insert(&mut self, key: K, value: V) {
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].1 = value;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    /// Replay every entry into `visitor`, stopping at the first error.
    pub fn visit(&self, visitor: &mut (impl DataVisitor<K, V> + ?Sized)) -> DataStoreResult<()> {
        visitor.begin(self.entries.len())?;
        for (key, value) in &self.entries {
            visitor.entry(key, value)?;
        }
        visitor.end()
    }
}

impl<K: Clone + Eq + Hash, V> Default for DataStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Named slot holding the active store and the visitors notified when it
/// changes.
pub struct DataStoreWrapper<K, V> {
    id: String,
    visitors: Vec<SharedVisitor<K, V>>,
    active: Option<Rc<DataStore<K, V>>>,
    generation: u32,
}

impl<K: Clone + Eq + Hash, V> DataStoreWrapper<K, V> {
    pub fn new(id: impl Into<String>) -> Self {
        DataStoreWrapper {
            id: id.into(),
            visitors: Vec::new(),
            active: None,
            generation: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn add_visitor(&mut self, visitor: SharedVisitor<K, V>) {
        self.visitors.push(visitor);
    }

    pub fn active(&self) -> Option<&Rc<DataStore<K, V>>> {
        self.active.as_ref()
    }

    /// Number of stores activated so far.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Replay `store` into every visitor, then make it the active store.
    /// The previous store stays active if a visitor rejects the new one;
    /// a rejecting visitor must keep its own previous state too.
    pub fn activate_data(&mut self, store: DataStore<K, V>) -> DataStoreResult<()> {
        for visitor in &self.visitors {
            store.visit(&mut *visitor.borrow_mut())?;
        }
        self.generation += 1;
        tracing::debug!(
            store = %self.id,
            entries = store.len(),
            generation = self.generation,
            "activated data store"
        );
        self.active = Some(Rc::new(store));
        Ok(())
    }

    /// Reader that decodes one record into this wrapper.
    pub fn reader<'w>(
        &'w mut self,
        key_reader: &'w dyn StreamReadable<K>,
        value_reader: &'w dyn StreamReadable<V>,
    ) -> DataStoreReader<'w, K, V> {
        DataStoreReader {
            wrapper: self,
            key_reader,
            value_reader,
        }
    }
}

pub struct DataStoreReader<'w, K, V> {
    wrapper: &'w mut DataStoreWrapper<K, V>,
    key_reader: &'w dyn StreamReadable<K>,
    value_reader: &'w dyn StreamReadable<V>,
}

impl<K: Clone + Eq + Hash, V> DataStoreReader<'_, K, V> {
    /// Decode a record and activate it. Nothing is activated if decoding
    /// fails part way.
    pub fn read(&mut self, input: &mut dyn Read) -> DataStoreResult<()> {
        let size = read_vli(input)?;
        tracing::trace!(store = %self.wrapper.id, size, "reading data store");

        let capacity = usize::try_from(size).map_or(PREALLOCATE_LIMIT, |n| n.min(PREALLOCATE_LIMIT));
        let mut entries = Vec::with_capacity(capacity);
        for _ in 0..size {
            let key = self.key_reader.read_from_stream(input)?;
            let value = self.value_reader.read_from_stream(input)?;
            entries.push((key, value));
        }
        self.wrapper.activate_data(DataStore::from_entries(entries))
    }
}

pub struct DataStoreWriter<'c, K, V> {
    key_writer: &'c dyn StreamWritable<K>,
    value_writer: &'c dyn StreamWritable<V>,
}

impl<'c, K: Clone + Eq + Hash, V> DataStoreWriter<'c, K, V> {
    pub fn new(
        key_writer: &'c dyn StreamWritable<K>,
        value_writer: &'c dyn StreamWritable<V>,
    ) -> Self {
        DataStoreWriter {
            key_writer,
            value_writer,
        }
    }

    pub fn write(&self, store: &DataStore<K, V>, output: &mut dyn Write) -> DataStoreResult<()> {
        write_len(output, store.len())?;
        for (key, value) in store.iter() {
            self.key_writer.write_to_stream(key, output)?;
            self.value_writer.write_to_stream(value, output)?;
        }
        Ok(())
    }
}
