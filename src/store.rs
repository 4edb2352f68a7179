// src/store.rs
//! Durable key/value stores backing the parsed and raw cache tiers.
//!
//! Keys are serialized [`DomainKey`](crate::key::DomainKey)s. Values are
//! written once and treated as immutable; refreshing means deleting files.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::core::sanitize::file_stem;
use crate::error::{Error, Result};

/// Flat string-keyed record produced by every parser and derived listing.
pub type Record = BTreeMap<String, String>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPage {
    pub url: String,
    pub body: String,
}

/// Everything fetched for one key, in URL order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContent {
    pub pages: Vec<RawPage>,
}

impl RawContent {
    /// True if no page returned any content.
    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|p| p.body.is_empty())
    }
}

pub trait KeyValueStore<V> {
    fn exists(&self, key: &str) -> bool;
    /// `NotFound` if absent.
    fn read(&self, key: &str) -> Result<V>;
    fn write(&mut self, key: &str, value: &V) -> Result<()>;
}

/// In-process store, for tests and throwaway runs.
#[derive(Debug)]
pub struct MemoryStore<V> {
    entries: HashMap<String, V>,
    writes: usize,
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self { entries: HashMap::new(), writes: 0 }
    }
}

impl<V> MemoryStore<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl<V: Clone> KeyValueStore<V> for MemoryStore<V> {
    fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn read(&self, key: &str) -> Result<V> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| Error::not_found(key))
    }

    fn write(&mut self, key: &str, value: &V) -> Result<()> {
        self.writes += 1;
        self.entries.insert(s!(key), value.clone());
        Ok(())
    }
}

/// One pretty-printed JSON file per key under `dir`.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(join!(&file_stem(key), ".json"))
    }
}

impl<V: Serialize + DeserializeOwned> KeyValueStore<V> for JsonDirStore {
    fn exists(&self, key: &str) -> bool {
        self.path_for(key).is_file()
    }

    fn read(&self, key: &str) -> Result<V> {
        let path = self.path_for(key);
        if !path.is_file() {
            return Err(Error::not_found(key));
        }
        let text = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn write(&mut self, key: &str, value: &V) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let json = serde_json::to_string_pretty(value)?;
        // atomic replace
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        debug!(key, path = %path.display(), "stored");
        Ok(())
    }
}
