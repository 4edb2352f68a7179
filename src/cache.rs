// src/cache.rs
//! Tiered cache.
//!
//! Lookup order per key, cheapest first:
//! 1. **Deserialized**: in-process `Rc<Record>`.
//! 2. **Parsed**: durable record store.
//! 3. **Raw**: durable raw-content store, re-parsed on hit.
//! 4. **Fetched**: fresh retrieval through the gateway.
//!
//! Every tier skipped on the way down is written on the way back up, except
//! that blank raw content and empty records are never persisted. Raw content
//! is persisted as soon as it is fetched, so a parse failure never costs a
//! second fetch. Records derived locally (no URLs) live in memory only.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::core::net::RetrievalGateway;
use crate::error::Result;
use crate::key::DomainKey;
use crate::store::{KeyValueStore, RawContent, RawPage, Record};

/// How one key's record is obtained.
pub trait Source {
    /// URLs to fetch, in order. Empty means the record is derived locally.
    fn locate(&self) -> Result<Vec<String>>;

    /// Build the record from fetched pages (empty slice for derived records).
    fn parse(&self, pages: &[RawPage]) -> Result<Record>;
}

/// Where an access was served from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Deserialized,
    Parsed,
    Raw,
    Fetched,
    Derived,
}

pub struct TieredCache {
    memory: HashMap<String, Rc<Record>>,
    parsed: Box<dyn KeyValueStore<Record>>,
    raw: Box<dyn KeyValueStore<RawContent>>,
    gateway: RetrievalGateway,
}

impl TieredCache {
    pub fn new(
        parsed: Box<dyn KeyValueStore<Record>>,
        raw: Box<dyn KeyValueStore<RawContent>>,
        gateway: RetrievalGateway,
    ) -> Self {
        Self { memory: HashMap::new(), parsed, raw, gateway }
    }

    pub fn access(&mut self, key: &DomainKey, source: &dyn Source) -> Result<Rc<Record>> {
        self.access_traced(key, source).map(|(record, _)| record)
    }

    /// Like [`access`](Self::access), also reporting the tier that served it.
    pub fn access_traced(&mut self, key: &DomainKey, source: &dyn Source) -> Result<(Rc<Record>, Tier)> {
        let k = key.serialize();

        if let Some(record) = self.memory.get(&k) {
            return Ok((record.clone(), Tier::Deserialized));
        }

        if self.parsed.exists(&k) {
            let record = self.parsed.read(&k)?;
            debug!(key = %k, "parsed tier hit");
            return Ok((self.remember(k, record), Tier::Parsed));
        }

        if self.raw.exists(&k) {
            let raw = self.raw.read(&k)?;
            debug!(key = %k, "raw tier hit");
            let record = source.parse(&raw.pages)?;
            self.persist_parsed(&k, &record)?;
            return Ok((self.remember(k, record), Tier::Raw));
        }

        let urls = source.locate()?;
        if urls.is_empty() {
            let record = source.parse(&[])?;
            return Ok((self.remember(k, record), Tier::Derived));
        }

        let raw = RawContent {
            pages: urls
                .into_iter()
                .map(|url| {
                    let body = self.gateway.fetch(&url);
                    RawPage { url, body }
                })
                .collect(),
        };
        debug!(key = %k, pages = raw.pages.len(), blank = raw.is_blank(), "fetched");
        if !raw.is_blank() {
            self.raw.write(&k, &raw)?;
        }
        let record = source.parse(&raw.pages)?;
        self.persist_parsed(&k, &record)?;
        Ok((self.remember(k, record), Tier::Fetched))
    }

    /// Whether `key` is present in `tier`. `Fetched`/`Derived` are never "present".
    pub fn contains(&self, key: &DomainKey, tier: Tier) -> bool {
        let k = key.serialize();
        match tier {
            Tier::Deserialized => self.memory.contains_key(&k),
            Tier::Parsed => self.parsed.exists(&k),
            Tier::Raw => self.raw.exists(&k),
            Tier::Fetched | Tier::Derived => false,
        }
    }

    /// Put raw content in place as if it had been fetched earlier.
    pub fn seed_raw(&mut self, key: &DomainKey, raw: &RawContent) -> Result<()> {
        self.raw.write(&key.serialize(), raw)
    }

    pub fn fetch_count(&self) -> usize {
        self.gateway.fetch_count()
    }

    /// Release the transport session. Call once the batch is done.
    pub fn release(&mut self) {
        self.gateway.release();
    }

    fn persist_parsed(&mut self, k: &str, record: &Record) -> Result<()> {
        if !record.is_empty() {
            self.parsed.write(k, record)?;
        }
        Ok(())
    }

    fn remember(&mut self, k: String, record: Record) -> Rc<Record> {
        self.memory.entry(k).or_insert_with(|| Rc::new(record)).clone()
    }
}
