// src/key.rs
//! Identity key: `(domain, time, kind, name)`.
//!
//! The serialized form is the only identity used by the memo registry and
//! every cache tier, so components may not contain the separator.

use std::fmt;

use crate::config::consts::KEY_SEPARATOR;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainKey {
    domain: String,
    time: String,
    kind: String,
    name: String,
}

impl DomainKey {
    pub fn new(domain: &str, time: &str, kind: &str, name: &str) -> Result<Self> {
        for (label, part) in [("domain", domain), ("time", time), ("kind", kind), ("name", name)] {
            if part.is_empty() {
                return Err(Error::invalid(format!("empty {label} component in key")));
            }
            if part.contains(KEY_SEPARATOR) {
                return Err(Error::invalid(format!(
                    "{label} component '{part}' contains '{KEY_SEPARATOR}'"
                )));
            }
        }
        Ok(Self {
            domain: s!(domain),
            time: s!(time),
            kind: s!(kind),
            name: s!(name),
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn serialize(&self) -> String {
        let sep = KEY_SEPARATOR.to_string();
        join!(&self.domain, &sep, &self.time, &sep, &self.kind, &sep, &self.name)
    }

    pub fn parse(serialized: &str) -> Result<Self> {
        let parts: Vec<&str> = serialized.split(KEY_SEPARATOR).collect();
        match parts.as_slice() {
            [domain, time, kind, name] => Self::new(domain, time, kind, name),
            _ => Err(Error::invalid(format!("malformed key '{serialized}'"))),
        }
    }
}

impl fmt::Display for DomainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}
