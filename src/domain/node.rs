// src/domain/node.rs
use std::rc::Rc;

use super::kind::NodeKind;
use crate::error::{Error, Result};
use crate::key::DomainKey;
use crate::store::Record;
use crate::time::TimePeriod;

#[derive(Debug)]
pub enum Body {
    /// Child buckets in declaration order (primary first).
    Container(Vec<(NodeKind, Vec<Rc<DomainNode>>)>),
    Leaf(Rc<Record>),
}

#[derive(Debug)]
pub struct DomainNode {
    key: DomainKey,
    kind: NodeKind,
    time: Rc<TimePeriod>,
    name: String,
    body: Body,
    failure: Option<String>,
}

impl DomainNode {
    pub fn leaf(key: DomainKey, kind: NodeKind, time: Rc<TimePeriod>, name: &str, record: Rc<Record>) -> Self {
        Self { key, kind, time, name: s!(name), body: Body::Leaf(record), failure: None }
    }

    /// Fails if a bucket holds a kind `kind` does not declare, or a child
    /// whose kind differs from its bucket.
    pub fn container(
        key: DomainKey,
        kind: NodeKind,
        time: Rc<TimePeriod>,
        name: &str,
        buckets: Vec<(NodeKind, Vec<Rc<DomainNode>>)>,
    ) -> Result<Self> {
        for (child_kind, children) in &buckets {
            if !kind.declares(*child_kind) {
                return Err(Error::GraphInvariant(format!("{kind} does not declare {child_kind}")));
            }
            if let Some(stray) = children.iter().find(|c| c.kind != *child_kind) {
                return Err(Error::GraphInvariant(format!(
                    "{} filed under {child_kind} in {key}",
                    stray.key
                )));
            }
        }
        Ok(Self { key, kind, time, name: s!(name), body: Body::Container(buckets), failure: None })
    }

    pub fn with_failure(mut self, failure: Option<String>) -> Self {
        self.failure = failure;
        self
    }

    pub fn key(&self) -> &DomainKey {
        &self.key
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn time(&self) -> &Rc<TimePeriod> {
        &self.time
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Message of the isolated error that left this node empty, if any.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.body, Body::Leaf(_))
    }

    pub fn record(&self) -> Option<&Record> {
        match &self.body {
            Body::Leaf(r) => Some(r),
            Body::Container(_) => None,
        }
    }

    /// True if a bucket for `kind` was built (even if empty).
    pub fn has_bucket(&self, kind: NodeKind) -> bool {
        match &self.body {
            Body::Container(b) => b.iter().any(|(k, _)| *k == kind),
            Body::Leaf(_) => false,
        }
    }

    pub fn children(&self, kind: NodeKind) -> &[Rc<DomainNode>] {
        match &self.body {
            Body::Container(b) => b
                .iter()
                .find(|(k, _)| *k == kind)
                .map(|(_, c)| c.as_slice())
                .unwrap_or(&[]),
            Body::Leaf(_) => &[],
        }
    }

    pub fn child(&self, kind: NodeKind, name: &str) -> Result<&Rc<DomainNode>> {
        self.children(kind)
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::not_found(format!("{kind} '{name}' under {}", self.key)))
    }

    /// Child of `kind` whose period has canonical name `time`.
    pub fn child_at(&self, kind: NodeKind, time: &str) -> Result<&Rc<DomainNode>> {
        self.children(kind)
            .iter()
            .find(|c| c.time.name() == time)
            .ok_or_else(|| Error::not_found(format!("{kind} at {time} under {}", self.key)))
    }
}
