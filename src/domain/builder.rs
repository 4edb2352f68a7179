// src/domain/builder.rs
//! Graph construction.
//!
//! [`GraphBuilder::build`] fabricates the node for `(kind, time, name)`,
//! building its children first. Containers ask the cache for the list of
//! child names per declared kind (primary kinds first) and recurse; leaves
//! ask the cache for their own record. Every node is memoized by its
//! serialized key, so a key always resolves to one instance.
//!
//! Failure isolation: a non-fatal error while building a leaf (or listing a
//! container's children) leaves that node empty with
//! [`DomainNode::failure`] set; siblings are unaffected. Fatal errors
//! ([`Error::is_fatal`]) abort the build.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use tracing::{info, warn};

use super::kind::NodeKind;
use super::node::DomainNode;
use super::sources::{
    ArchiveSource, Derived, EvaluationLinksSource, EvaluationSource, GradeSheetSource, InfoPageSource,
};
use crate::cache::{Source, TieredCache};
use crate::config::consts::KEY_SEPARATOR;
use crate::config::options::PipelineOptions;
use crate::core::net::{HttpTransport, RetrievalGateway};
use crate::error::{Error, Result};
use crate::key::DomainKey;
use crate::progress::{NullProgress, Progress};
use crate::specs::info_page::{COURSE_TYPE, RESPONSIBLE, TITLE};
use crate::store::{JsonDirStore, Record};
use crate::time::{Term, TimePeriod, TimeRegistry};
use crate::urls;

/// Kind component of the per-course evaluation link index.
pub const EVALUATION_LINKS: &str = "evaluation_links";

pub struct GraphBuilder {
    domain: String,
    times: TimeRegistry,
    cache: TieredCache,
    nodes: HashMap<String, Rc<DomainNode>>,
    progress: Box<dyn Progress>,
}

impl GraphBuilder {
    pub fn new(domain: &str, times: TimeRegistry, cache: TieredCache) -> Self {
        Self {
            domain: s!(domain),
            times,
            cache,
            nodes: HashMap::new(),
            progress: Box::new(NullProgress),
        }
    }

    /// Durable JSON stores under `opts.store_dir`, an HTTP transport, and a
    /// registry holding every period within the configured bounds.
    pub fn open(opts: &PipelineOptions) -> Result<Self> {
        let mut times = TimeRegistry::new(opts.oldest, opts.newest)?;
        times.generate_bounds()?;

        let transport = HttpTransport::new(opts.ready_marker.clone());
        let cache = TieredCache::new(
            Box::new(JsonDirStore::new(opts.parsed_dir())),
            Box::new(JsonDirStore::new(opts.raw_dir())),
            RetrievalGateway::new(Box::new(transport), opts.wait),
        );
        Ok(Self::new(&opts.domain, times, cache))
    }

    pub fn with_progress(mut self, progress: Box<dyn Progress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn cache(&self) -> &TieredCache {
        &self.cache
    }

    /// Already-built node for `key`, if any.
    pub fn node(&self, key: &DomainKey) -> Option<Rc<DomainNode>> {
        self.nodes.get(&key.serialize()).cloned()
    }

    /// Build the whole school over the registry's generated periods, then
    /// release the transport session.
    pub fn build_school(&mut self) -> Result<Rc<DomainNode>> {
        let timeless = self.times.generate_timeless();
        let name = self.domain.clone();
        self.build_batch(NodeKind::School, timeless, &name)
    }

    /// Build one academic year, then release the transport session.
    pub fn build_year(&mut self, year: u16) -> Result<Rc<DomainNode>> {
        let period = self.times.year_period(year)?;
        let name = period.name();
        self.build_batch(NodeKind::Year, period, &name)
    }

    fn build_batch(&mut self, kind: NodeKind, time: Rc<TimePeriod>, name: &str) -> Result<Rc<DomainNode>> {
        self.progress.begin(0);
        let result = self.build(kind, time, name);
        self.cache.release();
        self.progress.finish();
        if let Ok(node) = &result {
            info!(key = %node.key(), nodes = self.nodes.len(), fetches = self.cache.fetch_count(), "build complete");
        }
        result
    }

    /// Build (or return the memoized) node for `(kind, time, name)`.
    /// Does not release the transport session.
    pub fn build(&mut self, kind: NodeKind, time: Rc<TimePeriod>, name: &str) -> Result<Rc<DomainNode>> {
        let key = self.key(&time, kind.id(), name)?;
        if let Some(node) = self.nodes.get(&key.serialize()) {
            return Ok(node.clone());
        }

        let node = if kind.is_leaf() {
            self.build_leaf(key.clone(), kind, time, name)?
        } else {
            self.build_container(key.clone(), kind, time, name)?
        };

        let node = Rc::new(node);
        self.nodes.insert(key.serialize(), node.clone());
        Ok(node)
    }

    fn build_leaf(&mut self, key: DomainKey, kind: NodeKind, time: Rc<TimePeriod>, name: &str) -> Result<DomainNode> {
        let fetched = self
            .leaf_source(kind, &time, name)
            .and_then(|source| self.cache.access(&key, source.as_ref()));

        match fetched {
            Ok(record) => {
                self.progress.item_done(&key);
                Ok(DomainNode::leaf(key, kind, time, name, record))
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!(%key, error = %e, "leaf failed; left empty");
                self.progress.item_failed(&key, &e.to_string());
                let failure = Some(e.to_string());
                Ok(DomainNode::leaf(key, kind, time, name, Rc::new(Record::new())).with_failure(failure))
            }
        }
    }

    fn build_container(
        &mut self,
        key: DomainKey,
        kind: NodeKind,
        time: Rc<TimePeriod>,
        name: &str,
    ) -> Result<DomainNode> {
        let mut buckets = Vec::new();
        let mut failures = Vec::new();

        for child_kind in kind.declared() {
            let listing = match self.list_children(kind, &time, name, child_kind) {
                Ok(listing) => listing,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(%key, child = %child_kind, error = %e, "listing failed; bucket left empty");
                    failures.push(format!("{child_kind}: {e}"));
                    Vec::new()
                }
            };

            let mut children = Vec::with_capacity(listing.len());
            for (child_time, child_name) in listing {
                children.push(self.build(child_kind, child_time, &child_name)?);
            }
            buckets.push((child_kind, children));
        }

        if kind == NodeKind::Year {
            self.progress.log(&format!("{key}: {} courses", buckets.first().map_or(0, |(_, c)| c.len())));
        }
        let failure = (!failures.is_empty()).then(|| failures.join("; "));
        Ok(DomainNode::container(key, kind, time, name, buckets)?.with_failure(failure))
    }

    /// `(time, name)` of every child of `child` kind under the given parent.
    fn list_children(
        &mut self,
        parent: NodeKind,
        time: &Rc<TimePeriod>,
        name: &str,
        child: NodeKind,
    ) -> Result<Vec<(Rc<TimePeriod>, String)>> {
        // Singular attachments have an implicit one-name listing.
        if child.is_singular() {
            return Ok(vec![(time.clone(), s!(name))]);
        }

        let listing_key = self.key(time, &parent.listing_id(child), name)?;
        match (parent, child) {
            (NodeKind::School, NodeKind::Year) => {
                let mut rec = Record::new();
                for year in self.times.academic_years() {
                    // F00 opens an academic year that starts before MIN_YEAR.
                    let Ok(period) = self.times.year_period(year) else {
                        warn!(year, "academic year outside the supported range; skipped");
                        continue;
                    };
                    rec.insert(period.name(), period.academic_year()?);
                }
                let names = self.listing(&listing_key, &Derived(rec))?;
                names
                    .into_iter()
                    .map(|y| -> Result<_> { Ok((self.times.resolve(&y)?, y)) })
                    .collect()
            }
            (NodeKind::Year, NodeKind::Course) => {
                let source = ArchiveSource { period: time.clone() };
                let names = self.listing(&listing_key, &source)?;
                Ok(names
                    .into_iter()
                    .filter(|c| {
                        let valid = self.key(time, NodeKind::Course.id(), c).is_ok();
                        if !valid {
                            warn!(year = %time, course = %c, "unusable course id in archive; row skipped");
                        }
                        valid
                    })
                    .map(|c| (time.clone(), c))
                    .collect())
            }
            (NodeKind::Course, NodeKind::Term) => {
                let start = time.academic_start()?;
                let mut rec = Record::new();
                for (term, year) in [(Term::Autumn, start), (Term::Spring, start + 1)] {
                    // E59 has no following spring.
                    let Ok(sibling) = TimePeriod::term_year(term, year) else {
                        continue;
                    };
                    let term_name = sibling.name();
                    if let Ok(period) = self.times.resolve(&term_name) {
                        rec.insert(term_name, period.exam_period()?);
                    }
                }
                let names = self.listing(&listing_key, &Derived(rec))?;
                names
                    .into_iter()
                    .map(|t| -> Result<_> { Ok((self.times.resolve(&t)?, s!(name))) })
                    .collect()
            }
            (NodeKind::Year, NodeKind::Teacher) | (NodeKind::Year, NodeKind::StudyLine) => {
                let groups = self.group_courses(time, child);
                let rec: Record = groups.into_iter().map(|(g, ids)| (g, ids.join(","))).collect();
                let names = self.listing(&listing_key, &Derived(rec))?;
                Ok(names.into_iter().map(|n| (time.clone(), n)).collect())
            }
            (NodeKind::Teacher, NodeKind::Course) | (NodeKind::StudyLine, NodeKind::Course) => {
                let ids = self.group_courses(time, parent).remove(name).unwrap_or_default();
                let rec: Record = ids
                    .into_iter()
                    .map(|id| {
                        let title = self.course_title(time, &id);
                        (id, title)
                    })
                    .collect();
                let names = self.listing(&listing_key, &Derived(rec))?;
                Ok(names.into_iter().map(|c| (time.clone(), c)).collect())
            }
            _ => Err(Error::GraphInvariant(format!("no listing for {parent} → {child}"))),
        }
    }

    /// Names in a listing record, in key order.
    fn listing(&mut self, key: &DomainKey, source: &dyn Source) -> Result<Vec<String>> {
        Ok(self.cache.access(key, source)?.keys().cloned().collect())
    }

    fn leaf_source(&mut self, kind: NodeKind, time: &Rc<TimePeriod>, name: &str) -> Result<Box<dyn Source>> {
        let course = s!(name);
        match kind {
            NodeKind::GradeSheet => Ok(Box::new(GradeSheetSource { course, period: time.clone() })),
            NodeKind::InfoPage => Ok(Box::new(InfoPageSource { course, period: time.clone() })),
            NodeKind::Evaluation => {
                let links = self.evaluation_links(name)?;
                let url = links.get(&time.name()).map(|id| urls::evaluation(name, id));
                Ok(Box::new(EvaluationSource { url }))
            }
            other => Err(Error::GraphInvariant(format!("{other} is not a leaf kind"))),
        }
    }

    /// Term name → evaluation id for `course`. Timeless: one search page
    /// covers every term.
    fn evaluation_links(&mut self, course: &str) -> Result<Rc<Record>> {
        let timeless = self.times.generate_timeless();
        let key = self.key(&timeless, EVALUATION_LINKS, course)?;
        self.cache.access(&key, &EvaluationLinksSource { course: s!(course) })
    }

    /// Built courses of the year at `time`, grouped by teacher or study line
    /// (per their info pages). Group → course ids, both sorted.
    fn group_courses(&self, time: &Rc<TimePeriod>, by: NodeKind) -> BTreeMap<String, Vec<String>> {
        let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for course in self.courses_at(time) {
            let Some(info) = course.children(NodeKind::InfoPage).first().and_then(|n| n.record()) else {
                continue;
            };
            let labels: Vec<String> = match by {
                // Contact details follow the name in the same field.
                NodeKind::Teacher => info
                    .get(RESPONSIBLE)
                    .and_then(|r| split_list(r).into_iter().next())
                    .into_iter()
                    .collect(),
                NodeKind::StudyLine => info.get(COURSE_TYPE).map(|t| split_list(t)).unwrap_or_default(),
                _ => Vec::new(),
            };
            for label in labels {
                groups.entry(label).or_default().insert(s!(course.name()));
            }
        }
        groups.into_iter().map(|(g, ids)| (g, ids.into_iter().collect())).collect()
    }

    fn courses_at(&self, time: &Rc<TimePeriod>) -> Vec<Rc<DomainNode>> {
        let mut out: Vec<_> = self
            .nodes
            .values()
            .filter(|n| n.kind() == NodeKind::Course && n.time() == time)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.name().cmp(b.name()));
        out
    }

    fn course_title(&self, time: &Rc<TimePeriod>, id: &str) -> String {
        self.key(time, NodeKind::Course.id(), id)
            .ok()
            .and_then(|k| self.nodes.get(&k.serialize()))
            .and_then(|c| c.children(NodeKind::InfoPage).first().cloned())
            .and_then(|info| info.record().and_then(|r| r.get(TITLE).cloned()))
            .unwrap_or_else(|| s!(id))
    }

    fn key(&self, time: &TimePeriod, kind: &str, name: &str) -> Result<DomainKey> {
        DomainKey::new(&self.domain, &time.name(), kind, name)
    }
}

/// Split a comma-separated field into trimmed entries. The key separator is
/// replaced so scraped names always form valid keys.
fn split_list(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(|s| s.trim().replace(KEY_SEPARATOR, "/"))
        .filter(|s| !s.is_empty())
        .collect()
}
