// tests/common/mod.rs
//
// Scripted transport and a tiny two-course site for integration tests.
//
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use course_scrape::cache::TieredCache;
use course_scrape::core::net::{RetrievalGateway, Transport};
use course_scrape::domain::GraphBuilder;
use course_scrape::error::FetchError;
use course_scrape::store::{JsonDirStore, KeyValueStore, MemoryStore, RawContent, Record};
use course_scrape::time::{Term, TimeRegistry};

/// Body served for any URL not in the script: a real page with no data.
pub const BLANK_PAGE: &str = "<html><body><p>Ingen data</p></body></html>";

#[derive(Clone, Default)]
pub struct Counters {
    pub opens: Rc<Cell<usize>>,
    pub closes: Rc<Cell<usize>>,
    pub fetched: Rc<RefCell<Vec<String>>>,
}

impl Counters {
    pub fn fetches(&self) -> usize {
        self.fetched.borrow().len()
    }
}

pub struct ScriptedTransport {
    pages: HashMap<String, String>,
    timeouts: Vec<String>,
    counters: Counters,
}

impl ScriptedTransport {
    pub fn new(pages: HashMap<String, String>, counters: Counters) -> Self {
        Self { pages, timeouts: Vec::new(), counters }
    }

    pub fn timing_out(mut self, url: &str) -> Self {
        self.timeouts.push(url.to_string());
        self
    }
}

impl Transport for ScriptedTransport {
    fn open(&mut self) -> Result<(), FetchError> {
        self.counters.opens.set(self.counters.opens.get() + 1);
        Ok(())
    }

    fn fetch_page(&mut self, url: &str, wait: Duration) -> Result<String, FetchError> {
        self.counters.fetched.borrow_mut().push(url.to_string());
        if self.timeouts.iter().any(|t| t == url) {
            return Err(FetchError::Timeout(wait));
        }
        Ok(self.pages.get(url).cloned().unwrap_or_else(|| BLANK_PAGE.to_string()))
    }

    fn close(&mut self) {
        self.counters.closes.set(self.counters.closes.get() + 1);
    }
}

pub fn gateway(transport: ScriptedTransport) -> RetrievalGateway {
    RetrievalGateway::new(Box::new(transport), Duration::from_secs(1))
}

pub fn memory_cache(transport: ScriptedTransport) -> TieredCache {
    TieredCache::new(
        Box::new(MemoryStore::<Record>::new()),
        Box::new(MemoryStore::<RawContent>::new()),
        gateway(transport),
    )
}

pub fn dir_cache(dir: &std::path::Path, transport: ScriptedTransport) -> TieredCache {
    TieredCache::new(
        Box::new(JsonDirStore::new(dir.join("parsed"))),
        Box::new(JsonDirStore::new(dir.join("raw"))),
        gateway(transport),
    )
}

/// Registry spanning E18..F19: one academic year, 2018-2019.
pub fn registry() -> TimeRegistry {
    let mut times = TimeRegistry::new((Term::Autumn, 2018), (Term::Spring, 2019)).unwrap();
    times.generate_bounds().unwrap();
    times
}

pub fn builder(cache: TieredCache) -> GraphBuilder {
    GraphBuilder::new("DTU", registry(), cache)
}

/// Record store whose writes fail for keys containing `poison`.
pub struct PoisonedStore {
    inner: MemoryStore<RawContent>,
    poison: String,
}

impl PoisonedStore {
    pub fn new(poison: &str) -> Self {
        Self { inner: MemoryStore::new(), poison: poison.to_string() }
    }
}

impl KeyValueStore<RawContent> for PoisonedStore {
    fn exists(&self, key: &str) -> bool {
        self.inner.exists(key)
    }
    fn read(&self, key: &str) -> course_scrape::Result<RawContent> {
        self.inner.read(key)
    }
    fn write(&mut self, key: &str, value: &RawContent) -> course_scrape::Result<()> {
        if key.contains(&self.poison) {
            return Err(std::io::Error::other("disk full").into());
        }
        self.inner.write(key, value)
    }
}

/* ---------------- site fixtures ---------------- */

pub fn archive_page(rows: &[(&str, &str)]) -> String {
    let mut html = String::from(r#"<html><body><table class="table"><tr><th>Kursus</th><th>Navn</th></tr>"#);
    for (id, name) in rows {
        html.push_str(&format!("<tr><td>{id}</td><td>{name}</td></tr>"));
    }
    html.push_str("</table></body></html>");
    html
}

pub fn grade_page(rows: &[(&str, u32)]) -> String {
    let mut table = String::from("<table><tr><th>Karakter</th><th>Antal</th></tr>");
    for (grade, n) in rows {
        table.push_str(&format!("<tr><td>{grade}</td><td>{n}</td></tr>"));
    }
    table.push_str("</table>");
    format!(
        "<html><body><table><tr><td>Kursus</td></tr></table><table><tr><td>Eksamen</td></tr></table>{table}</body></html>"
    )
}

pub fn info_page(title: &str, responsible: &str, course_type: &str) -> String {
    format!(
        r#"<html><body><h2>{title}</h2><table>
            <tr><td>Course type:</td><td>{course_type}</td></tr>
            <tr><td>Responsible</td><td>{responsible}</td></tr>
        </table></body></html>"#
    )
}

/// 01005 (E18 avg 9.75) and 02101 (E18 avg 6.0), neither graded in F19.
/// Only 01005 has an evaluation (E18).
pub fn site() -> HashMap<String, String> {
    let mut pages = HashMap::new();
    pages.insert(
        "https://kurser.dtu.dk/archive/2018-2019/letter/A".to_string(),
        archive_page(&[("02101", "Indledende programmering"), ("01005", "Matematik 1")]),
    );
    pages.insert(
        "https://karakterer.dtu.dk/Histogram/1/01005/Winter-2018".to_string(),
        grade_page(&[("12", 1), ("10", 2), ("7", 1), ("Bestået", 4)]),
    );
    pages.insert(
        "https://karakterer.dtu.dk/Histogram/1/02101/Winter-2018".to_string(),
        grade_page(&[("7", 2), ("4", 1), ("-3", 0), ("Ej mødt", 3)]),
    );
    pages.insert(
        "https://kurser.dtu.dk/course/2018-2019/01005".to_string(),
        info_page("01005 Matematik 1", "Karsten Schmidt, kasc@dtu.dk", "BSc, Polytechnical foundation"),
    );
    pages.insert(
        "https://kurser.dtu.dk/course/2018-2019/02101".to_string(),
        info_page("02101 Indledende programmering", "Karsten Schmidt", "BSc"),
    );
    pages.insert(
        "https://evaluering.dtu.dk/CourseSearch?courseCode=01005".to_string(),
        r#"<div class="Term">Semester</div><a href="/kursus/01005/168580"><div class="Term">E-18-13</div></a>"#
            .to_string(),
    );
    pages.insert(
        "https://evaluering.dtu.dk/kursus/01005/168580".to_string(),
        "<html><body><p>30 ud af 100 (30 %) kunne besvare dette evalueringsskema</p></body></html>".to_string(),
    );
    pages
}
