// src/specs/course_archive.rs
//! Course archive: one page per initial letter, each with a `table.table`
//! listing `course id | course name`.

use std::collections::BTreeMap;

use scraper::Html;
use tracing::warn;

use crate::core::html::{select, select_in, text};

/// Course id → name for one archive page. No table → empty.
pub fn parse_page(body: &str) -> BTreeMap<String, String> {
    let doc = Html::parse_document(body);
    let mut out = BTreeMap::new();

    let Some(table) = select(&doc, "table.table").into_iter().next() else {
        return out;
    };

    // first row is the header
    for tr in select_in(table, "tr").into_iter().skip(1) {
        let cells = select_in(tr, "td");
        if let [id, name, ..] = cells.as_slice() {
            let id = text(*id);
            if !id.is_empty() {
                out.insert(id, text(*name));
            }
        }
    }
    out
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ArchiveMerge {
    pub courses: BTreeMap<String, String>,
    /// `(course id, overwritten name, new name)` in merge order.
    pub collisions: Vec<(String, String, String)>,
}

/// Merge pages in order. A course id seen again with a different name takes
/// the later name; the collision is logged and recorded.
pub fn merge<I>(pages: I) -> ArchiveMerge
where
    I: IntoIterator<Item = BTreeMap<String, String>>,
{
    let mut merged = ArchiveMerge::default();
    for page in pages {
        for (id, name) in page {
            if let Some(old) = merged.courses.insert(id.clone(), name.clone()) {
                if old != name {
                    warn!(course = %id, old = %old, new = %name, "archive collision; keeping last seen");
                    merged.collisions.push((id, old, name));
                }
            }
        }
    }
    merged
}
