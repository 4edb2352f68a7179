// src/specs/info_page.rs
//! Course info page: a title heading and a `label: | value` table.

use scraper::Html;

use crate::core::html::{label_rows, select, text};
use crate::core::sanitize::strip_label;
use crate::store::Record;

pub const TITLE: &str = "Title";
pub const RESPONSIBLE: &str = "Responsible";
pub const COURSE_TYPE: &str = "Course type";

pub fn parse(body: &str) -> Record {
    let doc = Html::parse_document(body);
    let mut out = Record::new();

    for (label, value) in label_rows(&doc) {
        let label = strip_label(&label);
        if !label.is_empty() {
            out.insert(label, value);
        }
    }
    // Title only counts alongside real content.
    if !out.is_empty() {
        if let Some(h) = select(&doc, "h2").into_iter().next() {
            out.insert(s!(TITLE), text(h));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_title() {
        let html = r#"<html><body>
            <h2>01005 Advanced Engineering Mathematics 1</h2>
            <table>
              <tr><td>Point( ECTS )</td><td>20</td></tr>
              <tr><td>Course type:</td><td>BSc, Polytechnical foundation</td></tr>
              <tr><td>Responsible</td><td> Karsten Schmidt </td></tr>
            </table>
        </body></html>"#;
        let got = parse(html);
        assert_eq!(got[TITLE], "01005 Advanced Engineering Mathematics 1");
        assert_eq!(got["Point( ECTS )"], "20");
        assert_eq!(got[COURSE_TYPE], "BSc, Polytechnical foundation");
        assert_eq!(got[RESPONSIBLE], "Karsten Schmidt");
    }

    #[test]
    fn no_rows_is_empty() {
        assert!(parse("<html><body><h2>Not found</h2></body></html>").is_empty());
    }
}
