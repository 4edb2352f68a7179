// src/specs/evaluation.rs
//! Course evaluation page.
//!
//! Extracts the respondent line (`"37 ud af 120 ... kunne besvare dette
//! evalueringsskema"`) and any `label | value` table rows.

use scraper::Html;

use crate::core::html::{label_rows, select, text};
use crate::core::sanitize::strip_label;
use crate::store::Record;

pub const RESPONDENTS: &str = "Respondents";
pub const INVITED: &str = "Invited";

const RESPONDENT_MARKER: &str = "kunne besvare dette evalueringsskema";
const OUT_OF: &str = "ud af";

pub fn parse(body: &str) -> Record {
    let doc = Html::parse_document(body);
    let mut out = Record::new();

    let page_text = select(&doc, "body").into_iter().next().map(text).unwrap_or_default();
    if let Some((n, m)) = respondents(&page_text) {
        out.insert(s!(RESPONDENTS), n.to_string());
        out.insert(s!(INVITED), m.to_string());
    }

    for (label, value) in label_rows(&doc) {
        let label = strip_label(&label);
        if !label.is_empty() && !value.is_empty() {
            out.insert(label, value);
        }
    }
    out
}

fn respondents(page_text: &str) -> Option<(u32, u32)> {
    let end = page_text.find(RESPONDENT_MARKER)?;
    let head = &page_text[..end];
    let at = head.rfind(OUT_OF)?;

    let before: String = head[..at]
        .trim_end()
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    let after: String = head[at + OUT_OF.len()..]
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    Some((before.parse().ok()?, after.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respondent_line_and_rows() {
        let html = r#"<html><body>
            <h2>01005 Matematik 1</h2>
            <p>37 ud af 120 (31 %) kunne besvare dette evalueringsskema</p>
            <table><tr><td>Workload:</td><td>Lidt højere</td></tr></table>
        </body></html>"#;
        let got = parse(html);
        assert_eq!(got[RESPONDENTS], "37");
        assert_eq!(got[INVITED], "120");
        assert_eq!(got["Workload"], "Lidt højere");
    }

    #[test]
    fn nothing_found_is_empty() {
        assert!(parse("<html><body><p>Ingen evaluering</p></body></html>").is_empty());
    }

    #[test]
    fn respondents_needs_both_numbers() {
        assert_eq!(respondents("12 ud af 40 kunne besvare dette evalueringsskema"), Some((12, 40)));
        assert_eq!(respondents("ud af 40 kunne besvare dette evalueringsskema"), None);
    }
}
