// src/specs/evaluation_search.rs
//! Evaluation search page: one `div.Term` per evaluated term, wrapped in a
//! link to that term's evaluation (`/kursus/01005/168580`).

use scraper::Html;

use crate::core::html::{ancestor, select, text};
use crate::store::Record;

/// Header cell of the result list, not a term.
const HEADER_LABEL: &str = "Semester";
const TERM_CODE_LEN: usize = 3;

/// Short term name (`E18`) → opaque evaluation id (`168580`).
pub fn parse(body: &str) -> Record {
    let doc = Html::parse_document(body);
    let mut out = Record::new();

    for div in select(&doc, "div.Term") {
        let label = text(div);
        if label.is_empty() || label == HEADER_LABEL {
            continue;
        }
        let Some(href) = ancestor(div, "a").and_then(|a| a.value().attr("href")) else {
            continue;
        };
        let Some(id) = href.trim_end_matches('/').rsplit('/').next().filter(|s| !s.is_empty()) else {
            continue;
        };
        out.insert(term_code(&label), s!(id));
    }
    out
}

/// `"E-18-13"` → `"E18"`.
fn term_code(label: &str) -> String {
    label.chars().filter(|&c| c != '-').take(TERM_CODE_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_term_links() {
        let html = r#"
            <div class="Term">Semester</div>
            <a href="/kursus/01005/168580"><div class="Term">E-18-13</div></a>
            <a href="/kursus/01005/171234"><div class="Term"> F-19-13 </div></a>
        "#;
        let got = parse(html);
        assert_eq!(got.len(), 2);
        assert_eq!(got["E18"], "168580");
        assert_eq!(got["F19"], "171234");
    }

    #[test]
    fn unlinked_terms_skipped() {
        assert!(parse(r#"<div class="Term">E-18-13</div>"#).is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn term_code_strips_and_truncates() {
        assert_eq!(term_code("E-18-13"), "E18");
        assert_eq!(term_code("F-20"), "F20");
    }
}
