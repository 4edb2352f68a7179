// src/core/html.rs
//! Thin helpers over `scraper` shared by the page specs.

use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;

/// All elements matching `css`. Invalid selectors match nothing.
pub fn select<'a>(doc: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(sel) => doc.select(&sel).collect(),
        Err(_) => Vec::new(),
    }
}

/// Like [`select`], scoped to one element.
pub fn select_in<'a>(el: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(sel) => el.select(&sel).collect(),
        Err(_) => Vec::new(),
    }
}

/// Whitespace-normalized text content.
pub fn text(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Rows of a table as cell texts (`th` and `td`, in document order).
pub fn table_rows(table: ElementRef<'_>) -> Vec<Vec<String>> {
    select_in(table, "tr")
        .into_iter()
        .map(|tr| select_in(tr, "th, td").into_iter().map(text).collect::<Vec<_>>())
        .filter(|cells| !cells.is_empty())
        .collect()
}

/// `(first cell, second cell)` for every row with at least two cells.
pub fn label_rows(doc: &Html) -> Vec<(String, String)> {
    select(doc, "tr")
        .into_iter()
        .filter_map(|tr| {
            let cells = select_in(tr, "td, th");
            match cells.as_slice() {
                [label, value, ..] => Some((text(*label), text(*value))),
                _ => None,
            }
        })
        .collect()
}

/// Nearest ancestor named `tag`.
pub fn ancestor<'a>(el: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name().eq_ignore_ascii_case(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_and_labels() {
        let doc = Html::parse_document(
            r#"<table><tr><th>A</th><th>B</th></tr><tr><td> 1 </td><td>2
            </td></tr></table>"#,
        );
        let tables = select(&doc, "table");
        assert_eq!(tables.len(), 1);
        assert_eq!(table_rows(tables[0]), vec![vec!["A", "B"], vec!["1", "2"]]);
        assert_eq!(label_rows(&doc)[1], (s!("1"), s!("2")));
    }

    #[test]
    fn bad_selector_matches_nothing() {
        let doc = Html::parse_document("<p>x</p>");
        assert!(select(&doc, "p[").is_empty());
    }

    #[test]
    fn finds_ancestor_anchor() {
        let doc = Html::parse_document(r#"<a href="/x/1"><div class="Term">E-18</div></a>"#);
        let term = select(&doc, "div.Term")[0];
        let a = ancestor(term, "a").unwrap();
        assert_eq!(a.value().attr("href"), Some("/x/1"));
    }
}
