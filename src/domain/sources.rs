// src/domain/sources.rs
//! Per-kind retrieval strategies handed to the tiered cache.

use std::rc::Rc;

use crate::cache::Source;
use crate::error::Result;
use crate::grades;
use crate::specs::{course_archive, evaluation, evaluation_search, info_page};
use crate::store::{RawPage, Record};
use crate::time::TimePeriod;
use crate::urls;

/// Course id → name for one academic year, merged over every archive letter.
pub struct ArchiveSource {
    pub period: Rc<TimePeriod>,
}

impl Source for ArchiveSource {
    fn locate(&self) -> Result<Vec<String>> {
        urls::course_archive(&self.period)
    }

    fn parse(&self, pages: &[RawPage]) -> Result<Record> {
        let merged = course_archive::merge(pages.iter().map(|p| course_archive::parse_page(&p.body)));
        Ok(merged.courses)
    }
}

/// Catalog-keyed grade quantities for one course and exam period.
pub struct GradeSheetSource {
    pub course: String,
    pub period: Rc<TimePeriod>,
}

impl Source for GradeSheetSource {
    fn locate(&self) -> Result<Vec<String>> {
        Ok(vec![urls::grade_sheet(&self.course, &self.period)?])
    }

    fn parse(&self, pages: &[RawPage]) -> Result<Record> {
        let mut out = Record::new();
        for page in pages {
            let site = grades::normalize(&crate::specs::grades::parse_histogram(&page.url, &page.body)?);
            out.extend(site);
        }
        Ok(out)
    }
}

pub struct InfoPageSource {
    pub course: String,
    pub period: Rc<TimePeriod>,
}

impl Source for InfoPageSource {
    fn locate(&self) -> Result<Vec<String>> {
        Ok(vec![urls::info_page(&self.course, &self.period)?])
    }

    fn parse(&self, pages: &[RawPage]) -> Result<Record> {
        Ok(pages.iter().flat_map(|p| info_page::parse(&p.body)).collect())
    }
}

/// Term name → evaluation id, from the course's evaluation search page.
pub struct EvaluationLinksSource {
    pub course: String,
}

impl Source for EvaluationLinksSource {
    fn locate(&self) -> Result<Vec<String>> {
        Ok(vec![urls::evaluation_search(&self.course)])
    }

    fn parse(&self, pages: &[RawPage]) -> Result<Record> {
        Ok(pages.iter().flat_map(|p| evaluation_search::parse(&p.body)).collect())
    }
}

/// One evaluation page; `url` is `None` when the search page listed no
/// evaluation for the term.
pub struct EvaluationSource {
    pub url: Option<String>,
}

impl Source for EvaluationSource {
    fn locate(&self) -> Result<Vec<String>> {
        Ok(self.url.iter().cloned().collect())
    }

    fn parse(&self, pages: &[RawPage]) -> Result<Record> {
        Ok(pages.iter().flat_map(|p| evaluation::parse(&p.body)).collect())
    }
}

/// Record computed in-process (year lists, term lists, teacher lists).
pub struct Derived(pub Record);

impl Source for Derived {
    fn locate(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn parse(&self, _pages: &[RawPage]) -> Result<Record> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Term;

    fn e18() -> Rc<TimePeriod> {
        Rc::new(TimePeriod::term_year(Term::Autumn, 2018).unwrap())
    }

    #[test]
    fn archive_locates_every_letter_and_merges() {
        let src = ArchiveSource { period: Rc::new(TimePeriod::year_only(2018).unwrap()) };
        assert_eq!(src.locate().unwrap().len(), 29);

        let page = |body: &str| RawPage { url: s!("u"), body: s!(body) };
        let a = page(r#"<table class="table"><tr><th>Id</th></tr><tr><td>01005</td><td>Matematik 1</td></tr></table>"#);
        let b = page("");
        let rec = src.parse(&[a, b]).unwrap();
        assert_eq!(rec["01005"], "Matematik 1");
    }

    #[test]
    fn grade_sheet_source_normalizes() {
        let src = GradeSheetSource { course: s!("01005"), period: e18() };
        assert_eq!(
            src.locate().unwrap(),
            ["https://karakterer.dtu.dk/Histogram/1/01005/Winter-2018"]
        );
        let body = r#"<table></table><table></table><table>
            <tr><th>Karakter</th><th>Antal</th></tr>
            <tr><td>-3</td><td>2</td></tr><tr><td>Syg</td><td>1</td></tr>
        </table>"#;
        let rec = src.parse(&[RawPage { url: s!("u"), body: s!(body) }]).unwrap();
        assert_eq!(rec["minus_3"], "2");
        assert_eq!(rec["ill"], "1");
    }

    #[test]
    fn evaluation_without_link_is_derived_empty() {
        let src = EvaluationSource { url: None };
        assert!(src.locate().unwrap().is_empty());
        assert!(src.parse(&[]).unwrap().is_empty());
    }
}
