// src/urls.rs
//! URL resolution. Pure functions of (course id, period); no I/O.

use std::collections::BTreeMap;

use crate::config::consts::{ARCHIVE_ALPHABET, ARCHIVE_HOST, EVALUATION_HOST, GRADES_HOST};
use crate::error::Result;
use crate::time::TimePeriod;

/// One archive page per initial letter for the academic year of `period`.
pub fn course_archive(period: &TimePeriod) -> Result<Vec<String>> {
    let academic_year = period.academic_year()?;
    Ok(ARCHIVE_ALPHABET
        .iter()
        .map(|letter| format!("{ARCHIVE_HOST}/archive/{academic_year}/letter/{letter}"))
        .collect())
}

pub fn grade_sheet(course: &str, period: &TimePeriod) -> Result<String> {
    let exam_period = period.exam_period()?;
    Ok(format!("{GRADES_HOST}/Histogram/1/{course}/{exam_period}"))
}

pub fn info_page(course: &str, period: &TimePeriod) -> Result<String> {
    let academic_year = period.academic_year()?;
    Ok(format!("{ARCHIVE_HOST}/course/{academic_year}/{course}"))
}

pub fn evaluation_search(course: &str) -> String {
    format!("{EVALUATION_HOST}/CourseSearch?courseCode={course}")
}

/// Evaluation URLs cannot be built from the identity alone: `links` is the
/// parsed search page, mapping a term name (`E18`) to the site's opaque id.
pub fn evaluations(course: &str, links: &BTreeMap<String, String>) -> Vec<(String, String)> {
    links
        .iter()
        .map(|(term, id)| (term.clone(), evaluation(course, id)))
        .collect()
}

pub fn evaluation(course: &str, link_id: &str) -> String {
    format!("{EVALUATION_HOST}/kursus/{course}/{link_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Term;

    #[test]
    fn archive_has_one_url_per_letter() {
        let e18 = TimePeriod::term_year(Term::Autumn, 2018).unwrap();
        let urls = course_archive(&e18).unwrap();
        assert_eq!(urls.len(), 29);
        assert_eq!(urls[0], "https://kurser.dtu.dk/archive/2018-2019/letter/A");
        assert_eq!(urls[28], "https://kurser.dtu.dk/archive/2018-2019/letter/Å");
    }

    #[test]
    fn grade_sheet_uses_exam_period() {
        let f19 = TimePeriod::term_year(Term::Spring, 2019).unwrap();
        assert_eq!(
            grade_sheet("01005", &f19).unwrap(),
            "https://karakterer.dtu.dk/Histogram/1/01005/Summer-2019"
        );
        assert!(grade_sheet("01005", &TimePeriod::year_only(2019).unwrap()).is_err());
    }

    #[test]
    fn info_page_uses_academic_year() {
        let f19 = TimePeriod::term_year(Term::Spring, 2019).unwrap();
        assert_eq!(
            info_page("02101", &f19).unwrap(),
            "https://kurser.dtu.dk/course/2018-2019/02101"
        );
    }

    #[test]
    fn evaluation_urls_from_links() {
        let links = BTreeMap::from([(s!("E18"), s!("123456")), (s!("F19"), s!("130001"))]);
        let urls = evaluations("01005", &links);
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0], (s!("E18"), s!("https://evaluering.dtu.dk/kursus/01005/123456")));
    }
}
