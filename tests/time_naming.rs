// tests/time_naming.rs
//
// Canonical period names resolve back to the same (term, year).
//
use course_scrape::error::Error;
use course_scrape::time::{Term, TimePeriod, TimeRegistry};

#[test]
fn every_generated_name_resolves_to_itself() {
    let mut times = TimeRegistry::new((Term::Spring, 2017), (Term::Spring, 2023)).unwrap();
    let generated = times.generate_bounds().unwrap();
    assert_eq!(generated.len(), 13);

    for period in &generated {
        let resolved = times.resolve(&period.name()).unwrap();
        assert_eq!(resolved.term(), period.term());
        assert_eq!(resolved.year().unwrap(), period.year().unwrap());
        assert_eq!(*resolved, **period);
    }
}

#[test]
fn e18_example() {
    let mut times = TimeRegistry::new((Term::Spring, 2017), (Term::Spring, 2023)).unwrap();
    times.generate_year(2018).unwrap();
    let p = times.resolve("E18").unwrap();
    assert_eq!(p.term(), Some(Term::Autumn));
    assert_eq!(p.year().unwrap(), 2018);
    assert_eq!(p.name(), "E18");
}

#[test]
fn unregistered_names_are_not_found() {
    let mut times = TimeRegistry::new((Term::Spring, 2017), (Term::Spring, 2023)).unwrap();
    times.generate_year(2018).unwrap();
    assert!(matches!(times.resolve("E25"), Err(Error::NotFound(_))));
    assert!(matches!(times.resolve("timeless"), Err(Error::NotFound(_))));
    times.generate_timeless();
    assert!(times.resolve("timeless").is_ok());
}

#[test]
fn parsed_names_match_generated() {
    let mut times = TimeRegistry::new((Term::Autumn, 2018), (Term::Autumn, 2020)).unwrap();
    for period in times.generate_all(2018, 2020).unwrap() {
        let parsed: TimePeriod = period.name().parse().unwrap();
        assert_eq!(parsed, *period);
    }
}
