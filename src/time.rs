// src/time.rs
//! Time model: terms, periods and the registry that hands them out.
//!
//! A [`TimePeriod`] has one of four shapes:
//! - term + year (`E18`),
//! - year only (`2018`, an academic year starting in the autumn of 2018),
//! - term only (`E`),
//! - timeless (`timeless`), for entities that do not change over time.
//!
//! Periods are immutable and handed out as `Rc<TimePeriod>` by a
//! [`TimeRegistry`]; generating the same canonical name twice returns the
//! same instance.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::config::consts::{MAX_YEAR, MIN_YEAR, TIMELESS_NAME};
use crate::error::{Error, Result};

/// Ordered within a calendar year: spring before autumn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Spring,
    Autumn,
}

impl Term {
    pub const ALL: [Term; 2] = [Term::Spring, Term::Autumn];

    pub fn code(self) -> char {
        match self {
            Term::Spring => 'F',
            Term::Autumn => 'E',
        }
    }

    pub fn from_code(c: char) -> Option<Term> {
        match c.to_ascii_uppercase() {
            'F' => Some(Term::Spring),
            'E' => Some(Term::Autumn),
            _ => None,
        }
    }

    /// Seasonal label used by the grade-histogram site.
    fn exam_season(self) -> &'static str {
        match self {
            Term::Spring => "Summer",
            Term::Autumn => "Winter",
        }
    }
}

// Field order drives the derived ordering: year first, then term.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimePeriod {
    year: Option<u16>,
    term: Option<Term>,
}

impl TimePeriod {
    pub fn term_year(term: Term, year: u16) -> Result<Self> {
        check_year(year)?;
        Ok(Self { year: Some(year), term: Some(term) })
    }

    pub fn year_only(year: u16) -> Result<Self> {
        check_year(year)?;
        Ok(Self { year: Some(year), term: None })
    }

    pub fn term_only(term: Term) -> Self {
        Self { year: None, term: Some(term) }
    }

    pub fn timeless() -> Self {
        Self { year: None, term: None }
    }

    pub fn term(&self) -> Option<Term> {
        self.term
    }

    pub fn is_timeless(&self) -> bool {
        self.term.is_none() && self.year.is_none()
    }

    /// Numeric calendar year. Periods without a year have none to give.
    pub fn year(&self) -> Result<u16> {
        self.year
            .ok_or_else(|| Error::invalid(format!("period '{}' has no year", self.name())))
    }

    pub fn name(&self) -> String {
        match (self.term, self.year) {
            (Some(t), Some(y)) => format!("{}{:02}", t.code(), y % 100),
            (None, Some(y)) => y.to_string(),
            (Some(t), None) => t.code().to_string(),
            (None, None) => s!(TIMELESS_NAME),
        }
    }

    /// First calendar year of the academic year this period belongs to.
    pub fn academic_start(&self) -> Result<u16> {
        let year = self.year()?;
        Ok(match self.term {
            Some(Term::Spring) => year - 1,
            _ => year,
        })
    }

    /// `"2018-2019"` for `E18`, `F19` and `2018`.
    pub fn academic_year(&self) -> Result<String> {
        let start = self.academic_start()?;
        Ok(format!("{}-{}", start, start + 1))
    }

    /// `"Winter-2018"` for `E18`, `"Summer-2019"` for `F19`. Needs a term and a year.
    pub fn exam_period(&self) -> Result<String> {
        match (self.term, self.year) {
            (Some(t), Some(y)) => Ok(format!("{}-{}", t.exam_season(), y)),
            _ => Err(Error::invalid(format!("period '{}' has no exam period", self.name()))),
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for TimePeriod {
    type Err = Error;

    /// Inverse of [`TimePeriod::name`].
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == TIMELESS_NAME {
            return Ok(Self::timeless());
        }
        if let Ok(year) = s.parse::<u16>() {
            if s.len() == 4 {
                return Self::year_only(year);
            }
        }
        let mut chars = s.chars();
        let term = chars
            .next()
            .and_then(Term::from_code)
            .ok_or_else(|| Error::invalid(format!("unrecognised period '{s}'")))?;
        let rest = chars.as_str();
        if rest.is_empty() {
            return Ok(Self::term_only(term));
        }
        if rest.len() != 2 || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid(format!("unrecognised period '{s}'")));
        }
        let yy: u16 = rest
            .parse()
            .map_err(|_| Error::invalid(format!("unrecognised period '{s}'")))?;
        Self::term_year(term, MIN_YEAR + yy)
    }
}

fn check_year(year: u16) -> Result<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(Error::invalid(format!("year {year} outside {MIN_YEAR}..={MAX_YEAR}")))
    }
}

/// Owns every generated period, keyed by canonical name.
#[derive(Debug)]
pub struct TimeRegistry {
    oldest: TimePeriod,
    newest: TimePeriod,
    periods: HashMap<String, Rc<TimePeriod>>,
}

impl TimeRegistry {
    pub fn new(oldest: (Term, u16), newest: (Term, u16)) -> Result<Self> {
        let oldest = TimePeriod::term_year(oldest.0, oldest.1)?;
        let newest = TimePeriod::term_year(newest.0, newest.1)?;
        if oldest > newest {
            return Err(Error::invalid(format!("bounds out of order: {oldest} > {newest}")));
        }
        Ok(Self { oldest, newest, periods: HashMap::new() })
    }

    pub fn oldest(&self) -> &TimePeriod {
        &self.oldest
    }

    pub fn newest(&self) -> &TimePeriod {
        &self.newest
    }

    /// One period per term of `year`, in term order. Only the boundary years
    /// are clipped; a year outside the bounds still yields both terms.
    pub fn generate_year(&mut self, year: u16) -> Result<Vec<Rc<TimePeriod>>> {
        self.year_period(year)?;

        let mut out = Vec::with_capacity(Term::ALL.len());
        for term in Term::ALL {
            let period = TimePeriod::term_year(term, year)?;
            if self.oldest.year == Some(year) && period < self.oldest {
                continue;
            }
            if self.newest.year == Some(year) && period > self.newest {
                continue;
            }
            out.push(self.register(period));
        }
        Ok(out)
    }

    /// Every term period from `oldest_year` through `newest_year` inclusive.
    pub fn generate_all(&mut self, oldest_year: u16, newest_year: u16) -> Result<Vec<Rc<TimePeriod>>> {
        let mut out = Vec::new();
        for year in oldest_year..=newest_year {
            out.extend(self.generate_year(year)?);
        }
        Ok(out)
    }

    /// Generates the configured `[oldest, newest]` range.
    pub fn generate_bounds(&mut self) -> Result<Vec<Rc<TimePeriod>>> {
        let (from, to) = (self.oldest.year()?, self.newest.year()?);
        self.generate_all(from, to)
    }

    pub fn generate_timeless(&mut self) -> Rc<TimePeriod> {
        self.register(TimePeriod::timeless())
    }

    /// Year-only period for `year`, registered on first use.
    pub fn year_period(&mut self, year: u16) -> Result<Rc<TimePeriod>> {
        Ok(self.register(TimePeriod::year_only(year)?))
    }

    pub fn resolve(&self, name: &str) -> Result<Rc<TimePeriod>> {
        self.periods
            .get(name)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("time period '{name}'")))
    }

    /// Registered term+year periods, oldest first.
    pub fn term_periods(&self) -> Vec<Rc<TimePeriod>> {
        let mut out: Vec<_> = self
            .periods
            .values()
            .filter(|p| p.term.is_some() && p.year.is_some())
            .cloned()
            .collect();
        out.sort();
        out
    }

    /// Distinct academic-year starts covered by the registered term periods.
    pub fn academic_years(&self) -> Vec<u16> {
        let mut years: Vec<u16> = self
            .term_periods()
            .iter()
            .filter_map(|p| p.academic_start().ok())
            .collect();
        years.dedup();
        years
    }

    fn register(&mut self, period: TimePeriod) -> Rc<TimePeriod> {
        self.periods
            .entry(period.name())
            .or_insert_with(|| Rc::new(period))
            .clone()
    }
}
