// src/grades.rs
//! Grade taxonomy.
//!
//! The twelve grades of the 7-step scale and its categorical outcomes. The
//! catalog is fixed; a [`GradeSheet`] attaches per-sheet quantities to it.

use tracing::warn;

use crate::store::Record;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grade {
    name: &'static str,
    weight: Option<i8>,
    attended: bool,
    passed: bool,
}

impl Grade {
    const fn passed(name: &'static str, weight: Option<i8>) -> Self {
        Self { name, weight, attended: true, passed: true }
    }

    const fn attended_but_failed(name: &'static str, weight: Option<i8>) -> Self {
        Self { name, weight, attended: true, passed: false }
    }

    const fn absent(name: &'static str) -> Self {
        Self { name, weight: None, attended: false, passed: false }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn weight(&self) -> Option<i8> {
        self.weight
    }

    pub fn attended(&self) -> bool {
        self.attended
    }

    pub fn is_passed(&self) -> bool {
        self.passed
    }

    /// Counts toward the weighted average.
    pub fn numeric(&self) -> bool {
        self.weight.is_some()
    }
}

pub const CATALOG: [Grade; 12] = [
    Grade::passed("12", Some(12)),
    Grade::passed("10", Some(10)),
    Grade::passed("7", Some(7)),
    Grade::passed("4", Some(4)),
    Grade::passed("02", Some(2)),
    Grade::attended_but_failed("00", Some(0)),
    Grade::attended_but_failed("minus_3", Some(-3)),
    Grade::passed("pass", None),
    Grade::attended_but_failed("fail", None),
    Grade::absent("absent"),
    Grade::absent("ill"),
    Grade::absent("not_approved"),
];

pub fn lookup(name: &str) -> Option<&'static Grade> {
    CATALOG.iter().find(|g| g.name == name)
}

/// Site label (as the histogram parser capitalizes it) → catalog name.
pub fn catalog_name(label: &str) -> Option<&'static str> {
    let name = match label.trim() {
        "-3" => "minus_3",
        "2" => "02",
        "0" => "00",
        "Bestået" | "Godkendt" => "pass",
        "Ikke bestået" => "fail",
        "Ej mødt" => "absent",
        "Syg" => "ill",
        "Ikke godkendt" => "not_approved",
        other => return lookup(other).map(Grade::name),
    };
    Some(name)
}

/// Re-key a parsed histogram onto the catalog. Unknown labels are dropped.
pub fn normalize(site: &Record) -> Record {
    let mut sheet = GradeSheet::default();
    for (label, qty) in site {
        let Some(name) = catalog_name(label) else {
            warn!(%label, "unknown grade label; ignored");
            continue;
        };
        match qty.trim().parse::<u32>() {
            Ok(n) => sheet.add(name, n),
            Err(_) => warn!(%label, %qty, "non-numeric grade quantity; ignored"),
        }
    }
    sheet.to_record()
}

/// Quantities for the fixed catalog. Missing entries are zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GradeSheet {
    quantities: [u32; CATALOG.len()],
}

impl GradeSheet {
    /// From a catalog-keyed record (see [`normalize`]).
    pub fn from_record(record: &Record) -> Self {
        let mut sheet = Self::default();
        for (name, qty) in record {
            if let Ok(n) = qty.trim().parse::<u32>() {
                sheet.add(name, n);
            }
        }
        sheet
    }

    pub fn to_record(&self) -> Record {
        CATALOG
            .iter()
            .zip(self.quantities)
            .filter(|(_, q)| *q > 0)
            .map(|(g, q)| (s!(g.name), q.to_string()))
            .collect()
    }

    pub fn quantity(&self, name: &str) -> u32 {
        index_of(name).map_or(0, |i| self.quantities[i])
    }

    pub fn set_quantity(&mut self, name: &str, qty: u32) {
        if let Some(i) = index_of(name) {
            self.quantities[i] = qty;
        }
    }

    /// Add another sheet's quantities to this one.
    pub fn merge(&mut self, other: &GradeSheet) {
        for (mine, theirs) in self.quantities.iter_mut().zip(other.quantities) {
            *mine += theirs;
        }
    }

    fn add(&mut self, name: &str, qty: u32) {
        if let Some(i) = index_of(name) {
            self.quantities[i] += qty;
        }
    }

    /// Mean over numeric grades; `None` when no numeric grade was given.
    pub fn weighted_average(&self) -> Option<f64> {
        let (mut total, mut weighted) = (0u64, 0i64);
        for (grade, qty) in CATALOG.iter().zip(self.quantities) {
            if let Some(w) = grade.weight {
                total += u64::from(qty);
                weighted += i64::from(w) * i64::from(qty);
            }
        }
        (total > 0).then(|| weighted as f64 / total as f64)
    }

    pub fn pass_count(&self) -> u32 {
        self.sum_where(|g| g.passed)
    }

    pub fn fail_count(&self) -> u32 {
        self.sum_where(|g| g.attended && !g.passed)
    }

    pub fn absence_count(&self) -> u32 {
        self.sum_where(|g| !g.attended)
    }

    pub fn total(&self) -> u32 {
        self.quantities.iter().sum()
    }

    fn sum_where(&self, pred: impl Fn(&Grade) -> bool) -> u32 {
        CATALOG
            .iter()
            .zip(self.quantities)
            .filter(|(g, _)| pred(*g))
            .map(|(_, q)| q)
            .sum()
    }
}

fn index_of(name: &str) -> Option<usize> {
    CATALOG.iter().position(|g| g.name == name)
}
