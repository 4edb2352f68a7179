// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::time::Term;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineOptions {
    pub domain: String,
    /// Oldest (term, year) the registry generates.
    pub oldest: (Term, u16),
    /// Newest (term, year) the registry generates.
    pub newest: (Term, u16),
    /// Bounded wait per fetch.
    pub wait: Duration,
    pub store_dir: PathBuf,
    /// Substring that marks a page as fully rendered. `None` accepts any body.
    pub ready_marker: Option<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            domain: s!(DOMAIN),
            oldest: (Term::Spring, 2017),
            newest: (Term::Spring, 2023),
            wait: Duration::from_secs(DEFAULT_WAIT_SECS),
            store_dir: PathBuf::from(STORE_DIR),
            ready_marker: Some(s!(r#"name="viewport""#)),
        }
    }
}

impl PipelineOptions {
    pub fn raw_dir(&self) -> PathBuf {
        self.store_dir.join(RAW_SUBDIR)
    }

    pub fn parsed_dir(&self) -> PathBuf {
        self.store_dir.join(PARSED_SUBDIR)
    }

    pub fn log_path(&self) -> PathBuf {
        self.store_dir.join(LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds_match_consts() {
        let opts = PipelineOptions::default();
        let oldest = crate::time::TimePeriod::term_year(opts.oldest.0, opts.oldest.1).unwrap();
        let newest = crate::time::TimePeriod::term_year(opts.newest.0, opts.newest.1).unwrap();
        assert_eq!(oldest.name(), DEFAULT_OLDEST);
        assert_eq!(newest.name(), DEFAULT_NEWEST);
    }

    #[test]
    fn store_subdirs() {
        let mut opts = PipelineOptions::default();
        opts.store_dir = PathBuf::from("cache");
        assert_eq!(opts.raw_dir(), PathBuf::from("cache").join("raw"));
        assert_eq!(opts.parsed_dir(), PathBuf::from("cache").join("parsed"));
        assert_eq!(opts.log_path(), PathBuf::from("cache").join("debug.log"));
    }
}
