// src/progress.rs
use crate::key::DomainKey;

/// Lightweight progress reporting used by long-running graph builds.
/// Frontends (CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one leaf record is in place.
    fn item_done(&mut self, _key: &DomainKey) {}

    /// Called when a leaf failed and was left empty.
    fn item_failed(&mut self, _key: &DomainKey, _msg: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
