// src/log.rs
//! Log file setup for binaries. The library only emits `tracing` events.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::options::PipelineOptions;

/// Append `tracing` output to [`PipelineOptions::log_path`], filtered by
/// `RUST_LOG` (default `info`). A second call is a no-op.
pub fn init(opts: &PipelineOptions) -> std::io::Result<()> {
    fs::create_dir_all(&opts.store_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(opts.log_path())?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Already initialised elsewhere (tests, embedding app): keep theirs.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_log_file_under_store() {
        let dir = tempfile::tempdir().unwrap();
        let opts = PipelineOptions { store_dir: dir.path().join("store"), ..Default::default() };
        init(&opts).unwrap();
        assert!(opts.log_path().is_file());
    }
}
