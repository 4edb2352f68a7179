// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod error;
pub mod grades;
pub mod key;
pub mod log;
pub mod progress;
pub mod specs;
pub mod store;
pub mod time;
pub mod urls;

pub use error::{Error, Result};
