// src/specs/mod.rs
//! # Page specs
//!
//! One module per remote page kind. Each spec encodes *where the data lives in
//! the markup* and *how to extract it tolerantly*, as a pure function from page
//! content to a flat record.
//!
//! ## What lives here
//! - **Pure parsing** of course archives, grade histograms, evaluation search
//!   results, evaluation pages and course info pages.
//! - **Selector choice** (e.g. the grade table is the third table on the page).
//! - **Light shaping** into [`Record`](crate::store::Record) maps or small merge
//!   structs.
//!
//! ## What does **not** live here
//! - **Fetching, caching, persistence.** The tiered cache decides when a page is
//!   fetched and whether a parse result is stored.
//! - **Graph assembly.** Specs never see identity keys or nodes.
//!
//! ## Empty vs. malformed
//! No structural evidence of data (no table, no matching element) is a valid
//! negative result: the spec returns an empty record. Evidence of data that
//! yields nothing after extraction means the site changed under us, and the
//! spec returns [`Error::UpstreamFormatChanged`](crate::error::Error).
//!
//! ## Testing notes
//! Every spec is tested offline against inline fixtures.
pub mod course_archive;
pub mod evaluation;
pub mod evaluation_search;
pub mod grades;
pub mod info_page;
