// src/domain/mod.rs
//! The time-indexed object graph:
//!
//! ```text
//! School → Year → Course → Term → {Evaluation, GradeSheet}
//!               ↘ Teacher, StudyLine     ↘ InfoPage
//! ```
//!
//! One node per identity key. Containers are built eagerly, primary kinds
//! before secondary ones; leaves hold a record obtained through the cache.

pub mod action;
pub mod builder;
pub mod kind;
pub mod node;
pub mod sources;

pub use action::{cascade_perform_action, grade_average, grade_totals};
pub use builder::GraphBuilder;
pub use kind::NodeKind;
pub use node::DomainNode;
