//! # Core Models Module
//!
//! Value types describing structure files and the confidence computed from them.
//!
//! - [`confidence`] - Per-residue confidence values and their first-seen reduction
//! - [`report`] - Per-model mean confidence and best-model selection
//! - [`structure`] - A structure file on disk together with its model name and format

pub mod confidence;
pub mod report;
pub mod structure;
