//! # Engine Module
//!
//! Turns a batch of structure files into a [`ConfidenceReport`](crate::core::models::report::ConfidenceReport).
//!
//! - **Extraction** ([`extract`]) - Per-file mean confidence and best-model selection
//! - **Configuration** ([`config`]) - Predictor origins, discovery rules and the import builder
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - The extraction error taxonomy
//!
//! The engine is synchronous and processes files strictly in input order. The first
//! failing file aborts the batch; there are no partial reports.

pub mod config;
pub mod error;
pub mod extract;
pub mod progress;
