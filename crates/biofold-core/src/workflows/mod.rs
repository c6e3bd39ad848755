//! # Workflows Module
//!
//! High-level procedures built on the engine, used as-is by the command line.
//!
//! - **Import Workflow** ([`import`]) - Unpack a predictor's results, locate the predicted
//!   models, score them, persist the results table and publish the structures with a
//!   provenance manifest.
//! - **Discovery** ([`discovery`]) - Per-predictor rules for finding model files in a
//!   results directory.
//! - **Packaging** ([`package`]) - Publishing structures and writing `manifest.toml`.
//! - **Summary** ([`summary`]) - Rendering a finished run from its results table or a
//!   Chai-1 score log.

pub mod discovery;
pub mod error;
pub mod import;
pub mod package;
pub mod summary;
