//! # biofold Core Library
//!
//! Confidence extraction and best-model selection for macromolecular structures
//! produced by structure predictors such as AlphaFold3, Protenix, Chai-1 and Boltz-2.
//!
//! Predictors store their per-residue confidence (pLDDT or an equivalent score) in the
//! column normally reserved for the crystallographic B-factor. This library reads that
//! column from mmCIF and PDB files, reduces it to one value per residue, averages it per
//! model, and picks the best-scoring model of a prediction run.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`ConfidenceProfile`,
//!   `ConfidenceReport`, `StructureFile`) and format readers/writers for mmCIF, PDB,
//!   the results table, run logs and result archives.
//!
//! - **[`engine`]: The Logic Core.** The per-batch confidence extractor, its error
//!   taxonomy, progress reporting and the typed import configuration.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures built on the two lower
//!   layers: importing a predictor's results (unpack, discover, score, publish) and
//!   summarizing a finished run.

pub mod core;
pub mod engine;
pub mod workflows;
