//! # Core Module
//!
//! Data models and file formats shared by the extraction engine and the workflows.
//!
//! - **Models** ([`models`]) - Per-residue confidence profiles, confidence reports and
//!   the structure-file descriptor used to feed the engine.
//! - **File I/O** ([`io`]) - Readers for mmCIF and PDB coordinate files, the results
//!   table, Chai-1 run logs and result archives.

pub mod io;
pub mod models;
