//! Provides input/output functionality for the file formats handled by biofold.
//!
//! Coordinate readers ([`cif`], [`pdb`]) share the [`traits::ConfidenceFile`]
//! interface and reduce a structure to its per-residue confidence profile.
//! The remaining modules cover the files that surround a prediction run: the
//! persisted results table, the Chai-1 score log and downloaded result archives.

pub mod archive;
pub mod chai_log;
pub mod cif;
pub mod format;
pub mod pdb;
pub mod results;
pub mod traits;
