//! Provides input functionality for structure file formats.
//!
//! [`records`] knows the fixed-column layout of each PDB record kind, and
//! [`pdb`] drives it over a whole stream, tracking coordinate models and
//! collecting malformed lines.

pub mod pdb;
pub mod records;
pub mod traits;
