//! # Workflows Module
//!
//! Top-level entry points tying [`crate::core`] and [`crate::engine`] together.
//!
//! - **Load Workflow** ([`load`]) - Parse a PDB stream or file, assemble its hierarchy and
//!   resolve its annotations, returning the model together with every diagnostic raised.

pub mod load;
