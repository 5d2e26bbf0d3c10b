//! # Core Models Module
//!
//! Data structures for a loaded structure: atoms grouped into residues,
//! residues grouped into chains, plus the annotations (secondary structure,
//! explicit links, SEQRES sequences) that reference them.
//!
//! ## Key Components
//!
//! - [`atom`] - Atoms and chemical elements
//! - [`residue`] - Residues and the standard amino acid types
//! - [`chain`] - Ordered runs of residues sharing a chain identifier
//! - [`topology`] - Bonds and their provenance
//! - [`secondary`] - Helix and sheet ranges with their resolution state
//! - [`annotation`] - Unresolved explicit links and chain sequences
//! - [`system`] - The [`system::Model`] root tying everything together
//! - [`ids`] - Stable identifier types for atoms, residues, and chains

pub mod annotation;
pub mod atom;
pub mod chain;
pub mod ids;
pub mod residue;
pub mod secondary;
pub mod system;
pub mod topology;
