//! # Topology Module
//!
//! Intra-residue covalent topology reconstructed from static chemical
//! knowledge.
//!
//! - [`rules`] - Built-in per-residue bond tables and the shared rules applied
//!   to every residue
//! - [`registry`] - Optional TOML templates that extend or override the
//!   built-in side-chain tables
//!
//! ```ignore
//! use pdbview::core::topology::registry::TopologyRegistry;
//!
//! let registry = TopologyRegistry::load(Path::new("templates.toml"))?;
//! let pairs = registry.resolve("ALA", |name| residue.has_atom(name));
//! ```

pub mod registry;
pub mod rules;
