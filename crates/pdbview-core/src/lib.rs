//! # pdbview Core Library
//!
//! Reads Protein Data Bank flat files into a hierarchical structural model of
//! chains, residues and atoms, with covalent bonds derived from residue
//! topology, backbone geometry and the file's own CONECT and LINK records.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Model`, `Chain`, `Residue`, `Atom`),
//!   fixed-column record extraction, and per-residue bond tables.
//!
//! - **[`engine`]: The Logic Core.** Assembles parsed records into the hierarchy, resolves
//!   secondary-structure ranges and explicit links, and collects diagnostics.
//!
//! - **[`workflows`]: The Public API.** [`workflows::load::run`] and
//!   [`workflows::load::run_path`] perform a complete load in one call.

pub mod core;
pub mod engine;
pub mod workflows;
