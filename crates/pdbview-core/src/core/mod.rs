//! # Core Module
//!
//! Stateless building blocks: the structural data model, the PDB record
//! parser, and the residue topology tables.
//!
//! - **Structural Representation** ([`models`]) - Atoms, residues, chains and the [`models::system::Model`] root
//! - **File I/O** ([`io`]) - Fixed-column record extraction and stream parsing
//! - **Structural Knowledge** ([`topology`]) - Per-residue covalent bond tables
//! - **Naming Conventions** ([`utils`]) - Atom and residue name classification

pub mod io;
pub mod models;
pub mod topology;
pub mod utils;
