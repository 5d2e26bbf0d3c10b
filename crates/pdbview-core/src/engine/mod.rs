//! # Engine Module
//!
//! The stateful half of a load: it turns the flat record lists produced by
//! [`crate::core::io`] into a connected [`crate::core::models::system::Model`].
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Load parameters and their validating builder
//! - **Hierarchy Assembly** ([`assembly`]) - Run-length grouping of atoms into residues and
//!   chains, intra-residue topology and distance-gated backbone bonds
//! - **Annotation Resolution** ([`annotation`]) - HELIX/SHEET ranges, CONECT pairs and LINK
//!   records resolved against the assembled hierarchy
//! - **Diagnostics** ([`diagnostics`]) - Non-fatal conditions collected in file order
//! - **Progress Monitoring** ([`progress`]) - Phase and task events for interactive callers
//! - **Error Handling** ([`error`]) - Conditions that abort a load

pub mod annotation;
pub mod assembly;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod progress;
