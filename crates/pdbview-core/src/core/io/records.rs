//! Fixed-column record layouts of the PDB flat-file format.
//!
//! Column ranges below are 0-based and half-open; error messages report them
//! 1-based and inclusive, the way the format documentation numbers columns.

use crate::core::models::annotation::{AtomSpecifier, ChainSequence, ExplicitLink};
use crate::core::models::atom::{Atom, Element};
use crate::core::models::secondary::{
    ResidueSpecifier, SecondaryStructure, SecondaryStructureKind,
};
use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Header,
    Title,
    Remark,
    Atom,
    HetAtom,
    Link,
    Conect,
    SeqRes,
    Helix,
    Sheet,
    Model,
    EndModel,
    Ter,
    Other,
}

impl RecordKind {
    /// Classifies a line by its leading six columns, whitespace removed.
    pub fn classify(line: &str) -> Self {
        match clamp(line, 0, 6).trim() {
            "HEADER" => Self::Header,
            "TITLE" => Self::Title,
            "REMARK" => Self::Remark,
            "ATOM" => Self::Atom,
            "HETATM" => Self::HetAtom,
            "LINK" => Self::Link,
            "CONECT" => Self::Conect,
            "SEQRES" => Self::SeqRes,
            "HELIX" => Self::Helix,
            "SHEET" => Self::Sheet,
            "MODEL" => Self::Model,
            "ENDMDL" => Self::EndModel,
            "TER" => Self::Ter,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Header => "HEADER",
            Self::Title => "TITLE",
            Self::Remark => "REMARK",
            Self::Atom => "ATOM",
            Self::HetAtom => "HETATM",
            Self::Link => "LINK",
            Self::Conect => "CONECT",
            Self::SeqRes => "SEQRES",
            Self::Helix => "HELIX",
            Self::Sheet => "SHEET",
            Self::Model => "MODEL",
            Self::EndModel => "ENDMDL",
            Self::Ter => "TER",
            Self::Other => "other",
        })
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Line ends before columns {columns}")]
    LineTooShort { columns: String },
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
}

fn columns_label(start: usize, end: usize) -> String {
    format!("{}-{}", start + 1, end)
}

/// Columns `start..end`, cut short at the end of the line.
fn clamp(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("")
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    clamp(line, start, end).trim()
}

fn char_at(line: &str, col: usize) -> Option<char> {
    clamp(line, col, col + 1)
        .chars()
        .next()
        .filter(|c| !c.is_whitespace())
}

fn required_str(line: &str, start: usize, end: usize) -> Result<&str, RecordError> {
    if line.len() < end {
        return Err(RecordError::LineTooShort {
            columns: columns_label(start, end),
        });
    }
    let value = slice_and_trim(line, start, end);
    if value.is_empty() {
        return Err(RecordError::MissingRequiredField {
            columns: columns_label(start, end),
        });
    }
    Ok(value)
}

fn required_int<T: FromStr>(line: &str, start: usize, end: usize) -> Result<T, RecordError> {
    let value = required_str(line, start, end)?;
    value.parse().map_err(|_| RecordError::InvalidInt {
        columns: columns_label(start, end),
        value: value.into(),
    })
}

fn required_float(line: &str, start: usize, end: usize) -> Result<f64, RecordError> {
    let value = required_str(line, start, end)?;
    value.parse().map_err(|_| RecordError::InvalidFloat {
        columns: columns_label(start, end),
        value: value.into(),
    })
}

fn optional_int<T: FromStr>(line: &str, start: usize, end: usize) -> Result<Option<T>, RecordError> {
    let value = slice_and_trim(line, start, end);
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| RecordError::InvalidInt {
        columns: columns_label(start, end),
        value: value.into(),
    })
}

fn optional_float(line: &str, start: usize, end: usize) -> Result<Option<f64>, RecordError> {
    let value = slice_and_trim(line, start, end);
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| RecordError::InvalidFloat {
        columns: columns_label(start, end),
        value: value.into(),
    })
}

/// Free text in `start..end`, clamped to the line and kept verbatim.
pub fn text_field(line: &str, start: usize, end: usize) -> &str {
    clamp(line, start, end)
}

pub fn header_text(line: &str) -> &str {
    text_field(line, 10, 50)
}

pub fn title_text(line: &str) -> &str {
    text_field(line, 10, 80)
}

pub fn remark_text(line: &str) -> &str {
    text_field(line, 11, 79)
}

/// Parses an ATOM or HETATM record.
pub fn parse_atom(line: &str, is_hetero: bool) -> Result<Atom, RecordError> {
    let serial = required_int(line, 6, 11)?;
    let name = required_str(line, 12, 16)?;
    let residue_number = required_int(line, 22, 26)?;
    let x = required_float(line, 30, 38)?;
    let y = required_float(line, 38, 46)?;
    let z = required_float(line, 46, 54)?;
    let occupancy = optional_float(line, 54, 60)?;
    let temp_factor = optional_float(line, 60, 66)?;

    let element = slice_and_trim(line, 76, 78)
        .parse()
        .unwrap_or_else(|_| Element::from_name_field(clamp(line, 12, 16)));

    Ok(Atom {
        serial,
        name: name.to_string(),
        alt_loc: char_at(line, 16),
        element,
        position: Point3::new(x, y, z),
        residue_name: slice_and_trim(line, 17, 20).to_string(),
        residue_number,
        insertion_code: char_at(line, 26),
        chain_id: char_at(line, 21).unwrap_or(' '),
        occupancy,
        temp_factor,
        is_hetero,
    })
}

/// Parses a CONECT record into one `(serial, bonded serial)` pair per filled slot.
pub fn parse_conect(line: &str) -> Result<Vec<ExplicitLink>, RecordError> {
    const BONDED_SLOTS: [(usize, usize); 4] = [(11, 16), (16, 21), (21, 26), (26, 31)];

    let serial_a = required_int(line, 6, 11)?;
    let mut links = Vec::with_capacity(BONDED_SLOTS.len());
    for (start, end) in BONDED_SLOTS {
        if let Some(serial_b) = optional_int(line, start, end)? {
            links.push(ExplicitLink::Connect { serial_a, serial_b });
        }
    }
    Ok(links)
}

/// Parses a LINK record.
pub fn parse_link(line: &str) -> Result<ExplicitLink, RecordError> {
    let first = AtomSpecifier {
        atom_name: required_str(line, 12, 16)?.to_string(),
        alt_loc: char_at(line, 16),
        residue: ResidueSpecifier::new(
            slice_and_trim(line, 17, 20),
            char_at(line, 21).unwrap_or(' '),
            required_int(line, 22, 26)?,
            char_at(line, 26),
        ),
    };
    let second = AtomSpecifier {
        atom_name: required_str(line, 42, 46)?.to_string(),
        alt_loc: char_at(line, 46),
        residue: ResidueSpecifier::new(
            slice_and_trim(line, 47, 50),
            char_at(line, 51).unwrap_or(' '),
            required_int(line, 52, 56)?,
            char_at(line, 56),
        ),
    };
    Ok(ExplicitLink::Link {
        first,
        second,
        distance: optional_float(line, 73, 78)?,
    })
}

/// Parses a HELIX record into an unresolved range.
pub fn parse_helix(line: &str) -> Result<SecondaryStructure, RecordError> {
    let start = ResidueSpecifier::new(
        slice_and_trim(line, 15, 18),
        char_at(line, 19).unwrap_or(' '),
        required_int(line, 21, 25)?,
        char_at(line, 25),
    );
    let end = ResidueSpecifier::new(
        slice_and_trim(line, 27, 30),
        char_at(line, 31).unwrap_or(' '),
        required_int(line, 33, 37)?,
        char_at(line, 37),
    );
    let kind = SecondaryStructureKind::Helix {
        class: optional_int(line, 38, 40)?,
    };

    let mut helix = SecondaryStructure::new(kind, slice_and_trim(line, 11, 14), start, end);
    helix.serial = optional_int(line, 7, 10)?;
    helix.length = optional_int(line, 71, 76)?;
    Ok(helix)
}

/// Parses a SHEET record (one strand) into an unresolved range.
pub fn parse_sheet(line: &str) -> Result<SecondaryStructure, RecordError> {
    let strand = required_int(line, 7, 10)?;
    let start = ResidueSpecifier::new(
        slice_and_trim(line, 17, 20),
        char_at(line, 21).unwrap_or(' '),
        required_int(line, 22, 26)?,
        char_at(line, 26),
    );
    let end = ResidueSpecifier::new(
        slice_and_trim(line, 28, 31),
        char_at(line, 32).unwrap_or(' '),
        required_int(line, 33, 37)?,
        char_at(line, 37),
    );
    let kind = SecondaryStructureKind::Sheet {
        strand,
        num_strands: optional_int(line, 14, 16)?,
        sense: optional_int(line, 38, 40)?,
    };

    let mut sheet = SecondaryStructure::new(kind, slice_and_trim(line, 11, 14), start, end);
    sheet.serial = Some(strand);
    Ok(sheet)
}

/// Parses a SEQRES record. The result holds only the names listed on this line.
/// Continuation lines are merged by chain, so the serial column is not read.
pub fn parse_seqres(line: &str) -> Result<ChainSequence, RecordError> {
    let mut sequence = ChainSequence::new(char_at(line, 11).unwrap_or(' '));
    sequence.declared_length = optional_int(line, 13, 17)?;
    sequence.residues = clamp(line, 19, 70)
        .split_whitespace()
        .map(str::to_string)
        .collect();
    Ok(sequence)
}

/// Parses the optional serial of a MODEL record.
pub fn parse_model_serial(line: &str) -> Result<Option<isize>, RecordError> {
    optional_int(line, 10, 14)
}
