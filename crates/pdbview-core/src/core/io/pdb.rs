use super::records::{self, RecordError, RecordKind};
use super::traits::StructureFile;
use crate::core::models::annotation::{ChainSequence, ExplicitLink};
use crate::core::models::atom::Atom;
use crate::core::models::secondary::SecondaryStructure;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed {record} record on line {line}: {kind}")]
    Malformed {
        line: usize,
        record: RecordKind,
        #[source]
        kind: RecordError,
    },
}

/// A line that was classified but could not be field-extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    pub line: usize,
    pub record: RecordKind,
    pub error: RecordError,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PdbReadOptions {
    /// Abort on the first malformed record instead of skipping it.
    pub strict: bool,
}

/// Everything the record parser extracts from one PDB stream, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPdb {
    /// ATOM records of the first coordinate model.
    pub atoms: Vec<Atom>,
    /// HETATM records of every coordinate model.
    pub heteroatoms: Vec<Atom>,
    /// CONECT pairs, then LINK records, each in file order.
    pub links: Vec<ExplicitLink>,
    pub secondary_structures: Vec<SecondaryStructure>,
    /// SEQRES residues merged per chain, chains in first-appearance order.
    pub sequences: Vec<ChainSequence>,
    pub metadata: String,
    pub model_count: usize,
    /// Lines skipped because a field could not be extracted.
    pub malformed: Vec<MalformedLine>,
    /// ATOM records ignored because they belong to a later coordinate model.
    pub ignored_atoms: usize,
}

pub struct PdbFile;

impl PdbFile {
    fn read_line(reader: &mut impl BufRead, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
        buf.clear();
        if reader.read_until(b'\n', buf)? == 0 {
            return Ok(None);
        }
        let text = String::from_utf8_lossy(buf);
        Ok(Some(text.trim_end_matches(['\n', '\r']).to_string()))
    }
}

#[derive(Default)]
struct ParseState {
    parsed: ParsedPdb,
    conects: Vec<ExplicitLink>,
    link_records: Vec<ExplicitLink>,
    completed_models: usize,
    inside_model: bool,
}

impl ParseState {
    fn handle(&mut self, kind: RecordKind, line: &str, line_num: usize) -> Result<(), RecordError> {
        match kind {
            RecordKind::Header => self.append_metadata(records::header_text(line)),
            RecordKind::Title => self.append_metadata(records::title_text(line)),
            RecordKind::Remark => self.append_metadata(records::remark_text(line)),
            RecordKind::Atom => {
                if self.completed_models > 0 {
                    self.parsed.ignored_atoms += 1;
                    trace!(line = line_num, "Ignoring ATOM outside the first model");
                } else {
                    self.parsed.atoms.push(records::parse_atom(line, false)?);
                }
            }
            RecordKind::HetAtom => self.parsed.heteroatoms.push(records::parse_atom(line, true)?),
            RecordKind::Conect => self.conects.extend(records::parse_conect(line)?),
            RecordKind::Link => self.link_records.push(records::parse_link(line)?),
            RecordKind::Helix => self
                .parsed
                .secondary_structures
                .push(records::parse_helix(line)?),
            RecordKind::Sheet => self
                .parsed
                .secondary_structures
                .push(records::parse_sheet(line)?),
            RecordKind::SeqRes => self.merge_sequence(records::parse_seqres(line)?),
            RecordKind::Model => {
                let serial = records::parse_model_serial(line)?;
                if self.inside_model {
                    trace!(line = line_num, "MODEL opened before previous ENDMDL");
                }
                trace!(line = line_num, ?serial, "Entering coordinate model");
                self.inside_model = true;
            }
            RecordKind::EndModel => {
                if !self.inside_model {
                    trace!(line = line_num, "ENDMDL without matching MODEL");
                }
                self.completed_models += 1;
                self.inside_model = false;
            }
            RecordKind::Ter | RecordKind::Other => {
                trace!(line = line_num, record = %kind, "Ignoring record");
            }
        }
        Ok(())
    }

    fn append_metadata(&mut self, text: &str) {
        self.parsed.metadata.push_str(text);
        self.parsed.metadata.push('\n');
    }

    fn merge_sequence(&mut self, record: ChainSequence) {
        match self
            .parsed
            .sequences
            .iter_mut()
            .find(|seq| seq.chain_id == record.chain_id)
        {
            Some(existing) => {
                existing.residues.extend(record.residues);
                if existing.declared_length.is_none() {
                    existing.declared_length = record.declared_length;
                }
            }
            None => self.parsed.sequences.push(record),
        }
    }

    fn finish(mut self) -> ParsedPdb {
        let saw_atoms = !self.parsed.atoms.is_empty() || !self.parsed.heteroatoms.is_empty();
        self.parsed.model_count = match self.completed_models {
            0 if saw_atoms => 1,
            n => n,
        };
        self.parsed.links = self.conects;
        self.parsed.links.extend(self.link_records);
        self.parsed
    }
}

impl StructureFile for PdbFile {
    type Output = ParsedPdb;
    type Options = PdbReadOptions;
    type Error = PdbError;

    fn read_from(
        reader: &mut impl BufRead,
        options: &Self::Options,
    ) -> Result<Self::Output, Self::Error> {
        let mut state = ParseState::default();
        let mut buf = Vec::new();
        let mut line_num = 0;

        while let Some(line) = Self::read_line(reader, &mut buf)? {
            line_num += 1;
            let kind = RecordKind::classify(&line);
            if let Err(error) = state.handle(kind, &line, line_num) {
                if options.strict {
                    return Err(PdbError::Malformed {
                        line: line_num,
                        record: kind,
                        kind: error,
                    });
                }
                state.parsed.malformed.push(MalformedLine {
                    line: line_num,
                    record: kind,
                    error,
                });
            }
        }

        Ok(state.finish())
    }
}
