use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::Atom;
use crate::core::models::molecule::{MolHeader, Molecule};
use crate::core::models::topology::Bond;
use nalgebra::Point3;
use std::fmt;
use std::io::{self, BufRead};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Index of the counts line within the non-blank line sequence.
const COUNTS_LINE_INDEX: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Atoms,
    Bonds,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atoms => write!(f, "atom"),
            Self::Bonds => write!(f, "bond"),
        }
    }
}

#[derive(Debug, Error)]
pub enum MolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: MolParseErrorKind },
    #[error("File ends inside the {section} block: expected {expected} record(s), found {found}")]
    Truncated {
        section: Section,
        expected: usize,
        found: usize,
    },
    #[error("Unsupported table version on line {line}: only V2000 atom/bond tables can be read")]
    UnsupportedVersion { line: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MolParseErrorKind {
    #[error("Invalid integer for {field} in columns {columns} (value: '{value}')")]
    InvalidInt {
        field: &'static str,
        columns: &'static str,
        value: String,
    },
    #[error("Invalid number for {field} in columns {columns} (value: '{value}')")]
    InvalidFloat {
        field: &'static str,
        columns: &'static str,
        value: String,
    },
    #[error("Chiral flag in columns 13-15 must be 0 or 1 (value: '{value}')")]
    InvalidChiralFlag { value: String },
    #[error("Counts line is missing")]
    MissingCountsLine,
}

/// A fixed-width field: 0-based half-open byte range plus a 1-based label for messages.
struct Column {
    field: &'static str,
    start: usize,
    end: usize,
    columns: &'static str,
}

impl Column {
    const fn new(field: &'static str, start: usize, end: usize, columns: &'static str) -> Self {
        Self {
            field,
            start,
            end,
            columns,
        }
    }
}

const ATOM_COUNT: Column = Column::new("atom count", 0, 3, "1-3");
const BOND_COUNT: Column = Column::new("bond count", 3, 6, "4-6");
const ATOM_LIST_COUNT: Column = Column::new("atom list count", 6, 9, "7-9");
const CHIRAL_FLAG: Column = Column::new("chiral flag", 12, 15, "13-15");
const VERSION: Column = Column::new("version", 33, 36, "34-36");

const ATOM_X: Column = Column::new("x coordinate", 0, 10, "1-10");
const ATOM_Y: Column = Column::new("y coordinate", 10, 20, "11-20");
const ATOM_Z: Column = Column::new("z coordinate", 20, 30, "21-30");
const ATOM_LABEL: Column = Column::new("atom label", 31, 34, "32-34");
const ATOM_CHARGE: Column = Column::new("charge code", 36, 39, "37-39");

const BOND_FROM: Column = Column::new("first atom", 0, 3, "1-3");
const BOND_TO: Column = Column::new("second atom", 3, 6, "4-6");
const BOND_ORDER: Column = Column::new("bond type", 6, 9, "7-9");
const BOND_STEREO: Column = Column::new("bond stereo", 9, 12, "10-12");
const BOND_TOPOLOGY: Column = Column::new("bond topology", 15, 18, "16-18");
const BOND_REACTING_CENTER: Column = Column::new("reacting center status", 18, 21, "19-21");

#[derive(Debug, Clone, PartialEq, Eq)]
struct SourceLine {
    number: usize,
    text: String,
}

impl SourceLine {
    /// Raw field text. Columns count characters, not bytes. Ranges past the
    /// end of the line are clamped, so a short line yields a short or empty
    /// field rather than an error.
    fn column(&self, col: &Column) -> &str {
        let offset = |chars: usize| {
            self.text
                .char_indices()
                .nth(chars)
                .map_or(self.text.len(), |(i, _)| i)
        };
        &self.text[offset(col.start)..offset(col.end)]
    }

    fn field(&self, col: &Column) -> &str {
        self.column(col).trim()
    }

    fn int<T: FromStr>(&self, col: &Column) -> Result<T, MolError> {
        let value = self.field(col);
        value.parse().map_err(|_| MolError::Parse {
            line: self.number,
            kind: MolParseErrorKind::InvalidInt {
                field: col.field,
                columns: col.columns,
                value: value.into(),
            },
        })
    }

    /// Like [`SourceLine::int`], but a blank or absent field reads as 0.
    fn int_or_zero(&self, col: &Column) -> Result<i32, MolError> {
        if self.field(col).is_empty() {
            Ok(0)
        } else {
            self.int(col)
        }
    }

    fn coordinate(&self, col: &Column) -> Result<f64, MolError> {
        let value = self.field(col);
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(MolError::Parse {
                line: self.number,
                kind: MolParseErrorKind::InvalidFloat {
                    field: col.field,
                    columns: col.columns,
                    value: value.into(),
                },
            }),
        }
    }
}

pub struct MolFile;

impl MolecularFile for MolFile {
    type Error = MolError;

    fn read_from(reader: &mut impl BufRead) -> Result<Molecule, Self::Error> {
        let lines = collect_content_lines(reader)?;
        parse_lines(&lines)
    }
}

fn collect_content_lines(reader: &mut impl BufRead) -> Result<Vec<SourceLine>, MolError> {
    let mut lines = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let text = line?;
        if text.trim().is_empty() {
            continue;
        }
        lines.push(SourceLine { number: i + 1, text });
    }
    Ok(lines)
}

fn parse_lines(lines: &[SourceLine]) -> Result<Molecule, MolError> {
    let counts_line = lines.get(COUNTS_LINE_INDEX).ok_or_else(|| MolError::Parse {
        line: lines.last().map_or(1, |l| l.number + 1),
        kind: MolParseErrorKind::MissingCountsLine,
    })?;

    let title = lines[0].text.trim().to_string();
    let header = parse_counts(counts_line, title)?;
    debug!(
        "Counts line {}: {} atom(s), {} bond(s), chiral={}",
        counts_line.number, header.atom_count, header.bond_count, header.is_chiral
    );

    let atom_start = COUNTS_LINE_INDEX + 1;
    let bond_start = atom_start + header.atom_count;
    let bond_end = bond_start + header.bond_count;

    let atoms_found = lines.len().saturating_sub(atom_start);
    if atoms_found < header.atom_count {
        return Err(MolError::Truncated {
            section: Section::Atoms,
            expected: header.atom_count,
            found: atoms_found,
        });
    }
    let bonds_found = lines.len() - bond_start;
    if bonds_found < header.bond_count {
        return Err(MolError::Truncated {
            section: Section::Bonds,
            expected: header.bond_count,
            found: bonds_found,
        });
    }

    let atoms = lines[atom_start..bond_start]
        .iter()
        .enumerate()
        .map(|(i, src)| parse_atom(src, i + 1, atom_start + i))
        .collect::<Result<Vec<_>, _>>()?;
    let bonds = lines[bond_start..bond_end]
        .iter()
        .map(parse_bond)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Molecule::new(header, atoms, bonds))
}

fn parse_counts(src: &SourceLine, title: String) -> Result<MolHeader, MolError> {
    if src.text.contains("V3000") {
        return Err(MolError::UnsupportedVersion { line: src.number });
    }

    let atom_count = src.int::<usize>(&ATOM_COUNT)?;
    let bond_count = src.int::<usize>(&BOND_COUNT)?;
    let atom_list_count = src.int::<usize>(&ATOM_LIST_COUNT)?;
    let is_chiral = match src.int::<u8>(&CHIRAL_FLAG) {
        Ok(0) => false,
        Ok(1) => true,
        _ => {
            return Err(MolError::Parse {
                line: src.number,
                kind: MolParseErrorKind::InvalidChiralFlag {
                    value: src.field(&CHIRAL_FLAG).into(),
                },
            });
        }
    };

    Ok(MolHeader {
        title,
        atom_count,
        bond_count,
        atom_list_count,
        is_chiral,
        version_tag: src.column(&VERSION).to_string(),
    })
}

fn parse_atom(src: &SourceLine, index: usize, line_index: usize) -> Result<Atom, MolError> {
    let x = src.coordinate(&ATOM_X)?;
    let y = src.coordinate(&ATOM_Y)?;
    let z = src.coordinate(&ATOM_Z)?;
    let charge_code = src.int::<i32>(&ATOM_CHARGE)?;
    Ok(Atom::new(
        index,
        src.field(&ATOM_LABEL),
        line_index,
        Point3::new(x, y, z),
        charge_code,
    ))
}

fn parse_bond(src: &SourceLine) -> Result<Bond, MolError> {
    let from_atom = src.int::<usize>(&BOND_FROM)?;
    let to_atom = src.int::<usize>(&BOND_TO)?;
    let mut bond = Bond::new(from_atom, to_atom, src.int_or_zero(&BOND_ORDER)?, src.number);
    bond.stereo_code = src.int_or_zero(&BOND_STEREO)?;
    bond.topology_code = src.int_or_zero(&BOND_TOPOLOGY)?;
    bond.reacting_center_code = src.int_or_zero(&BOND_REACTING_CENTER)?;
    Ok(bond)
}
