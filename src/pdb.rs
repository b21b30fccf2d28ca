//! Feature vectors and water-to-atom distances from PDB coordinate files.
//!
//! Only the fixed-column `ATOM` and `HETATM` records are read. Waters are
//! `HETATM` records of residue `HOH`, one per residue sequence number. Every
//! other `ATOM`/`HETATM` record that is not a hydrogen counts as an atom.
//! [`feature_split`] keeps every record instead, for building training rows.

use std::collections::HashSet;
use std::io::BufRead;

use tracing::debug;

use crate::error::{NnError, Result};

const ELEMENT_CODES: [(&str, u32); 5] = [("C", 1), ("N", 2), ("O", 3), ("S", 4), ("H", 5)];
const UNKNOWN_ELEMENT: u32 = 6;

const RESIDUE_CODES: [(&str, u32); 21] = [
    ("ALA", 1), ("ARG", 2), ("ASP", 3), ("ASN", 4), ("CYS", 5), ("GLU", 6),
    ("GLY", 7), ("HIS", 8), ("ILE", 9), ("LEU", 10), ("MET", 11), ("LYS", 12),
    ("PHE", 13), ("PRO", 14), ("SEC", 15), ("SER", 16), ("THR", 17),
    ("TYR", 18), ("TRP", 19), ("VAL", 20), ("HOH", 21),
];
const UNKNOWN_RESIDUE: u32 = 22;

/// One coordinate record.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    pub element: String,
    pub residue: String,
    /// `None` when the sequence column is blank or not an integer.
    pub residue_seq: Option<i32>,
    pub position: [f64; 3],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbStructure {
    pub waters: Vec<AtomRecord>,
    pub atoms: Vec<AtomRecord>,
}

/// Columns `range` of `line`, trimmed. Short lines yield an empty field.
fn field(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    line.get(start..end).unwrap_or("").trim()
}

fn parse_number<T: std::str::FromStr>(line_no: usize, name: &str, raw: &str) -> Result<T> {
    raw.parse().map_err(|_| NnError::Pdb {
        line: line_no,
        message: format!("invalid {name} '{raw}'"),
    })
}

fn parse_record(line_no: usize, line: &str) -> Result<AtomRecord> {
    let x = parse_number(line_no, "x coordinate", field(line, 30, 38))?;
    let y = parse_number(line_no, "y coordinate", field(line, 38, 46))?;
    let z = parse_number(line_no, "z coordinate", field(line, 46, 54))?;

    Ok(AtomRecord {
        element: field(line, 76, 78).to_string(),
        residue: field(line, 17, 20).to_string(),
        residue_seq: field(line, 22, 26).parse().ok(),
        position: [x, y, z],
    })
}

struct RawRecord {
    line_no: usize,
    hetatm: bool,
    record: AtomRecord,
}

/// Every `ATOM`/`HETATM` record in file order.
fn read_records<R: BufRead>(reader: R) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let hetatm = line.starts_with("HETATM");
        if !hetatm && !line.starts_with("ATOM") {
            continue;
        }
        records.push(RawRecord { line_no, hetatm, record: parse_record(line_no, &line)? });
    }

    Ok(records)
}

/// Reads waters and non-hydrogen atoms from PDB text.
pub fn parse_pdb<R: BufRead>(reader: R) -> Result<PdbStructure> {
    let mut structure = PdbStructure::default();
    let mut seen_waters = HashSet::new();

    for RawRecord { line_no, hetatm, record } in read_records(reader)? {
        if hetatm && record.residue == "HOH" {
            let seq = record.residue_seq.ok_or_else(|| NnError::Pdb {
                line: line_no,
                message: "water without a residue sequence number".to_string(),
            })?;
            if seen_waters.insert(seq) {
                structure.waters.push(record);
            }
        } else if record.element != "H" {
            structure.atoms.push(record);
        }
    }

    debug!(
        waters = structure.waters.len(),
        atoms = structure.atoms.len(),
        "parsed PDB records"
    );
    Ok(structure)
}

pub fn parse_pdb_file(path: &str) -> Result<PdbStructure> {
    let file = std::fs::File::open(path)?;
    parse_pdb(std::io::BufReader::new(file))
}

/// Feature rows for every record, split into waters (residue `HOH`) and the
/// rest. Hydrogens and repeated water sequence numbers are kept.
pub fn feature_split<R: BufRead>(reader: R) -> Result<(Vec<Vec<f64>>, Vec<Vec<f64>>)> {
    let (waters, atoms): (Vec<_>, Vec<_>) = read_records(reader)?
        .into_iter()
        .map(|raw| raw.record)
        .partition(|record| record.residue == "HOH");

    debug!(waters = waters.len(), atoms = atoms.len(), "split PDB feature rows");
    Ok((
        waters.iter().map(atom_features).collect(),
        atoms.iter().map(atom_features).collect(),
    ))
}

/// Euclidean distance between two points.
pub fn distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a.iter().zip(b).map(|(p, q)| (p - q).powi(2)).sum::<f64>().sqrt()
}

/// Distance from each water to its nearest atom; `f64::INFINITY` when there
/// are no atoms.
pub fn closest_distances(waters: &[AtomRecord], atoms: &[AtomRecord]) -> Vec<f64> {
    waters.iter()
        .map(|w| {
            atoms.iter()
                .map(|a| distance(&w.position, &a.position))
                .fold(f64::INFINITY, f64::min)
        })
        .collect()
}

/// The `n` smallest water-to-atom distances for each water, ascending.
pub fn nth_closest_distances(waters: &[AtomRecord], atoms: &[AtomRecord], n: usize) -> Vec<Vec<f64>> {
    waters.iter()
        .map(|w| {
            let mut dist: Vec<f64> = atoms.iter()
                .map(|a| distance(&w.position, &a.position))
                .collect();
            dist.sort_by(f64::total_cmp);
            dist.truncate(n);
            dist
        })
        .collect()
}

fn lookup(table: &[(&str, u32)], key: &str, fallback: u32) -> u32 {
    table.iter()
        .find(|(name, _)| *name == key)
        .map_or(fallback, |&(_, code)| code)
}

/// `[cos k, sin k]` for the element's code `k`.
pub fn encode_atom(element: &str) -> [f64; 2] {
    let k = lookup(&ELEMENT_CODES, element, UNKNOWN_ELEMENT) as f64;
    [k.cos(), k.sin()]
}

/// `[sin k, cos k]` for the residue's code `k`.
pub fn encode_residue(residue: &str) -> [f64; 2] {
    let k = lookup(&RESIDUE_CODES, residue, UNKNOWN_RESIDUE) as f64;
    [k.sin(), k.cos()]
}

/// Element encoding, residue encoding, then x, y, z.
pub fn atom_features(record: &AtomRecord) -> Vec<f64> {
    let mut features = Vec::with_capacity(7);
    features.extend(encode_atom(&record.element));
    features.extend(encode_residue(&record.residue));
    features.extend(record.position);
    features
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl DistanceSummary {
    /// `None` for an empty slice.
    pub fn from_distances(distances: &[f64]) -> Option<DistanceSummary> {
        if distances.is_empty() {
            return None;
        }
        Some(DistanceSummary {
            count: distances.len(),
            mean: distances.iter().sum::<f64>() / distances.len() as f64,
            min: distances.iter().cloned().fold(f64::INFINITY, f64::min),
            max: distances.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}
