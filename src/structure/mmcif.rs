//! `_atom_site` loop reader for mmCIF files.

use glam::Vec3;

use super::element::Element;
use super::{Atom, StructureError};

const ATOM_SITE: &str = "_atom_site.";

/// Split one CIF data line into whitespace-separated values.
///
/// Single- or double-quoted values may contain spaces; a quote only closes
/// a value when followed by whitespace or the end of the line.
fn tokenize(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let quote = bytes[i];
        if quote == b'\'' || quote == b'"' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len()
                && !(bytes[end] == quote
                    && bytes.get(end + 1).map_or(true, u8::is_ascii_whitespace))
            {
                end += 1;
            }
            tokens.push(&line[start..end]);
            i = end + 1;
        } else {
            let start = i;
            while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            tokens.push(&line[start..i]);
        }
    }

    tokens
}

/// Column indices of the `_atom_site` items the reader uses.
struct AtomSiteColumns {
    group: Option<usize>,
    x: usize,
    y: usize,
    z: usize,
    type_symbol: Option<usize>,
    atom_name: Option<usize>,
    model: Option<usize>,
}

impl AtomSiteColumns {
    fn locate(tags: &[&str]) -> Result<Self, StructureError> {
        let find = |item: &str| {
            tags.iter()
                .position(|tag| tag.strip_prefix(ATOM_SITE) == Some(item))
        };
        let required = |item: &'static str| {
            find(item).ok_or(StructureError::MissingColumn(item))
        };

        Ok(Self {
            group: find("group_PDB"),
            x: required("Cartn_x")?,
            y: required("Cartn_y")?,
            z: required("Cartn_z")?,
            type_symbol: find("type_symbol"),
            atom_name: find("label_atom_id").or_else(|| find("auth_atom_id")),
            model: find("pdbx_PDB_model_num"),
        })
    }
}

fn is_null(value: &str) -> bool {
    value == "?" || value == "."
}

struct RowReader<'a> {
    columns: AtomSiteColumns,
    first_model: Option<&'a str>,
    atoms: Vec<Atom>,
}

impl<'a> RowReader<'a> {
    fn push(&mut self, row: &[&'a str], line: usize) -> Result<(), StructureError> {
        if let Some(model) = self.columns.model.map(|i| row[i]) {
            match self.first_model {
                None => self.first_model = Some(model),
                Some(first) if first != model => return Ok(()),
                Some(_) => {}
            }
        }

        let coordinate = |index: usize, field: &'static str| {
            row[index]
                .parse::<f32>()
                .map_err(|_| StructureError::InvalidField {
                    line,
                    field,
                    value: row[index].to_owned(),
                })
        };
        let position = Vec3::new(
            coordinate(self.columns.x, "Cartn_x")?,
            coordinate(self.columns.y, "Cartn_y")?,
            coordinate(self.columns.z, "Cartn_z")?,
        );

        let name = self.columns.atom_name.map_or("", |i| row[i]);
        let element = match self.columns.type_symbol.map(|i| row[i]) {
            Some(symbol) if !is_null(symbol) => Element::from_symbol(symbol),
            _ => Element::from_atom_name(name),
        };

        self.atoms.push(Atom {
            name: name.to_owned(),
            position,
            element,
            hetero: self.columns.group.is_some_and(|i| row[i] == "HETATM"),
        });
        Ok(())
    }
}

/// Read every atom of the first model in the `_atom_site` loop.
pub(crate) fn read_atoms(text: &str) -> Result<Vec<Atom>, StructureError> {
    let mut lines = text.lines().enumerate().peekable();

    while let Some((_, line)) = lines.next() {
        if line.trim() != "loop_" {
            continue;
        }

        let mut tags: Vec<&str> = Vec::new();
        while let Some(&(_, next)) = lines.peek() {
            let next = next.trim();
            if !next.starts_with('_') {
                break;
            }
            tags.extend(tokenize(next).first());
            let _ = lines.next();
        }
        if !tags.first().is_some_and(|tag| tag.starts_with(ATOM_SITE)) {
            continue;
        }

        let mut reader = RowReader {
            columns: AtomSiteColumns::locate(&tags)?,
            first_model: None,
            atoms: Vec::new(),
        };
        let mut row: Vec<&str> = Vec::with_capacity(tags.len());
        let mut row_line = 0;

        while let Some(&(index, next)) = lines.peek() {
            let next = next.trim();
            if next.starts_with('#')
                || next.starts_with('_')
                || next.starts_with("loop_")
                || next.starts_with("data_")
            {
                break;
            }
            let _ = lines.next();
            if next.is_empty() {
                continue;
            }
            if row.is_empty() {
                row_line = index + 1;
            }
            // Rows may wrap across lines; values accumulate until complete.
            row.extend(tokenize(next));
            while row.len() >= tags.len() {
                let rest = row.split_off(tags.len());
                reader.push(&row, row_line)?;
                row = rest;
                row_line = index + 1;
            }
        }

        return Ok(reader.atoms);
    }

    Ok(Vec::new())
}
