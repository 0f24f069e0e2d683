//! Fixed-column PDB `ATOM`/`HETATM` reader.

use glam::Vec3;

use super::element::Element;
use super::{Atom, StructureError};

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn coordinate(
    line: &str,
    start: usize,
    end: usize,
    field: &'static str,
    line_number: usize,
) -> Result<f32, StructureError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| StructureError::InvalidField {
        line: line_number,
        field,
        value: value.to_owned(),
    })
}

/// Read every atom of the first model.
pub(crate) fn read_atoms(text: &str) -> Result<Vec<Atom>, StructureError> {
    let mut atoms = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let record = slice_and_trim(line, 0, 6);
        if record == "ENDMDL" && !atoms.is_empty() {
            break;
        }
        let hetero = match record {
            "ATOM" => false,
            "HETATM" => true,
            _ => continue,
        };
        let line_number = index + 1;

        let position = Vec3::new(
            coordinate(line, 30, 38, "x", line_number)?,
            coordinate(line, 38, 46, "y", line_number)?,
            coordinate(line, 46, 54, "z", line_number)?,
        );

        // Atom names keep their padding; alignment encodes the element.
        let name = line.get(12..16.min(line.len())).unwrap_or("");
        let element = match slice_and_trim(line, 76, 78) {
            "" => Element::from_atom_name(name),
            symbol => Element::from_symbol(symbol),
        };

        atoms.push(Atom {
            name: name.trim().to_owned(),
            position,
            element,
            hetero,
        });
    }

    Ok(atoms)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CRAMBIN_HEAD: &str = "\
HEADER    PLANT PROTEIN                           30-APR-81   1CRN
ATOM      1  N   THR A   1      17.047  14.099   3.625  1.00 13.79           N
ATOM      2  CA  THR A   1      16.967  12.784   4.338  1.00 10.80           C
ATOM      3  OG1 THR A   1      15.685  12.755   5.133  1.00 15.06           O
HETATM  328 CA    CA A 101      10.000  10.000  10.000  1.00 20.00
END
";

    #[test]
    fn reads_fixed_columns() {
        let atoms = read_atoms(CRAMBIN_HEAD).unwrap();
        assert_eq!(atoms.len(), 4);
        assert_eq!(atoms[0].element, Element::N);
        assert_eq!(atoms[1].name, "CA");
        assert_eq!(atoms[1].element, Element::C);
        assert!((atoms[2].position - Vec3::new(15.685, 12.755, 5.133)).length() < 1e-4);
        assert!(atoms[3].hetero);
        assert_eq!(atoms[3].element, Element::Ca);
    }

    #[test]
    fn stops_after_first_model() {
        let text = "\
MODEL        1
ATOM      1  N   GLY A   1       0.000   0.000   0.000  1.00  0.00           N
ENDMDL
MODEL        2
ATOM      1  N   GLY A   1       5.000   5.000   5.000  1.00  0.00           N
ENDMDL
";
        let atoms = read_atoms(text).unwrap();
        assert_eq!(atoms.len(), 1);
        assert_eq!(atoms[0].position, Vec3::ZERO);
    }

    #[test]
    fn bad_coordinate_reports_line() {
        let text = "REMARK\nATOM      1  N   GLY A   1       0.000   abcdef   0.000\n";
        let err = read_atoms(text).unwrap_err();
        assert!(matches!(
            err,
            StructureError::InvalidField { line: 2, field: "y", .. }
        ));
    }
}
