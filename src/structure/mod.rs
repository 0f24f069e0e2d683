//! Molecular structure loading.
//!
//! A [`StructureModel`] is built once from the raw bytes of a PDB or mmCIF
//! file. Parsing keeps only what the sphere renderer needs: per-atom
//! position, element and the bounding sphere used to frame the camera.
//! The atoms are uploaded to a GPU storage buffer at construction and the
//! model is immutable afterwards.

/// Element table (radii and colours).
pub mod element;
mod mmcif;
mod pdb;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::gpu::context::Context;
use crate::renderer::sphere::SphereInstance;

pub use element::Element;

/// Errors raised while turning structure bytes into a model.
#[derive(Debug)]
pub enum StructureError {
    /// The byte buffer was empty or whitespace only.
    Empty,
    /// The bytes are not valid UTF-8 text.
    Encoding(std::str::Utf8Error),
    /// Neither PDB records nor an mmCIF data block were found.
    UnrecognizedFormat,
    /// The `_atom_site` loop lacks a required column.
    MissingColumn(&'static str),
    /// A field could not be parsed.
    InvalidField {
        /// 1-based line number.
        line: usize,
        /// Name of the offending field.
        field: &'static str,
        /// Raw value as found in the file.
        value: String,
    },
    /// The file parsed but contained no atoms.
    NoAtoms,
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "structure data is empty"),
            Self::Encoding(e) => write!(f, "structure data is not text: {e}"),
            Self::UnrecognizedFormat => {
                write!(f, "structure data is neither PDB nor mmCIF")
            }
            Self::MissingColumn(column) => {
                write!(f, "_atom_site loop has no {column} column")
            }
            Self::InvalidField { line, field, value } => {
                write!(f, "line {line}: invalid {field} value '{value}'")
            }
            Self::NoAtoms => write!(f, "structure contains no atoms"),
        }
    }
}

impl std::error::Error for StructureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encoding(e) => Some(e),
            _ => None,
        }
    }
}

/// Text format of a structure file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFormat {
    /// Fixed-column Protein Data Bank format.
    Pdb,
    /// Macromolecular CIF.
    Mmcif,
}

impl StructureFormat {
    /// Guess the format from file contents.
    #[must_use]
    pub fn detect(text: &str) -> Option<Self> {
        let first = text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'));
        if first.is_some_and(|line| line.starts_with("data_"))
            || text.contains("_atom_site.")
        {
            return Some(Self::Mmcif);
        }
        if text
            .lines()
            .any(|line| line.starts_with("ATOM") || line.starts_with("HETATM"))
        {
            return Some(Self::Pdb);
        }
        None
    }
}

/// A single atom as read from the file.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Atom name (`CA`, `OG1`, ...).
    pub name: String,
    /// Cartesian position in ångström.
    pub position: Vec3,
    /// Chemical element.
    pub element: Element,
    /// `HETATM` record rather than `ATOM`.
    pub hetero: bool,
}

/// CPU-side result of parsing structure bytes.
#[derive(Debug, Clone)]
pub struct ParsedStructure {
    /// Detected file format.
    pub format: StructureFormat,
    /// Atoms of the first model, in file order.
    pub atoms: Vec<Atom>,
    /// Centroid of the atom positions.
    pub center: Vec3,
    /// Radius of the sphere around `center` enclosing every atom,
    /// including its van der Waals radius.
    pub radius: f32,
}

impl ParsedStructure {
    /// Parse raw structure bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError`] if the bytes are empty, not text, in an
    /// unknown format, malformed, or contain no atoms.
    pub fn parse(bytes: &[u8]) -> Result<Self, StructureError> {
        let text = std::str::from_utf8(bytes).map_err(StructureError::Encoding)?;
        if text.trim().is_empty() {
            return Err(StructureError::Empty);
        }
        let format =
            StructureFormat::detect(text).ok_or(StructureError::UnrecognizedFormat)?;
        let atoms = match format {
            StructureFormat::Pdb => pdb::read_atoms(text)?,
            StructureFormat::Mmcif => mmcif::read_atoms(text)?,
        };
        if atoms.is_empty() {
            return Err(StructureError::NoAtoms);
        }

        let center =
            atoms.iter().map(|a| a.position).sum::<Vec3>() / atoms.len() as f32;
        let radius = atoms
            .iter()
            .map(|a| (a.position - center).length() + a.element.radius())
            .fold(0.0f32, f32::max);

        Ok(Self {
            format,
            atoms,
            center,
            radius,
        })
    }

    /// Per-atom GPU instances in file order.
    #[must_use]
    pub fn instances(&self) -> Vec<SphereInstance> {
        self.atoms
            .iter()
            .map(|atom| {
                let [r, g, b] = atom.element.color();
                SphereInstance {
                    center: atom.position.extend(atom.element.radius()).to_array(),
                    color: [r, g, b, 1.0],
                }
            })
            .collect()
    }
}

static NEXT_MODEL_ID: AtomicU64 = AtomicU64::new(1);

/// Immutable parsed structure plus its GPU atom buffer.
///
/// Views built from a model remember its [`id`](Self::id) and refuse to
/// render a different one.
pub struct StructureModel {
    id: u64,
    structure: ParsedStructure,
    atom_buffer: wgpu::Buffer,
}

impl StructureModel {
    /// Parse `bytes` and upload the atoms.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError`] if the bytes do not describe a structure.
    pub fn new(context: &Context, bytes: &[u8]) -> Result<Self, StructureError> {
        let structure = ParsedStructure::parse(bytes)?;
        let instances = structure.instances();
        let atom_buffer =
            context
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Structure Atom Buffer"),
                    contents: bytemuck::cast_slice(&instances),
                    usage: wgpu::BufferUsages::STORAGE,
                });

        log::info!(
            "loaded {:?} structure: {} atoms, radius {:.1} Å",
            structure.format,
            structure.atoms.len(),
            structure.radius
        );

        Ok(Self {
            id: NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed),
            structure,
            atom_buffer,
        })
    }

    /// Process-unique identifier of this model.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The parsed structure.
    #[must_use]
    pub fn structure(&self) -> &ParsedStructure {
        &self.structure
    }

    /// Number of atoms (and sphere instances).
    #[must_use]
    pub fn atom_count(&self) -> u32 {
        self.structure.atoms.len() as u32
    }

    /// Storage buffer holding one [`SphereInstance`] per atom.
    #[must_use]
    pub fn atom_buffer(&self) -> &wgpu::Buffer {
        &self.atom_buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PDB: &str = "\
ATOM      1  N   GLY A   1      -1.000   0.000   0.000  1.00  0.00           N
ATOM      2  CA  GLY A   1       1.000   0.000   0.000  1.00  0.00           C
";

    #[test]
    fn detects_formats() {
        assert_eq!(StructureFormat::detect(PDB), Some(StructureFormat::Pdb));
        assert_eq!(
            StructureFormat::detect("data_1ABC\n#\n"),
            Some(StructureFormat::Mmcif)
        );
        assert_eq!(StructureFormat::detect("hello world"), None);
    }

    #[test]
    fn bounding_sphere_encloses_atoms() {
        let parsed = ParsedStructure::parse(PDB.as_bytes()).unwrap();
        assert_eq!(parsed.center, Vec3::ZERO);
        assert!((parsed.radius - (1.0 + Element::C.radius())).abs() < 1e-5);
        assert_eq!(parsed.instances().len(), 2);
        assert_eq!(parsed.instances()[1].center[3], Element::C.radius());
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert!(matches!(
            ParsedStructure::parse(b"  \n"),
            Err(StructureError::Empty)
        ));
        assert!(matches!(
            ParsedStructure::parse(b"not a structure"),
            Err(StructureError::UnrecognizedFormat)
        ));
        assert!(matches!(
            ParsedStructure::parse(&[0xff, 0xfe, 0x00]),
            Err(StructureError::Encoding(_))
        ));
        assert!(matches!(
            ParsedStructure::parse(b"data_empty\n_entry.id X\n"),
            Err(StructureError::NoAtoms)
        ));
    }
}
