//! Chemical element lookup: van der Waals radius and CPK colour.

/// A chemical element recognised by the structure readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// Hydrogen.
    H,
    /// Carbon.
    C,
    /// Nitrogen.
    N,
    /// Oxygen.
    O,
    /// Phosphorus.
    P,
    /// Sulfur.
    S,
    /// Sodium.
    Na,
    /// Magnesium.
    Mg,
    /// Chlorine.
    Cl,
    /// Potassium.
    K,
    /// Calcium.
    Ca,
    /// Manganese.
    Mn,
    /// Iron.
    Fe,
    /// Zinc.
    Zn,
    /// Selenium.
    Se,
    /// Anything not in the table above.
    Other,
}

impl Element {
    /// Parse an element symbol, case-insensitively.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim().to_ascii_uppercase().as_str() {
            "H" | "D" => Self::H,
            "C" => Self::C,
            "N" => Self::N,
            "O" => Self::O,
            "P" => Self::P,
            "S" => Self::S,
            "NA" => Self::Na,
            "MG" => Self::Mg,
            "CL" => Self::Cl,
            "K" => Self::K,
            "CA" => Self::Ca,
            "MN" => Self::Mn,
            "FE" => Self::Fe,
            "ZN" => Self::Zn,
            "SE" => Self::Se,
            _ => Self::Other,
        }
    }

    /// Infer the element from an atom name when no element column exists.
    ///
    /// PDB atom names put a one-letter element in the second column
    /// (` CA ` is alpha carbon) and two-letter elements in the first
    /// (`CA  ` is calcium). Names are otherwise taken from their first
    /// letter, skipping leading digits (`1HB` is hydrogen).
    #[must_use]
    pub fn from_atom_name(name: &str) -> Self {
        if name.len() == 4 && !name.starts_with(' ') {
            if let (Some(head), Some(tail)) = (name.get(..2), name.get(2..)) {
                let two = Self::from_symbol(head);
                if two != Self::Other && tail.trim().is_empty() {
                    return two;
                }
            }
        }
        name.trim()
            .chars()
            .find(char::is_ascii_alphabetic)
            .map_or(Self::Other, |c| Self::from_symbol(&c.to_string()))
    }

    /// Van der Waals radius in ångström.
    #[must_use]
    pub fn radius(self) -> f32 {
        match self {
            Self::H => 1.10,
            Self::C => 1.70,
            Self::N => 1.55,
            Self::O => 1.52,
            Self::P => 1.80,
            Self::S => 1.80,
            Self::Na => 2.27,
            Self::Mg => 1.73,
            Self::Cl => 1.75,
            Self::K => 2.75,
            Self::Ca => 2.31,
            Self::Mn | Self::Fe | Self::Zn => 1.40,
            Self::Se => 1.90,
            Self::Other => 1.70,
        }
    }

    /// CPK-style linear RGB colour.
    #[must_use]
    pub fn color(self) -> [f32; 3] {
        match self {
            Self::H => [0.90, 0.90, 0.90],
            Self::C => [0.50, 0.50, 0.50],
            Self::N => [0.19, 0.31, 0.97],
            Self::O => [1.00, 0.05, 0.05],
            Self::P => [1.00, 0.50, 0.00],
            Self::S => [1.00, 0.78, 0.20],
            Self::Na => [0.67, 0.36, 0.95],
            Self::Mg => [0.54, 1.00, 0.00],
            Self::Cl => [0.12, 0.94, 0.12],
            Self::K => [0.56, 0.25, 0.83],
            Self::Ca => [0.24, 1.00, 0.00],
            Self::Mn => [0.61, 0.48, 0.78],
            Self::Fe => [0.88, 0.40, 0.20],
            Self::Zn => [0.49, 0.50, 0.69],
            Self::Se => [1.00, 0.63, 0.00],
            Self::Other => [1.00, 0.08, 0.58],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_case_insensitive() {
        assert_eq!(Element::from_symbol("fe"), Element::Fe);
        assert_eq!(Element::from_symbol(" N"), Element::N);
        assert_eq!(Element::from_symbol("Xx"), Element::Other);
    }

    #[test]
    fn atom_names_follow_pdb_alignment() {
        assert_eq!(Element::from_atom_name(" CA "), Element::C);
        assert_eq!(Element::from_atom_name("CA  "), Element::Ca);
        assert_eq!(Element::from_atom_name("1HB "), Element::H);
        assert_eq!(Element::from_atom_name("OXT"), Element::O);
    }
}
