use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Chemical element of an atom, restricted to the elements that routinely
/// appear in deposited macromolecular structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Element {
    // --- Core Bio-organic ---
    H,
    C,
    N,
    O,
    P,
    S,
    Se,

    // --- Halogens ---
    F,
    Cl,
    Br,
    I,

    // --- Common Ions ---
    Na,
    K,
    Mg,
    Ca,
    Mn,
    Fe,
    Co,
    Ni,
    Cu,
    Zn,

    #[default]
    Unknown,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unrecognized element symbol: '{0}'")]
pub struct ParseElementError(pub String);

impl Element {
    /// Returns the conventional capitalized symbol (e.g. `"Fe"`).
    pub fn symbol(&self) -> &'static str {
        match self {
            Element::H => "H",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::P => "P",
            Element::S => "S",
            Element::Se => "Se",
            Element::F => "F",
            Element::Cl => "Cl",
            Element::Br => "Br",
            Element::I => "I",
            Element::Na => "Na",
            Element::K => "K",
            Element::Mg => "Mg",
            Element::Ca => "Ca",
            Element::Mn => "Mn",
            Element::Fe => "Fe",
            Element::Co => "Co",
            Element::Ni => "Ni",
            Element::Cu => "Cu",
            Element::Zn => "Zn",
            Element::Unknown => "X",
        }
    }

    /// Single-bond covalent radius in Angstroms, if tabulated.
    pub fn covalent_radius(&self) -> Option<f64> {
        let radius = match self {
            Element::H => 0.37,
            Element::C => 0.77,
            Element::N => 0.74,
            Element::O => 0.73,
            Element::P => 1.06,
            Element::S => 1.03,
            Element::Se => 1.16,
            Element::F => 0.57,
            Element::Cl => 0.99,
            Element::Br => 1.14,
            Element::I => 1.33,
            Element::Na => 1.54,
            Element::K => 1.96,
            Element::Mg => 1.30,
            Element::Ca => 1.74,
            Element::Mn => 1.39,
            Element::Fe => 1.32,
            Element::Co => 1.26,
            Element::Ni => 1.21,
            Element::Cu => 1.38,
            Element::Zn => 1.31,
            Element::Unknown => return None,
        };
        Some(radius)
    }

    /// Infers the element from the raw, untrimmed four-column atom name field.
    ///
    /// The format right-justifies one-letter element symbols in the first two
    /// columns of the name field (`" CA "` is an alpha carbon), while two-letter
    /// symbols start in the first column (`"CA  "` is calcium). Four-character
    /// hydrogen names such as `"HD11"` also start in the first column.
    pub fn from_name_field(raw: &str) -> Self {
        let mut chars = raw.chars();
        let first = chars.next().unwrap_or(' ');
        let second = chars.next().unwrap_or(' ');

        if first.is_ascii_alphabetic() {
            if first.eq_ignore_ascii_case(&'H') || first.eq_ignore_ascii_case(&'D') {
                return Element::H;
            }
            let pair: String = [first, second].iter().collect();
            if let Ok(element) = pair.parse::<Element>() {
                if second.is_ascii_alphabetic() {
                    return element;
                }
            }
            return first.to_string().parse().unwrap_or_default();
        }

        if second.is_ascii_alphabetic() {
            return second.to_string().parse().unwrap_or_default();
        }

        raw.trim()
            .chars()
            .find(|c| c.is_ascii_alphabetic())
            .and_then(|c| c.to_string().parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "H" | "D" | "T" => Ok(Element::H),
            "C" => Ok(Element::C),
            "N" => Ok(Element::N),
            "O" => Ok(Element::O),
            "P" => Ok(Element::P),
            "S" => Ok(Element::S),
            "SE" => Ok(Element::Se),
            "F" => Ok(Element::F),
            "CL" => Ok(Element::Cl),
            "BR" => Ok(Element::Br),
            "I" => Ok(Element::I),
            "NA" => Ok(Element::Na),
            "K" => Ok(Element::K),
            "MG" => Ok(Element::Mg),
            "CA" => Ok(Element::Ca),
            "MN" => Ok(Element::Mn),
            "FE" => Ok(Element::Fe),
            "CO" => Ok(Element::Co),
            "NI" => Ok(Element::Ni),
            "CU" => Ok(Element::Cu),
            "ZN" => Ok(Element::Zn),
            other => Err(ParseElementError(other.to_string())),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single atom taken from an ATOM or HETATM record.
///
/// Atoms are created once during assembly and only handed out by shared
/// reference afterwards, so every field is effectively immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Serial number from the source file, unique within the retained model.
    pub serial: usize,
    /// Atom name with surrounding whitespace removed (e.g. "CA", "OXT").
    pub name: String,
    /// Alternate location indicator, if the record carries one.
    pub alt_loc: Option<char>,
    pub element: Element,
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
    /// Three-letter code of the residue the atom belongs to.
    pub residue_name: String,
    pub residue_number: isize,
    pub insertion_code: Option<char>,
    /// Chain identifier; a blank column is kept as `' '`.
    pub chain_id: char,
    pub occupancy: Option<f64>,
    pub temp_factor: Option<f64>,
    /// `true` for HETATM records.
    pub is_hetero: bool,
}

impl Atom {
    /// Creates an atom with the given identity and position; every other field
    /// takes a neutral default.
    pub fn new(serial: usize, name: &str, position: Point3<f64>) -> Self {
        Self {
            serial,
            name: name.to_string(),
            alt_loc: None,
            element: Element::Unknown,
            position,
            residue_name: String::new(),
            residue_number: 0,
            insertion_code: None,
            chain_id: ' ',
            occupancy: None,
            temp_factor: None,
            is_hetero: false,
        }
    }

    pub fn distance_to(&self, other: &Atom) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element == Element::H
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let atom = Atom::new(7, "CA", Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.serial, 7);
        assert_eq!(atom.name, "CA");
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.element, Element::Unknown);
        assert_eq!(atom.chain_id, ' ');
        assert!(atom.alt_loc.is_none());
        assert!(atom.occupancy.is_none());
        assert!(!atom.is_hetero);
    }

    #[test]
    fn distance_to_is_euclidean() {
        let a = Atom::new(1, "N", Point3::new(0.0, 0.0, 0.0));
        let b = Atom::new(2, "CA", Point3::new(3.0, 4.0, 0.0));
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn from_str_parses_symbols_case_insensitively() {
        assert_eq!("C".parse::<Element>(), Ok(Element::C));
        assert_eq!("fe".parse::<Element>(), Ok(Element::Fe));
        assert_eq!(" Zn ".parse::<Element>(), Ok(Element::Zn));
        assert_eq!("D".parse::<Element>(), Ok(Element::H));
    }

    #[test]
    fn from_str_rejects_unknown_symbols() {
        assert!("XX".parse::<Element>().is_err());
        assert!("".parse::<Element>().is_err());
    }

    #[test]
    fn from_name_field_distinguishes_alpha_carbon_from_calcium() {
        assert_eq!(Element::from_name_field(" CA "), Element::C);
        assert_eq!(Element::from_name_field("CA  "), Element::Ca);
    }

    #[test]
    fn from_name_field_handles_hydrogen_and_common_atoms() {
        assert_eq!(Element::from_name_field(" N  "), Element::N);
        assert_eq!(Element::from_name_field(" OXT"), Element::O);
        assert_eq!(Element::from_name_field("HD11"), Element::H);
        assert_eq!(Element::from_name_field("HG12"), Element::H);
        assert_eq!(Element::from_name_field("1HB "), Element::H);
        assert_eq!(Element::from_name_field("FE  "), Element::Fe);
        assert_eq!(Element::from_name_field("    "), Element::Unknown);
    }

    #[test]
    fn covalent_radius_is_tabulated_for_known_elements_only() {
        assert_eq!(Element::C.covalent_radius(), Some(0.77));
        assert_eq!(Element::Fe.covalent_radius(), Some(1.32));
        assert_eq!(Element::Unknown.covalent_radius(), None);
    }

    #[test]
    fn display_uses_capitalized_symbol() {
        assert_eq!(Element::Cl.to_string(), "Cl");
        assert_eq!(Element::Unknown.to_string(), "X");
    }
}
