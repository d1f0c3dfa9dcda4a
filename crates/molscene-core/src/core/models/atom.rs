use nalgebra::Point3;

/// Decoded meaning of the CTfile atom charge code (columns 37-39 of an atom line).
///
/// The file stores a small integer code rather than the formal charge itself.
/// Codes outside the documented range are kept verbatim in [`ChargeState::Unknown`]
/// so that no information is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChargeState {
    /// Code 0, no charge.
    #[default]
    Neutral,
    /// Codes 1-3 and 5-7, a formal charge between -3 and +3.
    Charged(i8),
    /// Code 4, a doublet radical.
    DoubletRadical,
    /// Any other code.
    Unknown(i32),
}

impl From<i32> for ChargeState {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::Neutral,
            1 => Self::Charged(3),
            2 => Self::Charged(2),
            3 => Self::Charged(1),
            4 => Self::DoubletRadical,
            5 => Self::Charged(-1),
            6 => Self::Charged(-2),
            7 => Self::Charged(-3),
            other => Self::Unknown(other),
        }
    }
}

/// One record of the atom block.
///
/// Atoms are created by the MOL reader and stay immutable for the rest of the
/// import; bonds refer to them by [`Atom::index`].
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// 1-based position within the atom block. Dense over `1..=atom_count`.
    pub index: usize,
    /// Display name: the trimmed label followed by the record's index in the
    /// non-blank line sequence of the file (e.g. `"C2"` for the first atom).
    pub name: String,
    /// The trimmed label field as written in the file.
    pub label: String,
    /// Element symbol, the first run of non-digit characters of [`Atom::name`].
    pub symbol: String,
    /// Cartesian coordinates in the file's units (usually Angstroms).
    pub position: Point3<f64>,
    /// Raw charge/radical code.
    pub charge_code: i32,
}

impl Atom {
    /// Creates an atom from its decoded fields.
    ///
    /// # Arguments
    ///
    /// * `index` - 1-based position within the atom block.
    /// * `label` - The label field, surrounding whitespace is removed.
    /// * `line_index` - Index of the record in the non-blank line sequence, appended to the label to form the display name.
    /// * `position` - The 3D coordinates of the atom.
    /// * `charge_code` - The raw CTfile charge code.
    pub fn new(
        index: usize,
        label: &str,
        line_index: usize,
        position: Point3<f64>,
        charge_code: i32,
    ) -> Self {
        let label = label.trim();
        let name = format!("{}{}", label, line_index);
        let symbol = element_symbol(&name).to_string();
        Self {
            index,
            name,
            label: label.to_string(),
            symbol,
            position,
            charge_code,
        }
    }

    pub fn charge_state(&self) -> ChargeState {
        ChargeState::from(self.charge_code)
    }

    /// Returns the formal charge encoded by the charge code, if the code encodes one.
    ///
    /// Neutral atoms return `Some(0)`; radicals and unknown codes return `None`.
    pub fn formal_charge(&self) -> Option<i8> {
        match self.charge_state() {
            ChargeState::Neutral => Some(0),
            ChargeState::Charged(charge) => Some(charge),
            ChargeState::DoubletRadical | ChargeState::Unknown(_) => None,
        }
    }

    pub fn is_doublet_radical(&self) -> bool {
        self.charge_state() == ChargeState::DoubletRadical
    }
}

/// Returns the first run of non-digit characters in `name`, or `""` if there is none.
pub fn element_symbol(name: &str) -> &str {
    name.split(|c: char| c.is_ascii_digit())
        .find(|run| !run.is_empty())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_appends_line_index_to_label() {
        let atom = Atom::new(1, " C ", 2, Point3::new(1.0, 2.0, 3.0), 0);

        assert_eq!(atom.index, 1);
        assert_eq!(atom.label, "C");
        assert_eq!(atom.name, "C2");
        assert_eq!(atom.symbol, "C");
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.charge_code, 0);
    }

    #[test]
    fn two_letter_symbols_are_preserved() {
        let atom = Atom::new(3, "Cl", 4, Point3::origin(), 0);
        assert_eq!(atom.name, "Cl4");
        assert_eq!(atom.symbol, "Cl");
    }

    #[test]
    fn element_symbol_takes_first_non_digit_run() {
        assert_eq!(element_symbol("C12"), "C");
        assert_eq!(element_symbol("Br7"), "Br");
        assert_eq!(element_symbol("13C5"), "C");
        assert_eq!(element_symbol("42"), "");
        assert_eq!(element_symbol(""), "");
    }

    #[test]
    fn empty_label_yields_empty_symbol() {
        let atom = Atom::new(1, "   ", 2, Point3::origin(), 0);
        assert_eq!(atom.name, "2");
        assert_eq!(atom.symbol, "");
    }

    #[test]
    fn charge_codes_decode_to_formal_charges() {
        let expected = [
            (0, Some(0)),
            (1, Some(3)),
            (2, Some(2)),
            (3, Some(1)),
            (4, None),
            (5, Some(-1)),
            (6, Some(-2)),
            (7, Some(-3)),
            (9, None),
        ];
        for (code, charge) in expected {
            let atom = Atom::new(1, "N", 2, Point3::origin(), code);
            assert_eq!(atom.formal_charge(), charge, "charge code {}", code);
        }
    }

    #[test]
    fn charge_code_four_is_a_doublet_radical() {
        let radical = Atom::new(1, "C", 2, Point3::origin(), 4);
        let cation = Atom::new(2, "N", 3, Point3::origin(), 3);

        assert!(radical.is_doublet_radical());
        assert!(!cation.is_doublet_radical());
        assert_eq!(radical.charge_state(), ChargeState::DoubletRadical);
    }

    #[test]
    fn unknown_charge_codes_are_kept_verbatim() {
        assert_eq!(ChargeState::from(-2), ChargeState::Unknown(-2));
        assert_eq!(ChargeState::from(12), ChargeState::Unknown(12));
        assert_eq!(ChargeState::default(), ChargeState::Neutral);
    }
}
