use std::fmt;

/// Bond types of the CTfile bond block (columns 7-9).
///
/// Codes 5-8 are query types used in substructure searches; they are decoded
/// so that hosts can style them, but they carry no multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BondOrder {
    Single = 1,
    Double = 2,
    Triple = 3,
    Aromatic = 4,
    SingleOrDouble = 5,
    SingleOrAromatic = 6,
    DoubleOrAromatic = 7,
    Any = 8,
}

impl BondOrder {
    /// Maps a raw order code to its bond type, or `None` for codes outside `1..=8`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Single),
            2 => Some(Self::Double),
            3 => Some(Self::Triple),
            4 => Some(Self::Aromatic),
            5 => Some(Self::SingleOrDouble),
            6 => Some(Self::SingleOrAromatic),
            7 => Some(Self::DoubleOrAromatic),
            8 => Some(Self::Any),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Single => "Single",
                Self::Double => "Double",
                Self::Triple => "Triple",
                Self::Aromatic => "Aromatic",
                Self::SingleOrDouble => "Single or Double",
                Self::SingleOrAromatic => "Single or Aromatic",
                Self::DoubleOrAromatic => "Double or Aromatic",
                Self::Any => "Any",
            }
        )
    }
}

/// One record of the bond block.
///
/// Atom references are 1-based and are not range-checked when the record is
/// decoded; the geometry engine resolves them against the atom table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub from_atom: usize,
    pub to_atom: usize,
    pub order_code: i32,
    pub stereo_code: i32,
    pub topology_code: i32,
    pub reacting_center_code: i32,
    /// 1-based line of the source file the record was read from.
    pub line: usize,
}

impl Bond {
    pub fn new(from_atom: usize, to_atom: usize, order_code: i32, line: usize) -> Self {
        Self {
            from_atom,
            to_atom,
            order_code,
            stereo_code: 0,
            topology_code: 0,
            reacting_center_code: 0,
            line,
        }
    }

    pub fn order(&self) -> Option<BondOrder> {
        BondOrder::from_code(self.order_code)
    }

    pub fn contains(&self, atom_index: usize) -> bool {
        self.from_atom == atom_index || self.to_atom == atom_index
    }
}
