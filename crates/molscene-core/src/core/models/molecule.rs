use super::atom::Atom;
use super::topology::Bond;

/// Values decoded from the counts line of a MOL file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MolHeader {
    /// First non-blank line of the file, trimmed. Not interpreted.
    pub title: String,
    pub atom_count: usize,
    pub bond_count: usize,
    /// Number of atom lists. Decoded but not used for geometry.
    pub atom_list_count: usize,
    pub is_chiral: bool,
    /// Raw columns 34-36 of the counts line.
    pub version_tag: String,
}

/// A decoded atom/bond table.
///
/// Atoms are stored in file order, so the atom with index `i` lives at
/// position `i - 1`. Bonds refer to atoms by that index without owning them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    pub header: MolHeader,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

impl Molecule {
    pub fn new(header: MolHeader, atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        Self {
            header,
            atoms,
            bonds,
        }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Looks up an atom by its 1-based index.
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        index.checked_sub(1).and_then(|i| self.atoms.get(i))
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty() && self.bonds.is_empty()
    }

    /// Bonds that have the given atom at either end.
    pub fn bonds_of(&self, atom_index: usize) -> impl Iterator<Item = &Bond> {
        self.bonds.iter().filter(move |b| b.contains(atom_index))
    }
}
