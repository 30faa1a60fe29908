use super::stoichiometry::Stoichiometry;
use super::types::MoleculeKind;
use super::valence::ValenceTerms;
use smol_str::SmolStr;
use std::fmt;

/// Container for atoms that do not belong to a polymer.
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    pub name: SmolStr,
    pub kind: MoleculeKind,
    pub composition: Stoichiometry,
    atoms: Vec<usize>,
    terms: ValenceTerms,
    finalized: bool,
}

impl Molecule {
    pub fn new(name: &str, kind: MoleculeKind) -> Self {
        Self {
            name: SmolStr::new(name),
            kind,
            composition: Stoichiometry::new(),
            atoms: Vec::new(),
            terms: ValenceTerms::default(),
            finalized: false,
        }
    }

    pub fn add_atom(&mut self, atom: usize) {
        debug_assert!(!self.finalized, "Molecule {} is frozen", self.name);
        debug_assert!(
            !self.atoms.contains(&atom),
            "Attempted to add duplicate atom {} to molecule '{}'",
            atom,
            self.name
        );
        self.atoms.push(atom);
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.atoms.contains(&atom)
    }

    pub fn atoms(&self) -> &[usize] {
        &self.atoms
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter_atoms(&self) -> std::iter::Copied<std::slice::Iter<'_, usize>> {
        self.atoms.iter().copied()
    }

    pub fn terms(&self) -> &ValenceTerms {
        &self.terms
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub(crate) fn finalize(&mut self, terms: ValenceTerms) {
        self.atoms.sort_unstable();
        self.terms = terms;
        self.finalized = true;
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Molecule {{ name: \"{}\", kind: {}, composition: {}, atoms: {} }}",
            self.name,
            self.kind,
            self.composition,
            self.atom_count()
        )
    }
}
