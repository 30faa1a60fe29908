use super::stoichiometry::Stoichiometry;
use super::types::{ResidueClass, ResiduePosition, StandardResidue};
use super::valence::ValenceTerms;
use smol_str::SmolStr;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapKind {
    Amine,
    Carboxylate,
    Phosphate,
    Hydroxyl,
    Other,
}

impl CapKind {
    pub fn name(&self) -> &'static str {
        match self {
            CapKind::Amine => "Amine",
            CapKind::Carboxylate => "Carboxylate",
            CapKind::Phosphate => "Phosphate",
            CapKind::Hydroxyl => "Hydroxyl",
            CapKind::Other => "Other",
        }
    }
}

impl fmt::Display for CapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Terminal group stitched onto the first or last residue of a chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Cap {
    pub kind: CapKind,
    pub stoichiometry: Stoichiometry,
    pub atoms: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub number: i32,
    pub name: SmolStr,
    pub standard_name: Option<StandardResidue>,
    pub class: ResidueClass,
    pub position: ResiduePosition,
    pub side_chain: Stoichiometry,
    /// Terminal groups: one on each chain end, both on a lone residue.
    pub caps: Vec<Cap>,
    backbone: Vec<usize>,
    atoms: Vec<usize>,
    terms: ValenceTerms,
    finalized: bool,
}

impl Residue {
    pub fn new(
        number: i32,
        name: &str,
        standard_name: Option<StandardResidue>,
        class: ResidueClass,
    ) -> Self {
        Self {
            number,
            name: SmolStr::new(name),
            standard_name,
            class,
            position: ResiduePosition::Internal,
            side_chain: Stoichiometry::new(),
            caps: Vec::new(),
            backbone: Vec::new(),
            atoms: Vec::new(),
            terms: ValenceTerms::default(),
            finalized: false,
        }
    }

    /// Builds a residue from a resolved standard code.
    pub fn standard(number: i32, residue: StandardResidue) -> Self {
        Self::new(number, residue.code(), Some(residue), residue.class())
    }

    /// Builds an `UNK` residue of the given class.
    pub fn unknown(number: i32, class: ResidueClass) -> Self {
        Self::new(number, "UNK", None, class)
    }

    pub fn is_standard(&self) -> bool {
        self.standard_name.is_some()
    }

    pub fn add_atom(&mut self, atom: usize) {
        debug_assert!(!self.finalized, "Residue {} is frozen", self.number);
        debug_assert!(
            !self.contains(atom),
            "Attempted to add duplicate atom {} to residue {} ({})",
            atom,
            self.number,
            self.name
        );
        self.atoms.push(atom);
    }

    /// Records a backbone pattern atom; the atom is also added to the residue.
    pub fn add_backbone_atom(&mut self, atom: usize) {
        self.add_atom(atom);
        self.backbone.push(atom);
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.atoms.contains(&atom)
    }

    pub fn atoms(&self) -> &[usize] {
        &self.atoms
    }

    pub fn backbone(&self) -> &[usize] {
        &self.backbone
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

    /// Attaches the owned valence terms and freezes the atom list.
    pub(crate) fn finalize(&mut self, terms: ValenceTerms) {
        self.atoms.sort_unstable();
        self.terms = terms;
        self.finalized = true;
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Residue {{ number: {}, name: \"{}\", class: {}, position: {}, atoms: {} }}",
            self.number,
            self.name,
            self.class,
            self.position,
            self.atom_count()
        )
    }
}
