use super::joint::Joint;
use super::residue::Residue;
use super::types::PolymerKind;
use smol_str::SmolStr;
use std::fmt;

/// Ordered chain of residues plus the joints between bonded neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct Polymer {
    pub id: SmolStr,
    pub kind: PolymerKind,
    residues: Vec<Residue>,
    joints: Vec<Joint>,
    finalized: bool,
}

impl Polymer {
    pub fn new(id: &str, kind: PolymerKind) -> Self {
        Self {
            id: SmolStr::new(id),
            kind,
            residues: Vec::new(),
            joints: Vec::new(),
            finalized: false,
        }
    }

    pub fn add_residue(&mut self, residue: Residue) {
        debug_assert!(
            self.residue(residue.number).is_none(),
            "Attempted to add a duplicate residue number '{}' to polymer '{}'",
            residue.number,
            self.id
        );
        self.residues.push(residue);
    }

    pub fn residue(&self, number: i32) -> Option<&Residue> {
        self.residues.iter().find(|r| r.number == number)
    }

    pub fn residue_mut(&mut self, number: i32) -> Option<&mut Residue> {
        self.residues.iter_mut().find(|r| r.number == number)
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn iter_residues(&self) -> std::slice::Iter<'_, Residue> {
        self.residues.iter()
    }

    pub fn iter_residues_mut(&mut self) -> std::slice::IterMut<'_, Residue> {
        self.residues.iter_mut()
    }

    pub fn iter_atoms(&self) -> impl Iterator<Item = usize> + '_ {
        self.residues.iter().flat_map(|r| r.iter_atoms())
    }

    pub fn atom_count(&self) -> usize {
        self.residues.iter().map(Residue::atom_count).sum()
    }

    /// Residue number owning `atom`, if any.
    pub fn residue_of(&self, atom: usize) -> Option<i32> {
        self.residues
            .iter()
            .find(|r| r.contains(atom))
            .map(|r| r.number)
    }

    /// Residue names in chain order.
    pub fn sequence(&self) -> Vec<&str> {
        self.residues.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub(crate) fn finalize(&mut self, joints: Vec<Joint>) {
        self.joints = joints;
        self.finalized = true;
    }
}

impl fmt::Display for Polymer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Polymer {{ id: \"{}\", kind: {}, residues: {}, joints: {} }}",
            self.id,
            self.kind,
            self.residue_count(),
            self.joint_count()
        )
    }
}
