//! Tagged union over the hierarchy levels.
//!
//! Containment rules live in a single match in [`Node::add_to`]: atoms go into residues or
//! molecules, residues go into polymers. Polymers and molecules are placed at the root with
//! [`Assembly::insert`](super::assembly::Assembly::insert).

use super::molecule::Molecule;
use super::polymer::Polymer;
use super::residue::Residue;
use crate::ops::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Atom(usize),
    Residue(Residue),
    Polymer(Polymer),
    Molecule(Molecule),
}

impl Node {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Atom(_) => "Atom",
            Node::Residue(_) => "Residue",
            Node::Polymer(_) => "Polymer",
            Node::Molecule(_) => "Molecule",
        }
    }

    /// Moves `self` into `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContainment`] when `parent` cannot hold a node of this kind.
    pub fn add_to(self, parent: &mut Node) -> Result<(), Error> {
        match (self, parent) {
            (Node::Atom(atom), Node::Residue(residue)) => residue.add_atom(atom),
            (Node::Atom(atom), Node::Molecule(molecule)) => molecule.add_atom(atom),
            (Node::Residue(residue), Node::Polymer(polymer)) => polymer.add_residue(residue),
            (child, parent) => {
                return Err(Error::invalid_containment(
                    child.kind_name(),
                    parent.kind_name(),
                ));
            }
        }
        Ok(())
    }

    /// Atom indices held by this node and its descendants.
    pub fn atoms(&self) -> Vec<usize> {
        match self {
            Node::Atom(atom) => vec![*atom],
            Node::Residue(residue) => residue.atoms().to_vec(),
            Node::Polymer(polymer) => polymer.iter_atoms().collect(),
            Node::Molecule(molecule) => molecule.atoms().to_vec(),
        }
    }
}

impl From<Residue> for Node {
    fn from(residue: Residue) -> Self {
        Node::Residue(residue)
    }
}

impl From<Polymer> for Node {
    fn from(polymer: Polymer) -> Self {
        Node::Polymer(polymer)
    }
}

impl From<Molecule> for Node {
    fn from(molecule: Molecule) -> Self {
        Node::Molecule(molecule)
    }
}
