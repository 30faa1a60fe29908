//! Root of the multi-scale hierarchy.
//!
//! An [`Assembly`] owns the bond graph it was inferred from together with every container
//! built over it: polymers (residues inside), hetero molecules, ions and water. Containers
//! refer to atoms by index into the graph, and each atom belongs to exactly one container
//! once classification has drained the pool.

use super::atom::Atom;
use super::graph::BondGraph;
use super::joint::{Joint, Site};
use super::molecule::Molecule;
use super::node::Node;
use super::polymer::Polymer;
use super::types::{MoleculeKind, Point};
use crate::ops::Error;
use serde::Serialize;
use std::fmt;

/// Root container produced by [`classify`](crate::ops::classify).
#[derive(Debug, Clone)]
pub struct Assembly {
    graph: BondGraph,
    polymers: Vec<Polymer>,
    molecules: Vec<Molecule>,
    ions: Vec<Molecule>,
    water: Vec<Molecule>,
    joints: Vec<Joint>,
    finalized: bool,
}

/// Container and term counts for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssemblySummary {
    pub atoms: usize,
    pub bonds: usize,
    pub polymers: usize,
    pub residues: usize,
    pub molecules: usize,
    pub ions: usize,
    pub water: usize,
    pub angles: usize,
    pub dihedrals: usize,
    pub joints: usize,
}

impl Assembly {
    /// Creates an empty assembly over `graph`.
    pub fn new(graph: BondGraph) -> Self {
        Self {
            graph,
            polymers: Vec::new(),
            molecules: Vec::new(),
            ions: Vec::new(),
            water: Vec::new(),
            joints: Vec::new(),
            finalized: false,
        }
    }

    /// Places a top-level container into the assembly.
    ///
    /// Polymers are appended to the polymer list; molecules are routed to the hetero, ion
    /// or water lists according to their kind.
    ///
    /// # Returns
    ///
    /// The [`Site`] under which the container is stored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContainment`] for atoms and residues, which must be placed
    /// inside a container first.
    pub fn insert(&mut self, node: Node) -> Result<Site, Error> {
        debug_assert!(!self.finalized, "Assembly is frozen");
        match node {
            Node::Polymer(polymer) => {
                self.polymers.push(polymer);
                Ok(Site::Polymer(self.polymers.len() - 1))
            }
            Node::Molecule(molecule) => Ok(match molecule.kind {
                MoleculeKind::Water => {
                    self.water.push(molecule);
                    Site::Water(self.water.len() - 1)
                }
                MoleculeKind::Ion => {
                    self.ions.push(molecule);
                    Site::Ion(self.ions.len() - 1)
                }
                MoleculeKind::Hetero => {
                    self.molecules.push(molecule);
                    Site::Molecule(self.molecules.len() - 1)
                }
            }),
            other => Err(Error::invalid_containment(other.kind_name(), "Assembly")),
        }
    }

    pub fn graph(&self) -> &BondGraph {
        &self.graph
    }

    pub fn atom(&self, idx: usize) -> &Atom {
        self.graph.atom(idx)
    }

    pub fn polymers(&self) -> &[Polymer] {
        &self.polymers
    }

    pub fn polymer(&self, id: &str) -> Option<&Polymer> {
        self.polymers.iter().find(|p| p.id == id)
    }

    pub fn molecules(&self) -> &[Molecule] {
        &self.molecules
    }

    pub fn ions(&self) -> &[Molecule] {
        &self.ions
    }

    pub fn water(&self) -> &[Molecule] {
        &self.water
    }

    /// Joints between different top-level containers.
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn atom_count(&self) -> usize {
        self.graph.atom_count()
    }

    pub fn residue_count(&self) -> usize {
        self.polymers.iter().map(Polymer::residue_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.polymers.is_empty()
            && self.molecules.is_empty()
            && self.ions.is_empty()
            && self.water.is_empty()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Non-polymer containers with their sites, in walk order.
    pub fn iter_molecules_with_site(&self) -> impl Iterator<Item = (Site, &Molecule)> {
        let hetero = self
            .molecules
            .iter()
            .enumerate()
            .map(|(i, m)| (Site::Molecule(i), m));
        let ions = self.ions.iter().enumerate().map(|(i, m)| (Site::Ion(i), m));
        let water = self
            .water
            .iter()
            .enumerate()
            .map(|(i, m)| (Site::Water(i), m));
        hetero.chain(ions).chain(water)
    }

    /// Every atom exactly once in depth-first order: polymers (residue by residue), then
    /// hetero molecules, ions and water.
    pub fn walk(&self) -> impl Iterator<Item = &Atom> {
        let polymer_atoms = self.polymers.iter().flat_map(|p| p.iter_atoms());
        let other_atoms = self
            .iter_molecules_with_site()
            .flat_map(|(_, m)| m.iter_atoms());
        polymer_atoms
            .chain(other_atoms)
            .map(move |idx| self.graph.atom(idx))
    }

    /// Top-level container owning each atom; `None` for atoms not yet classified.
    pub fn owners(&self) -> Vec<Option<Site>> {
        let mut owners = vec![None; self.graph.atom_count()];
        for (i, polymer) in self.polymers.iter().enumerate() {
            for atom in polymer.iter_atoms() {
                owners[atom] = Some(Site::Polymer(i));
            }
        }
        for (site, molecule) in self.iter_molecules_with_site() {
            for atom in molecule.iter_atoms() {
                owners[atom] = Some(site);
            }
        }
        owners
    }

    pub fn summary(&self) -> AssemblySummary {
        let residue_terms = self
            .polymers
            .iter()
            .flat_map(|p| p.iter_residues().map(|r| r.terms()));
        let molecule_terms = self.iter_molecules_with_site().map(|(_, m)| m.terms());
        let joint_terms = self
            .polymers
            .iter()
            .flat_map(|p| p.joints().iter())
            .chain(self.joints.iter())
            .map(|j| &j.terms);

        let (angles, dihedrals) = residue_terms
            .chain(molecule_terms)
            .chain(joint_terms)
            .fold((0, 0), |(a, d), t| (a + t.angles.len(), d + t.dihedrals.len()));

        AssemblySummary {
            atoms: self.graph.atom_count(),
            bonds: self.graph.bond_count(),
            polymers: self.polymers.len(),
            residues: self.residue_count(),
            molecules: self.molecules.len(),
            ions: self.ions.len(),
            water: self.water.len(),
            angles,
            dihedrals,
            joints: self.joints.len()
                + self.polymers.iter().map(Polymer::joint_count).sum::<usize>(),
        }
    }

    pub fn geometric_center(&self) -> Point {
        self.graph.geometric_center()
    }

    pub fn translate_by(&mut self, vector: &nalgebra::Vector3<f64>) {
        self.graph.translate_by(vector);
    }

    pub(crate) fn polymers_mut(&mut self) -> &mut Vec<Polymer> {
        &mut self.polymers
    }

    /// Hetero, ion and water lists, in that order.
    pub(crate) fn molecule_lists_mut(&mut self) -> [&mut Vec<Molecule>; 3] {
        [&mut self.molecules, &mut self.ions, &mut self.water]
    }

    pub(crate) fn set_joints(&mut self, joints: Vec<Joint>) {
        self.joints = joints;
    }

    /// Drops containers that ended up without atoms.
    pub(crate) fn remove_empty(&mut self) {
        self.polymers.retain(|p| !p.is_empty());
        self.molecules.retain(|m| !m.is_empty());
        self.ions.retain(|m| !m.is_empty());
        self.water.retain(|m| !m.is_empty());
    }

    pub(crate) fn mark_finalized(&mut self) {
        self.finalized = true;
    }
}

impl fmt::Display for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Assembly {{ polymers: {}, residues: {}, molecules: {}, ions: {}, water: {}, atoms: {} }}",
            self.polymers.len(),
            self.residue_count(),
            self.molecules.len(),
            self.ions.len(),
            self.water.len(),
            self.atom_count()
        )
    }
}

impl fmt::Display for AssemblySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} atoms, {} bonds, {} angles, {} dihedrals; {} polymers ({} residues), {} molecules, {} ions, {} water, {} joints",
            self.atoms,
            self.bonds,
            self.angles,
            self.dihedrals,
            self.polymers,
            self.residues,
            self.molecules,
            self.ions,
            self.water,
            self.joints
        )
    }
}
