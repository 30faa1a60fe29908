//! Atom/bond graph that every inference stage reads from.
//!
//! The graph owns the flat atom pool and a canonical bond list, plus an adjacency table of
//! bond indices per atom so incident-bond and neighbour queries are O(degree). Bonds are
//! either loaded explicitly or produced by [`crate::ops::BondInference`].

use super::atom::Atom;
use super::types::{BondOrder, Element, Point};
use std::collections::VecDeque;
use std::fmt;

/// Undirected bond between two atoms of a [`BondGraph`].
///
/// Endpoints are stored canonically (`a1_idx <= a2_idx`) so equality, hashing and sorting
/// are independent of insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bond {
    /// Index of the first atom (always the lesser index after canonicalization).
    pub a1_idx: usize,
    /// Index of the second atom.
    pub a2_idx: usize,
    /// Chemical multiplicity assigned to the bond.
    pub order: BondOrder,
}

impl Bond {
    /// Creates a new bond while canonicalizing the endpoint ordering.
    ///
    /// # Arguments
    ///
    /// * `idx1` - Index of one bonded atom.
    /// * `idx2` - Index of the partner atom.
    /// * `order` - Bond multiplicity.
    ///
    /// # Returns
    ///
    /// A `Bond` whose indices are sorted so `a1_idx <= a2_idx`.
    pub fn new(idx1: usize, idx2: usize, order: BondOrder) -> Self {
        let (a1_idx, a2_idx) = if idx1 <= idx2 { (idx1, idx2) } else { (idx2, idx1) };
        Self {
            a1_idx,
            a2_idx,
            order,
        }
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.a1_idx == atom || self.a2_idx == atom
    }

    /// Returns the endpoint opposite to `atom`, or `None` if `atom` is not an endpoint.
    pub fn partner(&self, atom: usize) -> Option<usize> {
        if self.a1_idx == atom {
            Some(self.a2_idx)
        } else if self.a2_idx == atom {
            Some(self.a1_idx)
        } else {
            None
        }
    }

    /// Atom shared with `other` when the two bonds form an angle.
    ///
    /// Two bonds form an angle iff they share exactly one atom; identical bonds share two
    /// and return `None`.
    pub fn shared_atom(&self, other: &Bond) -> Option<usize> {
        let shared: Vec<usize> = [self.a1_idx, self.a2_idx]
            .into_iter()
            .filter(|&a| other.contains(a))
            .collect();
        match shared.as_slice() {
            [single] => Some(*single),
            _ => None,
        }
    }

    /// Same-fragment predicate: both endpoints satisfy `member`.
    ///
    /// Containers use this to decide whether a bond is internal to them or bridges to a
    /// neighbouring container.
    pub fn within<F>(&self, member: F) -> bool
    where
        F: Fn(usize) -> bool,
    {
        member(self.a1_idx) && member(self.a2_idx)
    }
}

/// Flat atom pool plus canonical bond list and per-atom adjacency.
#[derive(Debug, Clone, Default)]
pub struct BondGraph {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    adjacency: Vec<Vec<usize>>,
}

impl BondGraph {
    /// Builds an edgeless graph over `atoms`.
    ///
    /// Atom indices are rewritten to match their position in the pool.
    pub fn new(atoms: Vec<Atom>) -> Self {
        let mut atoms = atoms;
        for (i, atom) in atoms.iter_mut().enumerate() {
            atom.index = i;
        }
        let adjacency = vec![Vec::new(); atoms.len()];
        Self {
            atoms,
            bonds: Vec::new(),
            adjacency,
        }
    }

    /// Builds a graph and inserts `bonds`.
    ///
    /// # Arguments
    ///
    /// * `atoms` - Flat atom pool.
    /// * `bonds` - Bonds referencing indices into `atoms`.
    pub fn with_bonds(atoms: Vec<Atom>, bonds: impl IntoIterator<Item = Bond>) -> Self {
        let mut graph = Self::new(atoms);
        for bond in bonds {
            graph.add_bond(bond.a1_idx, bond.a2_idx, bond.order);
        }
        graph
    }

    /// Inserts a bond between two atoms.
    ///
    /// Inserting the same unordered pair twice is a programmer error: debug builds assert,
    /// release builds ignore the duplicate and return `false`.
    ///
    /// # Returns
    ///
    /// `true` when the bond was added.
    pub fn add_bond(&mut self, idx1: usize, idx2: usize, order: BondOrder) -> bool {
        debug_assert!(idx1 != idx2, "Self bond on atom {}", idx1);
        debug_assert!(
            idx1 < self.atoms.len() && idx2 < self.atoms.len(),
            "Bond index out of bounds"
        );
        if idx1 == idx2 {
            return false;
        }
        let duplicate = self.bond_between(idx1, idx2).is_some();
        debug_assert!(!duplicate, "Duplicate bond {}-{}", idx1, idx2);
        if duplicate {
            return false;
        }

        let bond = Bond::new(idx1, idx2, order);
        let bond_idx = self.bonds.len();
        self.bonds.push(bond);
        self.adjacency[bond.a1_idx].push(bond_idx);
        self.adjacency[bond.a2_idx].push(bond_idx);
        true
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, idx: usize) -> &Atom {
        &self.atoms[idx]
    }

    pub fn element(&self, idx: usize) -> Element {
        self.atoms[idx].element
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn bond(&self, bond_idx: usize) -> &Bond {
        &self.bonds[bond_idx]
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Indices of bonds incident to `atom_idx`, in insertion order.
    pub fn bond_indices_of(&self, atom_idx: usize) -> &[usize] {
        self.adjacency
            .get(atom_idx)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn bonds_of(&self, atom_idx: usize) -> impl Iterator<Item = &Bond> {
        self.bond_indices_of(atom_idx)
            .iter()
            .map(move |&b| &self.bonds[b])
    }

    pub fn neighbors_of(&self, atom_idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.bonds_of(atom_idx)
            .filter_map(move |b| b.partner(atom_idx))
    }

    /// Neighbours that are neither hydrogen nor of unknown element.
    pub fn heavy_neighbors_of(&self, atom_idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors_of(atom_idx)
            .filter(move |&n| self.atoms[n].element.is_heavy_atom())
    }

    pub fn degree(&self, atom_idx: usize) -> usize {
        self.bond_indices_of(atom_idx).len()
    }

    /// Index of the bond joining two atoms, if any.
    pub fn bond_between(&self, idx1: usize, idx2: usize) -> Option<usize> {
        let (probe, other) = if self.degree(idx1) <= self.degree(idx2) {
            (idx1, idx2)
        } else {
            (idx2, idx1)
        };
        self.bond_indices_of(probe)
            .iter()
            .copied()
            .find(|&b| self.bonds[b].partner(probe) == Some(other))
    }

    pub fn are_bonded(&self, idx1: usize, idx2: usize) -> bool {
        self.bond_between(idx1, idx2).is_some()
    }

    /// Whether `atom_idx` has a neighbour of the given element.
    pub fn has_neighbor_element(&self, atom_idx: usize, element: Element) -> bool {
        self.neighbors_of(atom_idx)
            .any(|n| self.atoms[n].element == element)
    }

    /// Breadth-first connected component containing `seed`, restricted to atoms accepted
    /// by `allow`. The seed is always included.
    pub fn component_from<F>(&self, seed: usize, allow: F) -> Vec<usize>
    where
        F: Fn(usize) -> bool,
    {
        let mut seen = vec![false; self.atoms.len()];
        let mut queue = VecDeque::from([seed]);
        let mut component = Vec::new();
        seen[seed] = true;

        while let Some(current) = queue.pop_front() {
            component.push(current);
            for n in self.neighbors_of(current) {
                if !seen[n] && allow(n) {
                    seen[n] = true;
                    queue.push_back(n);
                }
            }
        }

        component.sort_unstable();
        component
    }

    pub fn geometric_center(&self) -> Point {
        if self.atoms.is_empty() {
            return Point::origin();
        }
        let sum = self
            .atoms
            .iter()
            .fold(nalgebra::Vector3::zeros(), |acc, a| acc + a.pos.coords);
        Point::from(sum / self.atoms.len() as f64)
    }

    pub fn translate_by(&mut self, vector: &nalgebra::Vector3<f64>) {
        for atom in &mut self.atoms {
            atom.translate_by(vector);
        }
    }
}

impl fmt::Display for BondGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BondGraph {{ atoms: {}, bonds: {} }}",
            self.atom_count(),
            self.bond_count()
        )
    }
}
