//! Angle and dihedral valence terms and the per-container term set.

use std::fmt;

/// Three atoms forming a bond angle; the vertex sits at index 1.
///
/// The terminals are interchangeable, so equality is defined on the canonical form with
/// the lower terminal index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Angle {
    pub atoms: [usize; 3],
}

/// Four atoms spanning three consecutive bonds; the central bond joins indices 1 and 2.
///
/// A quadruple and its reverse describe the same torsion; the canonical form is the
/// lexicographically smaller of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dihedral {
    pub atoms: [usize; 4],
}

impl Angle {
    pub fn new(a: usize, vertex: usize, c: usize) -> Self {
        let (lo, hi) = if a <= c { (a, c) } else { (c, a) };
        Self {
            atoms: [lo, vertex, hi],
        }
    }

    pub fn vertex(&self) -> usize {
        self.atoms[1]
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.atoms.contains(&atom)
    }

    /// Whether the angle is built on the bond `a1-a2` (one arm is that bond).
    pub fn has_bond(&self, a1: usize, a2: usize) -> bool {
        let [x, v, z] = self.atoms;
        (v == a1 && (x == a2 || z == a2)) || (v == a2 && (x == a1 || z == a1))
    }
}

impl Dihedral {
    pub fn new(a: usize, b: usize, c: usize, d: usize) -> Self {
        let forward = [a, b, c, d];
        let reverse = [d, c, b, a];
        Self {
            atoms: forward.min(reverse),
        }
    }

    /// Atoms of the central bond.
    pub fn axis(&self) -> (usize, usize) {
        (self.atoms[1], self.atoms[2])
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.atoms.contains(&atom)
    }

    /// Whether `a1-a2` is one of the three bonds the dihedral runs through.
    pub fn has_bond(&self, a1: usize, a2: usize) -> bool {
        self.atoms
            .windows(2)
            .any(|w| (w[0] == a1 && w[1] == a2) || (w[0] == a2 && w[1] == a1))
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.atoms;
        write!(f, "{}-{}-{}", a, b, c)
    }
}

impl fmt::Display for Dihedral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.atoms;
        write!(f, "{}-{}-{}-{}", a, b, c, d)
    }
}

/// Bonds, angles and dihedrals owned by one container.
///
/// Bonds are stored as indices into the owning [`BondGraph`](super::graph::BondGraph).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValenceTerms {
    pub bonds: Vec<usize>,
    pub angles: Vec<Angle>,
    pub dihedrals: Vec<Dihedral>,
}

impl ValenceTerms {
    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty() && self.angles.is_empty() && self.dihedrals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bonds.len() + self.angles.len() + self.dihedrals.len()
    }

    pub fn clear(&mut self) {
        self.bonds.clear();
        self.angles.clear();
        self.dihedrals.clear();
    }

    /// Appends `other`, keeping each list sorted and free of duplicates.
    pub fn merge(&mut self, other: ValenceTerms) {
        self.bonds.extend(other.bonds);
        self.angles.extend(other.angles);
        self.dihedrals.extend(other.dihedrals);
        self.bonds.sort_unstable();
        self.bonds.dedup();
        self.angles.sort_unstable();
        self.angles.dedup();
        self.dihedrals.sort_unstable();
        self.dihedrals.dedup();
    }
}
