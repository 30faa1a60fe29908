//! Claim tracking for the flat atom pool.
//!
//! The pool is the single source of truth for whether an atom has been placed in a
//! container. Backbone search consults it to avoid re-entering claimed atoms, and
//! classification runs until it is drained.

#[derive(Debug, Clone)]
pub struct AtomPool {
    claimed: Vec<bool>,
    remaining: usize,
}

impl AtomPool {
    pub fn new(atom_count: usize) -> Self {
        Self {
            claimed: vec![false; atom_count],
            remaining: atom_count,
        }
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_claimed(&self, atom: usize) -> bool {
        self.claimed[atom]
    }

    /// Number of atoms still unclaimed.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Marks `atom` as owned by a container.
    ///
    /// Claiming an atom twice is a programmer error and trips a debug assertion.
    pub fn claim(&mut self, atom: usize) {
        debug_assert!(!self.claimed[atom], "Atom {} claimed twice", atom);
        if !self.claimed[atom] {
            self.claimed[atom] = true;
            self.remaining -= 1;
        }
    }

    pub fn claim_all(&mut self, atoms: &[usize]) {
        for &atom in atoms {
            self.claim(atom);
        }
    }

    /// Unclaimed atoms in ascending index order.
    pub fn unclaimed(&self) -> impl Iterator<Item = usize> + '_ {
        self.claimed
            .iter()
            .enumerate()
            .filter(|(_, claimed)| !**claimed)
            .map(|(i, _)| i)
    }
}
