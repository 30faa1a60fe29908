//! Valence terms that bridge two containers.
//!
//! A joint is created for every pair of containers connected by at least one bond. It holds
//! the bridging bonds plus every angle and dihedral that runs through one of them, so those
//! terms are never recorded on either container.

use super::valence::ValenceTerms;
use std::fmt;

/// Container reference used as a joint endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Site {
    /// Residue of the enclosing polymer, by residue number.
    Residue(i32),
    /// Polymer of the assembly, by position.
    Polymer(usize),
    /// Hetero molecule of the assembly, by position.
    Molecule(usize),
    Ion(usize),
    Water(usize),
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Site::Residue(n) => write!(f, "residue {}", n),
            Site::Polymer(i) => write!(f, "polymer {}", i),
            Site::Molecule(i) => write!(f, "molecule {}", i),
            Site::Ion(i) => write!(f, "ion {}", i),
            Site::Water(i) => write!(f, "water {}", i),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub left: Site,
    pub right: Site,
    pub terms: ValenceTerms,
}

impl Joint {
    /// Creates an empty joint; endpoints are stored in ascending order.
    pub fn new(a: Site, b: Site) -> Self {
        debug_assert!(a != b, "Joint endpoints must differ");
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        Self {
            left,
            right,
            terms: ValenceTerms::default(),
        }
    }

    pub fn connects(&self, site: Site) -> bool {
        self.left == site || self.right == site
    }

    pub fn bond_count(&self) -> usize {
        self.terms.bonds.len()
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Joint {{ {} <-> {}, bonds: {}, angles: {}, dihedrals: {} }}",
            self.left,
            self.right,
            self.terms.bonds.len(),
            self.terms.angles.len(),
            self.terms.dihedrals.len()
        )
    }
}
