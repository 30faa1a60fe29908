//! Atom representation shared by every stage of the pipeline.
//!
//! An atom carries its pool index, label, element, position and van der Waals radius. The
//! index is the atom's identity: bonds, valence terms and containers all refer to atoms by
//! index into the owning [`BondGraph`](super::graph::BondGraph).

use super::types::{Element, Point};
use smol_str::SmolStr;
use std::fmt;

/// Labeled atom with an index into the flat pool it was loaded from.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Position of the atom in the input pool.
    pub index: usize,
    /// Atom label as supplied by the loader (e.g. `CA`).
    pub name: SmolStr,
    /// Chemical element.
    pub element: Element,
    /// Cartesian coordinates in ångströms.
    pub pos: Point,
    /// Van der Waals radius in ångströms used by bond inference.
    pub vdw_radius: f64,
    /// Set when the element or radius could not be resolved; such atoms never seed a
    /// polymer and degrade their fragment to an unknown hetero molecule.
    pub malformed: bool,
    /// Chain identifier supplied by the loader, if any.
    pub chain_hint: Option<SmolStr>,
    /// Residue name supplied by the loader, if any.
    pub residue_hint: Option<SmolStr>,
}

impl Atom {
    /// Creates an atom with the element's default radius.
    ///
    /// Elements without a tabulated radius receive [`Atom::FALLBACK_RADIUS`] and are flagged
    /// as malformed.
    ///
    /// # Arguments
    ///
    /// * `index` - Position of the atom in the pool.
    /// * `name` - Atom label such as `"N"` or `"OP1"`.
    /// * `element` - Chemical identity.
    /// * `pos` - Cartesian coordinates in ångströms.
    pub fn new(index: usize, name: &str, element: Element, pos: Point) -> Self {
        let (vdw_radius, malformed) = match element.vdw_radius() {
            Some(r) => (r, false),
            None => (Self::FALLBACK_RADIUS, true),
        };
        Self {
            index,
            name: SmolStr::new(name),
            element,
            pos,
            vdw_radius,
            malformed,
            chain_hint: None,
            residue_hint: None,
        }
    }

    /// Radius assigned to atoms whose element has no tabulated value.
    pub const FALLBACK_RADIUS: f64 = 1.5;

    pub fn with_chain_hint(mut self, chain: impl Into<SmolStr>) -> Self {
        self.chain_hint = Some(chain.into());
        self
    }

    pub fn with_residue_hint(mut self, residue: impl Into<SmolStr>) -> Self {
        self.residue_hint = Some(residue.into());
        self
    }

    pub fn distance_squared(&self, other: &Atom) -> f64 {
        nalgebra::distance_squared(&self.pos, &other.pos)
    }

    pub fn distance(&self, other: &Atom) -> f64 {
        nalgebra::distance(&self.pos, &other.pos)
    }

    pub fn translate_by(&mut self, vector: &nalgebra::Vector3<f64>) {
        self.pos += vector;
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Atom {{ index: {}, name: \"{}\", element: {}, pos: [{:.3}, {:.3}, {:.3}] }}",
            self.index, self.name, self.element, self.pos.x, self.pos.y, self.pos.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atom_new_takes_radius_from_element() {
        let atom = Atom::new(3, "CA", Element::C, Point::new(1.0, 2.0, 3.0));

        assert_eq!(atom.index, 3);
        assert_eq!(atom.name, "CA");
        assert!((atom.vdw_radius - 1.70).abs() < 1e-10);
        assert!(!atom.malformed);
        assert!(atom.chain_hint.is_none());
    }

    #[test]
    fn atom_with_unknown_element_is_malformed() {
        let atom = Atom::new(0, "X1", Element::Unknown, Point::origin());

        assert!(atom.malformed);
        assert!((atom.vdw_radius - Atom::FALLBACK_RADIUS).abs() < 1e-10);
    }

    #[test]
    fn atom_distance_matches_pythagoras() {
        let a = Atom::new(0, "A", Element::H, Point::new(0.0, 0.0, 0.0));
        let b = Atom::new(1, "B", Element::H, Point::new(3.0, 4.0, 0.0));

        assert!((a.distance_squared(&b) - 25.0).abs() < 1e-10);
        assert!((a.distance(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn atom_translate_by_accumulates() {
        let mut atom = Atom::new(0, "N", Element::N, Point::new(1.0, 2.0, 3.0));

        atom.translate_by(&nalgebra::Vector3::new(0.5, -1.0, 2.5));
        atom.translate_by(&nalgebra::Vector3::new(-0.5, 0.0, 0.0));

        assert!((atom.pos.x - 1.0).abs() < 1e-10);
        assert!((atom.pos.y - 1.0).abs() < 1e-10);
        assert!((atom.pos.z - 5.5).abs() < 1e-10);
    }

    #[test]
    fn atom_hints_are_attached_by_builders() {
        let atom = Atom::new(0, "N", Element::N, Point::origin())
            .with_chain_hint("B")
            .with_residue_hint("GLY");

        assert_eq!(atom.chain_hint.as_deref(), Some("B"));
        assert_eq!(atom.residue_hint.as_deref(), Some("GLY"));
    }

    #[test]
    fn atom_display_formats_index_and_position() {
        let atom = Atom::new(7, "CA", Element::C, Point::new(1.234, -5.678, 9.012));

        assert_eq!(
            atom.to_string(),
            "Atom { index: 7, name: \"CA\", element: C, pos: [1.234, -5.678, 9.012] }"
        );
    }
}
