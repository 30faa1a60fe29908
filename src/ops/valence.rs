//! Angle and dihedral enumeration over a [`BondGraph`].
//!
//! Every pair of bonds sharing one atom yields an angle, and every bond with at least one
//! other bond on each end yields dihedrals. Enumeration can be restricted to a container's
//! atoms through [`Membership`]; terms with any atom outside the set are skipped. Torsions
//! whose first and last atom coincide (three-membered rings) are dropped.

use crate::geometry;
use crate::model::graph::BondGraph;
use crate::model::valence::{Angle, Dihedral, ValenceTerms};

/// Atom subset that enumeration is restricted to.
#[derive(Debug, Clone)]
pub struct Membership {
    atoms: Option<Vec<usize>>,
}

impl Membership {
    /// Every atom of the graph.
    pub fn all() -> Self {
        Self { atoms: None }
    }

    /// Only the listed atoms.
    pub fn of(atoms: impl IntoIterator<Item = usize>) -> Self {
        let mut atoms: Vec<usize> = atoms.into_iter().collect();
        atoms.sort_unstable();
        atoms.dedup();
        Self { atoms: Some(atoms) }
    }

    pub fn contains(&self, atom: usize) -> bool {
        match &self.atoms {
            None => true,
            Some(atoms) => atoms.binary_search(&atom).is_ok(),
        }
    }

    /// Member atoms in ascending order.
    fn iter(&self, atom_count: usize) -> impl Iterator<Item = usize> + '_ {
        let (listed, all) = match &self.atoms {
            Some(atoms) => (Some(atoms.iter().copied()), None),
            None => (None, Some(0..atom_count)),
        };
        listed.into_iter().flatten().chain(all.into_iter().flatten())
    }
}

/// Indices of the bonds whose endpoints are both members, ascending.
pub fn bonds(graph: &BondGraph, members: &Membership) -> Vec<usize> {
    let mut bonds: Vec<usize> = members
        .iter(graph.atom_count())
        .flat_map(|atom| {
            graph
                .bond_indices_of(atom)
                .iter()
                .copied()
                .filter(move |&b| {
                    let bond = graph.bond(b);
                    bond.a1_idx == atom && members.contains(bond.a2_idx)
                })
        })
        .collect();
    bonds.sort_unstable();
    bonds
}

/// One angle per unordered pair of incident bonds at each member atom.
pub fn angles(graph: &BondGraph, members: &Membership) -> Vec<Angle> {
    let mut angles = Vec::new();
    for vertex in members.iter(graph.atom_count()) {
        let arms: Vec<usize> = graph
            .neighbors_of(vertex)
            .filter(|&n| members.contains(n))
            .collect();
        for (i, &a) in arms.iter().enumerate() {
            for &c in &arms[i + 1..] {
                angles.push(Angle::new(a, vertex, c));
            }
        }
    }
    angles.sort_unstable();
    angles
}

/// Dihedrals about every member bond, each quadruple reported once.
pub fn dihedrals(graph: &BondGraph, members: &Membership) -> Vec<Dihedral> {
    let mut dihedrals = Vec::new();
    for bond_idx in bonds(graph, members) {
        let bond = graph.bond(bond_idx);
        push_axis_dihedrals(graph, members, bond.a1_idx, bond.a2_idx, &mut dihedrals);
    }
    dihedrals.sort_unstable();
    dihedrals.dedup();
    dihedrals
}

fn push_axis_dihedrals(
    graph: &BondGraph,
    members: &Membership,
    b: usize,
    c: usize,
    out: &mut Vec<Dihedral>,
) {
    for a in graph.neighbors_of(b) {
        if a == c || !members.contains(a) {
            continue;
        }
        for d in graph.neighbors_of(c) {
            if d == b || d == a || !members.contains(d) {
                continue;
            }
            out.push(Dihedral::new(a, b, c, d));
        }
    }
}

/// Bonds, angles and dihedrals among the member atoms.
pub fn enumerate(graph: &BondGraph, members: &Membership) -> ValenceTerms {
    ValenceTerms {
        bonds: bonds(graph, members),
        angles: angles(graph, members),
        dihedrals: dihedrals(graph, members),
    }
}

/// The bond itself plus every angle and dihedral that runs through it.
///
/// Dihedrals are collected whether the bond is the central one or a terminal one.
pub fn spanning_terms(graph: &BondGraph, bond_idx: usize, members: &Membership) -> ValenceTerms {
    let bond = *graph.bond(bond_idx);
    let (x, y) = (bond.a1_idx, bond.a2_idx);
    let mut terms = ValenceTerms {
        bonds: vec![bond_idx],
        ..Default::default()
    };
    if !bond.within(|a| members.contains(a)) {
        return terms;
    }

    for (vertex, far) in [(x, y), (y, x)] {
        for n in graph.neighbors_of(vertex) {
            if n != far && members.contains(n) {
                terms.angles.push(Angle::new(far, vertex, n));
            }
        }
    }

    push_axis_dihedrals(graph, members, x, y, &mut terms.dihedrals);
    for (start, next) in [(x, y), (y, x)] {
        for n in graph.neighbors_of(next) {
            if n == start || !members.contains(n) {
                continue;
            }
            for m in graph.neighbors_of(n) {
                if m != next && m != start && members.contains(m) {
                    terms.dihedrals.push(Dihedral::new(start, next, n, m));
                }
            }
        }
    }

    terms.angles.sort_unstable();
    terms.angles.dedup();
    terms.dihedrals.sort_unstable();
    terms.dihedrals.dedup();
    terms
}

/// Current value of an angle, in radians.
pub fn angle_value(graph: &BondGraph, angle: &Angle) -> f64 {
    let [a, b, c] = angle.atoms;
    geometry::angle(&graph.atom(a).pos, &graph.atom(b).pos, &graph.atom(c).pos)
}

/// Current signed value of a dihedral, in radians.
pub fn dihedral_value(graph: &BondGraph, dihedral: &Dihedral) -> f64 {
    let [a, b, c, d] = dihedral.atoms;
    geometry::dihedral(
        &graph.atom(a).pos,
        &graph.atom(b).pos,
        &graph.atom(c).pos,
        &graph.atom(d).pos,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::graph::Bond;
    use crate::model::types::{BondOrder, Element, Point};
    use std::collections::HashSet;
    use std::f64::consts::FRAC_PI_2;

    fn graph(positions: &[(f64, f64, f64)], edges: &[(usize, usize)]) -> BondGraph {
        let atoms = positions
            .iter()
            .enumerate()
            .map(|(i, &(x, y, z))| Atom::new(i, "C", Element::C, Point::new(x, y, z)))
            .collect();
        BondGraph::with_bonds(
            atoms,
            edges.iter().map(|&(a, b)| Bond::new(a, b, BondOrder::Single)),
        )
    }

    fn butane() -> BondGraph {
        graph(
            &[
                (0.0, 1.0, 0.0),
                (0.0, 0.0, 0.0),
                (1.0, 0.0, 0.0),
                (1.0, 0.0, 1.0),
            ],
            &[(0, 1), (1, 2), (2, 3)],
        )
    }

    #[test]
    fn linear_chain_counts() {
        let g = butane();
        let terms = enumerate(&g, &Membership::all());

        assert_eq!(terms.bonds.len(), 3);
        assert_eq!(terms.angles, vec![Angle::new(0, 1, 2), Angle::new(1, 2, 3)]);
        assert_eq!(terms.dihedrals, vec![Dihedral::new(0, 1, 2, 3)]);
    }

    #[test]
    fn angle_centre_sits_at_index_one() {
        let g = graph(
            &[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0), (0.0, 0.0, 1.0)],
            &[(0, 1), (0, 2), (0, 3)],
        );
        let angles = angles(&g, &Membership::all());

        assert_eq!(angles.len(), 3);
        assert!(angles.iter().all(|a| a.vertex() == 0));
    }

    #[test]
    fn dihedrals_are_not_duplicated() {
        let g = graph(
            &[(0.0, 0.0, 0.0); 6],
            &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)],
        );
        let dihedrals = dihedrals(&g, &Membership::all());
        let unique: HashSet<_> = dihedrals.iter().collect();

        assert_eq!(dihedrals.len(), 6);
        assert_eq!(unique.len(), dihedrals.len());
    }

    #[test]
    fn three_membered_ring_has_no_degenerate_dihedrals() {
        let g = graph(&[(0.0, 0.0, 0.0); 3], &[(0, 1), (1, 2), (2, 0)]);
        let terms = enumerate(&g, &Membership::all());

        assert_eq!(terms.angles.len(), 3);
        assert!(terms.dihedrals.is_empty());
    }

    #[test]
    fn isolated_atoms_have_no_terms() {
        let g = graph(&[(0.0, 0.0, 0.0), (5.0, 0.0, 0.0)], &[]);
        assert!(enumerate(&g, &Membership::all()).is_empty());
    }

    #[test]
    fn membership_restricts_terms() {
        let g = butane();
        let members = Membership::of([2, 0, 1]);
        let terms = enumerate(&g, &members);

        assert_eq!(terms.bonds, vec![0, 1]);
        assert_eq!(terms.angles, vec![Angle::new(0, 1, 2)]);
        assert!(terms.dihedrals.is_empty());
        assert!(!members.contains(3));
        assert!(!members.contains(99));
    }

    #[test]
    fn spanning_terms_cover_every_term_through_the_bond() {
        let g = graph(
            &[(0.0, 0.0, 0.0); 5],
            &[(0, 1), (1, 2), (2, 3), (3, 4)],
        );
        let bond = g.bond_between(1, 2).unwrap();
        let terms = spanning_terms(&g, bond, &Membership::all());

        assert_eq!(terms.bonds, vec![bond]);
        assert_eq!(terms.angles, vec![Angle::new(0, 1, 2), Angle::new(1, 2, 3)]);
        assert_eq!(
            terms.dihedrals,
            vec![Dihedral::new(0, 1, 2, 3), Dihedral::new(1, 2, 3, 4)]
        );

        let all = enumerate(&g, &Membership::all());
        for angle in &all.angles {
            assert_eq!(terms.angles.contains(angle), angle.has_bond(1, 2));
        }
        for dihedral in &all.dihedrals {
            assert_eq!(terms.dihedrals.contains(dihedral), dihedral.has_bond(1, 2));
        }
    }

    #[test]
    fn values_follow_geometry() {
        let g = butane();

        let angle = angle_value(&g, &Angle::new(0, 1, 2));
        let torsion = dihedral_value(&g, &Dihedral::new(0, 1, 2, 3));

        assert!((angle - FRAC_PI_2).abs() < 1e-10);
        assert!((torsion - FRAC_PI_2).abs() < 1e-10);
    }
}
