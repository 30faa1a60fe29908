//! Synthetic structures shared by the operation tests.
//!
//! Everything here uses explicit bonds, so coordinates only need to be distinct.

use crate::model::atom::Atom;
use crate::model::graph::{Bond, BondGraph};
use crate::model::types::{BondOrder, Element, Point};

#[derive(Default)]
pub(crate) struct Builder {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

impl Builder {
    pub(crate) fn atom(&mut self, name: &str, element: Element) -> usize {
        let idx = self.atoms.len();
        let pos = Point::new(idx as f64 * 1.5, (idx % 3) as f64, (idx % 5) as f64 * 0.5);
        self.atoms.push(Atom::new(idx, name, element, pos));
        idx
    }

    pub(crate) fn bond(&mut self, a: usize, b: usize) {
        self.bonds.push(Bond::new(a, b, BondOrder::Single));
    }

    pub(crate) fn double(&mut self, a: usize, b: usize) {
        self.bonds.push(Bond::new(a, b, BondOrder::Double));
    }

    pub(crate) fn hint(&mut self, atom: usize, residue: &str) {
        self.atoms[atom].residue_hint = Some(residue.into());
    }

    /// Atoms labelled `name`, in insertion order.
    pub(crate) fn named(&self, name: &str) -> Vec<usize> {
        self.atoms
            .iter()
            .filter(|a| a.name == name)
            .map(|a| a.index)
            .collect()
    }

    pub(crate) fn finish(self) -> BondGraph {
        BondGraph::with_bonds(self.atoms, self.bonds)
    }
}

/// A built graph plus its expected backbone atoms in chain order.
pub(crate) struct Built {
    pub graph: BondGraph,
    pub backbone: Vec<usize>,
}

/// Atoms labelled `name`, in index order.
pub(crate) fn named(graph: &BondGraph, name: &str) -> Vec<usize> {
    (0..graph.atom_count())
        .filter(|&a| graph.atom(a).name == name)
        .collect()
}

pub(crate) fn graph_from(elements: &[Element], edges: &[(usize, usize)]) -> BondGraph {
    let mut builder = Builder::default();
    for &element in elements {
        builder.atom(element.symbol(), element);
    }
    for &(a, b) in edges {
        builder.bond(a, b);
    }
    builder.finish()
}

/// Where a side-chain atom attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Link {
    Alpha,
    Amide,
    Side(usize),
}

pub(crate) type SideChain = &'static [(&'static str, Element, &'static [Link])];

pub(crate) const GLY: SideChain = &[];
pub(crate) const ALA: SideChain = &[("CB", Element::C, &[Link::Alpha])];
pub(crate) const SER: SideChain = &[
    ("CB", Element::C, &[Link::Alpha]),
    ("OG", Element::O, &[Link::Side(0)]),
];
pub(crate) const CYS: SideChain = &[
    ("CB", Element::C, &[Link::Alpha]),
    ("SG", Element::S, &[Link::Side(0)]),
];
pub(crate) const VAL: SideChain = &[
    ("CB", Element::C, &[Link::Alpha]),
    ("CG1", Element::C, &[Link::Side(0)]),
    ("CG2", Element::C, &[Link::Side(0)]),
];
pub(crate) const PRO: SideChain = &[
    ("CB", Element::C, &[Link::Alpha]),
    ("CG", Element::C, &[Link::Side(0)]),
    ("CD", Element::C, &[Link::Side(1), Link::Amide]),
];
pub(crate) const LEU: SideChain = &[
    ("CB", Element::C, &[Link::Alpha]),
    ("CG", Element::C, &[Link::Side(0)]),
    ("CD1", Element::C, &[Link::Side(1)]),
    ("CD2", Element::C, &[Link::Side(1)]),
];
pub(crate) const ILE: SideChain = &[
    ("CB", Element::C, &[Link::Alpha]),
    ("CG1", Element::C, &[Link::Side(0)]),
    ("CG2", Element::C, &[Link::Side(0)]),
    ("CD1", Element::C, &[Link::Side(1)]),
];
pub(crate) const LYS: SideChain = &[
    ("CB", Element::C, &[Link::Alpha]),
    ("CG", Element::C, &[Link::Side(0)]),
    ("CD", Element::C, &[Link::Side(1)]),
    ("CE", Element::C, &[Link::Side(2)]),
    ("NZ", Element::N, &[Link::Side(3)]),
];

/// Appends a peptide and returns its N, CA, C atoms in chain order.
///
/// With `full`, the chain carries amide and alpha hydrogens, an N-terminal NH3 and a
/// C-terminal OXT.
pub(crate) fn add_peptide(builder: &mut Builder, side_chains: &[SideChain], full: bool) -> Vec<usize> {
    let mut backbone = Vec::with_capacity(side_chains.len() * 3);
    let mut previous_c = None;

    for (k, side_chain) in side_chains.iter().enumerate() {
        let n = builder.atom("N", Element::N);
        let ca = builder.atom("CA", Element::C);
        let c = builder.atom("C", Element::C);
        let o = builder.atom("O", Element::O);
        builder.bond(n, ca);
        builder.bond(ca, c);
        builder.double(c, o);
        if let Some(prev) = previous_c {
            builder.bond(prev, n);
        }

        let mut placed = Vec::with_capacity(side_chain.len());
        for &(name, element, links) in side_chain.iter() {
            let idx = builder.atom(name, element);
            for link in links {
                let partner = match *link {
                    Link::Alpha => ca,
                    Link::Amide => n,
                    Link::Side(j) => placed[j],
                };
                builder.bond(idx, partner);
            }
            placed.push(idx);
        }

        if full {
            let ring_closed = side_chain
                .iter()
                .any(|(_, _, links)| links.contains(&Link::Amide));
            if k == 0 {
                for name in ["H1", "H2", "H3"] {
                    let h = builder.atom(name, Element::H);
                    builder.bond(n, h);
                }
            } else if !ring_closed {
                let h = builder.atom("H", Element::H);
                builder.bond(n, h);
            }
            let ha = builder.atom("HA", Element::H);
            builder.bond(ca, ha);
            if k + 1 == side_chains.len() {
                let oxt = builder.atom("OXT", Element::O);
                builder.bond(c, oxt);
            }
        }

        backbone.extend([n, ca, c]);
        previous_c = Some(c);
    }
    backbone
}

pub(crate) fn peptide(side_chains: &[SideChain], full: bool) -> Built {
    let mut builder = Builder::default();
    let backbone = add_peptide(&mut builder, side_chains, full);
    Built {
        graph: builder.finish(),
        backbone,
    }
}

pub(crate) fn polyglycine(residues: usize, full: bool) -> Built {
    peptide(&vec![GLY; residues], full)
}

/// Copies `graph` and hangs a linear carbon chain of `len` atoms off `at`.
pub(crate) fn with_carbon_branch(graph: &BondGraph, at: usize, len: usize) -> (BondGraph, Vec<usize>) {
    let mut atoms = graph.atoms().to_vec();
    let mut bonds = graph.bonds().to_vec();
    let mut branch = Vec::with_capacity(len);
    let mut previous = at;

    for i in 0..len {
        let idx = atoms.len();
        let pos = Point::new(-1.5 * (i + 1) as f64, 2.0, 0.0);
        atoms.push(Atom::new(idx, &format!("CX{}", i + 1), Element::C, pos));
        bonds.push(Bond::new(previous, idx, BondOrder::Single));
        branch.push(idx);
        previous = idx;
    }
    (BondGraph::with_bonds(atoms, bonds), branch)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Base {
    A,
    C,
    G,
}

/// Appends a base and returns the nitrogen that bonds C1'.
fn add_base(builder: &mut Builder, base: Base) -> usize {
    match base {
        Base::C => {
            let n1 = builder.atom("N1", Element::N);
            let c2 = builder.atom("C2", Element::C);
            let o2 = builder.atom("O2", Element::O);
            let n3 = builder.atom("N3", Element::N);
            let c4 = builder.atom("C4", Element::C);
            let n4 = builder.atom("N4", Element::N);
            let c5 = builder.atom("C5", Element::C);
            let c6 = builder.atom("C6", Element::C);
            for (a, b) in [(n1, c2), (c2, o2), (c2, n3), (n3, c4), (c4, n4), (c4, c5), (c5, c6), (c6, n1)] {
                builder.bond(a, b);
            }
            n1
        }
        Base::A | Base::G => {
            let n9 = builder.atom("N9", Element::N);
            let c8 = builder.atom("C8", Element::C);
            let n7 = builder.atom("N7", Element::N);
            let c5 = builder.atom("C5", Element::C);
            let c6 = builder.atom("C6", Element::C);
            let n1 = builder.atom("N1", Element::N);
            let c2 = builder.atom("C2", Element::C);
            let n3 = builder.atom("N3", Element::N);
            let c4 = builder.atom("C4", Element::C);
            for (a, b) in [(n9, c8), (c8, n7), (n7, c5), (c5, c6), (c6, n1), (n1, c2), (c2, n3), (n3, c4), (c4, c5), (c4, n9)] {
                builder.bond(a, b);
            }
            if base == Base::A {
                let n6 = builder.atom("N6", Element::N);
                builder.bond(c6, n6);
            } else {
                let o6 = builder.atom("O6", Element::O);
                let n2 = builder.atom("N2", Element::N);
                builder.bond(c6, o6);
                builder.bond(c2, n2);
            }
            n9
        }
    }
}

/// Appends a nucleic-acid strand with 5' and 3' phosphates.
///
/// Each unit is a base plus whether its sugar is a ribose (carries O2'). Returns the
/// P, O5', C5', C4', C3', O3' atoms of every unit in 5' to 3' order.
pub(crate) fn add_nucleic(builder: &mut Builder, units: &[(Base, bool)]) -> Vec<usize> {
    let mut backbone = Vec::with_capacity(units.len() * 6);
    let mut previous_o3 = None;

    for &(base, ribose) in units {
        let p = builder.atom("P", Element::P);
        let op1 = builder.atom("OP1", Element::O);
        let op2 = builder.atom("OP2", Element::O);
        let o5 = builder.atom("O5'", Element::O);
        let c5 = builder.atom("C5'", Element::C);
        let c4 = builder.atom("C4'", Element::C);
        let o4 = builder.atom("O4'", Element::O);
        let c3 = builder.atom("C3'", Element::C);
        let o3 = builder.atom("O3'", Element::O);
        let c2 = builder.atom("C2'", Element::C);
        let c1 = builder.atom("C1'", Element::C);
        for (a, b) in [
            (p, op1),
            (p, op2),
            (p, o5),
            (o5, c5),
            (c5, c4),
            (c4, o4),
            (c4, c3),
            (c3, o3),
            (c3, c2),
            (c2, c1),
            (c1, o4),
        ] {
            builder.bond(a, b);
        }
        if ribose {
            let o2 = builder.atom("O2'", Element::O);
            builder.bond(c2, o2);
        }
        if let Some(prev) = previous_o3 {
            builder.bond(prev, p);
        }
        let glycosidic = add_base(builder, base);
        builder.bond(c1, glycosidic);

        backbone.extend([p, o5, c5, c4, c3, o3]);
        previous_o3 = Some(o3);
    }

    if let Some(o3) = previous_o3 {
        let p = builder.atom("P", Element::P);
        let op1 = builder.atom("OP1", Element::O);
        let op2 = builder.atom("OP2", Element::O);
        builder.bond(o3, p);
        builder.bond(p, op1);
        builder.bond(p, op2);
    }
    backbone
}

pub(crate) fn nucleic(units: &[(Base, bool)]) -> Built {
    let mut builder = Builder::default();
    let backbone = add_nucleic(&mut builder, units);
    Built {
        graph: builder.finish(),
        backbone,
    }
}

/// Appends a water molecule and returns its oxygen.
pub(crate) fn add_water(builder: &mut Builder) -> usize {
    let o = builder.atom("O", Element::O);
    let h1 = builder.atom("H1", Element::H);
    let h2 = builder.atom("H2", Element::H);
    builder.bond(o, h1);
    builder.bond(o, h2);
    o
}
