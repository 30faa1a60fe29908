//! Cutting a backbone path into classified residues.
//!
//! A path is scanned for the repeating unit of each polymer kind (`N-CA-C` for proteins,
//! `O5'-C5'-C4'-C3'-O3'` for nucleic acids) in both orientations, and the reading with the
//! most units wins. A protein reading whose path turns into the side chain at its last
//! alpha carbon is first closed with that residue's carbonyl carbon. Each unit then
//! collects, in order:
//!
//! 1. its pattern atoms and the path atoms linking it to the previous unit,
//! 2. the heavy side chain grown from the anchor (CA or C4'), whose stoichiometry key is
//!    looked up in the side-chain table,
//! 3. a terminal cap on the first and last unit,
//! 4. dangling atoms (hydrogens, carbonyl and phosphate oxygens) reachable without
//!    crossing the backbone.
//!
//! None of these floods crosses an S-S bond; the partner cysteine keeps its own atoms and
//! the bridge is left to the joints.

use super::backbone::{is_alpha_carbon, is_carbonyl_carbon};
use super::error::Error;
use crate::db::{self, Disambiguation};
use crate::model::graph::BondGraph;
use crate::model::pool::AtomPool;
use crate::model::residue::{Cap, CapKind, Residue};
use crate::model::stoichiometry::Stoichiometry;
use crate::model::types::{Element, PolymerKind, ResiduePosition};
use smol_str::SmolStr;
use std::collections::{HashSet, VecDeque};

/// Residues cut from one backbone path.
#[derive(Debug, Clone)]
pub struct Segmentation {
    pub kind: PolymerKind,
    pub residues: Vec<Residue>,
}

impl Segmentation {
    /// Every atom claimed by the residues.
    pub fn atoms(&self) -> impl Iterator<Item = usize> + '_ {
        self.residues.iter().flat_map(Residue::iter_atoms)
    }
}

fn unit_elements(kind: PolymerKind) -> &'static [Element] {
    match kind {
        PolymerKind::Protein => &[Element::N, Element::C, Element::C],
        PolymerKind::NucleicAcid => &[Element::O, Element::C, Element::C, Element::C, Element::O],
    }
}

fn anchor_offset(kind: PolymerKind) -> usize {
    match kind {
        PolymerKind::Protein => 1,
        PolymerKind::NucleicAcid => 2,
    }
}

/// Segments `path` into residues.
///
/// # Arguments
///
/// * `graph` - Bond graph the path was found in.
/// * `pool` - Claim state; claimed atoms are never added to a residue.
/// * `path` - Backbone path, in either orientation.
///
/// # Errors
///
/// Returns [`Error::EmptyPath`] for an empty path and [`Error::SegmentationFailed`] when no
/// repeating unit is found in either orientation.
pub fn segment(graph: &BondGraph, pool: &AtomPool, path: &[usize]) -> Result<Segmentation, Error> {
    let Some(&seed) = path.first() else {
        return Err(Error::EmptyPath);
    };

    let reversed: Vec<usize> = path.iter().rev().copied().collect();
    let mut best: Option<(PolymerKind, Vec<usize>, Vec<usize>)> = None;
    for kind in [PolymerKind::Protein, PolymerKind::NucleicAcid] {
        for oriented in [path, reversed.as_slice()] {
            let oriented = match kind {
                PolymerKind::Protein => close_carbonyl_end(graph, pool, oriented),
                PolymerKind::NucleicAcid => oriented.to_vec(),
            };
            let starts = find_units(graph, &path_mask(graph, &oriented), &oriented, kind);
            if best
                .as_ref()
                .is_none_or(|(_, _, found)| starts.len() > found.len())
            {
                best = Some((kind, oriented, starts));
            }
        }
    }

    let (kind, oriented, starts) = match best {
        Some(found) if !found.2.is_empty() => found,
        _ => return Err(Error::segmentation_failed(seed, path.len())),
    };
    log::trace!(
        "Path from atom {} reads as {} {} units",
        seed,
        starts.len(),
        kind
    );

    let mut cutter = Cutter {
        graph,
        pool,
        kind,
        on_path: path_mask(graph, &oriented),
        taken: vec![false; graph.atom_count()],
    };
    Ok(Segmentation {
        kind,
        residues: cutter.cut(&oriented, &starts),
    })
}

fn path_mask(graph: &BondGraph, path: &[usize]) -> Vec<bool> {
    let mut on_path = vec![false; graph.atom_count()];
    for &atom in path {
        on_path[atom] = true;
    }
    on_path
}

/// Ends a protein path `N, CA, C` when it leaves its last alpha carbon through the side chain.
///
/// The carbonyl carbon of a C-terminal residue is a one-atom continuation, so a longer side
/// chain wins the backbone search and the path reads `N, CA, CB, CG`. The path is cut after
/// that CA and closed with its free carbonyl carbon; other paths are returned unchanged.
fn close_carbonyl_end(graph: &BondGraph, pool: &AtomPool, path: &[usize]) -> Vec<usize> {
    let last_alpha = (0..path.len().saturating_sub(1))
        .rev()
        .find(|&i| graph.element(path[i]) == Element::N && is_alpha_carbon(graph, path[i + 1]));
    let Some(i) = last_alpha else {
        return path.to_vec();
    };
    if path
        .get(i + 2)
        .is_some_and(|&next| is_carbonyl_carbon(graph, next))
    {
        return path.to_vec();
    }

    let kept = &path[..=i + 1];
    let carbonyl = graph
        .neighbors_of(path[i + 1])
        .find(|&c| is_carbonyl_carbon(graph, c) && !pool.is_claimed(c) && !kept.contains(&c));
    match carbonyl {
        Some(c) => {
            log::trace!("Closing path at carbonyl carbon {} after alpha carbon {}", c, path[i + 1]);
            kept.iter().copied().chain([c]).collect()
        }
        None => path.to_vec(),
    }
}

/// First residue name supplied by the loader for any of `atoms`.
pub(crate) fn residue_hint(graph: &BondGraph, atoms: &[usize]) -> Option<SmolStr> {
    atoms
        .iter()
        .find_map(|&a| graph.atom(a).residue_hint.clone())
}

fn is_disulfide(graph: &BondGraph, a: usize, b: usize) -> bool {
    graph.element(a) == Element::S && graph.element(b) == Element::S
}

/// Start offsets of non-overlapping units along `path`, scanned left to right.
fn find_units(graph: &BondGraph, on_path: &[bool], path: &[usize], kind: PolymerKind) -> Vec<usize> {
    let elements = unit_elements(kind);
    let width = elements.len();
    let mut starts = Vec::new();
    let mut i = 0;

    while i + width <= path.len() {
        let window = &path[i..i + width];
        let shaped = window
            .iter()
            .zip(elements)
            .all(|(&a, &e)| graph.element(a) == e)
            && unit_shape_holds(graph, on_path, window, kind);
        if shaped {
            starts.push(i);
            i += width;
        } else {
            i += 1;
        }
    }
    starts
}

fn unit_shape_holds(graph: &BondGraph, on_path: &[bool], window: &[usize], kind: PolymerKind) -> bool {
    match kind {
        PolymerKind::Protein => {
            !graph.has_neighbor_element(window[1], Element::O)
                && graph.has_neighbor_element(window[2], Element::O)
        }
        // C4' carries the ring O4'; C3' carries the ring C2', which fixes the 5'->3' reading.
        PolymerKind::NucleicAcid => {
            let off_path = |atom: usize, element: Element| {
                graph
                    .neighbors_of(atom)
                    .any(|n| !on_path[n] && graph.element(n) == element)
            };
            off_path(window[2], Element::O) && off_path(window[3], Element::C)
        }
    }
}

struct Cutter<'a> {
    graph: &'a BondGraph,
    pool: &'a AtomPool,
    kind: PolymerKind,
    on_path: Vec<bool>,
    taken: Vec<bool>,
}

impl Cutter<'_> {
    fn is_free(&self, atom: usize) -> bool {
        !self.taken[atom] && !self.pool.is_claimed(atom)
    }

    fn cut(&mut self, path: &[usize], starts: &[usize]) -> Vec<Residue> {
        let width = unit_elements(self.kind).len();
        let mut residues = Vec::with_capacity(starts.len());
        let mut cursor = 0;

        for (k, &start) in starts.iter().enumerate() {
            let unit = &path[start..start + width];
            let linkers = if k == 0 { &[][..] } else { &path[cursor..start] };
            for &atom in linkers.iter().chain(unit) {
                self.taken[atom] = true;
            }

            let anchor = unit[anchor_offset(self.kind)];
            let side_chain = self.side_chain(anchor);
            let key = Stoichiometry::from_elements(side_chain.iter().map(|&a| self.graph.element(a)));

            let mut residue = self.resolve(k as i32 + 1, unit, anchor, &side_chain, &key);
            if let Some(hint) = residue_hint(self.graph, unit).filter(|_| !residue.is_standard()) {
                residue.name = hint;
            }
            residue.side_chain = key;
            for &atom in linkers.iter().chain(unit) {
                residue.add_backbone_atom(atom);
            }
            for atom in side_chain {
                residue.add_atom(atom);
            }
            residues.push(residue);
            cursor = start + width;
        }

        let (start_position, end_position) = self.kind.terminal_positions();
        if let Some(&first_start) = starts.first() {
            let last_end = starts[starts.len() - 1] + width - 1;
            let head = self.cap(path[first_start], true);
            let tail = self.cap(path[last_end], false);
            let last = residues.len() - 1;
            for (idx, cap) in [(0, head), (last, tail)] {
                if let Some(cap) = cap {
                    for &atom in &cap.atoms {
                        residues[idx].add_atom(atom);
                    }
                    residues[idx].caps.push(cap);
                }
            }
            if residues.len() == 1 {
                residues[0].position = ResiduePosition::Only;
            } else {
                residues[0].position = start_position;
                residues[last].position = end_position;
            }
        }

        for residue in &mut residues {
            for atom in self.dangling(residue.atoms()) {
                residue.add_atom(atom);
            }
        }
        residues
    }

    /// Heavy atoms grown from the anchor's first off-path heavy neighbour.
    fn side_chain(&mut self, anchor: usize) -> Vec<usize> {
        let root = self
            .graph
            .heavy_neighbors_of(anchor)
            .find(|&n| !self.on_path[n] && self.is_free(n));
        let Some(root) = root else {
            return Vec::new();
        };

        let mut side_chain = vec![root];
        let mut queue = VecDeque::from([root]);
        self.taken[root] = true;
        while let Some(current) = queue.pop_front() {
            for n in self.graph.heavy_neighbors_of(current) {
                if !self.on_path[n] && self.is_free(n) && !is_disulfide(self.graph, current, n) {
                    self.taken[n] = true;
                    side_chain.push(n);
                    queue.push_back(n);
                }
            }
        }
        side_chain
    }

    fn resolve(
        &self,
        number: i32,
        unit: &[usize],
        anchor: usize,
        side_chain: &[usize],
        key: &Stoichiometry,
    ) -> Residue {
        let Some(entry) = db::get_store().lookup(self.kind, key) else {
            log::trace!("No {} side chain matches key {}", self.kind, key);
            return Residue::unknown(number, self.kind.residue_class());
        };

        let pick = match entry.rule {
            None => 0,
            Some(Disambiguation::BetaBranch) => {
                if self.beta_carbons(anchor, side_chain) == 2 { 0 } else { 1 }
            }
            Some(Disambiguation::RiboseOxygen) => {
                if self.ribose_oxygen(unit[3], side_chain) { 0 } else { 1 }
            }
        };
        match entry.residues.get(pick) {
            Some(&standard) => Residue::standard(number, standard),
            None => Residue::unknown(number, self.kind.residue_class()),
        }
    }

    /// Side-chain carbons two bonds from the anchor, walking inside the side chain.
    fn beta_carbons(&self, anchor: usize, side_chain: &[usize]) -> usize {
        let members: HashSet<usize> = side_chain.iter().copied().collect();
        let first: HashSet<usize> = self
            .graph
            .neighbors_of(anchor)
            .filter(|n| members.contains(n))
            .collect();
        let second: HashSet<usize> = first
            .iter()
            .flat_map(|&a| self.graph.neighbors_of(a))
            .filter(|n| *n != anchor && members.contains(n) && !first.contains(n))
            .collect();
        second
            .into_iter()
            .filter(|&a| self.graph.element(a) == Element::C)
            .count()
    }

    /// Whether the side-chain carbon bonded to C3' carries an oxygen (ribose O2').
    fn ribose_oxygen(&self, c3: usize, side_chain: &[usize]) -> bool {
        side_chain
            .iter()
            .filter(|&&a| self.graph.element(a) == Element::C && self.graph.are_bonded(a, c3))
            .any(|&c2| {
                self.graph
                    .neighbors_of(c2)
                    .any(|n| self.graph.element(n) == Element::O && side_chain.contains(&n))
            })
    }

    /// Unassigned atoms flooded outward from a terminal pattern atom.
    fn cap(&mut self, from: usize, at_start: bool) -> Option<Cap> {
        let mut atoms = Vec::new();
        let mut queue = VecDeque::from([from]);
        while let Some(current) = queue.pop_front() {
            for n in self.graph.neighbors_of(current) {
                if self.is_free(n) && !is_disulfide(self.graph, current, n) {
                    self.taken[n] = true;
                    atoms.push(n);
                    queue.push_back(n);
                }
            }
        }
        if atoms.is_empty() {
            return None;
        }

        atoms.sort_unstable();
        let stoichiometry = Stoichiometry::from_elements(atoms.iter().map(|&a| self.graph.element(a)));
        Some(Cap {
            kind: cap_kind(self.kind, at_start, &stoichiometry),
            stoichiometry,
            atoms,
        })
    }

    /// Unassigned off-backbone atoms reachable from `atoms`.
    fn dangling(&mut self, atoms: &[usize]) -> Vec<usize> {
        let mut found = Vec::new();
        let mut queue: VecDeque<usize> = atoms.iter().copied().collect();
        while let Some(current) = queue.pop_front() {
            for n in self.graph.neighbors_of(current) {
                if !self.on_path[n] && self.is_free(n) && !is_disulfide(self.graph, current, n) {
                    self.taken[n] = true;
                    found.push(n);
                    queue.push_back(n);
                }
            }
        }
        found
    }
}

fn cap_kind(kind: PolymerKind, at_start: bool, stoichiometry: &Stoichiometry) -> CapKind {
    if stoichiometry.count(Element::P) > 0 {
        return CapKind::Phosphate;
    }
    match (kind, at_start) {
        (PolymerKind::Protein, true) if stoichiometry.is_empty() => CapKind::Amine,
        (PolymerKind::Protein, false) if stoichiometry.only_contains(Element::O) => {
            CapKind::Carboxylate
        }
        (PolymerKind::NucleicAcid, _) if stoichiometry.is_empty() => CapKind::Hydroxyl,
        _ => CapKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::StandardResidue;
    use crate::ops::backbone::BackboneSearch;
    use crate::ops::testing::{self, Base, Built};

    fn cut(built: &Built) -> Segmentation {
        let pool = AtomPool::new(built.graph.atom_count());
        let seed = (0..built.graph.atom_count())
            .find(|&a| built.graph.element(a) == Element::N)
            .unwrap();
        let path = BackboneSearch::new().trace(&built.graph, &pool, seed);
        segment(&built.graph, &pool, &path).unwrap()
    }

    fn names(segmentation: &Segmentation) -> Vec<&str> {
        segmentation.residues.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn lysine_key_round_trips() {
        let seg = cut(&testing::peptide(&[testing::GLY, testing::LYS, testing::GLY], false));

        assert_eq!(seg.kind, PolymerKind::Protein);
        assert_eq!(names(&seg), vec!["GLY", "LYS", "GLY"]);
        let lys = &seg.residues[1];
        assert_eq!(lys.standard_name, Some(StandardResidue::LYS));
        assert_eq!(lys.side_chain.to_string(), "N1C4");
        assert_eq!(lys.side_chain, "N1C4".parse().unwrap());
    }

    #[test]
    fn ring_closure_separates_proline_from_valine() {
        let pro = cut(&testing::peptide(&[testing::GLY, testing::PRO, testing::GLY], false));
        let val = cut(&testing::peptide(&[testing::GLY, testing::VAL, testing::GLY], false));

        assert_eq!(pro.residues[1].side_chain.to_string(), "C3");
        assert_eq!(val.residues[1].side_chain.to_string(), "C3");
        assert_eq!(pro.residues[1].name, "PRO");
        assert_eq!(val.residues[1].name, "VAL");
    }

    #[test]
    fn beta_branch_separates_isoleucine_from_leucine() {
        let ile = cut(&testing::peptide(&[testing::ALA, testing::ILE, testing::ALA], false));
        let leu = cut(&testing::peptide(&[testing::ALA, testing::LEU, testing::ALA], false));

        assert_eq!(names(&ile), vec!["ALA", "ILE", "ALA"]);
        assert_eq!(names(&leu), vec!["ALA", "LEU", "ALA"]);
    }

    #[test]
    fn long_side_chain_at_the_c_terminus_keeps_its_residue() {
        let lys = cut(&testing::peptide(&[testing::GLY, testing::GLY, testing::LYS], true));
        let leu = cut(&testing::peptide(&[testing::ALA, testing::GLY, testing::LEU], false));

        assert_eq!(names(&lys), vec!["GLY", "GLY", "LYS"]);
        assert_eq!(lys.residues[2].side_chain.to_string(), "N1C4");
        assert_eq!(lys.residues[2].caps[0].kind, CapKind::Carboxylate);
        assert!(lys.residues[1].caps.is_empty());
        assert_eq!(names(&leu), vec!["ALA", "GLY", "LEU"]);
        assert_eq!(leu.residues[2].side_chain.to_string(), "C4");
    }

    #[test]
    fn lone_lysine_reads_as_one_residue() {
        let built = testing::peptide(&[testing::LYS], true);
        let seg = cut(&built);

        assert_eq!(names(&seg), vec!["LYS"]);
        assert_eq!(seg.residues[0].position, ResiduePosition::Only);
        assert_eq!(seg.atoms().count(), built.graph.atom_count());
    }

    #[test]
    fn disulfide_partners_keep_their_own_side_chains() {
        let mut builder = testing::Builder::default();
        testing::add_peptide(
            &mut builder,
            &[testing::GLY, testing::CYS, testing::GLY, testing::CYS, testing::GLY],
            false,
        );
        let sulfurs = builder.named("SG");
        builder.bond(sulfurs[0], sulfurs[1]);
        let built = Built {
            graph: builder.finish(),
            backbone: Vec::new(),
        };

        let seg = cut(&built);

        assert_eq!(names(&seg), vec!["GLY", "CYS", "GLY", "CYS", "GLY"]);
        assert!(seg.residues[1].contains(sulfurs[0]));
        assert!(!seg.residues[1].contains(sulfurs[1]));
        assert!(seg.residues[3].contains(sulfurs[1]));
        assert_eq!(seg.residues[3].side_chain.to_string(), "S1C1");
    }

    #[test]
    fn ribose_oxygen_separates_adenosine_from_deoxyguanosine() {
        let dna = cut(&testing::nucleic(&[(Base::C, false), (Base::G, false), (Base::C, false)]));
        let rna = cut(&testing::nucleic(&[(Base::C, true), (Base::A, true), (Base::C, true)]));

        assert_eq!(dna.kind, PolymerKind::NucleicAcid);
        assert_eq!(names(&dna), vec!["DC", "DG", "DC"]);
        assert_eq!(names(&rna), vec!["C", "A", "C"]);
        assert_eq!(dna.residues[1].side_chain.to_string(), "O2N5C7");
        assert_eq!(rna.residues[1].side_chain.to_string(), "O2N5C7");
    }

    #[test]
    fn nucleic_residues_carry_phosphates_and_caps() {
        let built = testing::nucleic(&[(Base::A, false), (Base::C, false), (Base::G, false)]);
        let seg = cut(&built);

        assert_eq!(names(&seg), vec!["DA", "DC", "DG"]);
        let first = &seg.residues[0];
        let middle = &seg.residues[1];
        let last = &seg.residues[2];
        assert_eq!(first.position, ResiduePosition::FivePrime);
        assert_eq!(last.position, ResiduePosition::ThreePrime);
        assert_eq!(first.caps[0].kind, CapKind::Phosphate);
        assert_eq!(last.caps[0].kind, CapKind::Phosphate);
        assert!(middle.caps.is_empty());

        let p2 = built.backbone[6];
        assert_eq!(built.graph.element(p2), Element::P);
        assert!(middle.contains(p2));
        assert!(middle.backbone().contains(&p2));
        assert_eq!(seg.atoms().count(), built.graph.atom_count());
    }

    #[test]
    fn full_polyglycine_gets_caps_and_dangling_atoms() {
        let built = testing::polyglycine(3, true);
        let seg = cut(&built);

        assert_eq!(names(&seg), vec!["GLY", "GLY", "GLY"]);
        let numbers: Vec<i32> = seg.residues.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        let head = &seg.residues[0];
        let tail = &seg.residues[2];
        assert_eq!(head.position, ResiduePosition::NTerminal);
        assert_eq!(tail.position, ResiduePosition::CTerminal);
        assert_eq!(head.caps.len(), 1);
        assert_eq!(head.caps[0].kind, CapKind::Amine);
        assert_eq!(head.caps[0].atoms.len(), 3);
        assert_eq!(tail.caps[0].kind, CapKind::Carboxylate);
        assert_eq!(tail.caps[0].stoichiometry.to_string(), "O2");

        // N, CA, C, O, H, HA
        assert_eq!(seg.residues[1].atom_count(), 6);
        assert_eq!(seg.atoms().count(), built.graph.atom_count());
    }

    #[test]
    fn single_unit_is_both_ends() {
        let seg = cut(&testing::polyglycine(1, true));

        assert_eq!(seg.residues.len(), 1);
        let only = &seg.residues[0];
        assert_eq!(only.position, ResiduePosition::Only);
        let kinds: Vec<CapKind> = only.caps.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![CapKind::Amine, CapKind::Carboxylate]);
    }

    #[test]
    fn unknown_side_chain_becomes_unk() {
        let mut builder = testing::Builder::default();
        let backbone = testing::add_peptide(&mut builder, &[testing::GLY, testing::GLY, testing::GLY], false);
        let s = builder.atom("SX", Element::S);
        let se = builder.atom("SEX", Element::Se);
        builder.bond(backbone[4], s);
        builder.bond(s, se);
        let graph = builder.finish();
        let pool = AtomPool::new(graph.atom_count());

        let seg = segment(&graph, &pool, &backbone).unwrap();

        assert_eq!(seg.residues[1].name, "UNK");
        assert_eq!(seg.residues[1].standard_name, None);
        assert!(seg.residues[1].contains(se));
    }

    #[test]
    fn unknown_residue_takes_its_residue_hint() {
        let mut builder = testing::Builder::default();
        let backbone = testing::add_peptide(&mut builder, &[testing::GLY, testing::GLY, testing::GLY], false);
        let s = builder.atom("SX", Element::S);
        let se = builder.atom("SEX", Element::Se);
        builder.bond(backbone[4], s);
        builder.bond(s, se);
        builder.hint(backbone[4], "MSE");
        builder.hint(backbone[1], "GLY");
        let graph = builder.finish();
        let pool = AtomPool::new(graph.atom_count());

        let seg = segment(&graph, &pool, &backbone).unwrap();

        assert_eq!(names(&seg), vec!["GLY", "MSE", "GLY"]);
        assert_eq!(seg.residues[1].standard_name, None);
    }

    #[test]
    fn reversed_path_reads_in_chain_order() {
        let built = testing::polyglycine(3, false);
        let pool = AtomPool::new(built.graph.atom_count());
        let reversed: Vec<usize> = built.backbone.iter().rev().copied().collect();

        let seg = segment(&built.graph, &pool, &reversed).unwrap();

        assert_eq!(seg.residues.len(), 3);
        assert!(seg.residues[0].contains(built.backbone[0]));
    }

    #[test]
    fn empty_path_is_an_error() {
        let graph = testing::graph_from(&[Element::N], &[]);
        let pool = AtomPool::new(1);

        assert_eq!(segment(&graph, &pool, &[]).unwrap_err(), Error::EmptyPath);
    }

    #[test]
    fn path_without_units_fails() {
        let graph = testing::graph_from(
            &[Element::N, Element::C, Element::N, Element::C],
            &[(0, 1), (1, 2), (2, 3)],
        );
        let pool = AtomPool::new(graph.atom_count());

        assert_eq!(
            segment(&graph, &pool, &[0, 1, 2, 3]).unwrap_err(),
            Error::segmentation_failed(0, 4)
        );
    }
}
