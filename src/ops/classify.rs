//! Turning a bond graph into a classified [`Assembly`].
//!
//! Classification repeatedly seeds a backbone search at the lowest-index unclaimed
//! nitrogen, segments the traced path and peels the resulting polymer off the atom pool.
//! Fragments that cannot be segmented, or that contain malformed atoms, are skipped as
//! seeds. Whatever remains is grouped by connectivity into water, ions and hetero molecules,
//! so every atom ends up in exactly one container.

use super::backbone::BackboneSearch;
use super::bonds::BondInference;
use super::error::Error;
use super::finalize::finalize;
use super::segment::{Segmentation, residue_hint, segment};
use crate::model::assembly::Assembly;
use crate::model::atom::Atom;
use crate::model::graph::BondGraph;
use crate::model::molecule::Molecule;
use crate::model::node::Node;
use crate::model::polymer::Polymer;
use crate::model::pool::AtomPool;
use crate::model::stoichiometry::Stoichiometry;
use crate::model::types::{Element, MoleculeKind};
use smol_str::SmolStr;

/// Settings for [`classify`] and [`classify_atoms`].
#[derive(Debug, Clone)]
pub struct ClassifyConfig {
    /// Bond perception used by [`classify_atoms`].
    pub inference: BondInference,
    /// Backbone search limits.
    pub search: BackboneSearch,
    /// Move the geometric centre to the origin while finalizing.
    pub center: bool,
    /// Finalize the assembly before returning it.
    pub finalize: bool,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            inference: BondInference::default(),
            search: BackboneSearch::default(),
            center: true,
            finalize: true,
        }
    }
}

impl ClassifyConfig {
    /// Containers only: no valence terms, joints or centering.
    pub fn containers_only() -> Self {
        Self {
            center: false,
            finalize: false,
            ..Default::default()
        }
    }
}

/// Infers bonds for `atoms` and classifies the resulting graph.
pub fn classify_atoms(atoms: Vec<Atom>, config: &ClassifyConfig) -> Assembly {
    classify(config.inference.build(atoms), config)
}

/// Classifies every atom of `graph` into polymers, molecules, ions and water.
///
/// Never fails: fragments that cannot be read as polymers fall back to hetero molecules.
///
/// # Arguments
///
/// * `graph` - Bond graph, either loaded with explicit bonds or inferred.
/// * `config` - Search limits and finalize switches.
///
/// # Returns
///
/// An [`Assembly`] in which every atom belongs to exactly one container; finalized unless
/// `config.finalize` is `false`.
pub fn classify(graph: BondGraph, config: &ClassifyConfig) -> Assembly {
    let mut pool = AtomPool::new(graph.atom_count());
    let polymers = peel_polymers(&graph, &mut pool, &config.search);
    let molecules = collect_molecules(&graph, &mut pool);
    debug_assert!(pool.is_empty(), "{} atoms left unclaimed", pool.remaining());

    let mut assembly = Assembly::new(graph);
    for node in polymers.into_iter().chain(molecules) {
        if let Err(err) = assembly.insert(node) {
            log::warn!("Dropped container: {}", err);
        }
    }

    if config.finalize {
        finalize(&mut assembly, config.center);
    }
    log::info!("Classified {}", assembly.summary());
    assembly
}

fn peel_polymers(graph: &BondGraph, pool: &mut AtomPool, search: &BackboneSearch) -> Vec<Node> {
    let mut skipped = vec![false; graph.atom_count()];
    let mut polymers = Vec::new();

    loop {
        let next = pool
            .unclaimed()
            .find(|&a| !skipped[a] && graph.element(a) == Element::N);
        let Some(seed) = next else {
            break;
        };
        let fragment = graph.component_from(seed, |a| !pool.is_claimed(a));
        if fragment.iter().any(|&a| graph.atom(a).malformed) {
            log::debug!(
                "Fragment at atom {} has malformed atoms; not seeding a polymer",
                seed
            );
            for &atom in &fragment {
                skipped[atom] = true;
            }
            continue;
        }

        let path = search.trace(graph, pool, seed);
        log::debug!("Seed atom {} traced a {}-atom backbone", seed, path.len());

        match segment(graph, pool, &path) {
            Ok(segmentation) => {
                let id = graph
                    .atom(seed)
                    .chain_hint
                    .clone()
                    .unwrap_or_else(|| chain_id(polymers.len()));
                log::debug!(
                    "Chain {}: {} {} residues",
                    id,
                    segmentation.residues.len(),
                    segmentation.kind
                );
                match polymer_node(pool, &id, segmentation) {
                    Ok(node) => polymers.push(node),
                    Err(err) => log::warn!("Dropped chain {}: {}", id, err),
                }
            }
            Err(err) => {
                log::debug!("{}; fragment falls back to molecules", err);
                for &atom in &fragment {
                    skipped[atom] = true;
                }
            }
        }
    }
    polymers
}

fn polymer_node(pool: &mut AtomPool, id: &str, segmentation: Segmentation) -> Result<Node, Error> {
    let mut node = Node::Polymer(Polymer::new(id, segmentation.kind));
    for residue in segmentation.residues {
        pool.claim_all(residue.atoms());
        Node::Residue(residue).add_to(&mut node)?;
    }
    Ok(node)
}

fn collect_molecules(graph: &BondGraph, pool: &mut AtomPool) -> Vec<Node> {
    let mut molecules = Vec::new();
    loop {
        let next = pool.unclaimed().next();
        let Some(seed) = next else {
            break;
        };
        let atoms = graph.component_from(seed, |a| !pool.is_claimed(a));
        pool.claim_all(&atoms);

        let mut node = Node::Molecule(molecule_for(graph, &atoms));
        match atoms
            .iter()
            .try_for_each(|&atom| Node::Atom(atom).add_to(&mut node))
        {
            Ok(()) => molecules.push(node),
            Err(err) => log::warn!("Dropped fragment at atom {}: {}", seed, err),
        }
    }
    molecules
}

/// Names and kinds a connected group of leftover atoms.
fn molecule_for(graph: &BondGraph, atoms: &[usize]) -> Molecule {
    let composition = Stoichiometry::from_elements(atoms.iter().map(|&a| graph.element(a)));
    let (name, kind) = if is_water(graph, atoms) {
        (SmolStr::new("HOH"), MoleculeKind::Water)
    } else if atoms.len() == 1 && graph.degree(atoms[0]) == 0 {
        (
            SmolStr::new(graph.element(atoms[0]).symbol().to_uppercase()),
            MoleculeKind::Ion,
        )
    } else if atoms.iter().any(|&a| graph.atom(a).malformed) {
        (SmolStr::new("UNK"), MoleculeKind::Hetero)
    } else {
        (
            residue_hint(graph, atoms).unwrap_or_else(|| SmolStr::new("HET")),
            MoleculeKind::Hetero,
        )
    };

    let mut molecule = Molecule::new(&name, kind);
    molecule.composition = composition;
    molecule
}

/// One oxygen whose neighbours are all hydrogens, plus those hydrogens. A bare oxygen
/// counts as water.
fn is_water(graph: &BondGraph, atoms: &[usize]) -> bool {
    let mut oxygens = atoms.iter().filter(|&&a| graph.element(a) == Element::O);
    let (Some(&oxygen), None) = (oxygens.next(), oxygens.next()) else {
        return false;
    };
    atoms
        .iter()
        .all(|&a| a == oxygen || graph.element(a) == Element::H)
        && graph
            .neighbors_of(oxygen)
            .all(|n| graph.element(n) == Element::H)
}

/// Chain identifiers `A`..`Z`, then `AA`, `AB`, ...
fn chain_id(mut n: usize) -> SmolStr {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().map(|&b| b as char).collect::<String>().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::graph::Bond;
    use crate::model::residue::CapKind;
    use crate::model::types::{BondOrder, Point, PolymerKind, ResiduePosition};
    use crate::ops::testing::{self, Base};
    use std::collections::HashSet;

    fn unfinalized() -> ClassifyConfig {
        ClassifyConfig::containers_only()
    }

    fn assert_total(assembly: &Assembly) {
        let walked: Vec<usize> = assembly.walk().map(|a| a.index).collect();
        let unique: HashSet<usize> = walked.iter().copied().collect();
        assert_eq!(walked.len(), assembly.atom_count());
        assert_eq!(unique.len(), assembly.atom_count());
        assert!(assembly.owners().iter().all(Option::is_some));
    }

    #[test]
    fn polyglycine_end_to_end() {
        let built = testing::polyglycine(5, true);
        let assembly = classify(built.graph, &ClassifyConfig::default());

        assert_total(&assembly);
        assert_eq!(assembly.polymers().len(), 1);
        let chain = &assembly.polymers()[0];
        assert_eq!(chain.id, "A");
        assert_eq!(chain.kind, PolymerKind::Protein);
        assert_eq!(chain.sequence(), vec!["GLY"; 5]);
        let numbers: Vec<i32> = chain.iter_residues().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(chain.joint_count(), 4);

        let first = chain.residue(1).unwrap();
        let last = chain.residue(5).unwrap();
        assert_eq!(first.position, ResiduePosition::NTerminal);
        assert_eq!(first.caps[0].kind, CapKind::Amine);
        assert_eq!(last.position, ResiduePosition::CTerminal);
        assert_eq!(last.caps[0].kind, CapKind::Carboxylate);
        assert!(assembly.is_finalized());
    }

    #[test]
    fn chain_ending_in_long_side_chains_keeps_its_last_residue() {
        for (side_chains, expected) in [
            (vec![testing::GLY, testing::GLY, testing::LYS], vec!["GLY", "GLY", "LYS"]),
            (vec![testing::ALA, testing::GLY, testing::LEU], vec!["ALA", "GLY", "LEU"]),
        ] {
            let built = testing::peptide(&side_chains, true);
            let assembly = classify(built.graph, &ClassifyConfig::default());

            assert_total(&assembly);
            assert_eq!(assembly.polymers().len(), 1);
            let chain = &assembly.polymers()[0];
            assert_eq!(chain.sequence(), expected);
            assert_eq!(chain.joint_count(), 2);
            let last = chain.residue(3).unwrap();
            assert_eq!(last.position, ResiduePosition::CTerminal);
            let kinds: Vec<CapKind> = last.caps.iter().map(|c| c.kind).collect();
            assert_eq!(kinds, vec![CapKind::Carboxylate]);
            assert!(assembly.molecules().is_empty());
        }
    }

    #[test]
    fn rna_strand_end_to_end() {
        let built = testing::nucleic(&[(Base::C, true), (Base::A, true), (Base::C, true)]);
        let assembly = classify(built.graph, &ClassifyConfig::default());

        assert_total(&assembly);
        assert_eq!(assembly.polymers().len(), 1);
        let strand = &assembly.polymers()[0];
        assert_eq!(strand.kind, PolymerKind::NucleicAcid);
        assert_eq!(strand.sequence(), vec!["C", "A", "C"]);
        assert_eq!(strand.joint_count(), 2);
        let first = strand.residue(1).unwrap();
        let last = strand.residue(3).unwrap();
        assert_eq!(first.position, ResiduePosition::FivePrime);
        assert_eq!(last.position, ResiduePosition::ThreePrime);
        assert_eq!(first.caps[0].kind, CapKind::Phosphate);
        assert!(assembly.molecules().is_empty());
    }

    #[test]
    fn disulfide_between_chains_keeps_both_chains() {
        let mut builder = testing::Builder::default();
        testing::add_peptide(
            &mut builder,
            &[testing::GLY, testing::CYS, testing::GLY, testing::GLY],
            true,
        );
        testing::add_peptide(
            &mut builder,
            &[testing::GLY, testing::GLY, testing::CYS, testing::GLY],
            true,
        );
        let sulfurs = builder.named("SG");
        builder.bond(sulfurs[0], sulfurs[1]);

        let assembly = classify(builder.finish(), &ClassifyConfig::default());

        assert_total(&assembly);
        assert_eq!(assembly.polymers().len(), 2);
        assert_eq!(
            assembly.polymers()[0].sequence(),
            vec!["GLY", "CYS", "GLY", "GLY"]
        );
        assert_eq!(
            assembly.polymers()[1].sequence(),
            vec!["GLY", "GLY", "CYS", "GLY"]
        );
        assert!(assembly.polymers()[0].residue(2).unwrap().contains(sulfurs[0]));
        assert!(assembly.polymers()[1].residue(3).unwrap().contains(sulfurs[1]));
        assert_eq!(assembly.joints().len(), 1);
        assert!(assembly.molecules().is_empty());
    }

    #[test]
    fn hetero_molecule_takes_its_residue_hint() {
        let mut builder = testing::Builder::default();
        let c1 = builder.atom("C1", Element::C);
        let o1 = builder.atom("O1", Element::O);
        builder.bond(c1, o1);
        builder.hint(c1, "EOH");

        let assembly = classify(builder.finish(), &unfinalized());

        assert_eq!(assembly.molecules().len(), 1);
        assert_eq!(assembly.molecules()[0].name, "EOH");
    }

    #[test]
    fn water_ions_and_hetero_are_separated() {
        let mut builder = testing::Builder::default();
        let water = testing::add_water(&mut builder);
        let na = builder.atom("NA", Element::Na);
        let c1 = builder.atom("C1", Element::C);
        let o1 = builder.atom("O1", Element::O);
        builder.bond(c1, o1);
        let bare_oxygen = builder.atom("O", Element::O);

        let assembly = classify(builder.finish(), &unfinalized());

        assert_total(&assembly);
        assert!(assembly.polymers().is_empty());
        assert_eq!(assembly.water().len(), 2);
        assert!(assembly.water().iter().all(|w| w.name == "HOH"));
        assert!(assembly.water()[0].contains(water));
        assert!(assembly.water()[1].contains(bare_oxygen));
        assert_eq!(assembly.ions().len(), 1);
        assert_eq!(assembly.ions()[0].name, "NA");
        assert!(assembly.ions()[0].contains(na));
        assert_eq!(assembly.molecules().len(), 1);
        assert_eq!(assembly.molecules()[0].name, "HET");
        assert_eq!(assembly.molecules()[0].composition.to_string(), "O1C1");
    }

    #[test]
    fn unsegmentable_nitrogen_fragment_becomes_hetero() {
        let graph = testing::graph_from(
            &[Element::N, Element::C, Element::C, Element::N],
            &[(0, 1), (1, 2), (2, 3)],
        );

        let assembly = classify(graph, &unfinalized());

        assert_total(&assembly);
        assert!(assembly.polymers().is_empty());
        assert_eq!(assembly.molecules().len(), 1);
        assert_eq!(assembly.molecules()[0].atom_count(), 4);
    }

    #[test]
    fn malformed_fragment_is_not_seeded() {
        let built = testing::polyglycine(3, false);
        let mut atoms = built.graph.atoms().to_vec();
        let stray = atoms.len();
        atoms.push(Atom::new(stray, "XX", Element::Unknown, Point::origin()));
        let mut bonds = built.graph.bonds().to_vec();
        bonds.push(Bond::new(built.backbone[1], stray, BondOrder::Single));
        let graph = BondGraph::with_bonds(atoms, bonds);

        let assembly = classify(graph, &unfinalized());

        assert_total(&assembly);
        assert!(assembly.polymers().is_empty());
        assert_eq!(assembly.molecules().len(), 1);
        assert_eq!(assembly.molecules()[0].name, "UNK");
    }

    #[test]
    fn chains_get_successive_ids_and_hints_win() {
        let mut builder = testing::Builder::default();
        testing::add_peptide(&mut builder, &[testing::GLY, testing::SER, testing::GLY], true);
        testing::add_nucleic(&mut builder, &[(Base::C, false), (Base::G, false), (Base::A, false)]);
        testing::add_peptide(&mut builder, &[testing::ALA, testing::GLY], true);
        let graph = builder.finish();

        let assembly = classify(graph.clone(), &unfinalized());

        assert_total(&assembly);
        let ids: Vec<&str> = assembly.polymers().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(assembly.polymers()[0].sequence(), vec!["GLY", "SER", "GLY"]);
        assert_eq!(assembly.polymers()[1].sequence(), vec!["DC", "DG", "DA"]);
        assert_eq!(assembly.polymers()[1].kind, PolymerKind::NucleicAcid);
        assert_eq!(assembly.polymers()[2].sequence(), vec!["ALA", "GLY"]);

        let atoms: Vec<Atom> = graph
            .atoms()
            .iter()
            .cloned()
            .map(|a| if a.index == 0 { a.with_chain_hint("H") } else { a })
            .collect();
        let hinted = BondGraph::with_bonds(atoms, graph.bonds().to_vec());
        let assembly = classify(hinted, &unfinalized());
        let ids: Vec<&str> = assembly.polymers().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["H", "B", "C"]);
    }

    #[test]
    fn group_bonded_to_chain_end_joins_the_cap() {
        let mut builder = testing::Builder::default();
        let backbone =
            testing::add_peptide(&mut builder, &[testing::GLY, testing::GLY, testing::GLY], false);
        let s = builder.atom("S1", Element::S);
        let c = builder.atom("C1", Element::C);
        builder.bond(s, c);
        builder.bond(backbone[8], s);

        let assembly = classify(builder.finish(), &unfinalized());

        assert_total(&assembly);
        let chain = &assembly.polymers()[0];
        let tail = chain.residue(3).unwrap();
        assert!(tail.contains(s) && tail.contains(c));
        assert_eq!(tail.caps[0].kind, CapKind::Other);
        assert_eq!(tail.caps[0].stoichiometry.to_string(), "S1O1C1");
        assert!(assembly.molecules().is_empty());
    }

    #[test]
    fn classify_atoms_infers_bonds() {
        let atoms = vec![
            Atom::new(0, "O", Element::O, Point::new(0.0, 0.0, 0.0)),
            Atom::new(1, "H1", Element::H, Point::new(0.96, 0.0, 0.0)),
            Atom::new(2, "H2", Element::H, Point::new(-0.24, 0.93, 0.0)),
            Atom::new(3, "NA", Element::Na, Point::new(10.0, 0.0, 0.0)),
        ];

        let assembly = classify_atoms(atoms, &unfinalized());

        assert_eq!(assembly.water().len(), 1);
        assert_eq!(assembly.water()[0].atom_count(), 3);
        assert_eq!(assembly.ions().len(), 1);
    }

    #[test]
    fn empty_graph_gives_empty_assembly() {
        let assembly = classify(BondGraph::default(), &ClassifyConfig::default());

        assert!(assembly.is_empty());
        assert!(assembly.is_finalized());
    }

    #[test]
    fn chain_ids_continue_past_z() {
        assert_eq!(chain_id(0), "A");
        assert_eq!(chain_id(25), "Z");
        assert_eq!(chain_id(26), "AA");
        assert_eq!(chain_id(27), "AB");
        assert_eq!(chain_id(52), "BA");
    }
}
