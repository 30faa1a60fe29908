//! Freezing a classified assembly.
//!
//! Finalizing attaches valence terms to every container and builds the joints that carry
//! terms crossing container boundaries: residue-to-residue joints inside each polymer and
//! container-to-container joints on the assembly. Each bond, angle and dihedral of the
//! graph ends up owned exactly once.

use super::valence::{Membership, enumerate, spanning_terms};
use crate::model::assembly::Assembly;
use crate::model::graph::BondGraph;
use crate::model::joint::{Joint, Site};
use crate::model::polymer::Polymer;
use crate::model::valence::{Angle, Dihedral, ValenceTerms};
use crate::utils::parallel::*;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Bridging bonds grouped by the container pair they connect.
type Bridges = BTreeMap<(Site, Site), Vec<usize>>;

/// Angles and dihedrals already handed to a joint.
#[derive(Debug, Default)]
struct TermLedger {
    angles: HashSet<Angle>,
    dihedrals: HashSet<Dihedral>,
}

impl TermLedger {
    /// Keeps only the terms no earlier joint has claimed.
    fn admit(&mut self, terms: ValenceTerms) -> ValenceTerms {
        ValenceTerms {
            bonds: terms.bonds,
            angles: terms
                .angles
                .into_iter()
                .filter(|a| self.angles.insert(*a))
                .collect(),
            dihedrals: terms
                .dihedrals
                .into_iter()
                .filter(|d| self.dihedrals.insert(*d))
                .collect(),
        }
    }
}

/// Computes valence terms and joints, optionally centres the coordinates, and freezes the
/// assembly.
///
/// Empty containers are dropped first. Calling this on a finalized assembly does nothing.
///
/// # Arguments
///
/// * `assembly` - Classified assembly to freeze.
/// * `center` - Translate the atoms so their geometric centre sits at the origin.
pub fn finalize(assembly: &mut Assembly, center: bool) {
    if assembly.is_finalized() {
        return;
    }
    assembly.remove_empty();

    let graph = assembly.graph();
    let containers: Vec<&[usize]> = assembly
        .polymers()
        .iter()
        .flat_map(|p| p.iter_residues().map(|r| r.atoms()))
        .chain(assembly.iter_molecules_with_site().map(|(_, m)| m.atoms()))
        .collect();
    let terms: Vec<ValenceTerms> = containers
        .par_iter()
        .map(|atoms| enumerate(graph, &Membership::of(atoms.iter().copied())))
        .collect();
    let polymer_joints: Vec<Vec<Joint>> = assembly
        .polymers()
        .par_iter()
        .map(|polymer| polymer_joints(graph, polymer))
        .collect();
    let joints = assembly_joints(graph, &assembly.owners());

    let mut terms = terms.into_iter();
    for (polymer, joints) in assembly.polymers_mut().iter_mut().zip(polymer_joints) {
        for residue in polymer.iter_residues_mut() {
            residue.finalize(terms.next().unwrap_or_default());
        }
        polymer.finalize(joints);
    }
    for list in assembly.molecule_lists_mut() {
        for molecule in list.iter_mut() {
            molecule.finalize(terms.next().unwrap_or_default());
        }
    }
    assembly.set_joints(joints);

    if center {
        let offset = -assembly.geometric_center().coords;
        assembly.translate_by(&offset);
    }
    assembly.mark_finalized();
    log::debug!("Finalized {}", assembly.summary());
}

fn polymer_joints(graph: &BondGraph, polymer: &Polymer) -> Vec<Joint> {
    let residue_of: HashMap<usize, i32> = polymer
        .iter_residues()
        .flat_map(|r| r.iter_atoms().map(move |a| (a, r.number)))
        .collect();

    let mut bridges = Bridges::new();
    for residue in polymer.iter_residues() {
        for atom in residue.iter_atoms() {
            for &b in graph.bond_indices_of(atom) {
                let bond = graph.bond(b);
                if bond.a1_idx != atom {
                    continue;
                }
                match residue_of.get(&bond.a2_idx) {
                    Some(&other) if other != residue.number => {
                        bridges
                            .entry(ordered(Site::Residue(residue.number), Site::Residue(other)))
                            .or_default()
                            .push(b);
                    }
                    _ => {}
                }
            }
        }
    }
    build_joints(graph, bridges, &Membership::of(polymer.iter_atoms()))
}

fn assembly_joints(graph: &BondGraph, owners: &[Option<Site>]) -> Vec<Joint> {
    let mut bridges = Bridges::new();
    for (b, bond) in graph.bonds().iter().enumerate() {
        if let (Some(a), Some(c)) = (owners[bond.a1_idx], owners[bond.a2_idx]) {
            if a != c {
                bridges.entry(ordered(a, c)).or_default().push(b);
            }
        }
    }
    let owned = Membership::of(
        owners
            .iter()
            .enumerate()
            .filter(|(_, site)| site.is_some())
            .map(|(atom, _)| atom),
    );
    build_joints(graph, bridges, &owned)
}

fn build_joints(graph: &BondGraph, bridges: Bridges, members: &Membership) -> Vec<Joint> {
    let mut ledger = TermLedger::default();
    bridges
        .into_iter()
        .map(|((left, right), mut bonds)| {
            bonds.sort_unstable();
            let mut joint = Joint::new(left, right);
            for b in bonds {
                joint
                    .terms
                    .merge(ledger.admit(spanning_terms(graph, b, members)));
            }
            joint
        })
        .collect()
}

fn ordered(a: Site, b: Site) -> (Site, Site) {
    if a <= b { (a, b) } else { (b, a) }
}
