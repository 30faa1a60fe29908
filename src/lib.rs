//! # ChainForge
//!
//! **ChainForge** is a pure-Rust structure perception engine that takes a flat pool of atoms (elements and coordinates, optionally explicit bonds) and recovers the chemistry hiding in it: covalent bonds, polymer backbones, named residues, hetero molecules, ions and water, plus every bond, angle and dihedral assigned to exactly one owner. The crate favors deterministic results, strong typing, and total classification so every input atom is accounted for.
//!
//! ## Features
//!
//! - **Bond perception** – Van der Waals distance criteria with a configurable buffer, evaluated pairwise or through a uniform grid, parallelized with `rayon` behind the `parallel` feature.
//! - **Backbone search** – Depth-first longest-path search over backbone elements with depth and carbon-run restrictions, so side chains and bases are not mistaken for the chain.
//! - **Residue segmentation** – Repeating protein and nucleic backbone units are matched along the path; side chains are named through an embedded stoichiometry table with ring-closure, branching and ribose tie-breakers.
//! - **Multi-scale hierarchy** – `Assembly` → `Polymer` → `Residue` → atom, alongside hetero `Molecule`s, ions and water, all backed by one `BondGraph`.
//! - **Valence terms** – Bonds, angles and dihedrals per container, with `Joint`s owning the terms that span two containers.
//! - **JSON frames** – `io` reads atom frames with optional explicit connectivity into a `BondGraph`.

mod db;
mod model;
mod utils;

pub mod geometry;
pub mod io;
pub mod ops;

pub use model::assembly::{Assembly, AssemblySummary};
pub use model::atom::Atom;
pub use model::graph::{Bond, BondGraph};
pub use model::joint::{Joint, Site};
pub use model::molecule::Molecule;
pub use model::node::Node;
pub use model::polymer::Polymer;
pub use model::pool::AtomPool;
pub use model::residue::{Cap, CapKind, Residue};
pub use model::stoichiometry::Stoichiometry;
pub use model::types::{
    BondOrder, Element, MoleculeKind, Point, PolymerKind, ResidueClass, ResiduePosition,
    StandardResidue,
};
pub use model::valence::{Angle, Dihedral, ValenceTerms};
