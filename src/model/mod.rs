//! Core data structures for the atom graph and the structural hierarchy.
//!
//! The graph layer (`atom`, `graph`, `grid`, `valence`) holds atoms, bonds and geometric
//! terms; the hierarchy layer (`residue`, `polymer`, `molecule`, `joint`, `assembly`,
//! `node`) groups atom indices into containers. Both are produced and consumed by `ops`.

pub mod assembly;
pub mod atom;
pub mod graph;
pub mod grid;
pub mod joint;
pub mod molecule;
pub mod node;
pub mod polymer;
pub mod pool;
pub mod residue;
pub mod stoichiometry;
pub mod types;
pub mod valence;
