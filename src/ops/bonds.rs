//! Geometric bond inference.
//!
//! Two atoms are bonded iff their distance is strictly below
//! `buffer + radius(a)/2 + radius(b)/2`, where the radii are van der Waals radii and the
//! buffer defaults to [`BOND_BUFFER`]. Coincident atoms never bond. Small inputs are scanned
//! pairwise; larger ones go through a cell [`Grid`] sized to the largest possible cutoff,
//! which prunes candidates without changing the result.

use crate::model::atom::Atom;
use crate::model::graph::{Bond, BondGraph};
use crate::model::grid::Grid;
use crate::model::types::{BondOrder, Element};
use crate::utils::parallel::*;
use std::collections::HashMap;

/// Default additive slack on the bonding cutoff, in ångströms.
pub const BOND_BUFFER: f64 = 0.7;

/// Separation below which two atoms are treated as coincident.
const COINCIDENT: f64 = 1e-6;

/// Source of per-element van der Waals radii.
///
/// The built-in [`ElementRadii`] table is used unless a force-field collaborator supplies
/// its own values.
pub trait RadiusSource {
    fn radius(&self, element: Element) -> Option<f64>;
}

/// Default radii from [`Element::vdw_radius`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementRadii;

impl RadiusSource for ElementRadii {
    fn radius(&self, element: Element) -> Option<f64> {
        element.vdw_radius()
    }
}

impl RadiusSource for HashMap<Element, f64> {
    fn radius(&self, element: Element) -> Option<f64> {
        self.get(&element).copied()
    }
}

/// Candidate-pair strategy for [`BondInference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Pairwise below the grid threshold, grid at or above it.
    #[default]
    Auto,
    Pairwise,
    Grid,
}

/// Builder for distance-based bond inference.
#[derive(Debug, Clone)]
pub struct BondInference {
    buffer: f64,
    strategy: Strategy,
    grid_threshold: usize,
    skip_hydrogen_pairs: bool,
}

impl Default for BondInference {
    fn default() -> Self {
        Self {
            buffer: BOND_BUFFER,
            strategy: Strategy::Auto,
            grid_threshold: 256,
            skip_hydrogen_pairs: false,
        }
    }
}

impl BondInference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the additive slack on the bonding cutoff, in ångströms.
    pub fn buffer(mut self, buffer: f64) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Atom count at which [`Strategy::Auto`] switches to the grid.
    pub fn grid_threshold(mut self, atoms: usize) -> Self {
        self.grid_threshold = atoms;
        self
    }

    /// Never bond two hydrogens to each other.
    ///
    /// Off by default; enable it for inputs with explicit hydrogens, where geminal pairs
    /// fall inside the van der Waals cutoff.
    pub fn skip_hydrogen_pairs(mut self, skip: bool) -> Self {
        self.skip_hydrogen_pairs = skip;
        self
    }

    pub fn buffer_value(&self) -> f64 {
        self.buffer
    }

    /// Bonding cutoff for a pair of atoms.
    pub fn threshold(&self, a: &Atom, b: &Atom) -> f64 {
        self.buffer + a.vdw_radius / 2.0 + b.vdw_radius / 2.0
    }

    fn is_bonded(&self, a: &Atom, b: &Atom) -> bool {
        if self.skip_hydrogen_pairs && a.element.is_hydrogen() && b.element.is_hydrogen() {
            return false;
        }
        let cutoff = self.threshold(a, b);
        let d2 = a.distance_squared(b);
        d2 >= COINCIDENT * COINCIDENT && d2 < cutoff * cutoff
    }

    /// Infers single bonds over `atoms`.
    ///
    /// # Returns
    ///
    /// Canonical bonds sorted by `(a1_idx, a2_idx)`, with indices referring to positions
    /// in `atoms`.
    pub fn infer(&self, atoms: &[Atom]) -> Vec<Bond> {
        if atoms.len() < 2 {
            return Vec::new();
        }

        let use_grid = match self.strategy {
            Strategy::Auto => atoms.len() >= self.grid_threshold,
            Strategy::Pairwise => false,
            Strategy::Grid => true,
        };

        let mut bonds: Vec<Bond> = if use_grid {
            self.infer_with_grid(atoms)
        } else {
            self.infer_pairwise(atoms)
        };

        bonds.par_sort_unstable();
        bonds.dedup();

        log::debug!(
            "Inferred {} bonds over {} atoms ({})",
            bonds.len(),
            atoms.len(),
            if use_grid { "grid" } else { "pairwise" }
        );
        bonds
    }

    fn infer_pairwise(&self, atoms: &[Atom]) -> Vec<Bond> {
        (0..atoms.len())
            .into_par_iter()
            .flat_map_iter(|i| {
                ((i + 1)..atoms.len())
                    .filter(move |&j| self.is_bonded(&atoms[i], &atoms[j]))
                    .map(move |j| Bond::new(i, j, BondOrder::Single))
            })
            .collect()
    }

    fn infer_with_grid(&self, atoms: &[Atom]) -> Vec<Bond> {
        let max_radius = atoms
            .iter()
            .map(|a| a.vdw_radius)
            .fold(0.0_f64, f64::max);
        let reach = self.buffer + max_radius;
        if reach <= 0.0 {
            return Vec::new();
        }

        let grid = Grid::new(atoms.iter().enumerate().map(|(i, a)| (a.pos, i)), reach);
        let grid = &grid;

        (0..atoms.len())
            .into_par_iter()
            .flat_map_iter(|i| {
                let mut row: Vec<Bond> = grid
                    .neighbors(&atoms[i].pos, reach)
                    .copied()
                    .filter(|&j| j > i && self.is_bonded(&atoms[i], &atoms[j]))
                    .map(|j| Bond::new(i, j, BondOrder::Single))
                    .collect();
                row.sort_unstable();
                row
            })
            .collect()
    }

    /// Infers bonds and wraps the atoms into a [`BondGraph`].
    pub fn build(&self, atoms: Vec<Atom>) -> BondGraph {
        let mut atoms = atoms;
        for (i, atom) in atoms.iter_mut().enumerate() {
            atom.index = i;
        }
        let bonds = self.infer(&atoms);
        BondGraph::with_bonds(atoms, bonds)
    }
}

/// Replaces every atom's radius with the value from `source`.
///
/// Atoms whose element has no radius keep [`Atom::FALLBACK_RADIUS`] and are flagged
/// malformed.
///
/// # Returns
///
/// The number of atoms flagged malformed.
pub fn assign_radii<R: RadiusSource + ?Sized>(atoms: &mut [Atom], source: &R) -> usize {
    let mut malformed = 0;
    for atom in atoms.iter_mut() {
        match source.radius(atom.element) {
            Some(r) => {
                atom.vdw_radius = r;
                atom.malformed = atom.element == Element::Unknown;
            }
            None => {
                log::warn!(
                    "No van der Waals radius for atom {} ({}, element {}); using {:.2}",
                    atom.index,
                    atom.name,
                    atom.element,
                    Atom::FALLBACK_RADIUS
                );
                atom.vdw_radius = Atom::FALLBACK_RADIUS;
                atom.malformed = true;
            }
        }
        if atom.malformed {
            malformed += 1;
        }
    }
    malformed
}
