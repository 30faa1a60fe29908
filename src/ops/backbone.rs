//! Longest chemically admissible backbone path from a seed atom.
//!
//! The search is a depth-first backtracking walk over C, N, O and P atoms that are still
//! unclaimed in the [`AtomPool`]. Near the seed it is unrestricted; past the free depth an
//! extension must plausibly stay on a peptide or phosphodiester backbone:
//!
//! - O only when bonded to a phosphorus,
//! - N only when bonded to both a carbonyl carbon and an alpha carbon,
//! - C only when the path does not already end in a run of carbons,
//! - P always.
//!
//! Each frame keeps the best continuation found through its children. When two
//! continuations share an atom (they went around a ring) the shorter one is kept, otherwise
//! the longer; ties keep the first found. Frames live on an explicit stack so chain length
//! never touches the call stack.

use crate::model::graph::BondGraph;
use crate::model::pool::AtomPool;
use crate::model::types::{BondOrder, Element};
use std::collections::HashSet;

/// Configuration for [`BackboneSearch::longest_path`].
#[derive(Debug, Clone)]
pub struct BackboneSearch {
    free_depth: usize,
    max_carbon_run: usize,
    max_path_len: usize,
}

impl Default for BackboneSearch {
    fn default() -> Self {
        Self {
            free_depth: 7,
            max_carbon_run: 3,
            max_path_len: 100_000,
        }
    }
}

struct Frame {
    atom: usize,
    candidates: Vec<usize>,
    next: usize,
    /// Best continuation below this atom, far end first.
    best_rev: Vec<usize>,
}

impl BackboneSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path length (in atoms) up to which extensions are unrestricted.
    pub fn free_depth(mut self, depth: usize) -> Self {
        self.free_depth = depth;
        self
    }

    /// Longest run of consecutive carbons a restricted extension may follow.
    pub fn max_carbon_run(mut self, run: usize) -> Self {
        self.max_carbon_run = run.max(1);
        self
    }

    /// Hard bound on the number of atoms in a path.
    pub fn max_path_len(mut self, len: usize) -> Self {
        self.max_path_len = len.max(1);
        self
    }

    /// Finds the longest admissible simple path starting at `seed`.
    ///
    /// # Arguments
    ///
    /// * `graph` - Bond graph to walk.
    /// * `pool` - Claim state; claimed atoms are never entered.
    /// * `seed` - Start atom, conventionally a nitrogen.
    ///
    /// # Returns
    ///
    /// Atom indices from the seed to the far end; always contains at least the seed.
    pub fn longest_path(&self, graph: &BondGraph, pool: &AtomPool, seed: usize) -> Vec<usize> {
        let mut on_path = vec![false; graph.atom_count()];
        let mut path = vec![seed];
        on_path[seed] = true;

        let mut stack = vec![Frame {
            atom: seed,
            candidates: self.candidates(graph, pool, &on_path, &path, seed),
            next: 0,
            best_rev: Vec::new(),
        }];

        loop {
            let Some(top) = stack.last_mut() else {
                break;
            };

            if top.next < top.candidates.len() {
                let child = top.candidates[top.next];
                top.next += 1;
                if on_path[child] {
                    continue;
                }
                path.push(child);
                on_path[child] = true;
                let candidates = self.candidates(graph, pool, &on_path, &path, child);
                stack.push(Frame {
                    atom: child,
                    candidates,
                    next: 0,
                    best_rev: Vec::new(),
                });
                continue;
            }

            let Some(done) = stack.pop() else {
                break;
            };
            on_path[done.atom] = false;
            path.pop();

            let mut branch = done.best_rev;
            branch.push(done.atom);

            match stack.last_mut() {
                Some(parent) => Self::merge(&mut parent.best_rev, branch),
                None => {
                    branch.reverse();
                    log::trace!("Backbone from atom {} spans {} atoms", seed, branch.len());
                    return branch;
                }
            }
        }

        vec![seed]
    }

    /// Longest path from `seed`, re-searched from its far end.
    ///
    /// A seed inside a nucleotide base reaches only one end of the strand; searching again
    /// from the far end spans the whole backbone. The second path is used only when it is
    /// strictly longer, so a protein seeded at its N-terminal nitrogen keeps its first path.
    pub fn trace(&self, graph: &BondGraph, pool: &AtomPool, seed: usize) -> Vec<usize> {
        let first = self.longest_path(graph, pool, seed);
        let far_end = match first.last() {
            Some(&end) if end != seed => end,
            _ => return first,
        };
        let second = self.longest_path(graph, pool, far_end);
        if second.len() > first.len() {
            second
        } else {
            first
        }
    }

    fn merge(best: &mut Vec<usize>, candidate: Vec<usize>) {
        if best.is_empty() {
            *best = candidate;
            return;
        }
        let overlaps = {
            let (small, large) = if best.len() <= candidate.len() {
                (&*best, &candidate)
            } else {
                (&candidate, &*best)
            };
            let seen: HashSet<usize> = small.iter().copied().collect();
            large.iter().any(|a| seen.contains(a))
        };
        let replace = if overlaps {
            candidate.len() < best.len()
        } else {
            candidate.len() > best.len()
        };
        if replace {
            *best = candidate;
        }
    }

    fn candidates(
        &self,
        graph: &BondGraph,
        pool: &AtomPool,
        on_path: &[bool],
        path: &[usize],
        atom: usize,
    ) -> Vec<usize> {
        if path.len() >= self.max_path_len {
            return Vec::new();
        }
        if path.len() > 1 && graph.degree(atom) == 1 {
            return Vec::new();
        }

        let restricted = path.len() >= self.free_depth;
        graph
            .neighbors_of(atom)
            .filter(|&n| {
                graph.element(n).is_backbone_candidate()
                    && !pool.is_claimed(n)
                    && !on_path[n]
                    && (!restricted || self.admissible(graph, path, n))
            })
            .collect()
    }

    fn admissible(&self, graph: &BondGraph, path: &[usize], next: usize) -> bool {
        match graph.element(next) {
            Element::O => graph.has_neighbor_element(next, Element::P),
            Element::N => {
                graph.neighbors_of(next).any(|n| is_carbonyl_carbon(graph, n))
                    && graph.neighbors_of(next).any(|n| is_alpha_carbon(graph, n))
            }
            Element::C => {
                let run = self.max_carbon_run.min(path.len());
                !path[path.len() - run..]
                    .iter()
                    .all(|&a| graph.element(a) == Element::C)
            }
            Element::P => true,
            _ => false,
        }
    }
}

/// Longest C-O bond, in ångströms, read as a double bond when orders are not known.
pub const CARBONYL_MAX_LENGTH: f64 = 1.30;

/// A carbon double-bonded to an oxygen that has no other neighbour.
///
/// The bond counts as double when its order says so or when it is shorter than
/// [`CARBONYL_MAX_LENGTH`]. Hydroxyl carbons (serine CB, ribose C2') never qualify.
pub fn is_carbonyl_carbon(graph: &BondGraph, atom: usize) -> bool {
    graph.element(atom) == Element::C
        && graph.bonds_of(atom).any(|bond| {
            let Some(o) = bond.partner(atom) else {
                return false;
            };
            graph.element(o) == Element::O
                && graph.degree(o) == 1
                && (bond.order == BondOrder::Double
                    || graph.atom(atom).distance(graph.atom(o)) < CARBONYL_MAX_LENGTH)
        })
}

/// A non-carbonyl carbon bonded to a carbonyl carbon.
pub fn is_alpha_carbon(graph: &BondGraph, atom: usize) -> bool {
    graph.element(atom) == Element::C
        && !is_carbonyl_carbon(graph, atom)
        && graph.neighbors_of(atom).any(|c| is_carbonyl_carbon(graph, c))
}
