//! JSON atom frames and their conversion into a [`BondGraph`].
//!
//! A frame lists atoms in pool order. When it also carries a `bonds` array, those bonds
//! are used as given and inference is skipped; otherwise bonds are perceived from
//! distances.

use super::error::Error;
use crate::model::atom::Atom;
use crate::model::graph::BondGraph;
use crate::model::types::{BondOrder, Element, Point};
use crate::ops::BondInference;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;

/// One atom of an input frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AtomRecord {
    /// Position in the pool; must match the record's position when present.
    #[serde(default)]
    pub index: Option<usize>,
    #[serde(default)]
    pub name: Option<String>,
    /// Element symbol, matched case-insensitively.
    pub element: String,
    /// Cartesian coordinates in ångströms.
    pub position: [f64; 3],
    /// Van der Waals radius overriding the element default.
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub chain: Option<String>,
    #[serde(default)]
    pub residue: Option<String>,
}

/// An explicit bond between two atoms of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BondRecord {
    pub atoms: [usize; 2],
    /// Bond order 1, 2 or 3; single when omitted.
    #[serde(default)]
    pub order: Option<u8>,
}

/// Ordered atom records plus optional explicit connectivity.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InputFrame {
    pub atoms: Vec<AtomRecord>,
    #[serde(default)]
    pub bonds: Option<Vec<BondRecord>>,
}

impl InputFrame {
    pub fn has_explicit_bonds(&self) -> bool {
        self.bonds.is_some()
    }
}

/// Reads a JSON frame from `reader`.
///
/// # Errors
///
/// Returns [`Error::Io`] when the stream cannot be read and [`Error::Parse`] when the JSON
/// does not describe a frame.
pub fn read_frame<R: Read>(reader: R) -> Result<InputFrame, Error> {
    serde_json::from_reader(reader).map_err(|e| Error::from_json(e, None))
}

impl AtomRecord {
    fn to_atom(&self, index: usize) -> Atom {
        let element = self.element.parse().unwrap_or_else(|_| {
            log::warn!(
                "Atom {} has unrecognized element '{}'; treating it as unknown",
                index,
                self.element
            );
            Element::Unknown
        });
        let name = self.name.as_deref().unwrap_or_else(|| element.symbol());
        let [x, y, z] = self.position;

        let mut atom = Atom::new(index, name, element, Point::new(x, y, z));
        if let Some(radius) = self.radius {
            atom.vdw_radius = radius;
        }
        atom.chain_hint = self.chain.as_deref().map(Into::into);
        atom.residue_hint = self.residue.as_deref().map(Into::into);
        atom
    }
}

impl BondGraph {
    /// Builds the bond graph for a frame.
    ///
    /// Explicit bonds are validated and inserted as given; frames without a `bonds` array
    /// go through `inference`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentData`] for a record index that disagrees with its
    /// position, a non-finite coordinate or radius, and for bonds that are self bonds,
    /// duplicates, reference a missing atom or carry an unknown order.
    pub fn from_frame(frame: &InputFrame, inference: &BondInference) -> Result<Self, Error> {
        let mut atoms = Vec::with_capacity(frame.atoms.len());
        for (i, record) in frame.atoms.iter().enumerate() {
            if let Some(index) = record.index {
                if index != i {
                    return Err(Error::inconsistent_data(
                        None,
                        format!("atom record {} declares index {}", i, index),
                    ));
                }
            }
            if record.position.iter().any(|c| !c.is_finite()) {
                return Err(Error::inconsistent_data(
                    None,
                    format!("atom {} has a non-finite coordinate", i),
                ));
            }
            if record.radius.is_some_and(|r| !r.is_finite() || r <= 0.0) {
                return Err(Error::inconsistent_data(
                    None,
                    format!("atom {} has a non-positive radius", i),
                ));
            }
            atoms.push(record.to_atom(i));
        }

        let Some(records) = &frame.bonds else {
            return Ok(inference.build(atoms));
        };

        let mut seen = HashSet::with_capacity(records.len());
        let mut graph = BondGraph::new(atoms);
        for (n, record) in records.iter().enumerate() {
            let [a, b] = record.atoms;
            if a >= graph.atom_count() || b >= graph.atom_count() {
                return Err(Error::inconsistent_data(
                    None,
                    format!(
                        "bond {} references atom {} but the frame has {} atoms",
                        n,
                        a.max(b),
                        graph.atom_count()
                    ),
                ));
            }
            if a == b {
                return Err(Error::inconsistent_data(
                    None,
                    format!("bond {} connects atom {} to itself", n, a),
                ));
            }
            if !seen.insert((a.min(b), a.max(b))) {
                return Err(Error::inconsistent_data(
                    None,
                    format!("bond {} repeats the pair {}-{}", n, a, b),
                ));
            }
            let order = match record.order.unwrap_or(1) {
                1 => BondOrder::Single,
                2 => BondOrder::Double,
                3 => BondOrder::Triple,
                other => {
                    return Err(Error::inconsistent_data(
                        None,
                        format!("bond {} has unsupported order {}", n, other),
                    ));
                }
            };
            graph.add_bond(a, b, order);
        }

        log::debug!(
            "Loaded {} atoms with {} explicit bonds",
            graph.atom_count(),
            graph.bond_count()
        );
        Ok(graph)
    }
}
