//! Operations that turn a flat atom pool into a classified, finalized assembly.
//!
//! The pipeline runs bond inference, backbone search, residue segmentation,
//! classification and finalization in that order. Each stage is exposed on its own so
//! callers can drive a single step, and all of them share one error type.

mod backbone;
mod bonds;
mod classify;
mod error;
mod finalize;
mod segment;
mod valence;

#[cfg(test)]
pub(crate) mod testing;

pub use bonds::{
    BOND_BUFFER, BondInference, ElementRadii, RadiusSource, Strategy, assign_radii,
};

pub use backbone::{BackboneSearch, CARBONYL_MAX_LENGTH, is_alpha_carbon, is_carbonyl_carbon};

pub use segment::{Segmentation, segment};

pub use classify::{ClassifyConfig, classify, classify_atoms};

pub use finalize::finalize;

pub use valence::{Membership, angle_value, dihedral_value, enumerate, spanning_terms};

pub use error::Error;
