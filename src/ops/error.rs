//! Error type returned by the structural operations.
//!
//! Most inference failures are recovered inside [`classify`](crate::ops::classify) (a
//! fragment that cannot be segmented becomes a hetero molecule); these variants surface
//! when the individual stages are driven directly.

use thiserror::Error;

/// Error conditions surfaced by the operations layer.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// No repeating backbone unit was found along the path grown from `seed`.
    #[error("segmentation failed for backbone seeded at atom {seed} ({path_len} path atoms)")]
    SegmentationFailed { seed: usize, path_len: usize },

    /// Segmentation was asked to cut an empty backbone path.
    #[error("backbone path is empty")]
    EmptyPath,

    /// A hierarchy node was inserted into a parent that cannot contain it.
    #[error("a {child} cannot be added to a {parent}")]
    InvalidContainment {
        child: &'static str,
        parent: &'static str,
    },
}

impl Error {
    /// Helper for constructing an [`Error::SegmentationFailed`] variant.
    pub fn segmentation_failed(seed: usize, path_len: usize) -> Self {
        Self::SegmentationFailed { seed, path_len }
    }

    /// Helper for constructing an [`Error::InvalidContainment`] variant.
    pub fn invalid_containment(child: &'static str, parent: &'static str) -> Self {
        Self::InvalidContainment { child, parent }
    }
}
