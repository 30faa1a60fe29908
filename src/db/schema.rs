use crate::model::types::{PolymerKind, StandardResidue};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct SideChainTableFile {
    pub side_chain: Vec<SideChainEntry>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct SideChainEntry {
    pub key: String,
    pub kind: PolymerKind,
    pub residues: Vec<StandardResidue>,
    #[serde(default)]
    pub rule: Option<Disambiguation>,
}

/// Secondary check used when one stoichiometry key maps to two residues.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Disambiguation {
    /// First residue when two side-chain carbons sit two bonds from the anchor atom.
    BetaBranch,
    /// First residue when the sugar carbon next to C3' carries an oxygen.
    RiboseOxygen,
}
