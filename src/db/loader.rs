use super::schema::{SideChainEntry, SideChainTableFile};
use super::store::DataStore;
use crate::model::stoichiometry::Stoichiometry;
use crate::model::types::PolymerKind;
use std::collections::HashMap;

pub fn load_side_chain_table() -> DataStore {
    let content = include_str!("../../tables/side_chains.toml");
    parse_side_chain_table(content)
        .unwrap_or_else(|e| panic!("Failed to load side-chain table: {}", e))
}

pub(crate) fn parse_side_chain_table(content: &str) -> Result<DataStore, String> {
    let schema: SideChainTableFile = toml::from_str(content).map_err(|e| e.to_string())?;

    let mut protein: HashMap<Stoichiometry, SideChainEntry> = HashMap::new();
    let mut nucleic: HashMap<Stoichiometry, SideChainEntry> = HashMap::new();

    for entry in schema.side_chain {
        let key: Stoichiometry = entry.key.parse()?;
        if key.to_string() != entry.key {
            return Err(format!(
                "Key '{}' is not in canonical form (expected '{}')",
                entry.key, key
            ));
        }

        match (entry.residues.len(), entry.rule) {
            (1, None) | (2, Some(_)) => {}
            (n, rule) => {
                return Err(format!(
                    "Key '{}' lists {} residues with rule {:?}",
                    entry.key, n, rule
                ));
            }
        }
        if entry.residues.iter().any(|r| r.class() != entry.kind.residue_class()) {
            return Err(format!("Key '{}' mixes residue kinds", entry.key));
        }

        let table = match entry.kind {
            PolymerKind::Protein => &mut protein,
            PolymerKind::NucleicAcid => &mut nucleic,
        };
        let name = entry.key.clone();
        if table.insert(key, entry).is_some() {
            return Err(format!("Duplicate side-chain key found: {}", name));
        }
    }

    Ok(DataStore { protein, nucleic })
}
