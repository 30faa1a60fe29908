use super::loader;
use super::schema::SideChainEntry;
use crate::model::stoichiometry::Stoichiometry;
use crate::model::types::PolymerKind;
use std::collections::HashMap;
use std::sync::OnceLock;

pub struct DataStore {
    pub protein: HashMap<Stoichiometry, SideChainEntry>,
    pub nucleic: HashMap<Stoichiometry, SideChainEntry>,
}

impl DataStore {
    pub fn lookup(&self, kind: PolymerKind, key: &Stoichiometry) -> Option<&SideChainEntry> {
        match kind {
            PolymerKind::Protein => self.protein.get(key),
            PolymerKind::NucleicAcid => self.nucleic.get(key),
        }
    }
}

static STORE: OnceLock<DataStore> = OnceLock::new();

pub fn get_store() -> &'static DataStore {
    STORE.get_or_init(loader::load_side_chain_table)
}
