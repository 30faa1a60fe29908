//! Embedded lookup tables, parsed once into an immutable static store.

mod loader;
mod schema;
mod store;

pub use schema::{Disambiguation, SideChainEntry};
pub use store::{DataStore, get_store};
