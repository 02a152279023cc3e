//! Catalogs of known characteristics and solutions
//!
//! Loaded once, before the graph is built, and read-only afterwards.

mod error;
mod parse;
mod types;

pub use error::{CatalogError, CatalogResult};
pub use parse::{
    load_catalogs, parse_characteristic_records, parse_characteristics,
    parse_characteristics_yaml, parse_solutions, parse_solutions_yaml, resolve_characteristics,
    AffinityRecord, CharacteristicRecord,
};
pub use types::{Affinity, Catalog, Characteristic, Named, Solution};
