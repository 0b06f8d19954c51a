//! Collection dataset: record types, CSV loading, badge catalog and
//! badge/price value scoring.

pub mod badges;
pub mod bpr;
pub mod loader;
pub mod types;

pub use badges::{Badge, BadgeCatalog};
pub use loader::{apply_rarity_scores, load_records, parse_records};
pub use types::Record;
