mod coverage_cache;
mod layer_catalog;
mod layer_io;
mod layer_key;

pub use coverage_cache::{CellFingerprint, CoverageCache, InputDigests};
pub use layer_catalog::{LayerCatalog, LayerPaths};
pub use layer_io::{read_layer, write_layer};
pub use layer_key::{LayerKey, LayerKind};
