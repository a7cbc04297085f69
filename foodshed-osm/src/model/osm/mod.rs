pub mod graph;
mod graph_builder;
pub mod import_ops;
mod osm_error;
mod osm_source;

pub use graph_builder::GraphBuilder;
pub use osm_error::OsmError;
pub use osm_source::OsmSource;
