mod node_index;
mod origin_assignment;

pub use node_index::NodeSpatialIndex;
pub use origin_assignment::OriginAssignment;
