pub mod connected_components;
pub mod projection;
mod search;
pub mod simplification;
pub mod truncation;

pub use search::bfs_undirected;
