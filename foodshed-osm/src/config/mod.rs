mod graph_build;

pub use graph_build::GraphBuildConfiguration;
