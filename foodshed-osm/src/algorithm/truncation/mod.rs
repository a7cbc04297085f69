mod component_filter;
mod component_truncation;
mod geo_truncation;

pub use component_filter::ComponentFilter;
pub use component_truncation::filter_components;
pub use geo_truncation::truncate_graph_polygon;
