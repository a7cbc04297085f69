mod buffer;
mod destination;
mod geo_input;
mod polygon_ops;

pub use buffer::Buffer;
pub use destination::{destination_point, radius_polygon, EARTH_RADIUS_MILES};
pub use geo_input::{read_boundary, GeoInput};
pub use polygon_ops::{difference, intersection, union_all};
