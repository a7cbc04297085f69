pub mod osm;
mod travel_mode;

pub use travel_mode::{BufferRadii, TravelMode};
