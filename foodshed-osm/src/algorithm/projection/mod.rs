mod transformer;
mod utm_zone;

pub use transformer::Transformer;
pub use utm_zone::UtmZone;
