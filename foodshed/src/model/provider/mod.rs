mod provider_columns;
mod provider_point;
mod provider_reader;

pub use provider_columns::ProviderColumns;
pub use provider_point::ProviderPoint;
pub use provider_reader::read_providers;
