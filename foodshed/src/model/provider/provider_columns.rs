use serde::{Deserialize, Serialize};

/// names of the provider table columns read by [`super::read_providers`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderColumns {
    pub latitude: String,
    pub longitude: String,
    pub name: String,
    /// when missing from the table, providers are identified by row number
    pub id: Option<String>,
}

impl Default for ProviderColumns {
    fn default() -> Self {
        ProviderColumns {
            latitude: String::from("latitude"),
            longitude: String::from("longitude"),
            name: String::from("company_name"),
            id: Some(String::from("license_number")),
        }
    }
}
