use serde::{Deserialize, Serialize};
use stencil_base::consts::portal::DEFAULT_ENDPOINT;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalConfig {
    /// Base URL of the portal, without the API prefix.
    #[serde(default = "PortalConfig::default_endpoint")]
    pub endpoint: String,

    /// Bearer token sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for PortalConfig {
    fn default() -> Self { Self { endpoint: Self::default_endpoint(), token: None } }
}

impl PortalConfig {
    #[must_use]
    pub fn default_endpoint() -> String { DEFAULT_ENDPOINT.to_string() }
}
