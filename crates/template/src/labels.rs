use serde::{Deserialize, Serialize};
use stencil_base::consts::k8s::labels;

/// Label keys configured by the portal operator.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelKeys {
    /// Label naming the owning application on the composed service.
    #[serde(default = "LabelKeys::default_app_key")]
    pub app_key: String,

    /// Label naming the owning namespace on the composed service.
    #[serde(default = "LabelKeys::default_namespace_key")]
    pub namespace_key: String,

    /// Selector key seeded with the application name for a new template.
    #[serde(default = "LabelKeys::default_selector_app_key")]
    pub selector_app_key: String,
}

impl Default for LabelKeys {
    fn default() -> Self {
        Self {
            app_key: Self::default_app_key(),
            namespace_key: Self::default_namespace_key(),
            selector_app_key: Self::default_selector_app_key(),
        }
    }
}

impl LabelKeys {
    #[must_use]
    pub fn default_app_key() -> String { labels::DEFAULT_APP_KEY.to_string() }

    #[must_use]
    pub fn default_namespace_key() -> String { labels::DEFAULT_NAMESPACE_KEY.to_string() }

    #[must_use]
    pub fn default_selector_app_key() -> String { labels::DEFAULT_SELECTOR_APP_KEY.to_string() }
}
