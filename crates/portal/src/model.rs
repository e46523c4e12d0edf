//! Entities exchanged with the portal REST API.
//!
//! Field names follow the portal's camelCase JSON; descriptive fields the
//! portal may omit default to `None`.
use serde::{Deserialize, Serialize};

/// Every portal response carries its payload under `data`.
///
/// # Examples
///
/// ```rust
/// use stencil_portal::{Envelope, Namespace};
///
/// let body = r#"{"data": {"id": 1, "name": "ns1"}}"#;
/// let Envelope { data } = serde_json::from_str::<Envelope<Namespace>>(body).unwrap();
/// assert_eq!(data.name, "ns1");
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Envelope<T> {
    /// The payload of the response.
    pub data: T,
}

/// A portal namespace, the tenant that applications live in.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    /// Numeric identifier of the namespace.
    pub id: i64,

    /// Name written into the namespace label of composed services.
    pub name: String,
}

/// A portal application, the owner of portal services.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    /// Numeric identifier of the application.
    pub id: i64,

    /// Name seeded into the selector of a new template and written into the
    /// application label of composed services.
    pub name: String,

    /// Free-form description; carried but not interpreted.
    #[serde(default)]
    pub description: Option<String>,
}

/// A portal service, the owner of service templates.
///
/// Not to be confused with the Kubernetes `Service` a template produces.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Numeric identifier of the service.
    pub id: i64,

    /// Name given to the composed Kubernetes Service and its ports.
    pub name: String,

    /// Application the service belongs to, when the portal reports it.
    #[serde(default)]
    pub app_id: Option<i64>,

    /// Free-form description; carried but not interpreted.
    #[serde(default)]
    pub description: Option<String>,
}

/// A saved service template.
///
/// `template` holds the Kubernetes Service document serialized as JSON.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTemplate {
    /// Identifier assigned by the portal; `None` for a record not yet
    /// created, and then left out of the request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Template name, the name of the owning service.
    pub name: String,

    /// Identifier of the owning portal service.
    #[serde(default)]
    pub service_id: i64,

    /// The Kubernetes Service document, serialized as JSON.
    #[serde(default)]
    pub template: String,

    /// Description stored with this version of the template.
    #[serde(default)]
    pub description: Option<String>,
}
