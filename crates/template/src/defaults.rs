use std::collections::BTreeMap;

use k8s_openapi::{
    api::core::v1::{Service, ServicePort, ServiceSpec},
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
};
use stencil_base::consts::k8s::service;

/// Skeleton every edited service is merged onto.
#[must_use]
pub fn default_service() -> Service {
    Service {
        metadata: ObjectMeta {
            name: Some(String::new()),
            labels: Some(BTreeMap::new()),
            ..ObjectMeta::default()
        },
        spec: Some(ServiceSpec {
            type_: Some(service::DEFAULT_TYPE.to_string()),
            session_affinity: Some(service::DEFAULT_SESSION_AFFINITY.to_string()),
            selector: Some(BTreeMap::new()),
            ports: Some(Vec::new()),
            ..ServiceSpec::default()
        }),
        ..Service::default()
    }
}

/// Port entry appended by the form; the port number is left for the caller.
#[must_use]
pub fn default_port() -> ServicePort {
    ServicePort {
        protocol: Some(service::DEFAULT_PORT_PROTOCOL.to_string()),
        ..ServicePort::default()
    }
}
