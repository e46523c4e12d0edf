//! Typed default merging of Kubernetes Service documents.
//!
//! `partial.merge_defaults(defaults)` keeps every value set in `partial` and
//! takes the default wherever `partial` leaves a field unset. The rules per
//! kind of field are:
//!
//! - optional scalars and lists: the partial value replaces the default
//!   wholesale;
//! - string maps (labels, annotations, selector): merged key by key, the
//!   partial winning on a shared key;
//! - nested objects (metadata, spec, status): merged recursively.
//!
//! Every implementation destructures the defaults without a rest pattern, so
//! a field added to the Kubernetes types fails to compile until it is given
//! a rule.
use std::collections::BTreeMap;

use k8s_openapi::{
    api::core::v1::{LoadBalancerStatus, Service, ServiceSpec, ServiceStatus},
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
};

pub trait MergeDefaults: Sized {
    /// Fills the fields `self` leaves unset from `defaults`.
    #[must_use]
    fn merge_defaults(self, defaults: Self) -> Self;
}

/// Merges `partial` onto `defaults`.
///
/// # Examples
///
/// ```
/// use k8s_openapi::api::core::v1::{Service, ServiceSpec};
/// use stencil_template::{default_service, merge_defaults};
///
/// let partial = Service {
///     spec: Some(ServiceSpec { cluster_ip: Some("None".to_string()), ..ServiceSpec::default() }),
///     ..Service::default()
/// };
/// let merged = merge_defaults(default_service(), partial);
/// let spec = merged.spec.unwrap_or_default();
///
/// assert_eq!(spec.cluster_ip.as_deref(), Some("None"));
/// assert_eq!(spec.type_.as_deref(), Some("ClusterIP"));
/// ```
#[inline]
#[must_use]
pub fn merge_defaults<T: MergeDefaults>(defaults: T, partial: T) -> T {
    partial.merge_defaults(defaults)
}

fn merge_map(
    partial: Option<BTreeMap<String, String>>,
    defaults: Option<BTreeMap<String, String>>,
) -> Option<BTreeMap<String, String>> {
    match (partial, defaults) {
        (Some(mut map), Some(defaults)) => {
            for (key, value) in defaults {
                let _existing = map.entry(key).or_insert(value);
            }
            Some(map)
        }
        (partial, defaults) => partial.or(defaults),
    }
}

fn merge_nested<T: MergeDefaults>(partial: Option<T>, defaults: Option<T>) -> Option<T> {
    match (partial, defaults) {
        (Some(value), Some(defaults)) => Some(value.merge_defaults(defaults)),
        (partial, defaults) => partial.or(defaults),
    }
}

impl MergeDefaults for ObjectMeta {
    fn merge_defaults(self, defaults: Self) -> Self {
        let Self {
            annotations,
            creation_timestamp,
            deletion_grace_period_seconds,
            deletion_timestamp,
            finalizers,
            generate_name,
            generation,
            labels,
            managed_fields,
            name,
            namespace,
            owner_references,
            resource_version,
            self_link,
            uid,
        } = defaults;

        Self {
            annotations: merge_map(self.annotations, annotations),
            creation_timestamp: self.creation_timestamp.or(creation_timestamp),
            deletion_grace_period_seconds: self
                .deletion_grace_period_seconds
                .or(deletion_grace_period_seconds),
            deletion_timestamp: self.deletion_timestamp.or(deletion_timestamp),
            finalizers: self.finalizers.or(finalizers),
            generate_name: self.generate_name.or(generate_name),
            generation: self.generation.or(generation),
            labels: merge_map(self.labels, labels),
            managed_fields: self.managed_fields.or(managed_fields),
            name: self.name.or(name),
            namespace: self.namespace.or(namespace),
            owner_references: self.owner_references.or(owner_references),
            resource_version: self.resource_version.or(resource_version),
            self_link: self.self_link.or(self_link),
            uid: self.uid.or(uid),
        }
    }
}

impl MergeDefaults for ServiceSpec {
    fn merge_defaults(self, defaults: Self) -> Self {
        let Self {
            allocate_load_balancer_node_ports,
            cluster_ip,
            cluster_ips,
            external_ips,
            external_name,
            external_traffic_policy,
            health_check_node_port,
            internal_traffic_policy,
            ip_families,
            ip_family_policy,
            load_balancer_class,
            load_balancer_ip,
            load_balancer_source_ranges,
            ports,
            publish_not_ready_addresses,
            selector,
            session_affinity,
            session_affinity_config,
            traffic_distribution,
            type_,
        } = defaults;

        Self {
            allocate_load_balancer_node_ports: self
                .allocate_load_balancer_node_ports
                .or(allocate_load_balancer_node_ports),
            cluster_ip: self.cluster_ip.or(cluster_ip),
            cluster_ips: self.cluster_ips.or(cluster_ips),
            external_ips: self.external_ips.or(external_ips),
            external_name: self.external_name.or(external_name),
            external_traffic_policy: self.external_traffic_policy.or(external_traffic_policy),
            health_check_node_port: self.health_check_node_port.or(health_check_node_port),
            internal_traffic_policy: self.internal_traffic_policy.or(internal_traffic_policy),
            ip_families: self.ip_families.or(ip_families),
            ip_family_policy: self.ip_family_policy.or(ip_family_policy),
            load_balancer_class: self.load_balancer_class.or(load_balancer_class),
            load_balancer_ip: self.load_balancer_ip.or(load_balancer_ip),
            load_balancer_source_ranges: self
                .load_balancer_source_ranges
                .or(load_balancer_source_ranges),
            ports: self.ports.or(ports),
            publish_not_ready_addresses: self
                .publish_not_ready_addresses
                .or(publish_not_ready_addresses),
            selector: merge_map(self.selector, selector),
            session_affinity: self.session_affinity.or(session_affinity),
            session_affinity_config: self.session_affinity_config.or(session_affinity_config),
            traffic_distribution: self.traffic_distribution.or(traffic_distribution),
            type_: self.type_.or(type_),
        }
    }
}

impl MergeDefaults for LoadBalancerStatus {
    fn merge_defaults(self, defaults: Self) -> Self {
        let Self { ingress } = defaults;
        Self { ingress: self.ingress.or(ingress) }
    }
}

impl MergeDefaults for ServiceStatus {
    fn merge_defaults(self, defaults: Self) -> Self {
        let Self { conditions, load_balancer } = defaults;
        Self {
            conditions: self.conditions.or(conditions),
            load_balancer: merge_nested(self.load_balancer, load_balancer),
        }
    }
}

impl MergeDefaults for Service {
    fn merge_defaults(self, defaults: Self) -> Self {
        let Self { metadata, spec, status } = defaults;
        Self {
            metadata: self.metadata.merge_defaults(metadata),
            spec: merge_nested(self.spec, spec),
            status: merge_nested(self.status, status),
        }
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::{
        api::core::v1::{LoadBalancerIngress, ServicePort},
        apimachinery::pkg::apis::meta::v1::Condition,
    };

    use super::*;
    use crate::default_service;

    fn partial_service() -> Service {
        Service {
            metadata: ObjectMeta {
                name: Some("svc1".to_string()),
                labels: Some(BTreeMap::from([("tier".to_string(), "web".to_string())])),
                ..ObjectMeta::default()
            },
            spec: Some(ServiceSpec {
                cluster_ip: Some("None".to_string()),
                ports: Some(vec![ServicePort { port: 80, ..ServicePort::default() }]),
                selector: Some(BTreeMap::from([("app".to_string(), "app1".to_string())])),
                ..ServiceSpec::default()
            }),
            ..Service::default()
        }
    }

    #[test]
    fn test_merge_empty_partial_yields_defaults() {
        let defaults = default_service();
        assert_eq!(merge_defaults(defaults.clone(), Service::default()), defaults);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let defaults = default_service();
        assert_eq!(merge_defaults(defaults.clone(), defaults.clone()), defaults);

        let merged = merge_defaults(default_service(), partial_service());
        assert_eq!(merge_defaults(merged.clone(), merged.clone()), merged);
    }

    #[test]
    fn test_partial_values_override_defaults() {
        let merged = merge_defaults(default_service(), partial_service());
        let spec = merged.spec.expect("spec is merged");

        assert_eq!(merged.metadata.name.as_deref(), Some("svc1"));
        assert_eq!(spec.cluster_ip.as_deref(), Some("None"));
        assert_eq!(spec.ports.map(|ports| ports.len()), Some(1));
        assert_eq!(
            spec.selector,
            Some(BTreeMap::from([("app".to_string(), "app1".to_string())]))
        );
    }

    #[test]
    fn test_absent_fields_fall_back_to_defaults() {
        let merged = merge_defaults(default_service(), partial_service());
        let spec = merged.spec.expect("spec is merged");

        assert_eq!(spec.type_.as_deref(), Some("ClusterIP"));
        assert_eq!(spec.session_affinity.as_deref(), Some("None"));
    }

    #[test]
    fn test_maps_merge_key_wise() {
        let defaults = Service {
            metadata: ObjectMeta {
                labels: Some(BTreeMap::from([
                    ("tier".to_string(), "default".to_string()),
                    ("team".to_string(), "infra".to_string()),
                ])),
                ..ObjectMeta::default()
            },
            ..Service::default()
        };
        let merged = merge_defaults(defaults, partial_service());

        assert_eq!(
            merged.metadata.labels,
            Some(BTreeMap::from([
                ("team".to_string(), "infra".to_string()),
                ("tier".to_string(), "web".to_string()),
            ]))
        );
    }

    #[test]
    fn test_lists_are_replaced_not_merged() {
        let defaults = Service {
            spec: Some(ServiceSpec {
                ports: Some(vec![
                    ServicePort { port: 22, ..ServicePort::default() },
                    ServicePort { port: 443, ..ServicePort::default() },
                ]),
                ..ServiceSpec::default()
            }),
            ..Service::default()
        };
        let merged = merge_defaults(defaults, partial_service());
        let ports = merged.spec.and_then(|spec| spec.ports).expect("ports are kept");

        assert_eq!(ports.iter().map(|port| port.port).collect::<Vec<_>>(), vec![80]);
    }

    fn populated_service() -> Service {
        Service {
            metadata: ObjectMeta {
                uid: Some("u-1".to_string()),
                resource_version: Some("42".to_string()),
                generation: Some(3),
                self_link: Some("/api/v1/namespaces/default/services/svc1".to_string()),
                deletion_grace_period_seconds: Some(30),
                ..ObjectMeta::default()
            },
            spec: Some(ServiceSpec {
                traffic_distribution: Some("PreferClose".to_string()),
                external_traffic_policy: Some("Local".to_string()),
                ..ServiceSpec::default()
            }),
            status: Some(ServiceStatus {
                load_balancer: Some(LoadBalancerStatus {
                    ingress: Some(vec![LoadBalancerIngress {
                        ip: Some("10.0.0.1".to_string()),
                        ..LoadBalancerIngress::default()
                    }]),
                }),
                conditions: None,
            }),
        }
    }

    #[test]
    fn test_merge_empty_partial_keeps_every_default() {
        let defaults = populated_service();
        assert_eq!(merge_defaults(defaults.clone(), Service::default()), defaults);
    }

    #[test]
    fn test_unset_fields_of_populated_defaults_survive() {
        let partial = Service {
            spec: Some(ServiceSpec {
                cluster_ip: Some("None".to_string()),
                ..ServiceSpec::default()
            }),
            status: Some(ServiceStatus {
                conditions: Some(Vec::<Condition>::new()),
                load_balancer: None,
            }),
            ..Service::default()
        };
        let merged = merge_defaults(populated_service(), partial);

        assert_eq!(merged.metadata.uid.as_deref(), Some("u-1"));
        assert_eq!(merged.metadata.resource_version.as_deref(), Some("42"));
        assert_eq!(merged.metadata.generation, Some(3));
        assert_eq!(merged.metadata.deletion_grace_period_seconds, Some(30));

        let spec = merged.spec.expect("spec is merged");
        assert_eq!(spec.cluster_ip.as_deref(), Some("None"));
        assert_eq!(spec.traffic_distribution.as_deref(), Some("PreferClose"));
        assert_eq!(spec.external_traffic_policy.as_deref(), Some("Local"));

        let status = merged.status.expect("status is merged");
        assert_eq!(status.conditions, Some(Vec::new()));
        let ingress = status.load_balancer.and_then(|lb| lb.ingress).expect("ingress is kept");
        assert_eq!(ingress[0].ip.as_deref(), Some("10.0.0.1"));
    }
}
