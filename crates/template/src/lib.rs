//! Authoring model of service templates.
//!
//! A service template wraps a Kubernetes [`Service`](k8s_openapi::api::core::v1::Service)
//! owned by a portal service. [`ServiceTemplateForm`] loads the related portal
//! entities, keeps the editable state (ports, label selector, headless mode)
//! and composes the document that is finally submitted.

mod defaults;
mod error;
mod form;
mod guard;
mod labels;
mod merge;
mod port;
mod selector;

pub use self::{
    defaults::{default_port, default_service},
    error::Error,
    form::{ActionType, LoadContext, ServiceTemplateForm, Submitted},
    guard::{InFlight, InFlightGuard},
    labels::LabelKeys,
    merge::{MergeDefaults, merge_defaults},
    port::{ParsePortSpecError, PortSpec, Protocol, port_name},
    selector::{LabelSelector, ParseSelectorEntryError, SelectorEntry},
};
