//! Client side of the deployment portal REST API.
//!
//! The portal owns applications, their services and the service templates
//! attached to those services. [`PortalApi`] is the seam the template form
//! talks through; [`PortalClient`] implements it over HTTP.

mod api;
mod client;
mod error;
mod model;
mod route;

pub use self::{
    api::PortalApi,
    client::PortalClient,
    error::Error,
    model::{App, Envelope, Namespace, Service, ServiceTemplate},
};
