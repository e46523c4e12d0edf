use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to load service template form, error: {source}"))]
    Load { source: stencil_portal::Error },

    #[snafu(display("Failed to decode stored document of service template {template_id}, error: {source}"))]
    DecodeTemplate { template_id: i64, source: serde_json::Error },

    #[snafu(display("Failed to encode service {service_name}, error: {source}"))]
    EncodeTemplate { service_name: String, source: serde_json::Error },

    #[snafu(display("A submission of service template {service_name} is already in progress"))]
    SubmissionInProgress { service_name: String },

    #[snafu(display("Failed to create service template {service_name}, error: {source}"))]
    Submit { service_name: String, source: stencil_portal::Error },
}
