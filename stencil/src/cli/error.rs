use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Configuration { source: crate::config::Error },

    #[snafu(display("{source}"))]
    Portal { source: stencil_portal::Error },

    #[snafu(display("{source}"))]
    Template { source: stencil_template::Error },

    #[snafu(display("Port entry #{index} does not exist, the form has {len} ports"))]
    NoSuchPort { index: usize, len: usize },

    #[snafu(display("Selector entry #{index} does not exist, the form has {len} selectors"))]
    NoSuchSelector { index: usize, len: usize },

    #[snafu(display("Failed to serialize service as YAML, error: {source}"))]
    SerializeYaml { source: serde_yaml::Error },

    #[snafu(display("Failed to serialize service as JSON, error: {source}"))]
    SerializeJson { source: serde_json::Error },

    #[snafu(display("Failed to write to stdout, error: {source}"))]
    WriteStdout { source: std::io::Error },

    #[snafu(display("Failed to create tokio runtime, error: {source}"))]
    InitializeTokioRuntime { source: std::io::Error },
}

impl From<crate::config::Error> for Error {
    fn from(source: crate::config::Error) -> Self { Self::Configuration { source } }
}

impl From<stencil_portal::Error> for Error {
    fn from(source: stencil_portal::Error) -> Self { Self::Portal { source } }
}

impl From<stencil_template::Error> for Error {
    fn from(source: stencil_template::Error) -> Self { Self::Template { source } }
}
