use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to build HTTP client, error: {source}"))]
    BuildHttpClient { source: reqwest::Error },

    #[snafu(display("Failed to send {method} {url}, error: {source}"))]
    SendRequest { method: &'static str, url: String, source: reqwest::Error },

    #[snafu(display("{method} {url} returned status {status}: {message}"))]
    UnexpectedStatus { method: &'static str, url: String, status: u16, message: String },

    #[snafu(display("Failed to decode response of {url}, error: {source}"))]
    DecodeResponse { url: String, source: reqwest::Error },
}
