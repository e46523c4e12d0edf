use reqwest::{RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use snafu::ResultExt;
use stencil_base::{PROJECT_NAME, PROJECT_VERSION, consts::portal::API_PREFIX};

use crate::{
    App, Envelope, Error, Namespace, PortalApi, Service, ServiceTemplate, error, route,
};

/// HTTP client of the portal API.
#[derive(Clone, Debug)]
pub struct PortalClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

/// Shape of the body the portal sends along with a failure status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    msg: Option<String>,
}

impl PortalClient {
    /// Creates a client for the portal served at `endpoint`.
    ///
    /// When `token` is set every request carries it as a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be initialized.
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(format!("{PROJECT_NAME}/{PROJECT_VERSION}"))
            .build()
            .context(error::BuildHttpClientSnafu)?;
        Ok(Self { http, endpoint: endpoint.into(), token })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str { &self.endpoint }

    fn url(&self, path: &str) -> String {
        format!("{}/{API_PREFIX}/{path}", self.endpoint.trim_end_matches('/'))
    }

    async fn get<T>(&self, path: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = self.http.get(&url);
        self.execute("GET", url, request).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = self.http.post(&url).json(body);
        self.execute("POST", url, request).await
    }

    async fn execute<T>(
        &self,
        method: &'static str,
        url: String,
        request: RequestBuilder,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        tracing::debug!("{method} {url}");
        let response = request
            .send()
            .await
            .with_context(|_| error::SendRequestSnafu { method, url: url.clone() })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return error::UnexpectedStatusSnafu {
                method,
                url,
                status: status.as_u16(),
                message: failure_message(status, body),
            }
            .fail();
        }

        let Envelope { data } = response
            .json::<Envelope<T>>()
            .await
            .with_context(|_| error::DecodeResponseSnafu { url })?;
        Ok(data)
    }
}

fn failure_message(status: StatusCode, body: String) -> String {
    if let Ok(ErrorBody { msg: Some(msg) }) = serde_json::from_str::<ErrorBody>(&body) {
        return msg;
    }
    if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        body
    }
}

impl PortalApi for PortalClient {
    async fn get_namespace(&self, namespace_id: i64) -> Result<Namespace, Error> {
        self.get(&route::namespace(namespace_id)).await
    }

    async fn get_app(&self, namespace_id: i64, app_id: i64) -> Result<App, Error> {
        self.get(&route::app(namespace_id, app_id)).await
    }

    async fn get_service(&self, app_id: i64, service_id: i64) -> Result<Service, Error> {
        self.get(&route::service(app_id, service_id)).await
    }

    async fn get_service_template(
        &self,
        app_id: i64,
        template_id: i64,
    ) -> Result<ServiceTemplate, Error> {
        self.get(&route::service_template(app_id, template_id)).await
    }

    async fn create_service_template(
        &self,
        app_id: i64,
        template: &ServiceTemplate,
    ) -> Result<ServiceTemplate, Error> {
        self.post(&route::service_templates(app_id), template).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_endpoint_and_prefix() {
        let client = PortalClient::new("https://portal.example.com/", None).expect("client");
        assert_eq!(
            client.url(&route::service(5, 9)),
            "https://portal.example.com/api/v1/apps/5/services/9"
        );

        let client = PortalClient::new("http://127.0.0.1:8080", None).expect("client");
        assert_eq!(client.url(&route::namespace(1)), "http://127.0.0.1:8080/api/v1/namespaces/1");
    }

    #[test]
    fn test_failure_message_prefers_portal_msg() {
        let message = failure_message(
            StatusCode::BAD_REQUEST,
            r#"{"code": 400, "msg": "template is invalid"}"#.to_string(),
        );
        assert_eq!(message, "template is invalid");
    }

    #[test]
    fn test_failure_message_falls_back_to_body_or_reason() {
        assert_eq!(
            failure_message(StatusCode::BAD_GATEWAY, "upstream down".to_string()),
            "upstream down"
        );
        assert_eq!(failure_message(StatusCode::NOT_FOUND, String::new()), "Not Found");
    }
}
