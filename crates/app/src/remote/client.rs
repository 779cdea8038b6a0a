//! HTTP client for the remote JSON-API resource service.

use std::time::Duration;

use reqwest::{
    Client, Method, RequestBuilder, StatusCode,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde_json::{Value, json};
use tracing::debug;

use crate::remote::{Document, Query, RemoteError, errors::parse_validation_errors};

const JSON_API: &str = "application/vnd.api+json";

/// Configuration for connecting to the remote resource service.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL, e.g. `"https://api.example.com/v1"`.
    pub base_url: String,

    /// Basic-auth user.
    pub api_key: String,

    /// Basic-auth password.
    pub api_secret: String,

    pub timeout: Duration,
}

/// JSON-API client. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    config: RemoteConfig,
    http: Client,
}

impl RemoteClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client can't be built.
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }

    /// `GET` a resource or collection.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status or an
    /// undecodable body.
    pub async fn fetch(&self, path: &str, query: &Query) -> Result<Document, RemoteError> {
        let request = self.request(Method::GET, path).query(&query.to_pairs());

        self.send(request).await
    }

    /// `POST` a new resource of type `kind` with the given attributes.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Validation`] when the remote rejects the
    /// attributes, or any other transport error.
    pub async fn create(
        &self,
        path: &str,
        kind: &str,
        attributes: Value,
    ) -> Result<Document, RemoteError> {
        let body = json!({ "data": { "type": kind, "attributes": attributes } });

        self.send(self.request(Method::POST, path).json(&body)).await
    }

    /// `PATCH` attributes of an existing resource.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::NotFound`] or [`RemoteError::Validation`] as
    /// reported by the remote, or any other transport error.
    pub async fn update(
        &self,
        path: &str,
        kind: &str,
        id: &str,
        attributes: Value,
    ) -> Result<Document, RemoteError> {
        let body = json!({ "data": { "type": kind, "id": id, "attributes": attributes } });

        self.send(self.request(Method::PATCH, path).json(&body)).await
    }

    /// Invoke a custom member action (`freeze`, `approve`, ...).
    ///
    /// # Errors
    ///
    /// Same as [`RemoteClient::update`].
    pub async fn action(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Document, RemoteError> {
        let mut request = self.request(method, path);

        if let Some(body) = body {
            request = request.json(&body);
        }

        self.send(request).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.config.base_url.trim_end_matches('/'));

        debug!(%method, %url, "remote request");

        self.http
            .request(method, url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .header(ACCEPT, JSON_API)
            .header(CONTENT_TYPE, JSON_API)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Document, RemoteError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(RemoteError::NotFound);
        }

        if matches!(
            status,
            StatusCode::UNPROCESSABLE_ENTITY | StatusCode::BAD_REQUEST
        ) {
            let errors = parse_validation_errors(&body);

            if !errors.is_empty() {
                return Err(RemoteError::Validation(errors));
            }
        }

        if !status.is_success() {
            return Err(RemoteError::UnexpectedResponse(format!(
                "request failed with status {status}: {body}"
            )));
        }

        if body.trim().is_empty() {
            return Ok(Document::default());
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{basic_auth, body_partial_json, method, path, query_param},
    };

    use super::*;
    use crate::remote::Page;

    fn client(server: &MockServer) -> Result<RemoteClient, RemoteError> {
        RemoteClient::new(RemoteConfig {
            base_url: format!("{}/", server.uri()),
            api_key: "key".to_owned(),
            api_secret: "secret".to_owned(),
            timeout: Duration::from_secs(5),
        })
    }

    #[tokio::test]
    async fn fetch_sends_query_pairs_and_credentials() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/organizations"))
            .and(basic_auth("key", "secret"))
            .and(query_param("filter[external_id]", "ACME-001"))
            .and(query_param("page[size]", "1"))
            .and(query_param("_metadata[act_as_manager]", "admin-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "id": "1", "type": "organizations", "attributes": { "name": "Acme" } }],
                "meta": { "record_count": 1 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = Query::new()
            .filter("external_id", "ACME-001")
            .page(Page::SINGLE)
            .metadata("act_as_manager", "admin-1");

        let document = client(&server)?.fetch("/organizations", &query).await?;

        assert_eq!(document.resources().len(), 1);
        assert_eq!(document.record_count(), Some(1));

        Ok(())
    }

    #[tokio::test]
    async fn maps_not_found() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = client(&server)?
            .fetch("/organizations/missing", &Query::new())
            .await;

        assert!(matches!(result, Err(RemoteError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn create_wraps_attributes_and_maps_validation_errors() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_partial_json(json!({
                "data": { "type": "users", "attributes": { "email": "taken@example.com" } }
            })))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "errors": [{
                    "title": "has already been taken",
                    "detail": "has already been taken",
                    "source": { "pointer": "/data/attributes/email" }
                }]
            })))
            .mount(&server)
            .await;

        let result = client(&server)?
            .create("/users", "users", json!({ "email": "taken@example.com" }))
            .await;

        let Err(RemoteError::Validation(errors)) = result else {
            return Err("expected validation error".into());
        };

        assert_eq!(errors.first().and_then(|e| e.attribute.as_deref()), Some("email"));

        Ok(())
    }

    #[tokio::test]
    async fn empty_success_body_is_empty_document() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/orga_invites/inv-1/decline"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let document = client(&server)?
            .action(Method::PATCH, "/orga_invites/inv-1/decline", None)
            .await?;

        assert!(document.resources().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn server_errors_are_unexpected_responses() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let result = client(&server)?
            .fetch("/tenant_reporting", &Query::new())
            .await;

        assert!(matches!(
            result,
            Err(RemoteError::UnexpectedResponse(message)) if message.contains("boom")
        ));

        Ok(())
    }
}
