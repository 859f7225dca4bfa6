//! Remote source backed by the platform gateway's JSON API
//!
//! Pages are requested with `POST {base}/v1/pages/{kind}` and single-shot
//! operations with `POST {base}/v1/actions`. Session cookies travel in the
//! `Cookie` header; the rest of the session rides in the request body.

use async_trait::async_trait;
use linkreach_core::ports::{Page, RemoteSource};
use linkreach_core::RemoteError;
use linkreach_domain::{ActionReply, ActionRequest, Credentials, FetchCursor, Resource};
use reqwest::header::{COOKIE, USER_AGENT};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use crate::errors::status_error;
use crate::http::HttpClient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionEnvelope<'a> {
    integration_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    proxy: Option<&'a str>,
}

impl<'a> From<&'a Credentials> for SessionEnvelope<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self { integration_id: &credentials.integration_id, proxy: credentials.proxy.as_deref() }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageCall<'a> {
    resource: &'a Resource,
    cursor: &'a FetchCursor,
    limit: u32,
    session: SessionEnvelope<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionCall<'a> {
    request: &'a ActionRequest,
    session: SessionEnvelope<'a>,
}

#[derive(Debug, Deserialize)]
struct PolicyBody {
    reason: String,
}

/// [`RemoteSource`] speaking JSON to the platform gateway
#[derive(Clone)]
pub struct HttpRemoteSource {
    client: HttpClient,
    base_url: Url,
}

impl HttpRemoteSource {
    /// Gateway client rooted at `base_url`.
    pub fn new(base_url: &str, client: HttpClient) -> Result<Self, RemoteError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|err| RemoteError::Malformed(format!("invalid gateway url {base_url}: {err}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        self.base_url
            .join(path)
            .map_err(|err| RemoteError::Malformed(format!("invalid gateway path {path}: {err}")))
    }

    fn post(&self, url: Url, credentials: &Credentials) -> RequestBuilder {
        let mut builder =
            self.client.request(Method::POST, url).header(COOKIE, credentials.cookie_header());
        if let Some(agent) = &credentials.user_agent {
            builder = builder.header(USER_AGENT, agent);
        }
        builder
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|err| RemoteError::Malformed(format!("undecodable gateway reply: {err}")));
    }

    let headers = response.headers().clone();
    let reason = if status == StatusCode::CONFLICT {
        response.json::<PolicyBody>().await.ok().map(|body| body.reason)
    } else {
        None
    };
    Err(status_error(status, &headers, reason))
}

#[async_trait]
impl RemoteSource for HttpRemoteSource {
    #[instrument(skip(self, credentials), fields(integration_id = %credentials.integration_id, kind = %resource.kind()))]
    async fn fetch_page(
        &self,
        resource: &Resource,
        credentials: &Credentials,
        cursor: &FetchCursor,
        limit: u32,
    ) -> Result<Page, RemoteError> {
        let url = self.endpoint(&format!("v1/pages/{}", resource.kind()))?;
        let body = PageCall { resource, cursor, limit, session: credentials.into() };
        let response = self.client.send(self.post(url, credentials).json(&body)).await?;
        let page: Page = decode(response).await?;
        debug!(items = page.len(), reported_total = ?page.reported_total, "gateway_page_received");
        Ok(page)
    }

    #[instrument(skip(self, credentials, request), fields(integration_id = %credentials.integration_id, operation = request.name()))]
    async fn perform_action(
        &self,
        credentials: &Credentials,
        request: &ActionRequest,
    ) -> Result<ActionReply, RemoteError> {
        let url = self.endpoint("v1/actions")?;
        let body = ActionCall { request, session: credentials.into() };
        let response = self.client.send(self.post(url, credentials).json(&body)).await?;
        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let source = HttpRemoteSource::new("http://gateway.local/api", HttpClient::new().unwrap()).unwrap();
        assert_eq!(source.base_url().as_str(), "http://gateway.local/api/");
        assert_eq!(
            source.endpoint("v1/pages/connections").unwrap().as_str(),
            "http://gateway.local/api/v1/pages/connections"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            HttpRemoteSource::new("not a url", HttpClient::new().unwrap()),
            Err(RemoteError::Malformed(_))
        ));
    }
}
