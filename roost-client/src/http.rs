use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use roost_core::session::Session;
use roost_core::{CoreError, CoreResult};

/// Shared plumbing for the REST gateways: one reqwest client, the API base
/// URL, and the guest session whose bearer token authenticates requests.
///
/// Cheap to clone; every gateway holds its own copy. No request timeout is
/// layered on top of the transport defaults — cancellation is guest-driven.
#[derive(Clone)]
pub struct Api {
    http: Client,
    base_url: String,
    session: Option<Session>,
}

impl Api {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            session: None,
        }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> CoreResult<T> {
        let response = self
            .authed(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(into_network_error)?;
        ok_or_backend(response).await?.json::<T>().await.map_err(into_network_error)
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> CoreResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .authed(self.http.post(self.url(path)))
            .json(body)
            .send()
            .await
            .map_err(into_network_error)?;
        ok_or_backend(response).await?.json::<T>().await.map_err(into_network_error)
    }

    /// POST whose response body does not matter, only the status.
    pub(crate) async fn post_unit<B>(&self, path: &str, body: &B) -> CoreResult<()>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .authed(self.http.post(self.url(path)))
            .json(body)
            .send()
            .await
            .map_err(into_network_error)?;
        ok_or_backend(response).await.map(|_| ())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(session) => request.bearer_auth(session.bearer_token()),
            None => request,
        }
    }
}

fn into_network_error(err: reqwest::Error) -> CoreError {
    CoreError::NetworkError(err.to_string())
}

/// Pass 2xx responses through; map anything else onto the backend taxonomy,
/// pulling the message out of the JSON error body when one is present.
async fn ok_or_backend(response: Response) -> CoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), "API call failed");
    Err(backend_error(status.as_u16(), &body))
}

fn backend_error(status: u16, body: &str) -> CoreError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string());
    CoreError::BackendError { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_message_is_extracted() {
        let err = backend_error(422, r#"{"error":"dates overlap an existing booking"}"#);
        match err {
            CoreError::BackendError { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "dates overlap an existing booking");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_json_bodies_pass_through_raw() {
        let err = backend_error(502, "Bad Gateway");
        match err {
            CoreError::BackendError { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = Api::new("https://api.roost.example/");
        assert_eq!(api.url("/bookings"), "https://api.roost.example/bookings");
    }
}
