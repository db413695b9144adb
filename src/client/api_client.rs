//! HTTP transport for the complaint API.
//!
//! Every request carries the stored bearer token when one is present. A 401
//! on such a request ends the session: the token store is cleared, the
//! session-expired hook is scheduled with a `/login?redirect=...` target, and
//! the call fails with [`ClientError::SessionExpired`]. A 401 on an anonymous
//! request (a wrong password, say) is an ordinary [`ClientError::Http`].

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{multipart::Form, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::config::ClientConfig;
use super::error::{ClientError, Result};
use super::token_store::TokenStore;

/// Called with the login redirect target once a session has expired
pub type SessionExpiredHook = Arc<dyn Fn(String) + Send + Sync>;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenStore>,
    redirect_delay: Duration,
    current_path: RwLock<String>,
    on_session_expired: RwLock<Option<SessionExpiredHook>>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, tokens: Arc<TokenStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
            redirect_delay: config.redirect_delay,
            current_path: RwLock::new("/".to_string()),
            on_session_expired: RwLock::new(None),
        })
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    /// Path the caller is on; used as the post-login redirect
    pub fn set_current_path(&self, path: impl Into<String>) {
        if let Ok(mut current) = self.current_path.write() {
            *current = path.into();
        }
    }

    pub fn on_session_expired(&self, hook: SessionExpiredHook) {
        if let Ok(mut slot) = self.on_session_expired.write() {
            *slot = Some(hook);
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.send(self.request(Method::GET, endpoint)).await
    }

    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, endpoint).json(body))
            .await
    }

    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, endpoint).json(body))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.send(self.request(Method::DELETE, endpoint)).await
    }

    /// reqwest writes the multipart Content-Type with its boundary
    pub async fn post_multipart<T: DeserializeOwned>(&self, endpoint: &str, form: Form) -> Result<T> {
        self.send(self.request(Method::POST, endpoint).multipart(form))
            .await
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = self.url(endpoint);
        debug!("{} {}", method, url);
        self.http.request(method, url)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let token = self.tokens.get_token();
        let builder = match token.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED && token.is_some() {
            self.expire_session();
            return Err(ClientError::SessionExpired);
        }

        if !status.is_success() {
            let message = error_message(response).await;
            debug!("Request failed with {}: {}", status, message);
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        let body = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(body).map_err(|e| {
            warn!("Response body is not the expected JSON: {}", e);
            ClientError::InvalidResponse(e.to_string())
        })
    }

    fn expire_session(&self) {
        info!("Session expired; clearing stored credentials");
        if let Err(e) = self.tokens.clear_auth() {
            warn!("Failed to clear credentials: {}", e);
        }

        let path = self
            .current_path
            .read()
            .map(|p| p.clone())
            .unwrap_or_else(|_| "/".to_string());
        let target = login_redirect(&path);

        let hook = self
            .on_session_expired
            .read()
            .ok()
            .and_then(|slot| slot.clone());
        if let Some(hook) = hook {
            let delay = self.redirect_delay;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                hook(target);
            });
        }
    }
}

pub fn login_redirect(path: &str) -> String {
    format!("/login?redirect={}", urlencoding::encode(path))
}

/// `message`, `title` or `error` from a JSON body, else the raw text, else
/// the reason phrase
async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    message_from_body(&text).unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP error {}", status.as_u16()))
    })
}

fn message_from_body(text: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(text) {
        let field = ["message", "title", "error"].iter().find_map(|key| {
            value
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        });
        if let Some(field) = field {
            return Some(field.to_string());
        }
    }

    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::FakeBackend;
    use axum::{http::StatusCode as AxumStatus, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::sync::Mutex;

    #[test]
    fn test_message_extraction_order() {
        assert_eq!(
            message_from_body(r#"{"message":"m","title":"t","error":"e"}"#).as_deref(),
            Some("m")
        );
        assert_eq!(
            message_from_body(r#"{"message":"","title":"t"}"#).as_deref(),
            Some("t")
        );
        assert_eq!(message_from_body(r#"{"error":"e"}"#).as_deref(), Some("e"));
        assert_eq!(message_from_body("plain failure").as_deref(), Some("plain failure"));
        assert_eq!(message_from_body("   "), None);
    }

    #[test]
    fn test_login_redirect_encodes_path() {
        assert_eq!(
            login_redirect("/complaints/42?tab=map"),
            "/login?redirect=%2Fcomplaints%2F42%3Ftab%3Dmap"
        );
    }

    #[tokio::test]
    async fn test_http_error_uses_envelope_message() {
        let backend = FakeBackend::start(Router::new().route(
            "/api/Category/GetAll",
            get(|| async {
                (
                    AxumStatus::CONFLICT,
                    Json(json!({"status": false, "message": "Already there", "data": null})),
                )
            }),
        ))
        .await;

        let err = backend
            .api()
            .get::<Value>("Category/GetAll")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClientError::Http { status: 409, ref message } if message == "Already there"
        ));
    }

    #[tokio::test]
    async fn test_reason_phrase_when_body_is_empty() {
        let backend = FakeBackend::start(Router::new().route(
            "/api/Status/GetAll",
            get(|| async { AxumStatus::SERVICE_UNAVAILABLE }),
        ))
        .await;

        let err = backend.api().get::<Value>("Status/GetAll").await.unwrap_err();
        assert_eq!(err.to_string(), "Service Unavailable");
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn test_non_json_success_is_invalid_response() {
        let backend = FakeBackend::start(Router::new().route(
            "/api/Status/GetAll",
            get(|| async { "<html>proxy page</html>" }),
        ))
        .await;

        let err = backend.api().get::<Value>("Status/GetAll").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_text_success_is_parsed_as_json() {
        let backend = FakeBackend::start(Router::new().route(
            "/api/Status/GetAll",
            get(|| async { r#"{"status":true,"message":"ok","data":[]}"# }),
        ))
        .await;

        let value: Value = backend.api().get("Status/GetAll").await.unwrap();
        assert_eq!(value["message"], "ok");
    }

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        let backend = FakeBackend::start(Router::new().route(
            "/api/User/Me",
            get(|headers: axum::http::HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                Json(json!({ "auth": auth }))
            }),
        ))
        .await;
        backend.tokens().set_token("abc.def.ghi").unwrap();

        let value: Value = backend.api().get("/User/Me").await.unwrap();
        assert_eq!(value["auth"], "Bearer abc.def.ghi");
    }

    #[tokio::test]
    async fn test_401_with_token_expires_session_and_fires_hook() {
        let backend = FakeBackend::start(Router::new().route(
            "/api/Complaint/GetAll",
            get(|| async { AxumStatus::UNAUTHORIZED }),
        ))
        .await;
        let api = backend.api();
        backend.tokens().set_token("stale.token.value").unwrap();
        api.set_current_path("/admin/complaints");

        let fired: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        let sink = fired.clone();
        api.on_session_expired(Arc::new(move |target| {
            *sink.lock().unwrap() = Some(target);
        }));

        let err = api.get::<Value>("Complaint/GetAll").await.unwrap_err();

        assert!(matches!(err, ClientError::SessionExpired));
        assert_eq!(err.to_string(), "Session expired. Please log in again.");
        assert!(!backend.tokens().has_token());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(
            fired.lock().unwrap().as_deref(),
            Some("/login?redirect=%2Fadmin%2Fcomplaints")
        );
    }

    #[tokio::test]
    async fn test_401_without_token_is_plain_http_error() {
        let backend = FakeBackend::start(Router::new().route(
            "/api/User/Login",
            axum::routing::post(|| async {
                (
                    AxumStatus::UNAUTHORIZED,
                    Json(json!({"status": false, "message": "Invalid email or password", "data": null})),
                )
            }),
        ))
        .await;

        let err = backend
            .api()
            .post::<_, Value>("User/Login", &json!({"email": "a@b.c", "password": "x"}))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClientError::Http { status: 401, ref message } if message == "Invalid email or password"
        ));
    }
}
