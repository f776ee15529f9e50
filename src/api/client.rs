//! `ureq`-backed implementation of the [`Gateway`] trait.

use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::session::SessionStore;

use super::error::{message_from_body, ApiError};
use super::gateway::Gateway;
use super::types::{
    Credentials, Folder, Photo, RefreshedToken, Registration, TokenPair, User,
};

/// Request body shapes the gateway can replay after a token refresh.
enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart { content_type: String, data: Vec<u8> },
}

/// A repeatable description of one REST call.
struct Endpoint {
    method: &'static str,
    path: String,
    body: Body,
}

impl Endpoint {
    fn get(path: impl Into<String>) -> Self {
        Self { method: "GET", path: path.into(), body: Body::Empty }
    }

    fn delete(path: impl Into<String>) -> Self {
        Self { method: "DELETE", path: path.into(), body: Body::Empty }
    }

    fn json(method: &'static str, path: impl Into<String>, body: serde_json::Value) -> Self {
        Self { method, path: path.into(), body: Body::Json(body) }
    }
}

/// HTTP client for the gallery backend.
///
/// Holds the connection agent, the backend base URL and a handle to the
/// persisted session. All resource calls attach the bearer token when one
/// is present and obey the single refresh-and-replay rule on 401.
pub struct HttpGateway {
    agent: ureq::Agent,
    base_url: String,
    session: Arc<SessionStore>,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Duration, session: Arc<SessionStore>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send one request, attaching the bearer token if present.
    fn dispatch(&self, endpoint: &Endpoint) -> Result<ureq::Response, ApiError> {
        let mut request = self.agent.request(endpoint.method, &self.url(&endpoint.path));
        if let Some(token) = self.session.access_token() {
            request = request.set("Authorization", &format!("Bearer {}", token));
        }

        let result = match &endpoint.body {
            Body::Empty => request.call(),
            Body::Json(value) => request.send_json(value.clone()),
            Body::Multipart { content_type, data } => request
                .set("Content-Type", content_type)
                .send_bytes(data),
        };

        result.map_err(map_ureq_error)
    }

    /// Resource call with the refresh-and-replay rule applied.
    fn execute(&self, endpoint: &Endpoint) -> Result<ureq::Response, ApiError> {
        replay_once(
            || self.dispatch(endpoint),
            || self.refresh_access(),
        )
    }

    fn execute_json<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, ApiError> {
        parse_json(self.execute(endpoint)?)
    }

    /// Exchange the persisted refresh token for a new access token.
    ///
    /// Never retried. A missing refresh token propagates the original 401;
    /// any failure of the exchange itself clears both tokens and terminates
    /// the session locally.
    fn refresh_access(&self) -> Result<(), ApiError> {
        let Some(refresh) = self.session.refresh_token() else {
            return Err(ApiError::Unauthorized);
        };

        let outcome = self
            .agent
            .post(&self.url("/token/refresh"))
            .send_json(serde_json::json!({ "refresh": refresh }))
            .map_err(map_ureq_error)
            .and_then(|response| parse_json::<RefreshedToken>(response));

        match outcome {
            Ok(token) => {
                if let Err(err) = self.session.store_access(&token.access) {
                    warn!("failed to persist refreshed access token: {err:#}");
                }
                debug!("access token refreshed, replaying original request");
                Ok(())
            }
            Err(err) => {
                warn!("token refresh failed, ending session: {err}");
                self.session.clear();
                Err(ApiError::SessionExpired)
            }
        }
    }
}

impl Gateway for HttpGateway {
    fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        // The token endpoint is the thing that mints credentials: a 401 here
        // means bad username/password, never a refresh candidate.
        let endpoint = Endpoint::json(
            "POST",
            "/token",
            serde_json::json!({
                "username": credentials.username,
                "password": credentials.password,
            }),
        );
        match self.dispatch(&endpoint) {
            Ok(response) => parse_json(response),
            Err(ApiError::Unauthorized) => Err(ApiError::Server {
                status: 401,
                message: "Invalid username or password.".to_string(),
            }),
            Err(err) => Err(err),
        }
    }

    fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        let endpoint = Endpoint::json(
            "POST",
            "/users",
            serde_json::json!({
                "username": registration.username,
                "email": registration.email,
                "password": registration.password,
                "password_confirm": registration.password_confirm,
            }),
        );
        match self.dispatch(&endpoint) {
            Ok(response) => parse_json(response),
            Err(err) => Err(err),
        }
    }

    fn current_user(&self) -> Result<User, ApiError> {
        // The users endpoint lists only the authenticated account, so the
        // profile arrives as a one-element array.
        let value: serde_json::Value = self.execute_json(&Endpoint::get("/users"))?;
        let user_value = match value {
            serde_json::Value::Array(items) => items
                .into_iter()
                .next()
                .ok_or_else(|| ApiError::InvalidResponse("empty user list".to_string()))?,
            other => other,
        };
        serde_json::from_value(user_value)
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }

    fn list_folders(&self) -> Result<Vec<Folder>, ApiError> {
        self.execute_json(&Endpoint::get("/folders"))
    }

    fn create_folder(&self, name: &str) -> Result<Folder, ApiError> {
        self.execute_json(&Endpoint::json(
            "POST",
            "/folders",
            serde_json::json!({ "name": name }),
        ))
    }

    fn delete_folder(&self, folder_id: i64) -> Result<(), ApiError> {
        self.execute(&Endpoint::delete(format!("/folders/{}", folder_id)))?;
        Ok(())
    }

    fn list_folder_photos(&self, folder_id: i64) -> Result<Vec<Photo>, ApiError> {
        self.execute_json(&Endpoint::get(format!("/folders/{}/photos", folder_id)))
    }

    fn upload_photo(
        &self,
        folder_id: i64,
        image: &[u8],
        filename: &str,
    ) -> Result<Photo, ApiError> {
        let boundary = generate_boundary();
        let endpoint = Endpoint {
            method: "POST",
            path: format!("/folders/{}/photos", folder_id),
            body: Body::Multipart {
                content_type: format!("multipart/form-data; boundary={}", boundary),
                data: multipart_body(&boundary, filename, image),
            },
        };
        self.execute_json(&endpoint)
    }

    fn delete_photo(&self, folder_id: i64, photo_id: i64) -> Result<(), ApiError> {
        self.execute(&Endpoint::delete(format!(
            "/folders/{}/photos/{}",
            folder_id, photo_id
        )))?;
        Ok(())
    }

    fn set_favorite(&self, photo_id: i64, favorite: bool) -> Result<(), ApiError> {
        self.execute(&Endpoint::json(
            "PATCH",
            format!("/photos/{}", photo_id),
            serde_json::json!({ "is_favorite": favorite }),
        ))?;
        Ok(())
    }
}

/// Run `call`; on a 401 run `refresh` and replay exactly once.
///
/// The replay result is surfaced unchanged: a second 401 does not refresh
/// again, which is what prevents an infinite loop when the refreshed token
/// is itself rejected.
fn replay_once<T>(
    mut call: impl FnMut() -> Result<T, ApiError>,
    refresh: impl FnOnce() -> Result<(), ApiError>,
) -> Result<T, ApiError> {
    match call() {
        Err(ApiError::Unauthorized) => {
            refresh()?;
            call()
        }
        other => other,
    }
}

fn parse_json<T: DeserializeOwned>(response: ureq::Response) -> Result<T, ApiError> {
    response
        .into_json()
        .map_err(|err| ApiError::InvalidResponse(err.to_string()))
}

fn map_ureq_error(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(401, _) => ApiError::Unauthorized,
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            ApiError::Server {
                status,
                message: message_from_body(status, &body),
            }
        }
        ureq::Error::Transport(transport) => ApiError::Network(transport.to_string()),
    }
}

/// Unique multipart boundary from a timestamp plus a global counter, so
/// concurrent uploads within the same second cannot collide.
fn generate_boundary() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("picshelf-{}-{}", chrono::Utc::now().timestamp(), seq)
}

/// Assemble the `image` + `filename` multipart payload expected by the
/// upload endpoint.
fn multipart_body(boundary: &str, filename: &str, image: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(image.len() + 512);

    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!("Content-Type: {}\r\n\r\n", mime_for_filename(filename)).as_bytes(),
    );
    body.extend_from_slice(image);
    body.extend_from_slice(b"\r\n");

    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"filename\"\r\n\r\n");
    body.extend_from_slice(filename.as_bytes());
    body.extend_from_slice(b"\r\n");

    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    body
}

fn mime_for_filename(filename: &str) -> &'static str {
    let extension = filename
        .rsplit('.')
        .next()
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_replay_happens_at_most_once() {
        let calls = Cell::new(0u32);
        let refreshes = Cell::new(0u32);

        // Every call 401s; the refresh succeeds. The second 401 must be
        // surfaced, not refreshed again.
        let result: Result<(), ApiError> = replay_once(
            || {
                calls.set(calls.get() + 1);
                Err(ApiError::Unauthorized)
            },
            || {
                refreshes.set(refreshes.get() + 1);
                Ok(())
            },
        );

        assert!(matches!(result, Err(ApiError::Unauthorized)));
        assert_eq!(calls.get(), 2);
        assert_eq!(refreshes.get(), 1);
    }

    #[test]
    fn test_success_skips_refresh() {
        let refreshes = Cell::new(0u32);
        let result = replay_once(
            || Ok(42),
            || {
                refreshes.set(refreshes.get() + 1);
                Ok(())
            },
        );
        assert_eq!(result.unwrap(), 42);
        assert_eq!(refreshes.get(), 0);
    }

    #[test]
    fn test_refresh_failure_propagates() {
        let calls = Cell::new(0u32);
        let result: Result<(), ApiError> = replay_once(
            || {
                calls.set(calls.get() + 1);
                Err(ApiError::Unauthorized)
            },
            || Err(ApiError::SessionExpired),
        );
        assert!(matches!(result, Err(ApiError::SessionExpired)));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_non_auth_errors_pass_through() {
        let refreshes = Cell::new(0u32);
        let result: Result<(), ApiError> = replay_once(
            || {
                Err(ApiError::Server {
                    status: 500,
                    message: "boom".to_string(),
                })
            },
            || {
                refreshes.set(refreshes.get() + 1);
                Ok(())
            },
        );
        assert!(matches!(result, Err(ApiError::Server { status: 500, .. })));
        assert_eq!(refreshes.get(), 0);
    }

    #[test]
    fn test_multipart_body_layout() {
        let body = multipart_body("XYZ", "a.jpg", b"\xff\xd8data");
        let text = String::from_utf8_lossy(&body);

        assert!(text.starts_with("--XYZ\r\n"));
        assert!(text.contains("name=\"image\"; filename=\"a.jpg\""));
        assert!(text.contains("Content-Type: image/jpeg"));
        assert!(text.contains("name=\"filename\"\r\n\r\na.jpg\r\n"));
        assert!(text.ends_with("--XYZ--\r\n"));
    }

    #[test]
    fn test_mime_guessing() {
        assert_eq!(mime_for_filename("x.JPG"), "image/jpeg");
        assert_eq!(mime_for_filename("x.png"), "image/png");
        assert_eq!(mime_for_filename("x.webp"), "image/webp");
        assert_eq!(mime_for_filename("noext"), "application/octet-stream");
    }

    #[test]
    fn test_boundaries_are_unique() {
        assert_ne!(generate_boundary(), generate_boundary());
    }
}
