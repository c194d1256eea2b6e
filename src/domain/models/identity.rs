//! Session identity and the backend endpoint derived from it.

use std::fmt;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::domain::errors::FetchError;

/// The (project, session) pair that scopes a credential request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionIdentity {
    /// Project (namespace) the session belongs to
    pub project_id: String,

    /// Agentic session name
    pub session_id: String,
}

impl ConnectionIdentity {
    /// Build an identity from explicit values.
    ///
    /// Both parts must be non-empty and must not contain path separators.
    pub fn new(
        project_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Result<Self, FetchError> {
        let project_id = project_id.into();
        let session_id = session_id.into();

        check_segment("project", &project_id)?;
        check_segment("session", &session_id)?;

        Ok(Self {
            project_id,
            session_id,
        })
    }

    /// Extract the identity from a path shaped like
    /// `.../projects/{project}/sessions/{session}/...`.
    ///
    /// Segments are percent-decoded, so `my%20proj` yields `my proj`.
    pub fn from_url(url: &Url) -> Result<Self, FetchError> {
        let segments: Vec<&str> = url
            .path_segments()
            .map(Iterator::collect)
            .unwrap_or_default();

        segments
            .windows(4)
            .find(|w| w[0] == "projects" && w[2] == "sessions")
            .map_or_else(
                || {
                    Err(FetchError::IdentityUnresolved(format!(
                        "no projects/{{project}}/sessions/{{session}} segments in '{}'",
                        url.path()
                    )))
                },
                |w| {
                    Self::new(
                        decode_segment("project", w[1])?,
                        decode_segment("session", w[3])?,
                    )
                },
            )
    }
}

impl fmt::Display for ConnectionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project_id, self.session_id)
    }
}

fn decode_segment(name: &str, raw: &str) -> Result<String, FetchError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| {
            FetchError::IdentityUnresolved(format!("{name} id '{raw}' is not valid UTF-8: {e}"))
        })
}

fn check_segment(name: &str, value: &str) -> Result<(), FetchError> {
    if value.trim().is_empty() {
        return Err(FetchError::IdentityUnresolved(format!("{name} id is empty")));
    }
    if value.contains(['/', '\\', '?', '#']) {
        return Err(FetchError::IdentityUnresolved(format!(
            "{name} id '{value}' contains path characters"
        )));
    }
    Ok(())
}

/// Parse and normalize a backend base URL.
///
/// Websocket schemes are mapped onto their HTTP counterparts; credentials,
/// query and fragment are dropped. The path is kept so a backend mounted
/// under a prefix still works.
pub fn parse_base_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw)
        .map_err(|e| FetchError::IdentityUnresolved(format!("invalid URL '{raw}': {e}")))?;
    to_http_base(url, true)
}

fn to_http_base(mut url: Url, keep_path: bool) -> Result<Url, FetchError> {
    let scheme = match url.scheme() {
        "ws" | "http" => "http",
        "wss" | "https" => "https",
        other => {
            return Err(FetchError::IdentityUnresolved(format!(
                "unsupported URL scheme '{other}'"
            )))
        }
    };
    if url.host_str().is_none_or(str::is_empty) {
        return Err(FetchError::IdentityUnresolved(format!(
            "URL '{url}' has no host"
        )));
    }

    if url.scheme() != scheme && url.set_scheme(scheme).is_err() {
        return Err(FetchError::IdentityUnresolved(format!(
            "cannot map '{url}' onto {scheme}"
        )));
    }
    // Both setters only fail on cannot-be-a-base URLs, ruled out by the host check.
    let _ = url.set_username("");
    let _ = url.set_password(None);
    url.set_query(None);
    url.set_fragment(None);
    if !keep_path {
        url.set_path("/");
    }
    Ok(url)
}

/// A backend base URL paired with the identity to request credentials for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEndpoint {
    base_url: Url,
    identity: ConnectionIdentity,
}

impl SessionEndpoint {
    /// Path segments appended after `/api/projects/{project}/agentic-sessions/{session}`
    const CREDENTIALS_SUFFIX: [&'static str; 2] = ["vertex", "credentials"];

    /// Pair an already-normalized base URL with an identity.
    pub const fn new(base_url: Url, identity: ConnectionIdentity) -> Self {
        Self { base_url, identity }
    }

    /// Derive both the backend base URL and the identity from a session
    /// transport URL such as
    /// `ws://backend:8080/api/projects/p/sessions/s/ws`.
    ///
    /// The transport's scheme and host are reused for the backend; its path
    /// only contributes the identity.
    pub fn from_connection_url(raw: &str) -> Result<Self, FetchError> {
        let url = Url::parse(raw).map_err(|e| {
            FetchError::IdentityUnresolved(format!("invalid connection URL '{raw}': {e}"))
        })?;
        let identity = ConnectionIdentity::from_url(&url)?;
        let base_url = to_http_base(url, false)?;
        Ok(Self { base_url, identity })
    }

    /// Replace the derived base URL, keeping the identity.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Backend base URL
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Identity the credentials are requested for
    pub const fn identity(&self) -> &ConnectionIdentity {
        &self.identity
    }

    /// `{base}/api/projects/{project}/agentic-sessions/{session}/vertex/credentials`
    pub fn credentials_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend([
                    "api",
                    "projects",
                    self.identity.project_id.as_str(),
                    "agentic-sessions",
                    self.identity.session_id.as_str(),
                ])
                .extend(Self::CREDENTIALS_SUFFIX);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSPORT_URL: &str = "ws://backend:8080/api/projects/test-project/sessions/test-session/ws";

    #[test]
    fn test_identity_from_transport_url() {
        let url = Url::parse(TRANSPORT_URL).unwrap();
        let identity = ConnectionIdentity::from_url(&url).unwrap();

        assert_eq!(identity.project_id, "test-project");
        assert_eq!(identity.session_id, "test-session");
        assert_eq!(identity.to_string(), "test-project/test-session");
    }

    #[test]
    fn test_identity_requires_both_segments() {
        for raw in [
            "ws://backend:8080/api/projects/test-project/ws",
            "ws://backend:8080/api/sessions/test-session/ws",
            "ws://backend:8080/",
            "ws://backend:8080/api/projects//sessions/s/ws",
            "ws://backend:8080/api/projects/p/sessions/",
        ] {
            let url = Url::parse(raw).unwrap();
            let result = ConnectionIdentity::from_url(&url);
            assert!(
                matches!(result, Err(FetchError::IdentityUnresolved(_))),
                "expected unresolved identity for {raw}"
            );
        }
    }

    #[test]
    fn test_encoded_segments_are_decoded_once() {
        let endpoint = SessionEndpoint::from_connection_url(
            "ws://backend:8080/api/projects/my%20proj/sessions/s%2Bone/ws",
        )
        .unwrap();

        assert_eq!(endpoint.identity().project_id, "my proj");
        assert_eq!(endpoint.identity().session_id, "s+one");
        assert_eq!(
            endpoint.credentials_url().as_str(),
            "http://backend:8080/api/projects/my%20proj/agentic-sessions/s+one/vertex/credentials"
        );
    }

    #[test]
    fn test_encoded_separator_or_invalid_utf8_is_rejected() {
        for raw in [
            "ws://backend:8080/api/projects/a%2Fb/sessions/s/ws",
            "ws://backend:8080/api/projects/p/sessions/%FF%FE/ws",
        ] {
            let result = SessionEndpoint::from_connection_url(raw);
            assert!(
                matches!(result, Err(FetchError::IdentityUnresolved(_))),
                "expected unresolved identity for {raw}"
            );
        }
    }

    #[test]
    fn test_identity_rejects_path_characters() {
        assert!(ConnectionIdentity::new("a/b", "s").is_err());
        assert!(ConnectionIdentity::new("p", "").is_err());
        assert!(ConnectionIdentity::new("p", "s").is_ok());
    }

    #[test]
    fn test_endpoint_maps_ws_to_http() {
        let endpoint = SessionEndpoint::from_connection_url(TRANSPORT_URL).unwrap();

        assert_eq!(endpoint.base_url().as_str(), "http://backend:8080/");
        assert_eq!(
            endpoint.credentials_url().as_str(),
            "http://backend:8080/api/projects/test-project/agentic-sessions/test-session/vertex/credentials"
        );
    }

    #[test]
    fn test_endpoint_maps_wss_to_https() {
        let endpoint = SessionEndpoint::from_connection_url(
            "wss://backend.example.com/api/projects/p1/sessions/s1/ws?token=abc",
        )
        .unwrap();

        assert_eq!(endpoint.base_url().as_str(), "https://backend.example.com/");
        assert_eq!(endpoint.credentials_url().query(), None);
    }

    #[test]
    fn test_endpoint_rejects_unsupported_scheme() {
        let result =
            SessionEndpoint::from_connection_url("ftp://backend/api/projects/p/sessions/s/ws");
        assert!(matches!(result, Err(FetchError::IdentityUnresolved(_))));

        let result = SessionEndpoint::from_connection_url("not a url");
        assert!(matches!(result, Err(FetchError::IdentityUnresolved(_))));
    }

    #[test]
    fn test_base_url_override_keeps_prefix() {
        let base = parse_base_url("http://backend-service:8080/prefix/").unwrap();
        let endpoint = SessionEndpoint::from_connection_url(TRANSPORT_URL)
            .unwrap()
            .with_base_url(base);

        assert_eq!(
            endpoint.credentials_url().path(),
            "/prefix/api/projects/test-project/agentic-sessions/test-session/vertex/credentials"
        );
    }
}
