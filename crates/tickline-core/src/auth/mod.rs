//! Session handling and the authentication client.
//!
//! The backend issues a full user profile on login; the bearer credential for
//! every subsequent call is just the stringified numeric user id. Presence of
//! a persisted session is the sole signal of login state.

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use crate::envelope::{parse_api_error, Envelope};
use crate::error::{Error, Result};
use crate::models::UserProfile;
use crate::util::normalize_base_url;

/// The locally persisted record of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub profile: UserProfile,
    token: String,
}

impl Session {
    /// Derive a session from a freshly issued profile.
    #[must_use]
    pub fn new(profile: UserProfile) -> Self {
        let token = profile.bearer_credential();
        Self { profile, token }
    }

    /// Reassemble a session from separately persisted profile and credential.
    #[must_use]
    pub fn from_parts(profile: UserProfile, token: String) -> Self {
        Self { profile, token }
    }

    /// The opaque credential sent as `Authorization: Bearer <token>`.
    #[must_use]
    pub fn bearer_token(&self) -> &str {
        &self.token
    }
}

/// Persistence seam for the session record.
///
/// Implementations degrade read failures to "absent" where possible; the
/// clients treat any remaining load error as a logged-out state rather than
/// failing the call that triggered the read.
pub trait SessionPersistence: Clone + Send + Sync + 'static {
    fn load_session(&self) -> Result<Option<Session>>;
    fn save_session(&self, session: &Session) -> Result<()>;
    fn clear_session(&self) -> Result<()>;
}

/// Attach the bearer credential when a persisted session is present.
///
/// Every outgoing request passes through here, auth endpoints included. A
/// storage read failure counts as "no session"; the request still goes out,
/// unauthenticated, and the server rejects it if auth was required.
pub(crate) fn with_bearer<S: SessionPersistence>(
    store: &S,
    request: RequestBuilder,
) -> RequestBuilder {
    match store.load_session() {
        Ok(Some(session)) => request.bearer_auth(session.bearer_token()),
        Ok(None) => request,
        Err(error) => {
            tracing::warn!("Failed to read session for request auth: {}", error);
            request
        }
    }
}

/// Client for the authentication endpoints of the ticket backend.
#[derive(Clone)]
pub struct AuthClient<S: SessionPersistence> {
    base_url: String,
    client: Client,
    store: S,
}

impl<S: SessionPersistence> AuthClient<S> {
    pub fn new(base_url: impl AsRef<str>, store: S) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url.as_ref())?,
            client: crate::util::http_client()?,
            store,
        })
    }

    /// Load the persisted session, if any.
    ///
    /// Storage failures degrade to a logged-out state instead of surfacing.
    #[must_use]
    pub fn restore_session(&self) -> Option<Session> {
        match self.store.load_session() {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!("Failed to load persisted session: {}", error);
                None
            }
        }
    }

    /// Authenticate with email/password and persist the issued session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        validate_credentials(email, password)?;

        let payload = serde_json::json!({
            "email": email,
            "password": password,
        });
        let request = self
            .client
            .post(format!("{}/verifyUserCredentials", self.base_url))
            .json(&payload);
        let response = with_bearer(&self.store, request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(parse_api_error(status, &body)));
        }

        let envelope = response.json::<Envelope<UserProfile>>().await?;
        let profile = envelope.into_data("Login failed")?;
        let session = Session::new(profile);
        self.store.save_session(&session)?;
        Ok(session)
    }

    /// Best-effort server-side logout, then clear the local session.
    ///
    /// The local session is cleared even when the server call fails; only a
    /// storage failure while clearing is surfaced.
    pub async fn sign_out(&self) -> Result<()> {
        if let Some(session) = self.restore_session() {
            let payload = serde_json::json!({ "user_id": session.profile.user_id });
            let request = self
                .client
                .post(format!("{}/logout", self.base_url))
                .json(&payload);
            let result = with_bearer(&self.store, request).send().await;
            match result {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!("Server logout returned HTTP {}", response.status().as_u16());
                }
                Err(error) => {
                    tracing::warn!("Server logout failed: {}", error);
                }
                Ok(_) => {}
            }
        }

        self.store.clear_session()
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(Error::InvalidInput("Email is required".to_string()));
    }
    if password.trim().is_empty() {
        return Err(Error::InvalidInput("Password is required".to_string()));
    }
    Ok(())
}
