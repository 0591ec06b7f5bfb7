//! Authenticated user profile model

use serde::{Deserialize, Serialize};

/// Profile of an authenticated agent, as issued by the backend on login.
///
/// The backend is the sole authority over these fields; the client stores
/// them verbatim and only ever reads them back for display and for deriving
/// the bearer credential from `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub client_id: Option<i64>,
}

impl UserProfile {
    /// The opaque bearer credential for this user.
    ///
    /// The backend authorizes calls with the stringified numeric user id.
    #[must_use]
    pub fn bearer_credential(&self) -> String {
        self.user_id.to_string()
    }

    /// Display label for CLI output, falling back to the email or id.
    #[must_use]
    pub fn display_label(&self) -> String {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .map_or_else(|| format!("user #{}", self.user_id), ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            user_id: 7,
            name: Some("Asha".to_string()),
            email: Some("asha@example.com".to_string()),
            mobile: None,
            role_id: Some(2),
            client_id: Some(5),
        }
    }

    #[test]
    fn bearer_credential_is_stringified_user_id() {
        assert_eq!(profile().bearer_credential(), "7");
    }

    #[test]
    fn display_label_prefers_name() {
        assert_eq!(profile().display_label(), "Asha");

        let anonymous = UserProfile {
            name: None,
            email: None,
            ..profile()
        };
        assert_eq!(anonymous.display_label(), "user #7");
    }

    #[test]
    fn profile_deserializes_with_missing_optional_fields() {
        let parsed: UserProfile = serde_json::from_str(r#"{"user_id": 42}"#).unwrap();
        assert_eq!(parsed.user_id, 42);
        assert_eq!(parsed.client_id, None);
    }
}
