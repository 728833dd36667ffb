use std::fmt;

use serde::{Deserialize, Serialize};

/// Game the session is requested for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Agent {
    pub name: String,
    pub version: u32,
}

impl Default for Agent {
    fn default() -> Self {
        Self {
            name: "Minecraft".to_string(),
            version: 1,
        }
    }
}

/// Game profile: account identifier and display name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// UUID without dashes
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub legacy: bool,
}

impl Profile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            legacy: false,
        }
    }
}

/// Account returned when `requestUser` is set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub properties: Vec<UserProperty>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProperty {
    pub name: String,
    pub value: String,
}

/// `/authenticate` request
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateRequest {
    pub agent: Agent,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
    pub request_user: bool,
}

impl fmt::Debug for AuthenticateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticateRequest")
            .field("agent", &self.agent)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("client_token", &self.client_token)
            .field("request_user", &self.request_user)
            .finish()
    }
}

impl AuthenticateRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            agent: Agent::default(),
            username: username.into(),
            password: password.into(),
            client_token: None,
            request_user: false,
        }
    }

    pub fn with_client_token(mut self, client_token: impl Into<String>) -> Self {
        self.client_token = Some(client_token.into());
        self
    }

    pub fn with_request_user(mut self, request_user: bool) -> Self {
        self.request_user = request_user;
        self
    }
}

/// `/authenticate` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResponse {
    pub access_token: String,
    pub client_token: String,
    #[serde(default)]
    pub available_profiles: Vec<Profile>,
    #[serde(default)]
    pub selected_profile: Option<Profile>,
    #[serde(default)]
    pub user: Option<User>,
}

/// `/refresh` request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub access_token: String,
    pub client_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_profile: Option<Profile>,
    pub request_user: bool,
}

impl RefreshRequest {
    pub fn new(access_token: impl Into<String>, client_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            client_token: client_token.into(),
            selected_profile: None,
            request_user: false,
        }
    }
}

/// `/refresh` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub client_token: String,
    #[serde(default)]
    pub selected_profile: Option<Profile>,
    #[serde(default)]
    pub user: Option<User>,
}

/// `/validate` and `/invalidate` request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
}

impl ValidateRequest {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            client_token: None,
        }
    }

    pub fn with_client_token(mut self, client_token: impl Into<String>) -> Self {
        self.client_token = Some(client_token.into());
        self
    }
}

pub type InvalidateRequest = ValidateRequest;

/// `/signout` request
#[derive(Clone, Serialize)]
pub struct SignoutRequest {
    pub username: String,
    pub password: String,
}

impl SignoutRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for SignoutRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignoutRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Error body returned by the auth and session servers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Short name, e.g. `ForbiddenOperationException`; empty when the server omits it
    #[serde(default)]
    pub error: String,
    #[serde(default, alias = "message")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub cause: Option<String>,
    /// Request path, sent by the session and API servers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.error_message, self.error.is_empty()) {
            (Some(message), true) => f.write_str(message)?,
            (Some(message), false) => write!(f, "{}: {}", self.error, message)?,
            (None, true) => f.write_str("Unknown error")?,
            (None, false) => f.write_str(&self.error)?,
        }
        if let Some(cause) = &self.cause {
            write!(f, " ({})", cause)?;
        }
        Ok(())
    }
}
