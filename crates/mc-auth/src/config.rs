use std::time::Duration;
use url::Url;

use crate::errors::Result;

/// Legacy Mojang service endpoints
pub mod endpoints {
    pub const AUTH_BASE: &str = "https://authserver.mojang.com";
    pub const SESSION_BASE: &str = "https://sessionserver.mojang.com";

    /// Paths relative to the auth server
    pub const AUTHENTICATE: &str = "authenticate";
    pub const REFRESH: &str = "refresh";
    pub const VALIDATE: &str = "validate";
    pub const INVALIDATE: &str = "invalidate";
    pub const SIGNOUT: &str = "signout";

    /// Path relative to the session server, followed by the account id
    pub const PROFILE: &str = "session/minecraft/profile";
}

/// Content type of every JSON request body
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(15),
            request: Duration::from_secs(30),
        }
    }
}

/// Configuration for McAuthClient
#[derive(Debug, Clone)]
pub struct McAuthConfig {
    /// Base URL of the authentication server
    pub auth_base: Url,

    /// Base URL of the session (profile) server
    pub session_base: Url,

    /// Texture used when a profile has no skin or the lookup was rejected
    pub default_skin_url: Url,

    /// HTTP client timeouts
    pub http_timeouts: HttpTimeouts,

    /// Custom user agent (optional)
    pub user_agent: Option<String>,

    /// Edge length of rendered heads, in pixels
    pub head_size: u32,
}

impl McAuthConfig {
    /// Create config for the official Mojang servers
    pub fn mojang() -> Self {
        Self {
            auth_base: Url::parse(endpoints::AUTH_BASE).expect("valid auth server URL"),
            session_base: Url::parse(endpoints::SESSION_BASE).expect("valid session server URL"),
            default_skin_url: Url::parse(mc_skin::DEFAULT_SKIN_URL).expect("valid default skin URL"),
            http_timeouts: HttpTimeouts::default(),
            user_agent: Some("mc-auth".to_string()),
            head_size: mc_skin::DEFAULT_HEAD_SIZE,
        }
    }

    /// Create config for a compatible third-party server
    pub fn custom(auth_base: Url, session_base: Url) -> Self {
        Self {
            auth_base,
            session_base,
            ..Self::mojang()
        }
    }

    /// Absolute URL of an auth server endpoint
    pub fn auth_url(&self, path: &str) -> Result<Url> {
        join(&self.auth_base, path)
    }

    /// Absolute URL of the session profile for `account_id`
    pub fn profile_url(&self, account_id: &str) -> Result<Url> {
        join(
            &self.session_base,
            &format!("{}/{}", endpoints::PROFILE, account_id),
        )
    }
}

impl Default for McAuthConfig {
    fn default() -> Self {
        Self::mojang()
    }
}

// Url::join would drop the last segment of a base without a trailing slash
fn join(base: &Url, path: &str) -> Result<Url> {
    Ok(Url::parse(&format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    ))?)
}
