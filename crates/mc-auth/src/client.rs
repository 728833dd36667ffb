use mc_skin::HeadSink;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::{JSON_CONTENT_TYPE, McAuthConfig, endpoints};
use crate::errors::{McAuthError, Result};
use crate::models::*;

static SHARED: OnceCell<McAuthClient> = OnceCell::const_new();

/// Client for the legacy Mojang auth and session servers
#[derive(Debug, Clone)]
pub struct McAuthClient {
    config: McAuthConfig,
    http: Client,
}

impl McAuthClient {
    /// Create a new authentication client
    pub fn new(config: McAuthConfig) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(config.http_timeouts.connect)
            .timeout(config.http_timeouts.request)
            .user_agent(config.user_agent.as_deref().unwrap_or("mc-auth"))
            .build()?;

        Ok(Self { config, http })
    }

    /// Process-wide client for the official servers, built on first use
    pub async fn shared() -> Result<&'static Self> {
        SHARED
            .get_or_try_init(|| async {
                debug!("Initializing shared auth client");
                Self::new(McAuthConfig::default())
            })
            .await
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &McAuthConfig {
        &self.config
    }

    /// Start a session with account credentials
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn authenticate(&self, request: &AuthenticateRequest) -> Result<AuthenticateResponse> {
        let url = self.config.auth_url(endpoints::AUTHENTICATE)?;

        debug!("Authenticating");
        let response = self.post_json(url, request).await?;
        parse_json(response, StatusCode::OK).await
    }

    /// Extend a session using an existing token pair
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: &RefreshRequest) -> Result<RefreshResponse> {
        let url = self.config.auth_url(endpoints::REFRESH)?;

        debug!("Refreshing access token");
        let response = self.post_json(url, request).await?;
        parse_json(response, StatusCode::OK).await
    }

    /// Check that an access token is still usable
    #[instrument(skip(self, request))]
    pub async fn validate(&self, request: &ValidateRequest) -> Result<()> {
        let url = self.config.auth_url(endpoints::VALIDATE)?;

        debug!("Validating access token");
        let response = self.post_json(url, request).await?;
        expect_status(response, StatusCode::NO_CONTENT).await
    }

    /// Revoke an access token
    #[instrument(skip(self, request))]
    pub async fn invalidate(&self, request: &InvalidateRequest) -> Result<()> {
        let url = self.config.auth_url(endpoints::INVALIDATE)?;

        debug!("Invalidating access token");
        let response = self.post_json(url, request).await?;
        expect_status(response, StatusCode::NO_CONTENT).await
    }

    /// Revoke every access token of an account
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn signout(&self, request: &SignoutRequest) -> Result<()> {
        let url = self.config.auth_url(endpoints::SIGNOUT)?;

        debug!("Signing out");
        let response = self.post_json(url, request).await?;
        expect_status(response, StatusCode::NO_CONTENT).await
    }

    /// Look up the skin texture URL of a profile
    #[instrument(skip(self, profile), fields(profile = %profile.id))]
    pub async fn fetch_skin_url(&self, profile: &Profile) -> Result<String> {
        let url = self.config.profile_url(&profile.id)?;

        debug!("Fetching session profile");
        let response = self.get(url).await?;
        let (status, body) = read_body(response).await?;

        match status {
            StatusCode::OK => {
                let default_url = self.config.default_skin_url.as_str();
                mc_skin::resolve_skin_url_or(&body, default_url).map_err(|e| {
                    warn!("Unparsable session profile: {}", e);
                    McAuthError::from(e)
                })
            }
            // Unknown account: nothing to resolve
            StatusCode::NO_CONTENT => {
                warn!("No session profile, using default skin");
                Ok(self.config.default_skin_url.to_string())
            }
            _ => Err(api_error(status, &body)),
        }
    }

    /// Render the head of a profile's skin into `destination`.
    ///
    /// A profile lookup rejected by the server falls back to the default
    /// skin. A lookup that fails outright aborts before any download.
    #[instrument(skip(self, profile, destination), fields(profile = %profile.id))]
    pub async fn fetch_head_image(&self, profile: &Profile, destination: &dyn HeadSink) -> Result<()> {
        let skin_url = match self.fetch_skin_url(profile).await {
            Ok(url) => url,
            Err(McAuthError::Api(e)) => {
                warn!("Profile lookup rejected ({}), using default skin", e);
                self.config.default_skin_url.to_string()
            }
            Err(e) => {
                warn!("Profile lookup failed: {}", e);
                return Err(e);
            }
        };

        debug!("Downloading skin texture from {}", skin_url);
        let response = self.get(Url::parse(&skin_url)?).await?;
        let (status, body) = read_body(response).await?;

        if status != StatusCode::OK {
            return Err(api_error(status, &body));
        }

        mc_skin::write_head(body, self.config.head_size, destination)
            .await
            .map_err(|e| {
                warn!("Could not render head: {}", e);
                McAuthError::from(e)
            })
    }

    async fn post_json<T: Serialize>(&self, url: Url, body: &T) -> Result<Response> {
        let body = serde_json::to_string(body)?;

        Ok(self
            .http
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await?)
    }

    async fn get(&self, url: Url) -> Result<Response> {
        Ok(self.http.get(url).send().await?)
    }
}

/// Drain the response body; the connection is released on return
async fn read_body(response: Response) -> Result<(StatusCode, Vec<u8>)> {
    let status = response.status();
    let body = response.bytes().await?;
    debug!("HTTP {} with {} byte body", status, body.len());
    Ok((status, body.to_vec()))
}

async fn parse_json<T: DeserializeOwned>(response: Response, success: StatusCode) -> Result<T> {
    let (status, body) = read_body(response).await?;

    if status != success {
        return Err(api_error(status, &body));
    }

    serde_json::from_slice(&body).map_err(|source| {
        warn!("Unparsable HTTP {} body: {}", status, source);
        McAuthError::MalformedBody { status, source }
    })
}

async fn expect_status(response: Response, success: StatusCode) -> Result<()> {
    if response.status() == success {
        debug!("HTTP {}", success);
        return Ok(());
    }

    let (status, body) = read_body(response).await?;
    Err(api_error(status, &body))
}

/// Error for a non-success status: the server's ErrorResponse when the
/// body carries one, a malformed-body failure otherwise
fn api_error(status: StatusCode, body: &[u8]) -> McAuthError {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(response) => {
            debug!("HTTP {}: {}", status, response);
            McAuthError::Api(response)
        }
        Err(source) => {
            warn!("HTTP {} without a parsable error body: {}", status, source);
            McAuthError::MalformedBody { status, source }
        }
    }
}
