use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::DEFAULT_SKIN_URL;
use crate::errors::Result;

/// Name of the profile property carrying the encoded textures payload
pub const TEXTURES_PROPERTY: &str = "textures";

/// Session server profile (`/session/minecraft/profile/{id}`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionProfile {
    /// UUID without dashes
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub properties: Vec<ProfileProperty>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileProperty {
    pub name: String,
    /// Base64 encoded JSON
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// Decoded value of the `textures` property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TexturesPayload {
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub profile_name: Option<String>,
    #[serde(default)]
    pub textures: Textures,
}

impl TexturesPayload {
    /// When the session server issued the payload
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Textures {
    #[serde(rename = "SKIN", default, skip_serializing_if = "Option::is_none")]
    pub skin: Option<Texture>,
    #[serde(rename = "CAPE", default, skip_serializing_if = "Option::is_none")]
    pub cape: Option<Texture>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Texture {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TextureMetadata>,
}

impl Texture {
    /// Whether the skin uses the slim (Alex) arm model
    pub fn is_slim(&self) -> bool {
        self.metadata
            .as_ref()
            .and_then(|m| m.model.as_deref())
            .is_some_and(|model| model == "slim")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextureMetadata {
    #[serde(default)]
    pub model: Option<String>,
}

impl SessionProfile {
    /// Parse a session server response body
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Decode the `textures` property, if present
    pub fn textures(&self) -> Option<Result<TexturesPayload>> {
        let property = self
            .properties
            .iter()
            .find(|p| p.name == TEXTURES_PROPERTY)?;

        Some(decode_textures(&property.value))
    }

    /// Current skin texture URL, if the profile carries a usable one
    pub fn skin_url(&self) -> Option<String> {
        match self.textures() {
            Some(Ok(payload)) => {
                let url = payload.textures.skin.map(|skin| skin.url);
                if url.is_none() {
                    debug!(profile = %self.id, "Profile has no SKIN texture");
                }
                url
            }
            Some(Err(e)) => {
                warn!(profile = %self.id, "Undecodable textures property: {}", e);
                None
            }
            None => {
                debug!(profile = %self.id, "Profile has no textures property");
                None
            }
        }
    }
}

fn decode_textures(value: &str) -> Result<TexturesPayload> {
    let raw = STANDARD.decode(value.trim())?;
    Ok(serde_json::from_slice(&raw)?)
}

/// Extract the skin texture URL from a session profile body.
///
/// Fails only when the body is not a session profile at all. A profile
/// without a usable skin reference resolves to [`DEFAULT_SKIN_URL`].
pub fn resolve_skin_url(body: &[u8]) -> Result<String> {
    resolve_skin_url_or(body, DEFAULT_SKIN_URL)
}

/// [`resolve_skin_url`] with a caller supplied fallback texture
pub fn resolve_skin_url_or(body: &[u8], default_url: &str) -> Result<String> {
    let profile = SessionProfile::from_slice(body)?;
    Ok(profile.skin_url().unwrap_or_else(|| {
        debug!(profile = %profile.id, "Using default skin {}", default_url);
        default_url.to_string()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SkinError;

    fn profile_body(textures_json: &str) -> Vec<u8> {
        let value = STANDARD.encode(textures_json);
        serde_json::json!({
            "id": "069a79f444e94726a5befca90e38aaf5",
            "name": "Notch",
            "properties": [{ "name": "textures", "value": value }]
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn test_resolves_skin_url() {
        let body = profile_body(
            r#"{"timestamp":1700000000000,"profileId":"069a79f444e94726a5befca90e38aaf5","profileName":"Notch","textures":{"SKIN":{"url":"http://textures.minecraft.net/texture/abc"}}}"#,
        );

        let url = resolve_skin_url(&body).unwrap();
        assert_eq!(url, "http://textures.minecraft.net/texture/abc");
    }

    #[test]
    fn test_missing_skin_falls_back_to_default() {
        let body = profile_body(r#"{"timestamp":0,"textures":{}}"#);
        assert_eq!(resolve_skin_url(&body).unwrap(), DEFAULT_SKIN_URL);
    }

    #[test]
    fn test_missing_textures_property_falls_back_to_default() {
        let body = br#"{"id":"abc","name":"Steve","properties":[]}"#;
        assert_eq!(resolve_skin_url(body).unwrap(), DEFAULT_SKIN_URL);
    }

    #[test]
    fn test_garbage_textures_value_falls_back_to_default() {
        let body = br#"{"id":"abc","name":"Steve","properties":[{"name":"textures","value":"%%%not-base64"}]}"#;
        assert_eq!(resolve_skin_url(body).unwrap(), DEFAULT_SKIN_URL);
    }

    #[test]
    fn test_custom_default() {
        let body = br#"{"id":"abc","name":"Steve"}"#;
        assert_eq!(
            resolve_skin_url_or(body, "http://localhost/steve.png").unwrap(),
            "http://localhost/steve.png"
        );
    }

    #[test]
    fn test_non_profile_body_fails() {
        let result = resolve_skin_url(b"<html>oops</html>");
        assert!(matches!(result, Err(SkinError::Json(_))));

        let result = resolve_skin_url(br#"{"unexpected":true}"#);
        assert!(matches!(result, Err(SkinError::Json(_))));
    }

    #[test]
    fn test_payload_metadata() {
        let body = profile_body(
            r#"{"timestamp":1700000000000,"textures":{"SKIN":{"url":"http://x/skin","metadata":{"model":"slim"}},"CAPE":{"url":"http://x/cape"}}}"#,
        );
        let profile = SessionProfile::from_slice(&body).unwrap();
        let payload = profile.textures().unwrap().unwrap();

        assert!(payload.textures.skin.as_ref().unwrap().is_slim());
        assert_eq!(payload.textures.cape.as_ref().unwrap().url, "http://x/cape");
        assert_eq!(
            payload.issued_at().unwrap().timestamp_millis(),
            1_700_000_000_000
        );
    }
}
