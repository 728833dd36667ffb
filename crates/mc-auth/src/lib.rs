//! Client for the legacy Mojang (Yggdrasil) authentication service
//!
//! Authenticates accounts, refreshes and validates session tokens, looks
//! up a player's skin texture and renders a head thumbnail from it.
//!
//! # Outcomes
//!
//! Every operation returns [`Result`]. An error is either a server
//! reported [`ErrorResponse`] ([`McAuthError::Api`]) or a failure: no
//! response at all, or a body that did not match the expected shape.
//! [`Outcome`] collapses a result into those three cases.
//!
//! # Example
//!
//! ```no_run
//! use mc_auth::{AuthenticateRequest, FileHeadSink, McAuthClient, McAuthConfig, ValidateRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = McAuthClient::new(McAuthConfig::mojang())?;
//!
//!     let request = AuthenticateRequest::new("player@example.com", "password")
//!         .with_client_token("my-launcher");
//!     let session = client.authenticate(&request).await?;
//!
//!     client
//!         .validate(&ValidateRequest::new(&session.access_token))
//!         .await?;
//!
//!     if let Some(profile) = &session.selected_profile {
//!         let head = FileHeadSink::new(format!("heads/{}.png", profile.id));
//!         client.fetch_head_image(profile, &head).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Shared Client
//!
//! [`McAuthClient`] is cheap to clone and meant to be built once and
//! passed around. [`McAuthClient::shared`] offers a lazily built
//! process-wide instance for the official servers:
//!
//! ```no_run
//! # async fn example() -> mc_auth::Result<()> {
//! use mc_auth::{McAuthClient, Outcome, ValidateRequest};
//!
//! let client = McAuthClient::shared().await?;
//! match Outcome::from(client.validate(&ValidateRequest::new("token")).await) {
//!     Outcome::Success(()) => println!("Token is valid"),
//!     Outcome::Error(e) => println!("Rejected: {}", e),
//!     Outcome::Failure => println!("Server unreachable"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod models;

// Re-export main types
pub use client::McAuthClient;
pub use config::{HttpTimeouts, McAuthConfig};
pub use errors::{McAuthError, Outcome, Result};
pub use mc_skin::{FileHeadSink, HeadSink, MemoryHeadSink};
pub use models::{
    Agent, AuthenticateRequest, AuthenticateResponse, ErrorResponse, InvalidateRequest, Profile,
    RefreshRequest, RefreshResponse, SignoutRequest, User, UserProperty, ValidateRequest,
};
