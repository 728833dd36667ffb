//! Skin texture helpers for the legacy Mojang session service
//!
//! Resolves a player's skin texture URL from a session server profile
//! body and renders the head portion of a skin texture into a small PNG.
//!
//! # Example
//!
//! ```no_run
//! use mc_skin::{resolve_skin_url, write_head, FileHeadSink, DEFAULT_HEAD_SIZE};
//!
//! # async fn example(profile_body: &[u8], texture: Vec<u8>) -> mc_skin::Result<()> {
//! let url = resolve_skin_url(profile_body)?;
//! println!("Skin texture: {}", url);
//!
//! let sink = FileHeadSink::new("heads/player.png");
//! write_head(texture, DEFAULT_HEAD_SIZE, &sink).await?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod head;
pub mod sink;
pub mod textures;

pub use errors::{Result, SkinError};
pub use head::{DEFAULT_HEAD_SIZE, crop_head, render_head, render_head_async};
pub use sink::{FileHeadSink, HeadSink, MemoryHeadSink};
pub use textures::{SessionProfile, Texture, TexturesPayload, resolve_skin_url, resolve_skin_url_or};

/// Default (Steve) skin texture, used when a profile has no skin of its own
pub const DEFAULT_SKIN_URL: &str =
    "https://textures.minecraft.net/texture/1a4af718455d4aab528e7a61f86fa25e6a369d1768dcb13f7df319a713eb810b";

/// Render the head of `texture` and hand it to `sink`.
///
/// The sink is left untouched when the texture cannot be rendered.
pub async fn write_head(texture: Vec<u8>, size: u32, sink: &dyn HeadSink) -> Result<()> {
    let png = render_head_async(texture, size).await?;
    sink.write_head(&png).await
}
