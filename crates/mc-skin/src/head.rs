use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::debug;

use crate::errors::{Result, SkinError};

/// Width of a standard resolution skin texture
pub const SKIN_WIDTH: u32 = 64;

/// Default edge length of a rendered head, in pixels
pub const DEFAULT_HEAD_SIZE: u32 = 64;

/// Face and hat regions on a 64px wide texture: (x, y), 8x8 each
const FACE_ORIGIN: (u32, u32) = (8, 8);
const HAT_ORIGIN: (u32, u32) = (40, 8);
const FACE_EDGE: u32 = 8;

/// Scale factor of a texture relative to a 64px wide skin.
///
/// Accepts modern (64x64), legacy (64x32) and HD multiples of both.
fn texture_scale(width: u32, height: u32) -> Result<u32> {
    let unsupported = SkinError::UnsupportedDimensions { width, height };

    if width == 0 || width % SKIN_WIDTH != 0 {
        return Err(unsupported);
    }
    if height != width && height * 2 != width {
        return Err(unsupported);
    }

    Ok(width / SKIN_WIDTH)
}

/// Crop the head (face plus hat layer) out of a skin texture.
pub fn crop_head(texture: &RgbaImage) -> Result<RgbaImage> {
    let scale = texture_scale(texture.width(), texture.height())?;
    let edge = FACE_EDGE * scale;

    let mut face = imageops::crop_imm(
        texture,
        FACE_ORIGIN.0 * scale,
        FACE_ORIGIN.1 * scale,
        edge,
        edge,
    )
    .to_image();
    let hat = imageops::crop_imm(
        texture,
        HAT_ORIGIN.0 * scale,
        HAT_ORIGIN.1 * scale,
        edge,
        edge,
    )
    .to_image();

    imageops::overlay(&mut face, &hat, 0, 0);
    Ok(face)
}

/// Decode a skin texture and render its head as a `size`x`size` PNG.
pub fn render_head(texture: &[u8], size: u32) -> Result<Vec<u8>> {
    if size == 0 {
        return Err(SkinError::InvalidHeadSize);
    }

    let texture = image::load_from_memory(texture)?.to_rgba8();
    debug!(
        "Decoded skin texture {}x{}",
        texture.width(),
        texture.height()
    );

    let head = crop_head(&texture)?;
    let head = imageops::resize(&head, size, size, FilterType::Nearest);

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(head).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

/// [`render_head`] on the blocking thread pool
pub async fn render_head_async(texture: Vec<u8>, size: u32) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || render_head(&texture, size))
        .await
        .map_err(|e| SkinError::Task(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const FACE: Rgba<u8> = Rgba([200, 150, 100, 255]);
    const HAT: Rgba<u8> = Rgba([10, 20, 30, 255]);

    fn skin(width: u32, height: u32, hat_pixel: bool) -> RgbaImage {
        let scale = width / SKIN_WIDTH;
        let mut img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
        for y in 8 * scale..16 * scale {
            for x in 8 * scale..16 * scale {
                img.put_pixel(x, y, FACE);
            }
        }
        if hat_pixel {
            img.put_pixel(40 * scale, 8 * scale, HAT);
        }
        img
    }

    fn encode(img: &RgbaImage) -> Vec<u8> {
        let mut png = Vec::new();
        DynamicImage::ImageRgba8(img.clone())
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();
        png
    }

    #[test]
    fn test_crop_face_with_hat_overlay() {
        let head = crop_head(&skin(64, 64, true)).unwrap();

        assert_eq!(head.dimensions(), (8, 8));
        assert_eq!(*head.get_pixel(0, 0), HAT);
        assert_eq!(*head.get_pixel(1, 0), FACE);
        assert_eq!(*head.get_pixel(7, 7), FACE);
    }

    #[test]
    fn test_legacy_and_hd_textures() {
        assert_eq!(crop_head(&skin(64, 32, false)).unwrap().dimensions(), (8, 8));
        assert_eq!(crop_head(&skin(128, 128, false)).unwrap().dimensions(), (16, 16));
        assert_eq!(crop_head(&skin(128, 64, false)).unwrap().dimensions(), (16, 16));
    }

    #[test]
    fn test_unsupported_dimensions() {
        let result = crop_head(&RgbaImage::new(32, 32));
        assert!(matches!(
            result,
            Err(SkinError::UnsupportedDimensions { width: 32, height: 32 })
        ));

        let result = crop_head(&RgbaImage::new(64, 48));
        assert!(matches!(result, Err(SkinError::UnsupportedDimensions { .. })));
    }

    #[test]
    fn test_render_head_scales_to_size() {
        let png = render_head(&encode(&skin(64, 64, false)), 64).unwrap();
        let head = image::load_from_memory(&png).unwrap().to_rgba8();

        assert_eq!(head.dimensions(), (64, 64));
        assert_eq!(*head.get_pixel(0, 0), FACE);
        assert_eq!(*head.get_pixel(63, 63), FACE);
    }

    #[test]
    fn test_render_head_rejects_garbage() {
        let result = render_head(b"definitely not a png", 64);
        assert!(matches!(result, Err(SkinError::Decode(_))));
    }

    #[test]
    fn test_render_head_rejects_zero_size() {
        let result = render_head(&encode(&skin(64, 64, false)), 0);
        assert!(matches!(result, Err(SkinError::InvalidHeadSize)));
    }

    #[tokio::test]
    async fn test_render_head_async() {
        let png = render_head_async(encode(&skin(64, 32, false)), 16)
            .await
            .unwrap();
        let head = image::load_from_memory(&png).unwrap();
        assert_eq!((head.width(), head.height()), (16, 16));
    }
}
