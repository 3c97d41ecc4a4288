//! Thumbnail previews for intake files.
//!
//! A [`Preview`] owns its texture; egui frees the GPU memory once the last
//! handle is dropped, so removing or replacing an intake file releases its
//! preview with it.

use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use tracing::warn;

pub const THUMBNAIL_EDGE: u32 = 96;

/// Images larger than this are not decoded for a preview.
pub const MAX_PREVIEW_BYTES: usize = 20 * 1024 * 1024;

pub struct Preview {
    texture: TextureHandle,
}

impl Preview {
    pub fn load(ctx: &egui::Context, name: &str, bytes: &[u8]) -> Option<Self> {
        let image = decode_thumbnail(name, bytes)?;
        let texture = ctx.load_texture(format!("preview:{name}"), image, TextureOptions::LINEAR);
        Some(Self { texture })
    }

    pub fn texture(&self) -> &TextureHandle {
        &self.texture
    }

    /// Display size, keeping the aspect ratio inside `edge` x `edge`.
    pub fn fit(&self, edge: f32) -> egui::Vec2 {
        let size = self.texture.size_vec2();
        let scale = (edge / size.x.max(size.y)).min(1.0);
        size * scale
    }
}

pub fn decode_thumbnail(name: &str, bytes: &[u8]) -> Option<ColorImage> {
    if bytes.len() > MAX_PREVIEW_BYTES {
        warn!("Skipping preview for '{}': {} bytes", name, bytes.len());
        return None;
    }
    let image = match image::load_from_memory(bytes) {
        Ok(image) => image,
        Err(e) => {
            warn!("No preview for '{}': {}", name, e);
            return None;
        }
    };
    let image = if image.width() > THUMBNAIL_EDGE || image.height() > THUMBNAIL_EDGE {
        image.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE)
    } else {
        image
    };
    let thumb = image.to_rgba8();
    let size = [thumb.width() as usize, thumb.height() as usize];
    Some(ColorImage::from_rgba_unmultiplied(size, thumb.as_raw()))
}
