use std::sync::Arc;

use crate::{
    foundation::core::Size,
    foundation::error::{StickerError, StickerResult},
    foundation::math::{Fnv1a64, unpremultiply_rgba8_in_place},
};

/// Largest bitmap edge the CPU rasterizer accepts.
pub const MAX_BITMAP_DIM: u32 = u16::MAX as u32;

/// Raster sticker image in premultiplied RGBA8 form.
///
/// Pixel storage is shared, so cloning a bitmap (or a [`crate::StickerText`] holding one) is
/// cheap.
#[derive(Clone, PartialEq, Eq)]
pub struct StickerBitmap {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl std::fmt::Debug for StickerBitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StickerBitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("fingerprint", &format_args!("{:016x}", self.fingerprint()))
            .finish()
    }
}

impl StickerBitmap {
    /// Wrap premultiplied RGBA8 bytes. The byte length must match `width * height * 4`.
    pub fn from_premul_rgba8(width: u32, height: u32, bytes: Vec<u8>) -> StickerResult<Self> {
        if width == 0 || height == 0 {
            return Err(StickerError::validation("bitmap width/height must be > 0"));
        }
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if bytes.len() != expected {
            return Err(StickerError::validation(format!(
                "bitmap byte len mismatch: got {}, expected {expected}",
                bytes.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(bytes),
        })
    }

    /// Fully transparent bitmap.
    pub fn transparent(width: u32, height: u32) -> StickerResult<Self> {
        let len = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        Self::from_premul_rgba8(width, height, vec![0; len])
    }

    /// Solid bitmap filled with a straight-alpha color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> StickerResult<Self> {
        let px = crate::foundation::math::premul_rgba8(rgba);
        let len = (width as usize).saturating_mul(height as usize);
        let mut bytes = Vec::with_capacity(len.saturating_mul(4));
        for _ in 0..len {
            bytes.extend_from_slice(&px);
        }
        Self::from_premul_rgba8(width, height, bytes)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Logical size in canvas units (one pixel per unit).
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Row-major premultiplied RGBA8 bytes.
    pub fn as_premul_bytes(&self) -> &[u8] {
        self.rgba8_premul.as_slice()
    }

    /// Premultiplied pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.rgba8_premul.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// `true` when no pixel has any coverage.
    pub fn is_fully_transparent(&self) -> bool {
        self.rgba8_premul.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Stable content hash over dimensions and pixels.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_bytes(&self.rgba8_premul);
        h.finish()
    }

    /// Convert into a straight-alpha `image` buffer, e.g. for PNG export.
    pub fn to_rgba_image(&self) -> StickerResult<image::RgbaImage> {
        let mut straight = self.rgba8_premul.as_ref().clone();
        unpremultiply_rgba8_in_place(&mut straight);
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| StickerError::render("bitmap buffer does not match its dimensions"))
    }

    /// Encode as PNG and write to `path`, creating parent directories.
    pub fn save_png(&self, path: &std::path::Path) -> StickerResult<()> {
        use anyhow::Context;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        self.to_rgba_image()?
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    pub(crate) fn to_cpu_pixmap(&self) -> StickerResult<vello_cpu::Pixmap> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| StickerError::render("pixmap width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| StickerError::render("pixmap height exceeds u16"))?;
        // Pixmap stores PremulRgba8; our bytes are already premultiplied.
        let pixels = self
            .rgba8_premul
            .chunks_exact(4)
            .map(|px| {
                vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
            })
            .collect::<Vec<_>>();
        Ok(vello_cpu::Pixmap::from_parts_with_opacity(
            pixels, w, h, true,
        ))
    }

    pub(crate) fn from_cpu_pixmap(pixmap: &vello_cpu::Pixmap) -> StickerResult<Self> {
        Self::from_premul_rgba8(
            u32::from(pixmap.width()),
            u32::from(pixmap.height()),
            pixmap.data_as_u8_slice().to_vec(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/bitmap.rs"]
mod tests;
