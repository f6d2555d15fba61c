use anyhow::Context;

use crate::{
    assets::bitmap::{MAX_BITMAP_DIM, StickerBitmap},
    foundation::error::{StickerError, StickerResult},
    foundation::math::premultiply_rgba8_in_place,
};

/// Decode encoded sticker bytes (PNG/JPEG/GIF/WebP/... or SVG) into a premultiplied bitmap.
///
/// Animated formats contribute their first frame.
pub fn decode_image(bytes: &[u8]) -> StickerResult<StickerBitmap> {
    if looks_like_svg(bytes) {
        return decode_svg(bytes);
    }
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    bitmap_from_rgba_image(dyn_img.to_rgba8())
}

/// Decode, then shrink to fit within `max_w x max_h` (aspect preserved, never upscaled).
pub fn decode_image_fit(bytes: &[u8], max_w: u32, max_h: u32) -> StickerResult<StickerBitmap> {
    if looks_like_svg(bytes) {
        return decode_svg(bytes);
    }
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let (w, h) = (dyn_img.width(), dyn_img.height());
    let (tw, th) = fit_within(w, h, max_w, max_h);
    let rgba = if (tw, th) == (w, h) {
        dyn_img.to_rgba8()
    } else {
        image::imageops::resize(
            &dyn_img.to_rgba8(),
            tw,
            th,
            image::imageops::FilterType::Triangle,
        )
    };
    bitmap_from_rgba_image(rgba)
}

/// Parse and rasterize an SVG document at its intrinsic size.
pub fn decode_svg(bytes: &[u8]) -> StickerResult<StickerBitmap> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;

    fn to_px(v: f32) -> StickerResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(StickerError::decode("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let (w, h) = (to_px(size.width())?, to_px(size.height())?);
    if w > MAX_BITMAP_DIM || h > MAX_BITMAP_DIM {
        return Err(StickerError::decode(format!(
            "svg raster size too large: {w}x{h} (max {MAX_BITMAP_DIM}x{MAX_BITMAP_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| StickerError::decode("failed to allocate svg pixmap"))?;
    let sx = (w as f32) / size.width();
    let sy = (h as f32) / size.height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );
    // tiny-skia pixmaps are premultiplied already.
    StickerBitmap::from_premul_rgba8(w, h, pixmap.data().to_vec())
}

fn bitmap_from_rgba_image(rgba: image::RgbaImage) -> StickerResult<StickerBitmap> {
    let (width, height) = rgba.dimensions();
    if width > MAX_BITMAP_DIM || height > MAX_BITMAP_DIM {
        return Err(StickerError::decode(format!(
            "image too large: {width}x{height} (max {MAX_BITMAP_DIM}x{MAX_BITMAP_DIM})"
        )));
    }
    let mut bytes = rgba.into_raw();
    premultiply_rgba8_in_place(&mut bytes);
    StickerBitmap::from_premul_rgba8(width, height, bytes)
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let Ok(text) = std::str::from_utf8(head) else {
        return false;
    };
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

pub(crate) fn fit_within(w: u32, h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if w == 0 || h == 0 || max_w == 0 || max_h == 0 || (w <= max_w && h <= max_h) {
        return (w, h);
    }
    let scale = (f64::from(max_w) / f64::from(w)).min(f64::from(max_h) / f64::from(h));
    let tw = ((f64::from(w) * scale).round() as u32).max(1);
    let th = ((f64::from(h) * scale).round() as u32).max(1);
    (tw, th)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
