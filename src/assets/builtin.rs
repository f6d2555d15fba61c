//! Bundled sticker artwork, rasterized on demand from inline vector outlines.
//!
//! This is the content answered when no chartlet provider is configured, so it must be
//! deterministic and never touch the filesystem or network.

use crate::{
    assets::bitmap::StickerBitmap,
    foundation::core::{Affine, BezPath, Rgba8},
    foundation::error::{StickerError, StickerResult},
    raster::cpu,
};

/// Edge length of bundled sticker bitmaps.
pub const BUILTIN_STICKER_PX: u32 = 96;

/// Outline coordinates are authored on a 24x24 grid.
const GLYPH_GRID: f64 = 24.0;

/// One bundled sticker: display name plus vector outline and fill.
#[derive(Clone, Copy, Debug)]
pub struct BuiltinArt {
    /// Stable artwork name, carried in the chartlet payload.
    pub name: &'static str,
    /// SVG path data on the 24x24 grid.
    pub svg_path_d: &'static str,
    /// Fill color.
    pub fill: Rgba8,
}

/// Groups of bundled stickers, one per default catalog category.
pub const BUILTIN_GROUPS: &[&[BuiltinArt]] = &[
    &[
        BuiltinArt {
            name: "Star",
            svg_path_d: "M12 2 L14.9 8.6 L22 9.3 L16.6 14 L18.2 21 L12 17.3 L5.8 21 L7.4 14 L2 9.3 L9.1 8.6 Z",
            fill: Rgba8::rgb(0xff, 0xc8, 0x2e),
        },
        BuiltinArt {
            name: "Circle",
            svg_path_d: "M12 2 A10 10 0 1 1 12 22 A10 10 0 1 1 12 2 Z",
            fill: Rgba8::rgb(0x3d, 0x9b, 0xff),
        },
        BuiltinArt {
            name: "Diamond",
            svg_path_d: "M12 2 L22 12 L12 22 L2 12 Z",
            fill: Rgba8::rgb(0x2e, 0xcc, 0x71),
        },
    ],
    &[
        BuiltinArt {
            name: "Heart",
            svg_path_d: "M12 21 C12 21 2 14.5 2 8.5 C2 5.5 4.5 3 7.5 3 C9.5 3 11 4.2 12 5.8 C13 4.2 14.5 3 16.5 3 C19.5 3 22 5.5 22 8.5 C22 14.5 12 21 12 21 Z",
            fill: Rgba8::rgb(0xff, 0x3b, 0x5c),
        },
        BuiltinArt {
            name: "Bubble",
            svg_path_d: "M4 3 H20 A2 2 0 0 1 22 5 V15 A2 2 0 0 1 20 17 H9 L4 21 V17 A2 2 0 0 1 2 15 V5 A2 2 0 0 1 4 3 Z",
            fill: Rgba8::WHITE,
        },
    ],
];

impl BuiltinArt {
    /// Rasterize at [`BUILTIN_STICKER_PX`].
    pub fn rasterize(&self) -> StickerResult<StickerBitmap> {
        rasterize_outline(self.svg_path_d, self.fill, BUILTIN_STICKER_PX)
    }
}

/// Fill a 24x24-grid SVG outline into a square bitmap of `size_px`.
pub fn rasterize_outline(svg_path_d: &str, fill: Rgba8, size_px: u32) -> StickerResult<StickerBitmap> {
    let d = svg_path_d.trim();
    if d.is_empty() {
        return Err(StickerError::validation("sticker outline must be non-empty"));
    }
    let path = BezPath::from_svg(d)
        .map_err(|e| StickerError::validation(format!("invalid sticker outline: {e}")))?;

    let mut ctx = cpu::context_for(size_px, size_px)?;
    let scale = f64::from(size_px) / GLYPH_GRID;
    ctx.set_transform(cpu::affine_to_cpu(Affine::scale(scale)));
    ctx.set_paint(cpu::color(fill));
    ctx.fill_path(&cpu::bezpath_to_cpu(&path));
    cpu::finish(ctx)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/builtin.rs"]
mod tests;
