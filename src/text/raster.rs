use std::collections::HashMap;

use kurbo::Shape;

use crate::{
    assets::bitmap::StickerBitmap,
    foundation::core::{Affine, Rect, RoundedRect, Size},
    foundation::error::StickerResult,
    raster::cpu,
    style::attrs::TextAttributes,
    text::layout::{TextBlock, TextBrush},
};

/// Corner radius of per-line background highlights.
pub const BACKGROUND_RADIUS: f64 = 8.0;

/// Horizontal overhang of a background highlight past its line, capped by the padding.
const BACKGROUND_OVERHANG: f64 = 6.0;

#[derive(Clone, Debug, PartialEq)]
/// Result of rendering a text block.
pub struct RenderedText {
    /// Padded bitmap: `ceil(measured) + padding` on both axes.
    pub bitmap: StickerBitmap,
    /// Text block size before rounding and padding.
    pub measured_size: Size,
}

/// `vello_cpu` font handles keyed by Parley blob id and face index.
#[derive(Default)]
pub(crate) struct GlyphFonts {
    by_blob: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
}

impl GlyphFonts {
    fn get(&mut self, blob_id: u64, index: u32, bytes: &[u8]) -> vello_cpu::peniko::FontData {
        self.by_blob
            .entry((blob_id, index))
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.to_vec()),
                    index,
                )
            })
            .clone()
    }
}

/// Pixel size of a padded text image.
pub(crate) fn padded_dims(measured: Size, padding: f32) -> (u32, u32) {
    let pad = f64::from(padding.max(0.0));
    let w = (measured.width.max(0.0).ceil() + pad).ceil() as u32;
    let h = (measured.height.max(0.0).ceil() + pad).ceil() as u32;
    (w.max(1), h.max(1))
}

/// Transparent `padding x padding` image returned for empty text.
pub(crate) fn empty_text(padding: f32) -> StickerResult<RenderedText> {
    let (w, h) = padded_dims(Size::ZERO, padding);
    Ok(RenderedText {
        bitmap: StickerBitmap::transparent(w, h)?,
        measured_size: Size::ZERO,
    })
}

/// Rasterize a laid out block into a padded bitmap with the text at `padding / 2`.
pub(crate) fn rasterize(
    block: &TextBlock,
    attrs: &TextAttributes,
    padding: f32,
    fonts: &mut GlyphFonts,
) -> StickerResult<RenderedText> {
    let measured = block.size();
    let (w, h) = padded_dims(measured, padding);
    let mut ctx = cpu::context_for(w, h)?;
    let half = f64::from(padding.max(0.0)) * 0.5;
    let origin = Affine::translate((half, half));

    if let Some(bg) = attrs.background {
        let overhang = BACKGROUND_OVERHANG.min(half);
        ctx.set_paint(cpu::color(bg));
        for (i, line) in block.layout.lines().enumerate() {
            let m = line.metrics();
            if m.advance <= 0.0 {
                continue;
            }
            let shift = f64::from(block.line_shift(i));
            let rect = Rect::new(
                f64::from(m.offset) - overhang,
                f64::from(m.min_coord) + shift,
                f64::from(m.offset + m.advance) + overhang,
                f64::from(m.max_coord) + shift,
            );
            let rounded = RoundedRect::from_rect(rect, BACKGROUND_RADIUS);
            ctx.set_transform(cpu::affine_to_cpu(origin));
            ctx.fill_path(&cpu::bezpath_to_cpu(&rounded.to_path(0.1)));
        }
    }

    for (i, line) in block.layout.lines().enumerate() {
        let shift = f64::from(block.line_shift(i));
        ctx.set_transform(cpu::affine_to_cpu(origin * Affine::translate((0.0, shift))));

        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                continue;
            };
            let run = glyph_run.run();
            let style = glyph_run.style();
            let brush = style.brush;
            ctx.set_paint(brush_color(brush));

            let font_ref = run.font();
            let font = fonts.get(font_ref.data.id(), font_ref.index, font_ref.data.data());
            let glyphs = glyph_run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            let builder = ctx.glyph_run(&font).font_size(run.font_size());
            match run.synthesis().skew() {
                Some(angle) => builder
                    .glyph_transform(vello_cpu::kurbo::Affine::skew(
                        f64::from(angle.to_radians().tan()),
                        0.0,
                    ))
                    .fill_glyphs(glyphs),
                None => builder.fill_glyphs(glyphs),
            }

            let metrics = run.metrics();
            let decorations = [
                style
                    .underline
                    .as_ref()
                    .map(|d| (d, metrics.underline_offset, metrics.underline_size)),
                style
                    .strikethrough
                    .as_ref()
                    .map(|d| (d, metrics.strikethrough_offset, metrics.strikethrough_size)),
            ];
            for (decoration, offset, size) in decorations.into_iter().flatten() {
                let offset = decoration.offset.unwrap_or(offset);
                let size = decoration.size.unwrap_or(size).max(1.0);
                let y = glyph_run.baseline() - offset;
                let x = glyph_run.offset();
                ctx.set_paint(brush_color(decoration.brush));
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    f64::from(x),
                    f64::from(y),
                    f64::from(x + glyph_run.advance()),
                    f64::from(y + size),
                ));
            }
        }
    }

    Ok(RenderedText {
        bitmap: cpu::finish(ctx)?,
        measured_size: measured,
    })
}

fn brush_color(b: TextBrush) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(b.r, b.g, b.b, b.a)
}

#[cfg(test)]
#[path = "../../tests/unit/text/raster.rs"]
mod tests;
