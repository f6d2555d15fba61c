use std::sync::Arc;

use crate::{
    assets::bitmap::StickerBitmap,
    foundation::core::{Affine, BezPath, Rgba8},
    foundation::error::{StickerError, StickerResult},
};

/// Fresh `vello_cpu` context sized for a `width x height` bitmap.
pub(crate) fn context_for(width: u32, height: u32) -> StickerResult<vello_cpu::RenderContext> {
    let (w, h) = cpu_dims(width, height)?;
    Ok(vello_cpu::RenderContext::new(w, h))
}

/// Flush `ctx` and read it back as a bitmap.
pub(crate) fn finish(mut ctx: vello_cpu::RenderContext) -> StickerResult<StickerBitmap> {
    let mut pixmap = vello_cpu::Pixmap::new(ctx.width(), ctx.height());
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    StickerBitmap::from_cpu_pixmap(&pixmap)
}

pub(crate) fn cpu_dims(width: u32, height: u32) -> StickerResult<(u16, u16)> {
    if width == 0 || height == 0 {
        return Err(StickerError::render("raster width/height must be > 0"));
    }
    let w: u16 = width
        .try_into()
        .map_err(|_| StickerError::render(format!("raster width {width} exceeds u16")))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| StickerError::render(format!("raster height {height} exceeds u16")))?;
    Ok((w, h))
}

pub(crate) fn color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Image paint for drawing `bitmap` with a `fill_rect` over `(0, 0, w, h)`.
pub(crate) fn image_paint(bitmap: &StickerBitmap) -> StickerResult<vello_cpu::Image> {
    let pixmap = bitmap.to_cpu_pixmap()?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}
