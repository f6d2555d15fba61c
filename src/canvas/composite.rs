use crate::{
    assets::bitmap::StickerBitmap,
    canvas::headless::StickerCanvas,
    canvas::surface::StickerSurface,
    foundation::core::{Affine, Rgba8},
    foundation::error::StickerResult,
    raster::cpu,
};

impl StickerCanvas {
    /// Composite every sticker, in insertion order, over `background` (stretched to the canvas)
    /// or over `clear` when there is none.
    #[tracing::instrument(skip(self, background))]
    pub fn render(
        &self,
        background: Option<&StickerBitmap>,
        clear: Rgba8,
    ) -> StickerResult<StickerBitmap> {
        let size = self.canvas_dims();
        let mut ctx = cpu::context_for(size.0, size.1)?;
        let (w, h) = (f64::from(size.0), f64::from(size.1));

        if clear.a > 0 {
            ctx.set_paint(cpu::color(clear));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        }

        if let Some(bg) = background {
            let sx = w / f64::from(bg.width());
            let sy = h / f64::from(bg.height());
            draw_bitmap(&mut ctx, bg, Affine::scale_non_uniform(sx, sy))?;
        }

        for item in self.items() {
            let bitmap = item.content.bitmap();
            let scaled = item.scaled_size();
            let origin = item.center - scaled.to_vec2() * 0.5;
            let tr = Affine::translate(origin.to_vec2()) * Affine::scale(item.scale);
            draw_bitmap(&mut ctx, bitmap, tr)?;
        }

        cpu::finish(ctx)
    }

    fn canvas_dims(&self) -> (u32, u32) {
        let s = self.canvas_size();
        (s.width as u32, s.height as u32)
    }
}

fn draw_bitmap(
    ctx: &mut vello_cpu::RenderContext,
    bitmap: &StickerBitmap,
    tr: Affine,
) -> StickerResult<()> {
    ctx.set_transform(cpu::affine_to_cpu(tr));
    ctx.set_paint(cpu::image_paint(bitmap)?);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(bitmap.width()),
        f64::from(bitmap.height()),
    ));
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/composite.rs"]
mod tests;
