use std::sync::Arc;

use crate::{
    assets::bitmap::StickerBitmap,
    foundation::core::{Point, Rect, Size, StickerId},
    foundation::error::StickerResult,
    text::sticker::StickerText,
};

#[derive(Clone, Debug, PartialEq)]
/// Payload of a sticker added to a surface.
pub enum StickerContent {
    /// Decoded image.
    Image(StickerBitmap),
    /// Encoded image bytes (PNG, GIF first frame, SVG, ...), decoded by the surface.
    Data(Arc<Vec<u8>>),
    /// Rendered text sticker.
    Text(StickerText),
}

/// Overlay surface that owns sticker items and their geometry.
///
/// Frames of newly added or updated stickers are unknown until the next [`layout`] pass, the
/// way a view hierarchy only settles geometry on its layout cycle.
///
/// [`layout`]: StickerSurface::layout
pub trait StickerSurface {
    /// Canvas size in pixels.
    fn canvas_size(&self) -> Size;

    /// Add a sticker centered on the canvas. Fails when `Data` bytes cannot be decoded.
    fn add_sticker(&mut self, content: StickerContent, is_selected: bool)
    -> StickerResult<StickerId>;

    /// Replace the selected text sticker with an edited version, keeping its placement.
    ///
    /// Returns `None` when no text sticker is selected.
    fn update_sticker(&mut self, text: StickerText) -> Option<StickerId>;

    /// Remove every sticker and clear the selection.
    fn remove_all_stickers(&mut self);

    /// Snapshot of a text sticker, used to reopen it for editing.
    fn sticker_text(&self, id: StickerId) -> Option<&StickerText>;

    /// Settled frame, `None` before the first layout pass after an add or update.
    fn frame(&self, id: StickerId) -> Option<Rect>;

    /// Current center, known even before layout settles the frame.
    fn center(&self, id: StickerId) -> Option<Point>;

    /// Move a sticker. Returns `false` for an unknown id.
    fn set_center(&mut self, id: StickerId, center: Point) -> bool;

    /// Set a uniform scale. Non-finite or non-positive scales are rejected.
    fn set_scale(&mut self, id: StickerId, scale: f64) -> bool;

    /// Currently selected sticker.
    fn selected(&self) -> Option<StickerId>;

    /// Clear the selection.
    fn deselect_all(&mut self);

    /// Settle the geometry of every sticker.
    fn layout(&mut self);

    /// Sticker ids in insertion (paint) order.
    fn sticker_ids(&self) -> Vec<StickerId>;
}
