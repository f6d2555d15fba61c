use crate::{
    assets::bitmap::StickerBitmap,
    assets::decode::decode_image,
    canvas::surface::{StickerContent, StickerSurface},
    foundation::core::{Point, Rect, Size, StickerId},
    foundation::error::{StickerError, StickerResult},
    text::sticker::StickerText,
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ItemContent {
    Image(StickerBitmap),
    Text(StickerText),
}

impl ItemContent {
    pub(crate) fn bitmap(&self) -> &StickerBitmap {
        match self {
            ItemContent::Image(b) => b,
            ItemContent::Text(t) => &t.image,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct CanvasItem {
    pub(crate) id: StickerId,
    pub(crate) content: ItemContent,
    pub(crate) center: Point,
    pub(crate) scale: f64,
    settled: bool,
}

impl CanvasItem {
    pub(crate) fn scaled_size(&self) -> Size {
        self.content.bitmap().size() * self.scale
    }

    fn frame(&self) -> Rect {
        Rect::from_center_size(self.center, self.scaled_size())
    }
}

/// In-memory sticker surface.
///
/// Items are painted in insertion order. New stickers start centered on the canvas at scale 1.
#[derive(Clone, Debug)]
pub struct StickerCanvas {
    size: Size,
    items: Vec<CanvasItem>,
    selected: Option<StickerId>,
    next_id: u64,
}

impl StickerCanvas {
    /// Empty canvas of `width x height` pixels.
    pub fn new(width: u32, height: u32) -> StickerResult<Self> {
        if width == 0 || height == 0 {
            return Err(StickerError::validation("canvas width/height must be > 0"));
        }
        Ok(Self {
            size: Size::new(f64::from(width), f64::from(height)),
            items: Vec::new(),
            selected: None,
            next_id: 1,
        })
    }

    /// Number of stickers.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the canvas holds no sticker.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Uniform scale of a sticker.
    pub fn scale(&self, id: StickerId) -> Option<f64> {
        self.item(id).map(|it| it.scale)
    }

    /// Select one sticker, deselecting the rest.
    pub fn select(&mut self, id: StickerId) -> bool {
        if self.item(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub(crate) fn items(&self) -> &[CanvasItem] {
        &self.items
    }

    fn item(&self, id: StickerId) -> Option<&CanvasItem> {
        self.items.iter().find(|it| it.id == id)
    }

    fn item_mut(&mut self, id: StickerId) -> Option<&mut CanvasItem> {
        self.items.iter_mut().find(|it| it.id == id)
    }
}

impl StickerSurface for StickerCanvas {
    fn canvas_size(&self) -> Size {
        self.size
    }

    fn add_sticker(
        &mut self,
        content: StickerContent,
        is_selected: bool,
    ) -> StickerResult<StickerId> {
        let content = match content {
            StickerContent::Image(b) => ItemContent::Image(b),
            StickerContent::Data(bytes) => ItemContent::Image(decode_image(&bytes)?),
            StickerContent::Text(t) => ItemContent::Text(t),
        };
        let id = StickerId(self.next_id);
        self.next_id += 1;
        self.items.push(CanvasItem {
            id,
            content,
            center: Point::new(self.size.width * 0.5, self.size.height * 0.5),
            scale: 1.0,
            settled: false,
        });
        if is_selected {
            self.selected = Some(id);
        }
        tracing::debug!(id = id.0, is_selected, "sticker added");
        Ok(id)
    }

    fn update_sticker(&mut self, text: StickerText) -> Option<StickerId> {
        let id = self.selected?;
        let item = self.item_mut(id)?;
        if !matches!(item.content, ItemContent::Text(_)) {
            tracing::debug!(id = id.0, "selected sticker is not text; update ignored");
            return None;
        }
        item.content = ItemContent::Text(text);
        item.settled = false;
        Some(id)
    }

    fn remove_all_stickers(&mut self) {
        self.items.clear();
        self.selected = None;
    }

    fn sticker_text(&self, id: StickerId) -> Option<&StickerText> {
        match &self.item(id)?.content {
            ItemContent::Text(t) => Some(t),
            ItemContent::Image(_) => None,
        }
    }

    fn frame(&self, id: StickerId) -> Option<Rect> {
        self.item(id).filter(|it| it.settled).map(CanvasItem::frame)
    }

    fn center(&self, id: StickerId) -> Option<Point> {
        self.item(id).map(|it| it.center)
    }

    fn set_center(&mut self, id: StickerId, center: Point) -> bool {
        match self.item_mut(id) {
            Some(it) => {
                it.center = center;
                true
            }
            None => false,
        }
    }

    fn set_scale(&mut self, id: StickerId, scale: f64) -> bool {
        if !scale.is_finite() || scale <= 0.0 {
            return false;
        }
        match self.item_mut(id) {
            Some(it) => {
                it.scale = scale;
                true
            }
            None => false,
        }
    }

    fn selected(&self) -> Option<StickerId> {
        self.selected
    }

    fn deselect_all(&mut self) {
        self.selected = None;
    }

    fn layout(&mut self) {
        for it in &mut self.items {
            it.settled = true;
        }
    }

    fn sticker_ids(&self) -> Vec<StickerId> {
        self.items.iter().map(|it| it.id).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/headless.rs"]
mod tests;
