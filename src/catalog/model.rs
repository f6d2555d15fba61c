use std::sync::Arc;

use crate::assets::bitmap::StickerBitmap;

#[derive(Clone, Debug, PartialEq)]
/// Where a chartlet's image comes from. Exactly one source per chartlet.
pub enum ChartletSource {
    /// Decoded image.
    Image(StickerBitmap),
    /// Encoded image bytes, kept as-is so animated data survives for video editing.
    Data(Arc<Vec<u8>>),
    /// Remote image fetched through an [`crate::ImageLoader`] when picked.
    Url(String),
}

#[derive(Clone, Debug, PartialEq)]
/// Decorative sticker offered by the catalog.
pub struct Chartlet {
    /// Image source.
    pub source: ChartletSource,
    /// Caption rendered below the sticker when non-empty.
    pub name: Option<String>,
    /// Second caption rendered below the name when non-empty.
    pub description: Option<String>,
    /// Opaque host payload, carried through untouched.
    pub ext: Option<serde_json::Value>,
}

impl Chartlet {
    /// Chartlet without captions or payload.
    pub fn new(source: ChartletSource) -> Self {
        Self {
            source,
            name: None,
            description: None,
            ext: None,
        }
    }

    /// Set the name caption.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description caption.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach an opaque host payload.
    pub fn with_ext(mut self, ext: serde_json::Value) -> Self {
        self.ext = Some(ext);
        self
    }

    /// Non-empty captions in display order: name, then description.
    pub fn captions(&self) -> impl Iterator<Item = &str> {
        [self.name.as_deref(), self.description.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Icon of a catalog category tab.
pub enum ChartletIcon {
    /// Decoded icon.
    Image(StickerBitmap),
    /// Icon fetched through the image loader.
    Url(String),
}

#[derive(Clone, Debug, PartialEq)]
/// One catalog tab: its icon plus the chartlets loaded for it.
pub struct ChartletCategory {
    /// Tab icon.
    pub icon: ChartletIcon,
    /// Loaded chartlets, in display order.
    pub entries: Vec<Chartlet>,
    /// Whether this tab is the selected one.
    pub is_selected: bool,
    /// Whether an entry request is in flight.
    pub is_loading: bool,
    /// Tab backed by the user's photo album instead of provider content.
    pub is_album: bool,
}

impl ChartletCategory {
    /// Unselected, empty category.
    pub fn new(icon: ChartletIcon) -> Self {
        Self {
            icon,
            entries: Vec::new(),
            is_selected: false,
            is_loading: false,
            is_album: false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/model.rs"]
mod tests;
