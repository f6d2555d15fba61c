//! Stickerkit is the sticker and styled-text overlay layer of a photo/video editor.
//!
//! The crate is headless: stickers live on a [`StickerSurface`] (the in-memory
//! [`StickerCanvas`] ships with the crate) and every bitmap is rasterized on the CPU.
//!
//! - Edit text style with a [`StyleState`] and render it through a [`TextComposer`]
//! - Browse bundled or provider-backed chartlets with a [`ChartletCatalog`]
//! - Drive insertion, captions, presets and deferred placement with a [`StickerEditor`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod canvas;
pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod editor;
pub(crate) mod layout;
pub(crate) mod raster;
pub(crate) mod style;
pub(crate) mod text;

pub use crate::foundation::core::{
    Affine, BezPath, Point, Rect, RoundedRect, Rgba8, Size, StickerId, Vec2,
};
pub use crate::foundation::error::{StickerError, StickerResult};

pub use crate::assets::bitmap::{MAX_BITMAP_DIM, StickerBitmap};
pub use crate::assets::builtin::{BUILTIN_GROUPS, BUILTIN_STICKER_PX, BuiltinArt, rasterize_outline};
pub use crate::assets::decode::{decode_image, decode_image_fit, decode_svg};
pub use crate::assets::loader::{
    CachePolicy, FsImageLoader, ImageLoadCallback, ImageLoader, ImageRequest, LoadedImage,
    normalize_rel_path,
};
pub use crate::canvas::headless::StickerCanvas;
pub use crate::canvas::surface::{StickerContent, StickerSurface};
pub use crate::catalog::model::{Chartlet, ChartletCategory, ChartletIcon, ChartletSource};
pub use crate::catalog::provider::{
    BuiltinChartlets, ChartletProvider, EntriesResponse, TitlesResponse,
};
pub use crate::catalog::store::ChartletCatalog;
pub use crate::config::model::{
    CanvasConfig, PresetSticker, PresetStickerSource, PresetText, StickerConfig, TextConfig,
};
pub use crate::editor::session::{
    DeferredPlacement, EditorMode, StickerEditor, TEXT_WIDTH_INSET,
};
pub use crate::editor::tools::{Tool, ToolSelection};
pub use crate::layout::placement::{
    ANCHOR_MARGIN, AnchorPosition, PlacementSpec, STACK_SPACING, resolve as resolve_anchor,
    stack_below,
};
pub use crate::style::attrs::{
    AttributeKey, Decoration, PARAGRAPH_LINE_SPACING, TextAttributes,
    compile as compile_attributes,
};
pub use crate::style::state::{ColorChoice, FONT_SIZE_STEP, StyleState};
pub use crate::text::fonts::{FontBook, ResolvedFont};
pub use crate::text::raster::{BACKGROUND_RADIUS, RenderedText};
pub use crate::text::sticker::{
    CAPTION_PADDING, CAPTION_WIDTH_INSET, PRESET_TEXT_PADDING, StickerText, TEXT_STICKER_PADDING,
    TextComposer,
};
