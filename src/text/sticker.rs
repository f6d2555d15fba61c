use std::path::Path;

use anyhow::Context;

use crate::{
    assets::bitmap::StickerBitmap,
    config::model::TextConfig,
    foundation::core::Rgba8,
    foundation::error::{StickerError, StickerResult},
    style::attrs::{self, TextAttributes},
    style::state::StyleState,
    text::fonts::{FontBook, ResolvedFont},
    text::layout::TextLayoutEngine,
    text::raster::{self, GlyphFonts, RenderedText},
};

/// Total padding around chartlet name/description captions.
pub const CAPTION_PADDING: f32 = 20.0;
/// Total padding around preset text stickers.
pub const PRESET_TEXT_PADDING: f32 = 20.0;
/// Total padding around user-authored text stickers.
pub const TEXT_STICKER_PADDING: f32 = 30.0;
/// Captions wrap at the canvas width minus this inset.
pub const CAPTION_WIDTH_INSET: f32 = 40.0;

#[derive(Clone, Debug, PartialEq)]
/// Immutable snapshot of a rendered text sticker and the style that produced it.
///
/// Editing a text sticker rebuilds the style from this snapshot
/// ([`StyleState::from_sticker_text`]) and replaces it with a fresh one.
pub struct StickerText {
    /// Rendered, padded bitmap.
    pub image: StickerBitmap,
    /// Source string.
    pub text: String,
    /// Color chosen by the user (not the contrast color drawn on a background).
    pub color: Rgba8,
    /// Whether the text sits on a background highlight.
    pub background: bool,
    /// Font size in pixels.
    pub font_size: f32,
    /// Named font family, `None` for the system family.
    pub font_name: Option<String>,
    /// Bold flag.
    pub bold: bool,
    /// Italic flag.
    pub italic: bool,
    /// Underline flag.
    pub underline: bool,
    /// Strikethrough flag.
    pub strikethrough: bool,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
}

impl StickerText {
    /// Snapshot for a plain string rendered with default flags.
    fn plain(image: StickerBitmap, text: &str, color: Rgba8, font_size: f32, bold: bool) -> Self {
        Self {
            image,
            text: text.to_string(),
            color,
            background: false,
            font_size,
            font_name: None,
            bold,
            italic: false,
            underline: false,
            strikethrough: false,
            alpha: 1.0,
        }
    }
}

/// Text pipeline: font registry, Parley layout and `vello_cpu` rasterization.
///
/// One composer is reused across renders so shaped fonts and glyph handles stay cached.
pub struct TextComposer {
    fonts: FontBook,
    engine: TextLayoutEngine,
    glyph_fonts: GlyphFonts,
}

impl std::fmt::Debug for TextComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextComposer")
            .field("fonts", &self.fonts)
            .finish_non_exhaustive()
    }
}

impl Default for TextComposer {
    fn default() -> Self {
        Self::new(FontBook::new())
    }
}

impl TextComposer {
    /// Composer over `fonts`.
    pub fn new(fonts: FontBook) -> Self {
        Self {
            fonts,
            engine: TextLayoutEngine::new(),
            glyph_fonts: GlyphFonts::default(),
        }
    }

    /// Composer with the fonts named by `config`, resolved against `base_dir`.
    ///
    /// A missing or unreadable system font is logged and skipped; text then renders through
    /// whatever families were registered.
    pub fn from_config(config: &TextConfig, base_dir: &Path) -> Self {
        let mut fonts = FontBook::new();
        if let Some(rel) = &config.system_font {
            let loaded = crate::config::model::StickerConfig::resolve_path(base_dir, rel)
                .and_then(|path| {
                    let bytes = std::fs::read(&path)
                        .with_context(|| format!("read font '{}'", path.display()))?;
                    fonts.set_system_font(bytes)
                });
            if let Err(err) = loaded {
                tracing::warn!(font = %rel, error = %err, "system font not loaded");
            }
        }
        if let Some(rel) = &config.fonts_dir {
            match crate::config::model::StickerConfig::resolve_path(base_dir, rel) {
                Ok(dir) => {
                    let n = fonts.load_dir(&dir);
                    tracing::debug!(dir = %dir.display(), fonts = n, "loaded named fonts");
                }
                Err(err) => tracing::warn!(dir = %rel, error = %err, "fonts dir rejected"),
            }
        }
        Self::new(fonts)
    }

    /// Registered fonts.
    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Registered fonts, for adding families.
    pub fn fonts_mut(&mut self) -> &mut FontBook {
        &mut self.fonts
    }

    /// Compile a style state into render attributes.
    pub fn compile(&mut self, state: &StyleState) -> TextAttributes {
        attrs::compile(state, &mut self.fonts)
    }

    /// Measure `text` within `max_width` (unbounded when `None`) and rasterize it with
    /// `padding` split evenly around it. Empty text yields a blank `padding x padding` image.
    #[tracing::instrument(skip(self, text, attrs), fields(len = text.len()))]
    pub fn render(
        &mut self,
        text: &str,
        attrs: &TextAttributes,
        max_width: Option<f32>,
        padding: f32,
    ) -> StickerResult<RenderedText> {
        if text.is_empty() {
            return raster::empty_text(padding);
        }
        if self.fonts.families().next().is_none() {
            return Err(StickerError::render("no font registered for non-empty text"));
        }
        let block = self
            .engine
            .layout(&mut self.fonts, text, attrs, max_width)?;
        raster::rasterize(&block, attrs, padding, &mut self.glyph_fonts)
    }

    /// Render the state's text as a user text sticker.
    pub fn compose(&mut self, state: &StyleState, max_width: Option<f32>) -> StickerResult<StickerText> {
        let attrs = self.compile(state);
        let rendered = self.render(state.text(), &attrs, max_width, TEXT_STICKER_PADDING)?;
        Ok(StickerText {
            image: rendered.bitmap,
            text: state.text().to_string(),
            color: state.color(),
            background: state.background(),
            font_size: state.font_size(),
            font_name: state.font_name().map(str::to_string),
            bold: state.bold(),
            italic: state.italic(),
            underline: state.underline(),
            strikethrough: state.strikethrough(),
            alpha: state.alpha(),
        })
    }

    /// Render a chartlet name/description caption.
    ///
    /// Captions use the system family at the default size in the first palette color, wrapping
    /// at the canvas width minus [`CAPTION_WIDTH_INSET`]. Empty text yields `None`.
    pub fn caption(
        &mut self,
        text: &str,
        config: &TextConfig,
        canvas_width: f32,
    ) -> StickerResult<Option<StickerText>> {
        if text.is_empty() {
            return Ok(None);
        }
        let color = config.initial_color();
        let attrs = TextAttributes::plain(
            ResolvedFont::system(false, false),
            config.default_font_size,
            color,
        );
        let max_width = (canvas_width - CAPTION_WIDTH_INSET).max(1.0);
        let rendered = self.render(text, &attrs, Some(max_width), CAPTION_PADDING)?;
        Ok(Some(StickerText::plain(
            rendered.bitmap,
            text,
            color,
            config.default_font_size,
            false,
        )))
    }

    /// Render a configured preset text: bold system family, no wrapping.
    pub fn preset_text(
        &mut self,
        text: &str,
        font_size: f32,
        color: Rgba8,
    ) -> StickerResult<StickerText> {
        let attrs = TextAttributes::plain(ResolvedFont::system(true, false), font_size, color);
        let rendered = self.render(text, &attrs, None, PRESET_TEXT_PADDING)?;
        Ok(StickerText::plain(rendered.bitmap, text, color, font_size, true))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/sticker.rs"]
mod tests;
