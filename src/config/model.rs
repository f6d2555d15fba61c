use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    assets::loader::normalize_rel_path,
    foundation::core::{Rgba8, Size},
    foundation::error::{StickerError, StickerResult},
    layout::placement::{AnchorPosition, PlacementSpec},
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Editor configuration for the sticker layer.
///
/// Every field has a default, so `{}` is a valid configuration. Call [`StickerConfig::validate`]
/// (done by [`StickerConfig::from_json_file`]) before handing it to an editor.
pub struct StickerConfig {
    /// Canvas dimensions in pixels.
    pub canvas: CanvasConfig,
    /// Text sticker styling bounds and palette.
    pub text: TextConfig,
    /// Image stickers inserted when the editor opens.
    pub preset_stickers: Vec<PresetSticker>,
    /// Text stickers inserted when the editor opens.
    pub preset_texts: Vec<PresetText>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Output canvas dimensions.
pub struct CanvasConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1080,
        }
    }
}

impl CanvasConfig {
    /// Canvas size in pixels.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Text sticker configuration.
pub struct TextConfig {
    /// Smallest font size reachable with the size stepper.
    pub min_font_size: f32,
    /// Largest font size reachable with the size stepper.
    pub max_font_size: f32,
    /// Initial font size for new text and captions.
    pub default_font_size: f32,
    /// Selectable text colors; the first one is the initial selection.
    pub colors: Vec<Rgba8>,
    /// Font file used as the system family, relative to the config directory.
    pub system_font: Option<String>,
    /// Directory of additional named fonts, relative to the config directory.
    pub fonts_dir: Option<String>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            min_font_size: 12.0,
            max_font_size: 60.0,
            default_font_size: 25.0,
            colors: default_palette(),
            system_font: None,
            fonts_dir: None,
        }
    }
}

fn default_palette() -> Vec<Rgba8> {
    vec![
        Rgba8::WHITE,
        Rgba8::BLACK,
        Rgba8::rgb(0xf1, 0x4f, 0x4f),
        Rgba8::rgb(0xff, 0xad, 0x4f),
        Rgba8::rgb(0xff, 0xe1, 0x4f),
        Rgba8::rgb(0x4f, 0xd1, 0x6b),
        Rgba8::rgb(0x4f, 0x9b, 0xff),
        Rgba8::rgb(0x9b, 0x5c, 0xff),
    ]
}

impl TextConfig {
    /// Check font size bounds and the font source paths.
    pub fn validate(&self) -> StickerResult<()> {
        for (name, v) in [
            ("min_font_size", self.min_font_size),
            ("max_font_size", self.max_font_size),
            ("default_font_size", self.default_font_size),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(StickerError::validation(format!(
                    "text.{name} must be finite and > 0"
                )));
            }
        }
        if self.min_font_size > self.max_font_size {
            return Err(StickerError::validation(
                "text.min_font_size must be <= text.max_font_size",
            ));
        }
        if !(self.min_font_size..=self.max_font_size).contains(&self.default_font_size) {
            return Err(StickerError::validation(
                "text.default_font_size must be within [min_font_size, max_font_size]",
            ));
        }
        if let Some(p) = &self.system_font {
            validate_rel_source(p, "text.system_font")?;
        }
        if let Some(p) = &self.fonts_dir {
            validate_rel_source(p, "text.fonts_dir")?;
        }
        Ok(())
    }

    /// First palette color, or white for an empty palette.
    pub fn initial_color(&self) -> Rgba8 {
        self.colors.first().copied().unwrap_or(Rgba8::WHITE)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Where a preset sticker's image comes from.
pub enum PresetStickerSource {
    /// Image file relative to the config directory.
    Image(String),
    /// Remote image. Not fetched for presets.
    Url(String),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Image sticker inserted when the editor opens.
pub struct PresetSticker {
    /// Image source.
    pub source: PresetStickerSource,
    /// Anchor and optional scale.
    #[serde(flatten)]
    pub placement: PlacementSpec,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Text sticker inserted when the editor opens. Rendered bold in the system family.
pub struct PresetText {
    /// Sticker text.
    pub text: String,
    /// Font size in pixels.
    #[serde(default = "default_preset_font_size")]
    pub font_size: f32,
    /// Text color.
    #[serde(default)]
    pub color: Rgba8,
    /// Anchor position.
    #[serde(default)]
    pub position: AnchorPosition,
}

fn default_preset_font_size() -> f32 {
    TextConfig::default().default_font_size
}

impl StickerConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_json_file(path: &Path) -> StickerResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_slice(&bytes)
            .map_err(|e| StickerError::serde(format!("parse config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check canvas, text settings and every preset.
    pub fn validate(&self) -> StickerResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(StickerError::validation("canvas width/height must be > 0"));
        }
        self.text.validate()?;

        for (i, preset) in self.preset_stickers.iter().enumerate() {
            match &preset.source {
                PresetStickerSource::Image(p) => {
                    validate_rel_source(p, &format!("preset_stickers[{i}].image"))?
                }
                PresetStickerSource::Url(u) => {
                    if u.trim().is_empty() {
                        return Err(StickerError::validation(format!(
                            "preset_stickers[{i}].url must be non-empty"
                        )));
                    }
                }
            }
            preset.placement.validate()?;
        }

        for (i, preset) in self.preset_texts.iter().enumerate() {
            if !preset.font_size.is_finite() || preset.font_size <= 0.0 {
                return Err(StickerError::validation(format!(
                    "preset_texts[{i}].font_size must be finite and > 0"
                )));
            }
            preset.position.validate()?;
        }
        Ok(())
    }

    /// Resolve a config-relative path against `base_dir`.
    pub fn resolve_path(base_dir: &Path, rel: &str) -> StickerResult<PathBuf> {
        Ok(base_dir.join(normalize_rel_path(rel)?))
    }
}

fn validate_rel_source(source: &str, field: &str) -> StickerResult<()> {
    normalize_rel_path(source)
        .map(|_| ())
        .map_err(|e| StickerError::validation(format!("{field}: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
