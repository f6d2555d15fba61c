use crate::{config::model::TextConfig, foundation::core::Rgba8, text::sticker::StickerText};

/// Font size change applied by one stepper press.
pub const FONT_SIZE_STEP: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which color the user picked last.
pub enum ColorChoice {
    /// Entry of the configured palette.
    Palette(usize),
    /// Color outside the palette.
    Custom,
}

#[derive(Clone, Debug, PartialEq)]
/// Mutable text styling record edited by the text sticker UI.
///
/// The font size only moves within the configured `[min, max]` range and alpha stays in
/// `[0, 1]`. Compile it with [`crate::TextComposer::compile`] to get render attributes.
pub struct StyleState {
    text: String,
    font_name: Option<String>,
    font_size: f32,
    min_font_size: f32,
    max_font_size: f32,
    color: Rgba8,
    choice: ColorChoice,
    custom_color: Rgba8,
    alpha: f32,
    bold: bool,
    italic: bool,
    underline: bool,
    strikethrough: bool,
    background: bool,
}

impl StyleState {
    /// Fresh state: default font size, first palette color, fully opaque, no flags.
    pub fn new(config: &TextConfig) -> Self {
        let custom_color = if config.colors.len() > 1 {
            config.colors.last().copied().unwrap_or(Rgba8::TRANSPARENT)
        } else {
            Rgba8::TRANSPARENT
        };
        let (color, choice) = match config.colors.first() {
            Some(c) => (*c, ColorChoice::Palette(0)),
            None => (Rgba8::WHITE, ColorChoice::Custom),
        };
        Self {
            text: String::new(),
            font_name: None,
            font_size: config.default_font_size,
            min_font_size: config.min_font_size,
            max_font_size: config.max_font_size,
            color,
            choice,
            custom_color,
            alpha: 1.0,
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            background: false,
        }
    }

    /// State for editing an existing text sticker.
    ///
    /// The sticker's color is matched against the palette; a color outside it becomes the
    /// custom selection.
    pub fn from_sticker_text(config: &TextConfig, sticker: &StickerText) -> Self {
        let mut state = Self::new(config);
        state.text = sticker.text.clone();
        state.font_name = sticker.font_name.clone();
        state.font_size = sticker.font_size;
        state.bold = sticker.bold;
        state.italic = sticker.italic;
        state.underline = sticker.underline;
        state.strikethrough = sticker.strikethrough;
        state.background = sticker.background;
        state.set_alpha(sticker.alpha);
        state.color = sticker.color;
        state.choice = match config.colors.iter().position(|c| *c == sticker.color) {
            Some(i) => ColorChoice::Palette(i),
            None => {
                state.custom_color = sticker.color;
                ColorChoice::Custom
            }
        };
        state
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Named font, `None` for the system family.
    pub fn font_name(&self) -> Option<&str> {
        self.font_name.as_deref()
    }

    /// Named font family; `None` selects the system family.
    pub fn set_font_name(&mut self, name: Option<String>) {
        self.font_name = name;
    }

    /// Font size in pixels.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Step the font size up unless already at the maximum. Returns whether it changed.
    pub fn increase_font_size(&mut self) -> bool {
        if self.font_size < self.max_font_size {
            self.font_size = (self.font_size + FONT_SIZE_STEP).min(self.max_font_size);
            true
        } else {
            false
        }
    }

    /// Step the font size down unless already at the minimum. Returns whether it changed.
    pub fn decrease_font_size(&mut self) -> bool {
        if self.font_size > self.min_font_size {
            self.font_size = (self.font_size - FONT_SIZE_STEP).max(self.min_font_size);
            true
        } else {
            false
        }
    }

    /// Opacity in `[0, 1]`.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Opacity in `[0, 1]`; NaN is ignored.
    pub fn set_alpha(&mut self, alpha: f32) {
        if !alpha.is_nan() {
            self.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    /// Color chosen by the user, before background contrast is applied.
    pub fn color(&self) -> Rgba8 {
        self.color
    }

    /// Where the color came from.
    pub fn color_choice(&self) -> ColorChoice {
        self.choice
    }

    /// Color used by the custom swatch.
    pub fn custom_color(&self) -> Rgba8 {
        self.custom_color
    }

    /// Select a palette entry. Out-of-range indices are ignored.
    pub fn select_palette_color(&mut self, config: &TextConfig, index: usize) -> bool {
        let Some(c) = config.colors.get(index) else {
            return false;
        };
        self.color = *c;
        self.choice = ColorChoice::Palette(index);
        true
    }

    /// Select `color` through the custom swatch.
    pub fn select_custom_color(&mut self, color: Rgba8) {
        self.custom_color = color;
        self.color = color;
        self.choice = ColorChoice::Custom;
    }

    /// Bold flag.
    pub fn bold(&self) -> bool {
        self.bold
    }

    /// Italic flag.
    pub fn italic(&self) -> bool {
        self.italic
    }

    /// Underline flag.
    pub fn underline(&self) -> bool {
        self.underline
    }

    /// Strikethrough flag.
    pub fn strikethrough(&self) -> bool {
        self.strikethrough
    }

    /// Background highlight flag.
    pub fn background(&self) -> bool {
        self.background
    }

    /// Flip bold and return the new value.
    pub fn toggle_bold(&mut self) -> bool {
        self.bold = !self.bold;
        self.bold
    }

    /// Flip italic and return the new value.
    pub fn toggle_italic(&mut self) -> bool {
        self.italic = !self.italic;
        self.italic
    }

    /// Flip underline and return the new value.
    pub fn toggle_underline(&mut self) -> bool {
        self.underline = !self.underline;
        self.underline
    }

    /// Flip strikethrough and return the new value.
    pub fn toggle_strikethrough(&mut self) -> bool {
        self.strikethrough = !self.strikethrough;
        self.strikethrough
    }

    /// Flip the background highlight and return the new value.
    pub fn toggle_background(&mut self) -> bool {
        self.background = !self.background;
        self.background
    }

    /// Text color actually drawn: contrast color on a background highlight, otherwise the
    /// chosen color, with the style alpha in both cases.
    pub fn foreground(&self) -> Rgba8 {
        let base = if !self.background {
            self.color
        } else if self.color.is_white() {
            Rgba8::BLACK
        } else {
            Rgba8::WHITE
        };
        base.with_alpha(self.alpha)
    }

    /// Highlight color behind each line, when the background flag is on.
    pub fn background_fill(&self) -> Option<Rgba8> {
        self.background
            .then(|| self.color.with_alpha(self.color.alpha_f32() * self.alpha))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/state.rs"]
mod tests;
