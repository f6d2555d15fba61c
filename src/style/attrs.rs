use crate::{
    foundation::core::Rgba8,
    style::state::StyleState,
    text::fonts::{FontBook, ResolvedFont},
};

/// Extra vertical space between wrapped lines of sticker text.
pub const PARAGRAPH_LINE_SPACING: f32 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Line style of an underline or strikethrough.
pub enum Decoration {
    /// One solid line at the font's metric offset and thickness.
    Single,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Attribute slots a [`TextAttributes`] set may carry.
pub enum AttributeKey {
    /// Font family and traits.
    Font,
    /// Text color.
    ForegroundColor,
    /// Highlight behind the text.
    BackgroundColor,
    /// Paragraph line spacing.
    ParagraphStyle,
    /// Underline decoration.
    Underline,
    /// Strikethrough decoration.
    Strikethrough,
}

#[derive(Clone, Debug, PartialEq)]
/// Render attributes compiled from a [`StyleState`].
///
/// Optional slots are absent (not "off") when their style flag is unset, so membership checks
/// through [`TextAttributes::has`] distinguish the two.
pub struct TextAttributes {
    /// Resolved family and traits.
    pub font: ResolvedFont,
    /// Font size in pixels.
    pub font_size: f32,
    /// Glyph color, alpha included.
    pub foreground: Rgba8,
    /// Highlight color behind each line.
    pub background: Option<Rgba8>,
    /// Extra space between lines, in pixels.
    pub line_spacing: f32,
    /// Underline, absent when off.
    pub underline: Option<Decoration>,
    /// Strikethrough, absent when off.
    pub strikethrough: Option<Decoration>,
}

impl TextAttributes {
    /// Plain attributes: one font, one color, paragraph spacing, nothing else.
    pub fn plain(font: ResolvedFont, font_size: f32, foreground: Rgba8) -> Self {
        Self {
            font,
            font_size,
            foreground,
            background: None,
            line_spacing: PARAGRAPH_LINE_SPACING,
            underline: None,
            strikethrough: None,
        }
    }

    /// Whether the attribute is present.
    pub fn has(&self, key: AttributeKey) -> bool {
        match key {
            AttributeKey::Font | AttributeKey::ForegroundColor | AttributeKey::ParagraphStyle => {
                true
            }
            AttributeKey::BackgroundColor => self.background.is_some(),
            AttributeKey::Underline => self.underline.is_some(),
            AttributeKey::Strikethrough => self.strikethrough.is_some(),
        }
    }
}

/// Map a style state to render attributes.
///
/// Never fails: unknown font names resolve to the system family.
pub fn compile(state: &StyleState, fonts: &mut FontBook) -> TextAttributes {
    let font = fonts.resolve(state.font_name(), state.bold(), state.italic());
    TextAttributes {
        font,
        font_size: state.font_size(),
        foreground: state.foreground(),
        background: state.background_fill(),
        line_spacing: PARAGRAPH_LINE_SPACING,
        underline: state.underline().then_some(Decoration::Single),
        strikethrough: state.strikethrough().then_some(Decoration::Single),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/attrs.rs"]
mod tests;
