use std::borrow::Cow;

use parley::style::{FontStack, FontStyle, FontWeight, StyleProperty};

use crate::{
    foundation::core::{Rgba8, Size},
    foundation::error::{StickerError, StickerResult},
    style::attrs::TextAttributes,
    text::fonts::FontBook,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrush {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrush {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Shaped text plus the extra inter-line spacing requested by its paragraph style.
pub(crate) struct TextBlock {
    pub(crate) layout: parley::Layout<TextBrush>,
    pub(crate) line_spacing: f32,
}

impl TextBlock {
    pub(crate) fn line_count(&self) -> usize {
        self.layout.lines().count()
    }

    /// Vertical shift of line `index` caused by paragraph spacing.
    pub(crate) fn line_shift(&self, index: usize) -> f32 {
        self.line_spacing * index as f32
    }

    /// Bounding size of the laid out text, spacing included.
    pub(crate) fn size(&self) -> Size {
        let lines = self.line_count();
        let extra = if lines > 1 {
            self.line_shift(lines - 1)
        } else {
            0.0
        };
        Size::new(
            f64::from(self.layout.width()),
            f64::from(self.layout.height() + extra),
        )
    }
}

/// Stateful helper for building Parley text layouts from compiled attributes.
pub(crate) struct TextLayoutEngine {
    layout_ctx: parley::LayoutContext<TextBrush>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape and break `text` with `attrs`, wrapping at `max_width_px` when given.
    pub(crate) fn layout(
        &mut self,
        fonts: &mut FontBook,
        text: &str,
        attrs: &TextAttributes,
        max_width_px: Option<f32>,
    ) -> StickerResult<TextBlock> {
        if !attrs.font_size.is_finite() || attrs.font_size <= 0.0 {
            return Err(StickerError::validation(
                "text font size must be finite and > 0",
            ));
        }
        if let Some(w) = max_width_px
            && (!w.is_finite() || w <= 0.0)
        {
            return Err(StickerError::validation(
                "text max width must be finite and > 0",
            ));
        }

        let stack = fonts.stack_source(&attrs.font);
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut fonts.font_ctx, text, 1.0, true);
        builder.push_default(StyleProperty::FontStack(FontStack::Source(Cow::Owned(stack))));
        builder.push_default(StyleProperty::FontSize(attrs.font_size));
        builder.push_default(StyleProperty::Brush(TextBrush::from(attrs.foreground)));
        if attrs.font.bold {
            builder.push_default(StyleProperty::FontWeight(FontWeight::BOLD));
        }
        if attrs.font.italic {
            builder.push_default(StyleProperty::FontStyle(FontStyle::Italic));
        }
        if attrs.underline.is_some() {
            builder.push_default(StyleProperty::Underline(true));
        }
        if attrs.strikethrough.is_some() {
            builder.push_default(StyleProperty::Strikethrough(true));
        }

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(max_width_px);
        layout.align(
            max_width_px,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );

        Ok(TextBlock {
            layout,
            line_spacing: attrs.line_spacing,
        })
    }
}
