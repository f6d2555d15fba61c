use std::{collections::BTreeSet, path::Path};

use anyhow::Context;
use parley::fontique::{Blob, FontStyle};

use crate::foundation::error::{StickerError, StickerResult};

/// Public-domain Tuffy Regular, the system family of every [`FontBook::new`] book.
pub const DEFAULT_FONT: &[u8] =
    include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fonts/Tuffy.ttf"));

/// Font selection after fallback resolution.
///
/// `family == None` means the system family. `bold`/`italic` are the traits that survived
/// descriptor composition; missing faces for them are synthesized at render time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedFont {
    /// Registered family name, `None` for the system family.
    pub family: Option<String>,
    /// Bold trait.
    pub bold: bool,
    /// Italic trait.
    pub italic: bool,
}

impl ResolvedFont {
    /// System family with the given traits.
    pub fn system(bold: bool, italic: bool) -> Self {
        Self {
            family: None,
            bold,
            italic,
        }
    }
}

/// Registry of font faces available to sticker text.
///
/// Fonts are loaded from bytes (no platform font discovery): one face family acts as the
/// "system" font, any other registered family can be requested by name. A new book starts with
/// the bundled [`DEFAULT_FONT`] as its system family.
pub struct FontBook {
    pub(crate) font_ctx: parley::FontContext,
    system_family: Option<String>,
    families: BTreeSet<String>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("system_family", &self.system_family)
            .field("families", &self.families)
            .finish()
    }
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBook {
    /// Book whose system family is the bundled default face.
    pub fn new() -> Self {
        let mut book = Self::empty();
        if let Err(err) = book.set_system_font(DEFAULT_FONT.to_vec()) {
            tracing::warn!(error = %err, "bundled default font not registered");
        }
        book
    }

    /// Book without any face. Non-empty text cannot be rendered until a font is registered.
    pub fn empty() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            system_family: None,
            families: BTreeSet::new(),
        }
    }

    /// Register font bytes and return the primary family name they provide.
    pub fn register(&mut self, font_bytes: Vec<u8>) -> StickerResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(Blob::from(font_bytes), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            StickerError::validation("no font families registered from font bytes")
        })?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| StickerError::validation("registered font family has no name"))?
            .to_string();
        self.families.insert(name.clone());
        Ok(name)
    }

    /// Register font bytes and make their family the system font.
    pub fn set_system_font(&mut self, font_bytes: Vec<u8>) -> StickerResult<String> {
        let name = self.register(font_bytes)?;
        self.system_family = Some(name.clone());
        Ok(name)
    }

    /// Read and register a font file.
    pub fn register_file(&mut self, path: &Path) -> StickerResult<String> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font bytes from '{}'", path.display()))?;
        self.register(bytes)
    }

    /// Register every `.ttf`/`.otf`/`.ttc` file directly inside `dir`; unreadable entries are
    /// skipped. Returns the number of files registered.
    pub fn load_dir(&mut self, dir: &Path) -> usize {
        let Ok(rd) = std::fs::read_dir(dir) else {
            return 0;
        };

        let mut paths = rd
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.extension()
                    .and_then(|s| s.to_str())
                    .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"))
                    .unwrap_or(false)
            })
            .collect::<Vec<_>>();
        // Stable registration order keeps family selection deterministic.
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match self.register_file(&path) {
                Ok(_) => loaded += 1,
                Err(err) => tracing::debug!(path = %path.display(), error = %err, "skip font"),
            }
        }
        loaded
    }

    /// Family used when no registered name matches.
    pub fn system_family(&self) -> Option<&str> {
        self.system_family.as_deref()
    }

    /// Registered family names, sorted.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.iter().map(String::as_str)
    }

    /// Whether `name` was registered.
    pub fn has_family(&self, name: &str) -> bool {
        self.families.contains(name)
    }

    /// Whether `family` ships a real face with exactly these traits.
    pub fn has_face(&mut self, family: &str, bold: bool, italic: bool) -> bool {
        let Some(info) = self.font_ctx.collection.family_by_name(family) else {
            return false;
        };
        info.fonts().iter().any(|font| {
            let is_bold = font.weight().value() >= 600.0;
            let is_italic = matches!(font.style(), FontStyle::Italic | FontStyle::Oblique(_));
            is_bold == bold && is_italic == italic
        })
    }

    /// Combine a base family with bold/italic traits.
    ///
    /// Unknown names fall back to the system family. A named family asked for bold+italic
    /// without a face carrying both degrades to its bold face, or to its italic face when it
    /// has no bold one.
    pub fn resolve(&mut self, name: Option<&str>, bold: bool, italic: bool) -> ResolvedFont {
        let Some(name) = name.filter(|n| !n.trim().is_empty()) else {
            return ResolvedFont::system(bold, italic);
        };
        if !self.has_family(name) {
            tracing::debug!(font = name, "font not registered; using system font");
            return ResolvedFont::system(bold, italic);
        }

        let (bold, italic) = if bold && italic && !self.has_face(name, true, true) {
            if !self.has_face(name, true, false) && self.has_face(name, false, true) {
                tracing::debug!(font = name, "no bold italic face; using italic face");
                (false, true)
            } else {
                tracing::debug!(font = name, "no bold italic face; using bold face");
                (true, false)
            }
        } else {
            (bold, italic)
        };

        ResolvedFont {
            family: Some(name.to_string()),
            bold,
            italic,
        }
    }

    /// CSS-style family list for Parley: the resolved family, then the system family.
    pub(crate) fn stack_source(&self, font: &ResolvedFont) -> String {
        let mut parts = Vec::<String>::with_capacity(3);
        if let Some(family) = &font.family {
            parts.push(quote_family(family));
        }
        if let Some(system) = &self.system_family {
            parts.push(quote_family(system));
        }
        parts.push("sans-serif".to_string());
        parts.join(", ")
    }
}

fn quote_family(name: &str) -> String {
    format!("\"{}\"", name.replace('"', ""))
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
