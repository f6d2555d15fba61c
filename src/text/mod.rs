pub(crate) mod fonts;
pub(crate) mod layout;
pub(crate) mod raster;
pub(crate) mod sticker;

/// Bundled default face on disk, for tests that load fonts from files.
#[cfg(test)]
pub(crate) fn test_font_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/fonts/Tuffy.ttf")
}
