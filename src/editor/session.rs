use std::{
    cell::RefCell,
    collections::VecDeque,
    path::{Path, PathBuf},
    rc::Rc,
    sync::Arc,
};

use crate::{
    assets::decode::decode_image,
    assets::loader::{CachePolicy, ImageLoader, ImageRequest, LoadedImage},
    canvas::headless::StickerCanvas,
    canvas::surface::{StickerContent, StickerSurface},
    catalog::model::{Chartlet, ChartletSource},
    catalog::store::ChartletCatalog,
    config::model::{PresetStickerSource, StickerConfig},
    editor::tools::ToolSelection,
    foundation::core::StickerId,
    foundation::error::{StickerError, StickerResult},
    layout::placement::{STACK_SPACING, resolve, stack_below},
    style::state::StyleState,
    text::sticker::TextComposer,
};

/// User text wraps at the canvas width minus this inset.
pub const TEXT_WIDTH_INSET: f32 = 30.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Kind of media being edited.
pub enum EditorMode {
    /// Still image: animated chartlets collapse to their first frame.
    #[default]
    Image,
    /// Video: encoded chartlet bytes are kept so animation survives.
    Video,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Placement that waits for a settled reference frame.
pub struct DeferredPlacement {
    /// Sticker being moved.
    pub target: StickerId,
    /// Sticker it is stacked below.
    pub reference: StickerId,
    /// Gap between the reference bottom and the target top.
    pub spacing: f64,
}

type Downloads = Rc<RefCell<VecDeque<(Chartlet, StickerResult<LoadedImage>)>>>;

/// Sticker editing session: a surface plus the text pipeline, tool state, catalog and the
/// deferred placement queue.
pub struct StickerEditor<S: StickerSurface = StickerCanvas> {
    config: StickerConfig,
    base_dir: PathBuf,
    surface: S,
    composer: TextComposer,
    tools: ToolSelection,
    catalog: ChartletCatalog,
    loader: Option<Box<dyn ImageLoader>>,
    mode: EditorMode,
    pending: VecDeque<DeferredPlacement>,
    downloads: Downloads,
}

impl<S: StickerSurface + std::fmt::Debug> std::fmt::Debug for StickerEditor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StickerEditor")
            .field("surface", &self.surface)
            .field("tools", &self.tools)
            .field("mode", &self.mode)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl StickerEditor<StickerCanvas> {
    /// Editor over a headless canvas sized by `config`. Fonts and preset images resolve
    /// against `base_dir`.
    pub fn headless(config: StickerConfig, base_dir: impl Into<PathBuf>) -> StickerResult<Self> {
        config.validate()?;
        let canvas = StickerCanvas::new(config.canvas.width, config.canvas.height)?;
        Ok(Self::new(config, base_dir, canvas))
    }
}

impl<S: StickerSurface> StickerEditor<S> {
    /// Editor over `surface`. Fonts and preset images resolve against `base_dir`.
    pub fn new(config: StickerConfig, base_dir: impl Into<PathBuf>, surface: S) -> Self {
        let base_dir = base_dir.into();
        let composer = TextComposer::from_config(&config.text, &base_dir);
        Self {
            config,
            base_dir,
            surface,
            composer,
            tools: ToolSelection::new(),
            catalog: ChartletCatalog::default(),
            loader: None,
            mode: EditorMode::default(),
            pending: VecDeque::new(),
            downloads: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Use `loader` for URL chartlets.
    pub fn with_loader(mut self, loader: Box<dyn ImageLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Replace the default built-in catalog.
    pub fn with_catalog(mut self, catalog: ChartletCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the media mode.
    pub fn with_mode(mut self, mode: EditorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the text composer, e.g. one with extra fonts.
    pub fn with_composer(mut self, composer: TextComposer) -> Self {
        self.composer = composer;
        self
    }

    /// Editor configuration.
    pub fn config(&self) -> &StickerConfig {
        &self.config
    }

    /// Directory config-relative paths resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Media mode.
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Sticker surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Sticker surface, for direct manipulation.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Text composer.
    pub fn composer_mut(&mut self) -> &mut TextComposer {
        &mut self.composer
    }

    /// Toolbar state.
    pub fn tools(&self) -> &ToolSelection {
        &self.tools
    }

    /// Toolbar state, for selecting tools.
    pub fn tools_mut(&mut self) -> &mut ToolSelection {
        &mut self.tools
    }

    /// Chartlet catalog.
    pub fn catalog(&self) -> &ChartletCatalog {
        &self.catalog
    }

    /// Chartlet catalog, for loading and selecting categories.
    pub fn catalog_mut(&mut self) -> &mut ChartletCatalog {
        &mut self.catalog
    }

    /// Placements still waiting for their reference frame.
    pub fn pending_placements(&self) -> impl Iterator<Item = &DeferredPlacement> {
        self.pending.iter()
    }

    /// Fresh style for a new text sticker.
    pub fn new_style(&self) -> StyleState {
        StyleState::new(&self.config.text)
    }

    /// Style of an existing text sticker, for editing it.
    pub fn edit_style(&self, id: StickerId) -> Option<StyleState> {
        self.surface
            .sticker_text(id)
            .map(|t| StyleState::from_sticker_text(&self.config.text, t))
    }

    /// Insert a chartlet and queue its name/description captions below it.
    ///
    /// Returns `Ok(None)` when nothing was inserted yet: URL chartlets are handed to the image
    /// loader and land through [`StickerEditor::pump_downloads`], undecodable bytes are skipped.
    #[tracing::instrument(skip_all)]
    pub fn insert_chartlet(&mut self, chartlet: &Chartlet) -> StickerResult<Option<StickerId>> {
        let content = match &chartlet.source {
            ChartletSource::Image(bmp) => StickerContent::Image(bmp.clone()),
            ChartletSource::Data(bytes) => match self.content_from_data(bytes) {
                Some(c) => c,
                None => return Ok(None),
            },
            ChartletSource::Url(url) => {
                self.request_download(url, chartlet)?;
                return Ok(None);
            }
        };
        self.insert_chartlet_content(content, chartlet)
    }

    /// Insert entry `entry` of catalog category `category`.
    pub fn insert_from_catalog(
        &mut self,
        category: usize,
        entry: usize,
    ) -> StickerResult<Option<StickerId>> {
        let chartlet = self
            .catalog
            .entries(category)
            .and_then(|e| e.get(entry))
            .cloned()
            .ok_or_else(|| {
                StickerError::catalog(format!("no chartlet at category {category}, entry {entry}"))
            })?;
        self.insert_chartlet(&chartlet)
    }

    /// Insert every chartlet whose download finished since the last call.
    pub fn pump_downloads(&mut self) -> StickerResult<Vec<StickerId>> {
        let mut inserted = Vec::new();
        loop {
            let next = self.downloads.borrow_mut().pop_front();
            let Some((chartlet, result)) = next else {
                break;
            };
            let loaded = match result {
                Ok(loaded) => loaded,
                Err(err) => {
                    tracing::debug!(error = %err, "chartlet download failed; skipped");
                    continue;
                }
            };
            let content = match (self.mode, loaded.data, loaded.image) {
                (EditorMode::Video, Some(data), _) => self.content_from_data(&data),
                (_, _, Some(image)) => Some(StickerContent::Image(image)),
                (_, Some(data), None) => self.content_from_data(&data),
                (_, None, None) => None,
            };
            let Some(content) = content else {
                tracing::debug!("downloaded chartlet has no usable image; skipped");
                continue;
            };
            if let Some(id) = self.insert_chartlet_content(content, &chartlet)? {
                inserted.push(id);
            }
        }
        Ok(inserted)
    }

    /// Render `state` and insert it as a selected text sticker.
    #[tracing::instrument(skip_all)]
    pub fn insert_text(&mut self, state: &StyleState) -> StickerResult<StickerId> {
        self.tools.guard_sticker_insertion();
        let text = self.composer.compose(state, Some(self.text_max_width()))?;
        self.surface.add_sticker(StickerContent::Text(text), true)
    }

    /// Re-render `state` and replace the selected text sticker with it.
    #[tracing::instrument(skip_all)]
    pub fn update_text(&mut self, state: &StyleState) -> StickerResult<Option<StickerId>> {
        self.tools.guard_sticker_insertion();
        let text = self.composer.compose(state, Some(self.text_max_width()))?;
        Ok(self.surface.update_sticker(text))
    }

    /// Insert configured preset stickers and texts at their anchors, then deselect all.
    ///
    /// Presets that cannot be shown (URL sources, unreadable images, text that fails to render)
    /// are logged and skipped. Returns the inserted ids.
    #[tracing::instrument(skip_all)]
    pub fn apply_presets(&mut self) -> Vec<StickerId> {
        let canvas = self.surface.canvas_size();
        let mut inserted = Vec::new();

        for preset in self.config.preset_stickers.clone() {
            let path = match &preset.source {
                PresetStickerSource::Image(rel) => rel,
                PresetStickerSource::Url(url) => {
                    tracing::debug!(url = %url, "URL preset sticker skipped");
                    continue;
                }
            };
            let image = StickerConfig::resolve_path(&self.base_dir, path).and_then(|p| {
                let bytes = std::fs::read(&p).map_err(|e| {
                    StickerError::decode(format!("read preset '{}': {e}", p.display()))
                })?;
                decode_image(&bytes)
            });
            let image = match image {
                Ok(image) => image,
                Err(err) => {
                    tracing::warn!(path = %path, error = %err, "preset sticker skipped");
                    continue;
                }
            };
            let id = match self.surface.add_sticker(StickerContent::Image(image), false) {
                Ok(id) => id,
                Err(err) => {
                    tracing::warn!(path = %path, error = %err, "preset sticker not added");
                    continue;
                }
            };
            self.surface
                .set_center(id, resolve(preset.placement.position, canvas));
            if let Some(scale) = preset.placement.scale {
                self.surface.set_scale(id, scale);
            }
            inserted.push(id);
        }

        for preset in self.config.preset_texts.clone() {
            let added = self
                .composer
                .preset_text(&preset.text, preset.font_size, preset.color)
                .and_then(|text| self.surface.add_sticker(StickerContent::Text(text), false));
            let id = match added {
                Ok(id) => id,
                Err(err) => {
                    tracing::warn!(text = %preset.text, error = %err, "preset text skipped");
                    continue;
                }
            };
            self.surface.set_center(id, resolve(preset.position, canvas));
            inserted.push(id);
        }

        self.surface.deselect_all();
        inserted
    }

    /// Run the surface layout pass, then apply every deferred placement whose reference has
    /// settled. Placements apply in queue order, so a caption stacked below another caption
    /// sees the first one's final position. Returns how many were applied.
    pub fn settle_layout(&mut self) -> usize {
        self.surface.layout();

        let mut applied = 0;
        let mut waiting = VecDeque::new();
        while let Some(p) = self.pending.pop_front() {
            let (Some(reference), Some(target)) =
                (self.surface.frame(p.reference), self.surface.frame(p.target))
            else {
                if self.surface.center(p.reference).is_some()
                    && self.surface.center(p.target).is_some()
                {
                    waiting.push_back(p);
                } else {
                    tracing::debug!(target = p.target.0, "placement for removed sticker dropped");
                }
                continue;
            };
            let center = stack_below(reference, target.size(), p.spacing);
            self.surface.set_center(p.target, center);
            applied += 1;
        }
        self.pending = waiting;
        applied
    }

    /// Remove every sticker and forget pending placements.
    pub fn remove_all(&mut self) {
        self.surface.remove_all_stickers();
        self.pending.clear();
    }

    fn text_max_width(&self) -> f32 {
        (self.surface.canvas_size().width as f32 - TEXT_WIDTH_INSET).max(1.0)
    }

    fn content_from_data(&self, bytes: &Arc<Vec<u8>>) -> Option<StickerContent> {
        match self.mode {
            EditorMode::Video => Some(StickerContent::Data(Arc::clone(bytes))),
            EditorMode::Image => match decode_image(bytes) {
                Ok(image) => Some(StickerContent::Image(image)),
                Err(err) => {
                    tracing::debug!(error = %err, "chartlet bytes not decodable; skipped");
                    None
                }
            },
        }
    }

    fn request_download(&mut self, url: &str, chartlet: &Chartlet) -> StickerResult<()> {
        let Some(loader) = self.loader.as_mut() else {
            tracing::warn!(url = %url, "no image loader configured; chartlet skipped");
            return Ok(());
        };
        let request = ImageRequest::new(url)
            .with_cache(match self.mode {
                EditorMode::Image => CachePolicy::CacheOriginal,
                EditorMode::Video => CachePolicy::ExpireFromMemory,
            })
            .with_target_size(self.surface.canvas_size());
        let inbox = Rc::clone(&self.downloads);
        let chartlet = chartlet.clone();
        loader.load(
            request,
            Box::new(move |result| {
                inbox.borrow_mut().push_back((chartlet, result));
            }),
        );
        Ok(())
    }

    fn insert_chartlet_content(
        &mut self,
        content: StickerContent,
        chartlet: &Chartlet,
    ) -> StickerResult<Option<StickerId>> {
        self.tools.guard_sticker_insertion();
        let id = match self.surface.add_sticker(content, true) {
            Ok(id) => id,
            Err(err) => {
                tracing::debug!(error = %err, "chartlet not insertable; skipped");
                return Ok(None);
            }
        };

        let canvas_width = self.surface.canvas_size().width as f32;
        let mut previous = id;
        for caption in chartlet.captions() {
            let text = match self.composer.caption(caption, &self.config.text, canvas_width) {
                Ok(Some(text)) => text,
                Ok(None) => continue,
                Err(err) => {
                    tracing::warn!(error = %err, "caption not rendered");
                    continue;
                }
            };
            let caption_id = self.surface.add_sticker(StickerContent::Text(text), false)?;
            self.pending.push_back(DeferredPlacement {
                target: caption_id,
                reference: previous,
                spacing: STACK_SPACING,
            });
            previous = caption_id;
        }
        Ok(Some(id))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
