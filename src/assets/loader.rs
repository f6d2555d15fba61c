use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::bitmap::StickerBitmap,
    assets::decode,
    foundation::core::Size,
    foundation::error::{StickerError, StickerResult},
};

/// Caching hint forwarded to the image loader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Keep the original bytes around for later requests.
    #[default]
    CacheOriginal,
    /// Do not retain the bytes after delivering them (animated stickers for video editing).
    ExpireFromMemory,
}

/// One image-by-URL request.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageRequest {
    /// Remote URL, `file://` URL or root-relative path.
    pub url: String,
    /// Caching hint.
    pub cache: CachePolicy,
    /// Downscaling hint; the decoded image is shrunk to fit when set.
    pub target_size: Option<Size>,
}

impl ImageRequest {
    /// Request for `url` with the default cache policy.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cache: CachePolicy::default(),
            target_size: None,
        }
    }

    /// Set the caching hint.
    pub fn with_cache(mut self, cache: CachePolicy) -> Self {
        self.cache = cache;
        self
    }

    /// Ask for the decoded image to be shrunk to fit `size`.
    pub fn with_target_size(mut self, size: Size) -> Self {
        self.target_size = Some(size);
        self
    }
}

/// Result of a successful load: the decoded image (if decodable) and the raw bytes.
#[derive(Clone, Debug, Default)]
pub struct LoadedImage {
    /// Decoded image, when the loader decoded it.
    pub image: Option<StickerBitmap>,
    /// Raw encoded bytes.
    pub data: Option<Arc<Vec<u8>>>,
}

impl LoadedImage {
    /// Decoded image, falling back to decoding the raw bytes.
    ///
    /// `None` means the sticker cannot be shown and the caller skips it.
    pub fn into_bitmap(self) -> Option<StickerBitmap> {
        if let Some(image) = self.image {
            return Some(image);
        }
        let data = self.data?;
        match decode::decode_image(&data) {
            Ok(bmp) => Some(bmp),
            Err(err) => {
                tracing::debug!(error = %err, "downloaded bytes are not a decodable image");
                None
            }
        }
    }
}

/// Completion callback for [`ImageLoader::load`]. Invoked once, on the caller's thread.
pub type ImageLoadCallback = Box<dyn FnOnce(StickerResult<LoadedImage>)>;

/// External collaborator that turns URLs into images.
///
/// Implementations own retries, timeouts and caching; the sticker core trusts the result it is
/// handed and has no cancellation.
pub trait ImageLoader {
    /// Start loading `request` and eventually call `done`.
    fn load(&mut self, request: ImageRequest, done: ImageLoadCallback);
}

/// Loader for local files: `file://` URLs and paths relative to a root directory.
///
/// Answers synchronously. Remote schemes are reported as errors.
#[derive(Debug)]
pub struct FsImageLoader {
    root: PathBuf,
    cache: HashMap<String, Arc<Vec<u8>>>,
    reads: usize,
}

impl FsImageLoader {
    /// Loader resolving relative paths under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
            reads: 0,
        }
    }

    /// Directory relative paths resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of filesystem reads performed so far (cache hits are not counted).
    pub fn read_count(&self) -> usize {
        self.reads
    }

    fn resolve_path(&self, url: &str) -> StickerResult<PathBuf> {
        if let Some(abs) = url.strip_prefix("file://") {
            return Ok(PathBuf::from(abs));
        }
        if url.contains("://") {
            return Err(StickerError::catalog(format!(
                "'{url}' needs a network image loader"
            )));
        }
        Ok(self.root.join(Path::new(&normalize_rel_path(url)?)))
    }

    fn fetch(&mut self, request: &ImageRequest) -> StickerResult<Arc<Vec<u8>>> {
        if let Some(bytes) = self.cache.get(&request.url) {
            return Ok(bytes.clone());
        }
        let path = self.resolve_path(&request.url)?;
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read image bytes from '{}'", path.display()))?;
        self.reads += 1;
        let bytes = Arc::new(bytes);
        if request.cache == CachePolicy::CacheOriginal {
            self.cache.insert(request.url.clone(), bytes.clone());
        }
        Ok(bytes)
    }
}

impl ImageLoader for FsImageLoader {
    #[tracing::instrument(skip(self, done), fields(url = %request.url))]
    fn load(&mut self, request: ImageRequest, done: ImageLoadCallback) {
        let result = self.fetch(&request).map(|bytes| {
            let decoded = match request.target_size {
                Some(size) => decode::decode_image_fit(
                    &bytes,
                    size.width.max(1.0).ceil() as u32,
                    size.height.max(1.0).ceil() as u32,
                ),
                None => decode::decode_image(&bytes),
            };
            LoadedImage {
                image: decoded.ok(),
                data: Some(bytes),
            }
        });
        done(result);
    }
}

/// Normalize and validate loader-relative paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> StickerResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(StickerError::validation("image paths must be relative"));
    }
    if s.is_empty() {
        return Err(StickerError::validation("image path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(StickerError::validation("image paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(StickerError::validation(
            "image path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
