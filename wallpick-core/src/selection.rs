use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const FILE_SCHEME: &str = "file://";

/// Opaque locator for a picked image. On desktop this is a filesystem path,
/// optionally carrying a `file://` scheme; on mobile it is a content URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageReference(String);

impl ImageReference {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn from_path(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }

    pub fn locator(&self) -> &str {
        &self.0
    }

    /// Filesystem path behind the locator, with any `file://` scheme stripped.
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(self.0.strip_prefix(FILE_SCHEME).unwrap_or(&self.0))
    }

    /// The locator as a `file://` URI, as image loaders expect it.
    pub fn to_uri(&self) -> String {
        if self.0.starts_with(FILE_SCHEME) || self.0.contains("://") {
            self.0.clone()
        } else {
            format!("{}{}", FILE_SCHEME, self.0)
        }
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Images returned by the last successful pick, in picker order.
///
/// The list is an immutable value: a new pick builds a fresh list and the
/// screen swaps it in whole. Only the first entry is ever applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedImageList {
    images: Arc<[ImageReference]>,
}

impl SelectedImageList {
    pub fn new(images: Vec<ImageReference>) -> Self {
        Self {
            images: images.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn first(&self) -> Option<&ImageReference> {
        self.images.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageReference> {
        self.images.iter()
    }
}

impl FromIterator<ImageReference> for SelectedImageList {
    fn from_iter<I: IntoIterator<Item = ImageReference>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
