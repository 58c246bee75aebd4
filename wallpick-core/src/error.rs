use std::io;
use thiserror::Error;

use crate::notice::Notice;
use crate::target::WallpaperFlag;

/// Where an apply attempt broke down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStage {
    Decode,
    Submit(Option<WallpaperFlag>),
}

/// Decode or submission failure. `applied` lists the screens that were
/// already set before the failure; nothing is rolled back.
#[derive(Debug, Error)]
#[error("failed to set wallpaper during {stage:?} (already applied: {applied:?})")]
pub struct ApplyError {
    pub stage: ApplyStage,
    pub applied: Vec<WallpaperFlag>,
    #[source]
    pub source: io::Error,
}

impl ApplyError {
    pub fn is_partial(&self) -> bool {
        !self.applied.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum WallpaperError {
    #[error("gallery permission denied")]
    PermissionDenied,

    #[error("no image selected")]
    NoImageSelected,

    #[error(transparent)]
    Apply(#[from] ApplyError),
}

impl WallpaperError {
    /// All failures collapse to a fixed message for the user.
    pub fn notice(&self) -> Notice {
        match self {
            WallpaperError::PermissionDenied => Notice::PermissionDenied,
            WallpaperError::NoImageSelected => Notice::SelectImageFirst,
            WallpaperError::Apply(_) => Notice::SetFailed,
        }
    }
}
