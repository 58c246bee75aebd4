pub mod applier;
pub mod conf;
pub mod error;
pub mod notice;
pub mod permission;
pub mod picker;
pub mod platform;
pub mod preview;
pub mod screen;
pub mod selection;
pub mod target;

#[cfg(all(not(target_os = "android"), not(target_arch = "wasm32")))]
pub mod desktop;

pub use applier::{Applied, ApplyRequest, MediaDecoder, WallpaperApplier, WallpaperService};
pub use conf::{Conf, Settings};
pub use error::{ApplyError, ApplyStage, WallpaperError};
pub use notice::{Notice, Notifier, NOTICE_DURATION};
pub use permission::{PermissionGate, PermissionService};
pub use picker::{ImagePicker, PickOutcome, PickRequest, PickResult};
pub use platform::{MediaPermission, PlatformProfile, WallpaperApi};
pub use preview::PreviewRenderer;
pub use screen::{PickServices, PickStatus, Screen};
pub use selection::{ImageReference, SelectedImageList};
pub use target::{ChooserState, TargetChooser, WallpaperFlag, WallpaperTarget, CHOOSER_TITLE};

#[cfg(all(not(target_os = "android"), not(target_arch = "wasm32")))]
pub type DesktopApplier = WallpaperApplier<desktop::ImageDecoder, desktop::DesktopWallpaper>;

/// Desktop applier for `profile`, staging into `conf.cache_dir`.
#[cfg(all(not(target_os = "android"), not(target_arch = "wasm32")))]
pub fn desktop_applier(conf: &Conf, desktop_env: &str, profile: PlatformProfile) -> DesktopApplier {
    WallpaperApplier::new(
        desktop::ImageDecoder,
        desktop::DesktopWallpaper::new(desktop_env, conf.cache_dir.clone()),
        profile.wallpaper_api,
    )
}
