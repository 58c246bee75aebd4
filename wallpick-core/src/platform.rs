//! Platform-version strategy, chosen once at startup.
//!
//! Newer Android releases gate gallery access behind a narrower
//! "read images" permission and let the wallpaper service target the home
//! and lock screens separately. Older ones only know the broad storage
//! permission and a single undifferentiated wallpaper.

/// First API level with `READ_MEDIA_IMAGES` (Tiramisu).
pub const READ_MEDIA_IMAGES_API_LEVEL: u32 = 33;
/// First API level where the wallpaper service accepts a target flag (Nougat).
pub const TARGETED_WALLPAPER_API_LEVEL: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaPermission {
    ReadMediaImages,
    ReadExternalStorage,
}

impl MediaPermission {
    pub fn id(&self) -> &'static str {
        match self {
            MediaPermission::ReadMediaImages => "android.permission.READ_MEDIA_IMAGES",
            MediaPermission::ReadExternalStorage => "android.permission.READ_EXTERNAL_STORAGE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallpaperApi {
    /// Home and lock screens are separate submissions.
    Targeted,
    /// One submission sets whatever the platform considers "the" wallpaper.
    Undifferentiated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    pub media_permission: MediaPermission,
    pub wallpaper_api: WallpaperApi,
}

impl PlatformProfile {
    pub fn for_api_level(level: u32) -> Self {
        let media_permission = if level >= READ_MEDIA_IMAGES_API_LEVEL {
            MediaPermission::ReadMediaImages
        } else {
            MediaPermission::ReadExternalStorage
        };
        let wallpaper_api = if level >= TARGETED_WALLPAPER_API_LEVEL {
            WallpaperApi::Targeted
        } else {
            WallpaperApi::Undifferentiated
        };
        Self {
            media_permission,
            wallpaper_api,
        }
    }

    /// Desktop sessions have no runtime media permission. Only GNOME-based
    /// sessions expose a separate lock-screen picture.
    pub fn desktop(desktop_env: &str) -> Self {
        let wallpaper_api = if has_lock_screen_picture(desktop_env) {
            WallpaperApi::Targeted
        } else {
            WallpaperApi::Undifferentiated
        };
        Self {
            media_permission: MediaPermission::ReadExternalStorage,
            wallpaper_api,
        }
    }
}

/// Sessions that read `org.gnome.desktop.screensaver picture-uri`.
pub(crate) fn has_lock_screen_picture(desktop_env: &str) -> bool {
    matches!(desktop_env, "gnome" | "unity")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiramisu_and_later_use_read_media_images() {
        assert_eq!(
            PlatformProfile::for_api_level(33).media_permission,
            MediaPermission::ReadMediaImages
        );
        assert_eq!(
            PlatformProfile::for_api_level(34).media_permission,
            MediaPermission::ReadMediaImages
        );
        assert_eq!(
            PlatformProfile::for_api_level(32).media_permission,
            MediaPermission::ReadExternalStorage
        );
    }

    #[test]
    fn targeted_wallpapers_start_at_nougat() {
        assert_eq!(PlatformProfile::for_api_level(24).wallpaper_api, WallpaperApi::Targeted);
        assert_eq!(
            PlatformProfile::for_api_level(23).wallpaper_api,
            WallpaperApi::Undifferentiated
        );
    }

    #[test]
    fn permission_ids_match_manifest_names() {
        assert_eq!(
            MediaPermission::ReadMediaImages.id(),
            "android.permission.READ_MEDIA_IMAGES"
        );
        assert_eq!(
            MediaPermission::ReadExternalStorage.id(),
            "android.permission.READ_EXTERNAL_STORAGE"
        );
    }

    #[test]
    fn only_gnome_like_desktops_are_targeted() {
        assert_eq!(PlatformProfile::desktop("gnome").wallpaper_api, WallpaperApi::Targeted);
        assert_eq!(PlatformProfile::desktop("unity").wallpaper_api, WallpaperApi::Targeted);
        assert_eq!(
            PlatformProfile::desktop("cinnamon").wallpaper_api,
            WallpaperApi::Undifferentiated
        );
        assert_eq!(PlatformProfile::desktop("kde").wallpaper_api, WallpaperApi::Undifferentiated);
        assert_eq!(
            PlatformProfile::desktop("unknown").wallpaper_api,
            WallpaperApi::Undifferentiated
        );
    }
}
