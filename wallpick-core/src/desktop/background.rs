use image::DynamicImage;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use super::decoder::into_io_error;
use crate::applier::WallpaperService;
use crate::platform::has_lock_screen_picture;
use crate::target::WallpaperFlag;

const STAGE_PREFIX: &str = "wallpaper-";

/// Desktop wallpaper service. The decoded bitmap is staged as a PNG in the
/// cache directory and handed to the desktop by path.
pub struct DesktopWallpaper {
    desktop_env: String,
    stage_dir: PathBuf,
}

impl DesktopWallpaper {
    pub fn new(desktop_env: impl Into<String>, stage_dir: PathBuf) -> Self {
        Self {
            desktop_env: desktop_env.into(),
            stage_dir,
        }
    }

    /// Write `bitmap` under a fresh name so the desktop notices the change,
    /// dropping earlier copies for the same screen.
    fn stage(&self, bitmap: &DynamicImage, flag: Option<WallpaperFlag>) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.stage_dir)?;

        let screen = stage_name(flag);
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let prefix = format!("{}{}-", STAGE_PREFIX, screen);
        let path = self.stage_dir.join(format!("{}{}.png", prefix, stamp));

        bitmap.to_rgba8().save(&path).map_err(into_io_error)?;
        remove_stale(&self.stage_dir, &prefix, &path);
        Ok(path)
    }

    fn set_gnome(&self, path: &Path, flag: WallpaperFlag) -> io::Result<()> {
        let uri = format!("file://{}", path.display());
        match flag {
            WallpaperFlag::System => {
                gsettings(&["set", "org.gnome.desktop.background", "picture-uri", &uri])?;
                // Only exists on newer GNOME; failure is harmless.
                if let Err(e) = gsettings(&["set", "org.gnome.desktop.background", "picture-uri-dark", &uri]) {
                    log::debug!("picture-uri-dark not set: {}", e);
                }
                Ok(())
            }
            WallpaperFlag::Lock => gsettings(&["set", "org.gnome.desktop.screensaver", "picture-uri", &uri]),
        }
    }

    fn set_desktop(&self, path: &Path) -> io::Result<()> {
        let file_loc = path.to_string_lossy();
        match ::wallpaper::set_from_path(&file_loc) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::warn!("wallpaper backend failed ({}), trying {} fallback", e, self.desktop_env);
                self.set_desktop_fallback(path)
            }
        }
    }

    fn set_desktop_fallback(&self, path: &Path) -> io::Result<()> {
        let file_loc = path.to_string_lossy();
        match self.desktop_env.as_str() {
            "gnome" | "unity" => self.set_gnome(path, WallpaperFlag::System),
            "cinnamon" => gsettings(&[
                "set",
                "org.cinnamon.desktop.background",
                "picture-uri",
                format!("file://{}", path.display()).as_str(),
            ]),
            "mate" => gsettings(&["set", "org.mate.background", "picture-filename", &file_loc]),
            "xfce4" => run(Command::new("xfconf-query").args([
                "-c",
                "xfce4-desktop",
                "-p",
                "/backdrop/screen0/monitor0/image-path",
                "-s",
                file_loc.as_ref(),
            ])),
            "lxde" => run(Command::new("pcmanfm").args([
                format!("--set-wallpaper={}", file_loc).as_str(),
                "--wallpaper-mode=scaled",
            ])),
            other => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("desktop environment '{}' not supported", other),
            )),
        }
    }
}

impl WallpaperService<DynamicImage> for DesktopWallpaper {
    fn set_bitmap(&self, bitmap: &DynamicImage, flag: Option<WallpaperFlag>) -> io::Result<()> {
        let path = self.stage(bitmap, flag)?;
        log::info!("Submitting {} as {:?} wallpaper", path.display(), flag);

        match flag {
            Some(flag) if has_lock_screen_picture(&self.desktop_env) => self.set_gnome(&path, flag),
            Some(WallpaperFlag::Lock) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("no separate lock screen wallpaper on '{}'", self.desktop_env),
            )),
            Some(WallpaperFlag::System) | None => self.set_desktop(&path),
        }
    }
}

fn stage_name(flag: Option<WallpaperFlag>) -> &'static str {
    match flag {
        Some(WallpaperFlag::System) => "home",
        Some(WallpaperFlag::Lock) => "lock",
        None => "desktop",
    }
}

fn remove_stale(dir: &Path, prefix: &str, keep: &Path) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.filter_map(|entry| entry.ok()).map(|entry| entry.path()) {
        let stale = path != keep
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.starts_with(prefix))
                .unwrap_or(false);
        if stale {
            if let Err(e) = fs::remove_file(&path) {
                log::debug!("Could not remove {}: {}", path.display(), e);
            }
        }
    }
}

fn gsettings(args: &[&str]) -> io::Result<()> {
    run(Command::new("gsettings").args(args))
}

fn run(command: &mut Command) -> io::Result<()> {
    let output = command.output()?;
    if output.status.success() {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::Other,
            format!(
                "{:?} exited with {}: {}",
                command.get_program(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn bitmap() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255])))
    }

    #[test]
    fn staging_keeps_one_file_per_screen() {
        let dir = TempDir::new().unwrap();
        let service = DesktopWallpaper::new("unknown", dir.path().to_path_buf());

        let first = service.stage(&bitmap(), Some(WallpaperFlag::System)).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = service.stage(&bitmap(), Some(WallpaperFlag::System)).unwrap();
        let lock = service.stage(&bitmap(), Some(WallpaperFlag::Lock)).unwrap();

        assert!(!first.exists());
        assert!(second.exists());
        assert!(lock.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn staged_file_is_a_readable_png() {
        let dir = TempDir::new().unwrap();
        let service = DesktopWallpaper::new("unknown", dir.path().to_path_buf());
        let path = service.stage(&bitmap(), None).unwrap();

        let staged = image::open(&path).unwrap();
        assert_eq!((staged.width(), staged.height()), (2, 2));
        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("wallpaper-desktop-"));
    }

    #[test]
    fn lock_screen_needs_gnome() {
        let dir = TempDir::new().unwrap();
        let service = DesktopWallpaper::new("xfce4", dir.path().to_path_buf());
        let err = service.set_bitmap(&bitmap(), Some(WallpaperFlag::Lock)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[test]
    fn cinnamon_has_no_gnome_lock_screen() {
        let dir = TempDir::new().unwrap();
        let service = DesktopWallpaper::new("cinnamon", dir.path().to_path_buf());
        let err = service.set_bitmap(&bitmap(), Some(WallpaperFlag::Lock)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }
}
