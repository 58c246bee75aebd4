use anyhow::Result;
use directories::UserDirs;
use std::fs;
use std::path::PathBuf;

use crate::permission::PermissionService;
use crate::platform::MediaPermission;

/// Desktops have no runtime media permission; "granted" means the user's
/// picture directory can be listed. There is no prompt, so a request just
/// checks again.
pub struct PictureDirPermissions {
    picture_dir: Option<PathBuf>,
}

impl PictureDirPermissions {
    pub fn new() -> Self {
        let picture_dir = UserDirs::new().and_then(|dirs| dirs.picture_dir().map(|p| p.to_path_buf()));
        Self { picture_dir }
    }

    pub fn with_picture_dir(picture_dir: Option<PathBuf>) -> Self {
        Self { picture_dir }
    }
}

impl Default for PictureDirPermissions {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionService for PictureDirPermissions {
    fn check(&self, _permission: MediaPermission) -> bool {
        match &self.picture_dir {
            // No gallery folder at all: nothing to guard.
            None => true,
            Some(dir) if !dir.exists() => true,
            Some(dir) => fs::read_dir(dir).is_ok(),
        }
    }

    fn request(&self, permission: MediaPermission) -> Result<bool> {
        if let Some(dir) = &self.picture_dir {
            log::warn!("{} is not readable", dir.display());
        }
        Ok(self.check(permission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn readable_picture_dir_is_granted() {
        let dir = TempDir::new().unwrap();
        let permissions = PictureDirPermissions::with_picture_dir(Some(dir.path().to_path_buf()));
        assert!(permissions.check(MediaPermission::ReadMediaImages));
    }

    #[test]
    fn missing_picture_dir_is_granted() {
        let permissions = PictureDirPermissions::with_picture_dir(None);
        assert!(permissions.check(MediaPermission::ReadExternalStorage));

        let dir = TempDir::new().unwrap();
        let permissions = PictureDirPermissions::with_picture_dir(Some(dir.path().join("nope")));
        assert!(permissions.request(MediaPermission::ReadExternalStorage).unwrap());
    }

    #[test]
    fn a_file_in_place_of_the_dir_is_denied() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("Pictures");
        fs::write(&file, b"not a directory").unwrap();
        let permissions = PictureDirPermissions::with_picture_dir(Some(file));
        assert!(!permissions.check(MediaPermission::ReadMediaImages));
    }
}
