use anyhow::{Context, Result};
use std::cell::RefCell;
use std::time::Instant;

use wallpick_core::desktop::PictureDirPermissions;
use wallpick_core::{
    ImagePicker, ImageReference, MediaPermission, Notice, Notifier, PermissionService, PickOutcome,
    PickRequest, PickResult, PreviewRenderer, NOTICE_DURATION,
};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Empty,
    Image(String),
    Placeholder,
}

#[derive(Debug, Clone, Copy)]
pub struct Toast {
    pub notice: Notice,
    pub shown_at: Instant,
}

impl Toast {
    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= NOTICE_DURATION
    }
}

/// Collaborators backing the egui screen: native dialogs for picking, the
/// central image view for preview and a bottom toast for notices.
pub struct GuiServices {
    permissions: PictureDirPermissions,
    preview: RefCell<Preview>,
    toast: RefCell<Option<Toast>>,
}

impl GuiServices {
    pub fn new(permissions: PictureDirPermissions) -> Self {
        Self {
            permissions,
            preview: RefCell::new(Preview::Empty),
            toast: RefCell::new(None),
        }
    }

    pub fn preview(&self) -> Preview {
        self.preview.borrow().clone()
    }

    /// The toast still on screen, if any.
    pub fn toast(&self) -> Option<Toast> {
        let mut toast = self.toast.borrow_mut();
        if toast.map(|t| t.is_expired()).unwrap_or(false) {
            *toast = None;
        }
        *toast
    }
}

impl PermissionService for GuiServices {
    fn check(&self, permission: MediaPermission) -> bool {
        self.permissions.check(permission)
    }

    fn request(&self, permission: MediaPermission) -> Result<bool> {
        self.permissions.request(permission)
    }
}

impl ImagePicker for GuiServices {
    fn pick_images(&self, request: &PickRequest) -> Result<PickOutcome> {
        let dialog = rfd::FileDialog::new()
            .set_title(request.title)
            .add_filter("Images", IMAGE_EXTENSIONS);

        if request.allow_multiple {
            Ok(match dialog.pick_files() {
                None => PickOutcome::Cancelled,
                Some(paths) => PickOutcome::Picked(PickResult::from_clip(
                    paths.iter().map(|p| ImageReference::from_path(p)).collect(),
                )),
            })
        } else {
            Ok(match dialog.pick_file() {
                None => PickOutcome::Cancelled,
                Some(path) => PickOutcome::Picked(PickResult::from_data(ImageReference::from_path(&path))),
            })
        }
    }
}

impl PreviewRenderer for GuiServices {
    fn show(&self, image: &ImageReference) -> Result<()> {
        let path = image.to_path();
        let (width, height) = image::image_dimensions(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        log::debug!("Previewing {} ({}x{})", image, width, height);
        *self.preview.borrow_mut() = Preview::Image(image.to_uri());
        Ok(())
    }

    fn show_placeholder(&self) {
        *self.preview.borrow_mut() = Preview::Placeholder;
    }
}

impl Notifier for GuiServices {
    fn notify(&self, notice: Notice) {
        log::info!("Notice: {}", notice);
        *self.toast.borrow_mut() = Some(Toast {
            notice,
            shown_at: Instant::now(),
        });
    }
}
