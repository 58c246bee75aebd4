use anyhow::{Context, Result};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use wallpick_core::desktop::{ImageDecoder, PictureDirPermissions};
use wallpick_core::{
    ImagePicker, ImageReference, MediaDecoder, MediaPermission, Notice, Notifier, PermissionService,
    PickOutcome, PickRequest, PickResult, PreviewRenderer, TargetChooser, WallpaperTarget,
};

/// Text-mode stand-ins for the picker, preview, chooser and toast.
pub struct Terminal<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
    permissions: PictureDirPermissions,
    preset: RefCell<Option<Vec<PathBuf>>>,
    preview: RefCell<Option<String>>,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W, permissions: PictureDirPermissions) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
            permissions,
            preset: RefCell::new(None),
            preview: RefCell::new(None),
        }
    }

    /// Answer the next pick with `paths` instead of prompting.
    pub fn preset_pick(&self, paths: Vec<PathBuf>) {
        *self.preset.borrow_mut() = Some(paths);
    }

    pub fn preview(&self) -> Option<String> {
        self.preview.borrow().clone()
    }

    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    pub fn say(&self, line: &str) -> Result<()> {
        let mut out = self.output.borrow_mut();
        writeln!(out, "{}", line)?;
        out.flush()?;
        Ok(())
    }

    pub fn prompt(&self, prompt: &str) -> Result<Option<String>> {
        {
            let mut out = self.output.borrow_mut();
            write!(out, "{}", prompt)?;
            out.flush()?;
        }
        let mut line = String::new();
        let read = self
            .input
            .borrow_mut()
            .read_line(&mut line)
            .context("Failed to read from terminal")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> PermissionService for Terminal<R, W> {
    fn check(&self, permission: MediaPermission) -> bool {
        self.permissions.check(permission)
    }

    fn request(&self, permission: MediaPermission) -> Result<bool> {
        self.permissions.request(permission)
    }
}

impl<R: BufRead, W: Write> ImagePicker for Terminal<R, W> {
    fn pick_images(&self, request: &PickRequest) -> Result<PickOutcome> {
        let paths = match self.preset.borrow_mut().take() {
            Some(paths) => paths,
            None => {
                self.say(&format!("{} ({}), one path per line, blank line to finish:", request.title, request.mime_type))?;
                let mut paths = Vec::new();
                while let Some(line) = self.prompt("> ")? {
                    if line.is_empty() {
                        break;
                    }
                    paths.push(PathBuf::from(line));
                    if !request.allow_multiple {
                        break;
                    }
                }
                paths
            }
        };

        let mut images: Vec<ImageReference> = paths.iter().map(|p| ImageReference::from_path(p)).collect();
        for path in paths.iter().filter(|p| !p.exists()) {
            log::warn!("{} does not exist", path.display());
        }

        Ok(match images.len() {
            0 => PickOutcome::Cancelled,
            1 => PickOutcome::Picked(PickResult::from_data(images.remove(0))),
            _ => PickOutcome::Picked(PickResult::from_clip(images)),
        })
    }
}

impl<R: BufRead, W: Write> PreviewRenderer for Terminal<R, W> {
    fn show(&self, image: &ImageReference) -> Result<()> {
        let bitmap = ImageDecoder
            .decode(image)
            .with_context(|| format!("Failed to load {}", image))?;
        let line = format!("{} ({}x{})", image, bitmap.width(), bitmap.height());
        self.say(&format!("Preview: {}", line))?;
        *self.preview.borrow_mut() = Some(line);
        Ok(())
    }

    fn show_placeholder(&self) {
        *self.preview.borrow_mut() = Some("(preview unavailable)".to_string());
        if let Err(e) = self.say("Preview: (preview unavailable)") {
            log::error!("Failed to write preview: {:#}", e);
        }
    }
}

impl<R: BufRead, W: Write> Notifier for Terminal<R, W> {
    fn notify(&self, notice: Notice) {
        if let Err(e) = self.say(&format!("[ {} ]", notice)) {
            log::error!("Failed to show notice '{}': {:#}", notice, e);
        }
    }
}

impl<R: BufRead, W: Write> TargetChooser for Terminal<R, W> {
    fn choose_target(&self, title: &str, options: &[WallpaperTarget]) -> Result<Option<WallpaperTarget>> {
        self.say(&format!("\n--- {} ---", title))?;
        for (i, option) in options.iter().enumerate() {
            self.say(&format!("{}. {}", i + 1, option.label()))?;
        }

        let answer = self.prompt(&format!("Select an option (1-{}, Enter to dismiss): ", options.len()))?;
        let choice = answer
            .and_then(|a| a.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| options.get(i).copied());
        Ok(choice)
    }
}

/// Chooser that always answers with the target given on the command line.
pub struct FixedChooser(pub WallpaperTarget);

impl TargetChooser for FixedChooser {
    fn choose_target(&self, _title: &str, options: &[WallpaperTarget]) -> Result<Option<WallpaperTarget>> {
        Ok(options.iter().copied().find(|t| *t == self.0))
    }
}
