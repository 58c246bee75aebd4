use anyhow::Result;
use std::fmt;
use std::str::FromStr;

pub const CHOOSER_TITLE: &str = "Set as Background";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallpaperTarget {
    Home,
    Lock,
    Both,
}

/// A single screen the wallpaper service can be pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallpaperFlag {
    System,
    Lock,
}

impl WallpaperTarget {
    /// Options in the order the chooser lists them.
    pub const ALL: [WallpaperTarget; 3] = [
        WallpaperTarget::Home,
        WallpaperTarget::Lock,
        WallpaperTarget::Both,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WallpaperTarget::Home => "Home Screen",
            WallpaperTarget::Lock => "Lock Screen",
            WallpaperTarget::Both => "Both",
        }
    }

    /// Map a chooser row to a target. Anything outside the list is a dismissal.
    pub fn from_choice_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Screens to submit to, home first.
    pub fn flags(&self) -> &'static [WallpaperFlag] {
        match self {
            WallpaperTarget::Home => &[WallpaperFlag::System],
            WallpaperTarget::Lock => &[WallpaperFlag::Lock],
            WallpaperTarget::Both => &[WallpaperFlag::System, WallpaperFlag::Lock],
        }
    }
}

impl fmt::Display for WallpaperTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WallpaperTarget {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "home" | "system" => Ok(WallpaperTarget::Home),
            "lock" => Ok(WallpaperTarget::Lock),
            "both" => Ok(WallpaperTarget::Both),
            other => Err(anyhow::anyhow!(
                "unknown wallpaper target '{}', expected home, lock or both",
                other
            )),
        }
    }
}

/// A modal that blocks until the user picks a target or dismisses it.
pub trait TargetChooser {
    /// `Ok(None)` means the modal was dismissed without a choice.
    fn choose_target(&self, title: &str, options: &[WallpaperTarget]) -> Result<Option<WallpaperTarget>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChooserState {
    #[default]
    Idle,
    ChoicePresented,
}
