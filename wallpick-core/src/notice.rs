use std::fmt;
use std::time::Duration;

/// How long a transient notice stays on screen.
pub const NOTICE_DURATION: Duration = Duration::from_millis(2000);

/// Fixed user-visible messages. Nothing else is ever shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    PermissionDenied,
    SelectImageFirst,
    HomeScreenSet,
    LockScreenSet,
    BothScreensSet,
    SetFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::PermissionDenied => "Permission Denied!",
            Notice::SelectImageFirst => "Select an image first!",
            Notice::HomeScreenSet => "Home Screen Set!",
            Notice::LockScreenSet => "Lock Screen Set!",
            Notice::BothScreensSet => "Wallpaper Set for Both Screens!",
            Notice::SetFailed => "Failed to set wallpaper!",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Notice::PermissionDenied | Notice::SelectImageFirst | Notice::SetFailed
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Surface that shows short transient messages (a toast, a status line).
pub trait Notifier {
    fn notify(&self, notice: Notice);
}
