//! Collaborators for desktop sessions (Linux, macOS, Windows).

mod decoder;
mod permission;
mod background;

pub use decoder::ImageDecoder;
pub use permission::PictureDirPermissions;
pub use background::DesktopWallpaper;

pub fn get_desktop_environment() -> String {
    if let Ok(desktop_session) = std::env::var("DESKTOP_SESSION") {
        let session = normalize_session(&desktop_session);
        if session != "unknown" {
            return session;
        }
    }

    if let Ok(current) = std::env::var("XDG_CURRENT_DESKTOP") {
        // e.g. "ubuntu:GNOME"
        for part in current.split(':') {
            let session = normalize_session(part);
            if session != "unknown" {
                return session;
            }
        }
    }

    if std::env::var("KDE_FULL_SESSION").unwrap_or_default() == "true" {
        return "kde".to_string();
    }

    if std::env::var("GNOME_DESKTOP_SESSION_ID").is_ok() {
        return "gnome".to_string();
    }

    "unknown".to_string()
}

fn normalize_session(raw: &str) -> String {
    let session = raw.trim().to_lowercase();
    if ["gnome", "unity", "cinnamon", "mate", "xfce4", "lxde", "kde"].contains(&session.as_str()) {
        return session;
    }

    if session.contains("xfce") || session.starts_with("xubuntu") {
        "xfce4".to_string()
    } else if session.starts_with("ubuntustudio") || session.starts_with("kubuntu") || session.contains("plasma") {
        "kde".to_string()
    } else if session.starts_with("ubuntu") || session.contains("gnome") {
        "gnome".to_string()
    } else if session.starts_with("lubuntu") {
        "lxde".to_string()
    } else {
        "unknown".to_string()
    }
}
