use anyhow::Result;

use crate::platform::MediaPermission;

/// Platform permission service.
pub trait PermissionService {
    /// Whether `permission` is granted right now. Never cached by callers.
    fn check(&self, permission: MediaPermission) -> bool;

    /// Show the platform prompt once and report whether it was granted.
    fn request(&self, permission: MediaPermission) -> Result<bool>;
}

/// Gallery-read gate for one pick action.
#[derive(Debug, Clone, Copy)]
pub struct PermissionGate {
    permission: MediaPermission,
}

impl PermissionGate {
    pub fn new(permission: MediaPermission) -> Self {
        Self { permission }
    }

    pub fn permission(&self) -> MediaPermission {
        self.permission
    }

    pub fn is_granted<S: PermissionService + ?Sized>(&self, service: &S) -> bool {
        service.check(self.permission)
    }

    /// Prompt at most once. A prompt that errors counts as a denial.
    pub fn request_if_needed<S: PermissionService + ?Sized>(&self, service: &S) -> bool {
        if self.is_granted(service) {
            return true;
        }

        log::info!("Requesting {}", self.permission.id());
        match service.request(self.permission) {
            Ok(granted) => granted,
            Err(e) => {
                log::error!("Permission request for {} failed: {:#}", self.permission.id(), e);
                false
            }
        }
    }
}
