//! Auto-rotation and its idle resume.
//!
//! Pressing the pointer hands the camera to the user immediately. Releasing it
//! issues a [`ResumeTicket`]; the caller schedules it after [`IDLE_RESUME`] and
//! hands it back. Only the most recently issued ticket can resume rotation, so
//! a stale timer that was not cancelled in time does nothing.

use core::time::Duration;

/// Idle time after pointer release before auto-rotation resumes.
pub const IDLE_RESUME: Duration = Duration::from_secs(3);

/// Who drives the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationMode {
    #[default]
    AutoRotating,
    UserControlled,
}

/// Permission to resume auto-rotation, valid until superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a ticket does nothing until it is scheduled and redeemed"]
pub struct ResumeTicket(u64);

/// Tracks the rotation mode and the single pending resume.
#[derive(Debug, Default)]
pub struct RotationController {
    mode: RotationMode,
    issued: u64,
    pending: Option<u64>,
}

impl RotationController {
    /// Start auto-rotating with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> RotationMode {
        self.mode
    }

    /// Whether a resume is waiting on its timer.
    #[must_use]
    pub const fn has_pending_resume(&self) -> bool {
        self.pending.is_some()
    }

    /// Pointer pressed: the user takes over and any pending resume is void.
    ///
    /// Returns whether the mode changed.
    pub fn pointer_down(&mut self) -> bool {
        self.pending = None;
        let changed = self.mode != RotationMode::UserControlled;
        self.mode = RotationMode::UserControlled;
        changed
    }

    /// Pointer released: issue a ticket that replaces any earlier one.
    ///
    /// Returns `None` while auto-rotating, since there is nothing to resume.
    pub fn pointer_up(&mut self) -> Option<ResumeTicket> {
        if self.mode == RotationMode::AutoRotating {
            return None;
        }
        self.issued = self.issued.wrapping_add(1);
        self.pending = Some(self.issued);
        Some(ResumeTicket(self.issued))
    }

    /// Timer fired: resume if `ticket` is still the pending one.
    ///
    /// Returns whether rotation resumed.
    pub fn resume(&mut self, ticket: ResumeTicket) -> bool {
        if self.pending != Some(ticket.0) {
            return false;
        }
        self.pending = None;
        self.mode = RotationMode::AutoRotating;
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_release_then_idle_resumes() {
        let mut rotation = RotationController::new();
        assert!(rotation.pointer_down());
        let ticket = rotation.pointer_up().unwrap();
        assert_eq!(rotation.mode(), RotationMode::UserControlled);
        assert!(rotation.resume(ticket));
        assert_eq!(rotation.mode(), RotationMode::AutoRotating);
        assert!(!rotation.has_pending_resume());
    }

    #[test]
    fn test_press_cancels_pending_resume() {
        let mut rotation = RotationController::new();
        rotation.pointer_down();
        let ticket = rotation.pointer_up().unwrap();
        rotation.pointer_down();
        assert!(!rotation.resume(ticket));
        assert_eq!(rotation.mode(), RotationMode::UserControlled);
    }

    #[test]
    fn test_only_latest_ticket_resumes() {
        let mut rotation = RotationController::new();
        rotation.pointer_down();
        let first = rotation.pointer_up().unwrap();
        rotation.pointer_down();
        let second = rotation.pointer_up().unwrap();
        assert!(!rotation.resume(first));
        assert!(rotation.resume(second));
        assert!(!rotation.resume(second));
    }

    #[test]
    fn test_release_without_press_issues_nothing() {
        let mut rotation = RotationController::new();
        assert!(rotation.pointer_up().is_none());
    }
}
