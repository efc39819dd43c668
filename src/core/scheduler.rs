//! Countdown timer table for delayed state transitions.
//!
//! Holster fade-out, the cover-shot hold window, and the crouch camera
//! debounce are all modeled as explicit countdown timers instead of
//! suspended coroutines. The table is advanced once per frame by the
//! coordinator; completions are applied synchronously within that tick,
//! and cancellation is a plain data mutation.

/// The delayed transitions the character can have pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Keeps the weapon layer visible while the holster animation fades out.
    HolsterFadeout,
    /// Hold window during which the character leans out of cover to shoot.
    CoverShootWindow,
    /// Debounce before the camera applies its crouch height offset.
    CrouchCameraDelay,
}

#[derive(Debug)]
struct EffectTimer {
    kind: EffectKind,
    remaining: f32,
}

/// A small set of independent countdown timers, at most one per kind.
///
/// Starting a kind that is already pending replaces the old timer without
/// running its completion; a timer completes at most once.
#[derive(Debug, Default)]
pub struct EffectTimers {
    entries: Vec<EffectTimer>,
}

impl EffectTimers {
    /// Start (or restart) the timer for `kind`. A pending timer of the same
    /// kind is cancelled and replaced; its completion never runs.
    pub fn start(&mut self, kind: EffectKind, duration: f32) {
        self.cancel(kind);
        self.entries.push(EffectTimer {
            kind,
            remaining: duration,
        });
    }

    /// Cancel the pending timer for `kind`, if any. Returns whether one
    /// was pending.
    pub fn cancel(&mut self, kind: EffectKind) -> bool {
        let before = self.entries.len();
        self.entries.retain(|timer| timer.kind != kind);
        self.entries.len() != before
    }

    pub fn is_pending(&self, kind: EffectKind) -> bool {
        self.entries.iter().any(|timer| timer.kind == kind)
    }

    /// Seconds left on the pending timer for `kind`, if any.
    pub fn remaining(&self, kind: EffectKind) -> Option<f32> {
        self.entries
            .iter()
            .find(|timer| timer.kind == kind)
            .map(|timer| timer.remaining)
    }

    /// Advance all timers by `dt` and return the kinds that completed this
    /// frame. Completed timers are removed before returning, so a kind can
    /// never be reported twice for one start.
    pub fn tick(&mut self, dt: f32) -> Vec<EffectKind> {
        let mut completed = Vec::new();
        self.entries.retain_mut(|timer| {
            timer.remaining -= dt;
            if timer.remaining <= 0.0 {
                completed.push(timer.kind);
                false
            } else {
                true
            }
        });
        completed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_fires_once_at_expiry() {
        let mut timers = EffectTimers::default();
        timers.start(EffectKind::HolsterFadeout, 0.4);

        assert!(timers.is_pending(EffectKind::HolsterFadeout));
        assert!(timers.tick(0.2).is_empty());
        assert_eq!(timers.tick(0.25), vec![EffectKind::HolsterFadeout]);

        // Nothing left to fire.
        assert!(timers.tick(10.0).is_empty());
        assert!(!timers.is_pending(EffectKind::HolsterFadeout));
    }

    #[test]
    fn restart_replaces_without_firing() {
        let mut timers = EffectTimers::default();
        timers.start(EffectKind::HolsterFadeout, 0.4);
        timers.tick(0.3);

        // Restarting resets the countdown; the first timer never completes.
        timers.start(EffectKind::HolsterFadeout, 0.4);
        assert!(timers.tick(0.3).is_empty());
        assert_eq!(timers.tick(0.2), vec![EffectKind::HolsterFadeout]);
    }

    #[test]
    fn cancel_suppresses_completion() {
        let mut timers = EffectTimers::default();
        timers.start(EffectKind::CoverShootWindow, 0.15);

        assert!(timers.cancel(EffectKind::CoverShootWindow));
        assert!(!timers.cancel(EffectKind::CoverShootWindow));
        assert!(timers.tick(1.0).is_empty());
    }

    #[test]
    fn kinds_are_independent() {
        let mut timers = EffectTimers::default();
        timers.start(EffectKind::HolsterFadeout, 0.4);
        timers.start(EffectKind::CrouchCameraDelay, 0.1);

        assert_eq!(timers.tick(0.2), vec![EffectKind::CrouchCameraDelay]);
        assert!(timers.is_pending(EffectKind::HolsterFadeout));
        assert_eq!(timers.remaining(EffectKind::HolsterFadeout), Some(0.4 - 0.2));
    }
}
