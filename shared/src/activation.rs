//! Duplicate-trigger suppression for interactive controls.
//!
//! One tap in the Telegram clients can fire `touchstart`, `pointerdown` and
//! `click` for the same element. Every handler funnels into
//! [`ActivationGuard::try_activate`]: press events that land within the
//! window count once, the `click` that ends a press is dropped however long
//! the press was held, and nothing wins while the previous action is still
//! running.

/// Which kind of DOM event asked for the activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// `pointerdown` / `touchstart`
    Press,
    /// `click`, including keyboard activation
    Click,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivationGuard {
    window_ms: f64,
    last_started_at: Option<f64>,
    pending: bool,
    /// A press already activated; its trailing `click` must not
    click_consumed: bool,
}

impl ActivationGuard {
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms: f64::from(window_ms),
            last_started_at: None,
            pending: false,
            click_consumed: false,
        }
    }

    /// Gesture-aware entry point for DOM handlers. Returns `true` if the
    /// action should run; the caller must then call
    /// [`ActivationGuard::finish`].
    pub fn try_activate(&mut self, now_ms: f64, trigger: Trigger) -> bool {
        match trigger {
            Trigger::Click if self.click_consumed => {
                self.click_consumed = false;
                false
            }
            Trigger::Click => self.try_begin(now_ms),
            Trigger::Press => {
                // Every press ends in a click, whether or not it activates
                self.click_consumed = true;
                self.try_begin(now_ms)
            }
        }
    }

    /// Returns `true` if the action should run. The caller must call
    /// [`ActivationGuard::finish`] once the action is done.
    pub fn try_begin(&mut self, now_ms: f64) -> bool {
        if self.pending {
            return false;
        }
        if let Some(last) = self.last_started_at {
            if now_ms >= last && now_ms - last < self.window_ms {
                return false;
            }
        }
        self.pending = true;
        self.last_started_at = Some(now_ms);
        true
    }

    pub fn finish(&mut self) {
        self.pending = false;
    }
}
