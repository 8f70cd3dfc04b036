//! Toggle debounce
//!
//! Filters activation timestamps so accepted color toggles are at least
//! `window_ms` apart. Rejected activations leave no trace.

#[derive(Debug, Clone, PartialEq)]
pub struct InputDebouncer {
    window_ms: f64,
    /// Timestamp of the last accepted toggle; `None` until the first one
    last_accepted: Option<f64>,
}

impl InputDebouncer {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            last_accepted: None,
        }
    }

    /// Whether an activation at `now_ms` becomes a toggle
    pub fn accept(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_accepted {
            if now_ms - last < self.window_ms {
                return false;
            }
        }
        self.last_accepted = Some(now_ms);
        true
    }

    pub fn last_accepted(&self) -> Option<f64> {
        self.last_accepted
    }

    /// Forget the previous toggle
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}
