use serde::{Deserialize, Serialize};

/// Explicit one-shot countdown, ticked with the frame interval.
///
/// Used for the deferred level reset: the session arms it on completion
/// and checks it at tick boundaries, so deferred work never interleaves
/// with a frame in progress and tests can drive time deterministically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OneShotTimer {
    remaining: Option<f32>,
}

impl OneShotTimer {
    pub fn idle() -> Self {
        Self { remaining: None }
    }

    pub fn start(&mut self, secs: f32) {
        self.remaining = Some(secs);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance by `dt` seconds. Returns `true` exactly once, on the tick
    /// the countdown crosses zero; the timer disarms itself after firing.
    pub fn tick(&mut self, dt: f32) -> bool {
        match self.remaining {
            Some(left) => {
                let left = left - dt;
                if left <= 0.0 {
                    self.remaining = None;
                    true
                } else {
                    self.remaining = Some(left);
                    false
                }
            },
            None => false,
        }
    }
}
