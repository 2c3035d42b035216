//! Cosmetic easing of the displayed win rate. Nothing here touches stats or
//! storage.

use std::time::Duration;

/// Linear ramp from `start` to `target` over a fixed number of steps.
#[derive(Debug, Clone)]
pub struct RateAnimator {
    start: f64,
    target: f64,
    steps: u32,
    current_step: u32,
    interval: Duration,
}

impl RateAnimator {
    pub fn new(start: f64, target: f64, duration: Duration, steps: u32) -> Self {
        let steps = steps.max(1);
        RateAnimator {
            start,
            target,
            steps,
            current_step: 0,
            interval: duration / steps,
        }
    }

    /// Wall-clock gap between two ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_finished(&self) -> bool {
        self.current_step >= self.steps
    }
}

impl Iterator for RateAnimator {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.is_finished() {
            return None;
        }
        self.current_step += 1;

        if self.current_step == self.steps {
            return Some(self.target);
        }
        let progress = self.current_step as f64 / self.steps as f64;
        Some(self.start + (self.target - self.start) * progress)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.steps - self.current_step) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for RateAnimator {}

/// The value currently on screen plus whatever animation is driving it.
#[derive(Debug, Clone)]
pub struct DisplayRate {
    shown: f64,
    duration: Duration,
    steps: u32,
    active: Option<RateAnimator>,
}

impl DisplayRate {
    pub fn new(initial: f64, duration: Duration, steps: u32) -> Self {
        DisplayRate {
            shown: initial,
            duration,
            steps,
            active: None,
        }
    }

    pub fn shown(&self) -> f64 {
        self.shown
    }

    pub fn is_animating(&self) -> bool {
        self.active.as_ref().is_some_and(|a| !a.is_finished())
    }

    /// Starts a fresh ramp from the value on screen, dropping any ramp in
    /// progress.
    pub fn retarget(&mut self, target: f64) -> Duration {
        let animator = RateAnimator::new(self.shown, target, self.duration, self.steps);
        let interval = animator.interval();
        self.active = Some(animator);
        interval
    }

    /// Advances one step. `None` once the ramp is done.
    pub fn tick(&mut self) -> Option<f64> {
        let value = self.active.as_mut()?.next();
        match value {
            Some(v) => {
                self.shown = v;
                Some(v)
            }
            None => {
                self.active = None;
                None
            }
        }
    }
}
