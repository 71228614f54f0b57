//! Tweening/interpolation

use std::time::Duration;
use super::Easing;

/// A one-shot tween between two values
#[derive(Debug, Clone)]
pub struct Tween {
    pub start: f32,
    pub end: f32,
    pub duration: Duration,
    elapsed: Duration,
    pub easing: Easing,
}

impl Tween {
    pub fn new(start: f32, end: f32, duration: Duration) -> Self {
        Self {
            start,
            end,
            duration,
            elapsed: Duration::ZERO,
            easing: Easing::Linear,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Advance the tween by `dt`
    pub fn update(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current value
    pub fn value(&self) -> f32 {
        let t = self.easing.apply(self.progress());
        self.start + (self.end - self.start) * t
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_in_reaches_end() {
        let mut fade = Tween::new(0.5, 1.0, Duration::from_millis(400))
            .with_easing(Easing::FastOutSlowIn);
        assert_eq!(fade.value(), 0.5);
        fade.update(Duration::from_millis(200));
        assert!(fade.value() > 0.5 && fade.value() < 1.0);
        fade.update(Duration::from_secs(1));
        assert!(fade.is_complete());
        assert_eq!(fade.value(), 1.0);
        fade.reset();
        assert_eq!(fade.value(), 0.5);
    }

    #[test]
    fn test_zero_duration_is_complete() {
        let fade = Tween::new(0.0, 1.0, Duration::ZERO);
        assert!(fade.is_complete());
        assert_eq!(fade.value(), 1.0);
    }
}
