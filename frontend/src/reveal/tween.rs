/// Quartic ease-out: fast start, slow landing.
pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TweenSample {
    pub value: u32,
    pub finished: bool,
}

/// Animates an integer from 0 to `target` over `duration_ms`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    target: u32,
    duration_ms: f64,
    started_at: f64,
}

impl Tween {
    pub fn new(target: u32, duration_ms: u32, started_at: f64) -> Self {
        Self {
            target,
            duration_ms: f64::from(duration_ms),
            started_at,
        }
    }

    /// Normalized time in `[0, 1]`. Frame timestamps can land slightly before
    /// the start sample, so negative elapsed time counts as zero.
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let elapsed = (now - self.started_at).max(0.0);
        (elapsed / self.duration_ms).min(1.0)
    }

    pub fn sample(&self, now: f64) -> TweenSample {
        let progress = self.progress(now);
        if progress >= 1.0 {
            // Publish the exact target so flooring never leaves us one short.
            return TweenSample {
                value: self.target,
                finished: true,
            };
        }
        let eased = ease_out_quart(progress);
        let value = (f64::from(self.target) * eased).floor() as u32;
        TweenSample {
            value: value.min(self.target),
            finished: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_both_ends() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert!(ease_out_quart(0.5) > 0.9);
    }

    #[test]
    fn starts_at_zero_and_ends_at_target() {
        let tween = Tween::new(32, 2_000, 1_000.0);
        assert_eq!(tween.sample(1_000.0), TweenSample { value: 0, finished: false });
        assert_eq!(tween.sample(3_000.0), TweenSample { value: 32, finished: true });
        assert_eq!(tween.sample(10_000.0).value, 32);
    }

    #[test]
    fn halfway_is_mostly_done() {
        let tween = Tween::new(200, 2_000, 0.0);
        // 1 - 0.5^4 = 0.9375
        assert_eq!(tween.sample(1_000.0).value, 187);
    }

    #[test]
    fn values_never_decrease() {
        let tween = Tween::new(100, 2_000, 0.0);
        let mut last = 0;
        let mut now = 0.0;
        while now <= 2_100.0 {
            let sample = tween.sample(now);
            assert!(sample.value >= last, "{} dropped below {} at {}", sample.value, last, now);
            last = sample.value;
            now += 16.7;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn frame_before_start_counts_as_zero_elapsed() {
        let tween = Tween::new(32, 2_000, 500.0);
        assert_eq!(tween.progress(499.2), 0.0);
        assert_eq!(tween.sample(499.2).value, 0);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let tween = Tween::new(32, 0, 0.0);
        assert_eq!(tween.sample(0.0), TweenSample { value: 32, finished: true });
    }

    #[test]
    fn zero_target_stays_at_zero() {
        let tween = Tween::new(0, 2_000, 0.0);
        assert_eq!(tween.sample(700.0).value, 0);
        assert!(tween.sample(2_000.0).finished);
    }
}
