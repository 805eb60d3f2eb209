const DEFAULT_WEBAPP_URL: &str = "https://anita.app";

/// Where every "Get Started" button sends the visitor.
/// Can be overridden at build time with `ANITA_WEBAPP_URL`.
pub fn get_webapp_url() -> &'static str {
    option_env!("ANITA_WEBAPP_URL").unwrap_or(DEFAULT_WEBAPP_URL)
}

/// Tunables for the scroll reveal and stat counter animations.
///
/// None of the delays are load-bearing, they only need to be long enough for
/// the hero animation to settle and short enough that nothing looks stuck.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealConfig {
    /// Fraction of an element that must be visible before it is revealed.
    pub threshold: f64,
    /// Extra space below the viewport that already counts as "in view".
    pub root_margin_bottom_px: i32,
    /// Reveal everything this long after mount when the browser has no IntersectionObserver.
    pub unsupported_fallback_ms: u32,
    /// Reveal anything still hidden this long after mount.
    pub unconditional_fallback_ms: u32,
    /// Auto-play delay for counters that were on screen at mount.
    pub stats_autoplay_delay_ms: u32,
    pub counter_duration_ms: u32,
    /// Navbar gets the "scrolled" look past this offset.
    pub scrolled_threshold_px: f64,
}

pub const MIN_THRESHOLD: f64 = 0.1;
pub const MAX_THRESHOLD: f64 = 0.3;

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            root_margin_bottom_px: 50,
            unsupported_fallback_ms: 1_500,
            unconditional_fallback_ms: 2_000,
            stats_autoplay_delay_ms: 1_200,
            counter_duration_ms: 2_000,
            scrolled_threshold_px: 50.0,
        }
    }
}

impl RevealConfig {
    /// Threshold clamped into the band the page styling was tuned for.
    pub fn effective_threshold(&self) -> f64 {
        if self.threshold.is_nan() {
            return MIN_THRESHOLD;
        }
        self.threshold.clamp(MIN_THRESHOLD, MAX_THRESHOLD)
    }

    /// CSS margin string for the observer root.
    pub fn root_margin(&self) -> String {
        format!("0px 0px {}px 0px", self.root_margin_bottom_px)
    }
}
