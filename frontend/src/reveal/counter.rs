use super::tween::Tween;

/// Label, target and suffix for each headline stat.
pub const HEADLINE: [(&str, u32, &str); 3] = [
    ("Smart Questions", 32, "+"),
    ("Beta Users", 200, "+"),
    ("Secure", 100, "%"),
];

/// One headline number in the hero stats block.
#[derive(Clone, Debug, PartialEq)]
pub struct StatCounter {
    target: u32,
    current: u32,
    tween: Option<Tween>,
}

impl StatCounter {
    pub fn new(target: u32) -> Self {
        Self {
            target,
            current: 0,
            tween: None,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn is_started(&self) -> bool {
        self.tween.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.current == self.target && self.is_started()
    }

    /// Starting twice keeps the first start time.
    pub fn start(&mut self, now: f64, duration_ms: u32) {
        if self.tween.is_none() {
            self.tween = Some(Tween::new(self.target, duration_ms, now));
        }
    }

    /// Advances to `now`. Returns true while more frames are needed.
    pub fn tick(&mut self, now: f64) -> bool {
        let Some(tween) = self.tween else {
            return false;
        };
        if self.is_finished() {
            return false;
        }
        let sample = tween.sample(now);
        // Frames can arrive out of order around the start sample.
        self.current = self.current.max(sample.value);
        !sample.finished
    }
}

/// The three stats that share one trigger.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterSet {
    counters: Vec<StatCounter>,
    duration_ms: u32,
}

impl CounterSet {
    pub fn new(counters: Vec<StatCounter>, duration_ms: u32) -> Self {
        Self {
            counters,
            duration_ms,
        }
    }

    /// Smart questions, beta users and the secure percentage.
    pub fn headline(duration_ms: u32) -> Self {
        let counters = HEADLINE
            .iter()
            .map(|&(_, target, _)| StatCounter::new(target))
            .collect();
        Self::new(counters, duration_ms)
    }

    pub fn values(&self) -> Vec<u32> {
        self.counters.iter().map(StatCounter::current).collect()
    }

    pub fn start(&mut self, now: f64) {
        let duration_ms = self.duration_ms;
        for counter in &mut self.counters {
            counter.start(now, duration_ms);
        }
    }

    /// Returns true while any counter still needs frames.
    pub fn tick(&mut self, now: f64) -> bool {
        let mut running = false;
        for counter in &mut self.counters {
            running |= counter.tick(now);
        }
        running
    }
}

#[cfg(test)]
impl CounterSet {
    pub fn counters(&self) -> &[StatCounter] {
        &self.counters
    }

    pub fn is_started(&self) -> bool {
        self.counters.iter().any(StatCounter::is_started)
    }
}
