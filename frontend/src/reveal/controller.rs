//! Reveal bookkeeping for the landing page.
//!
//! The controller never touches the DOM. Every entry point takes a host event
//! (an observer report, a scroll, a timer firing) and returns the [`Effect`]s
//! the page has to carry out, which keeps the whole scheduler testable off
//! the browser.

use std::fmt;

use crate::config::RevealConfig;

use super::geometry::{Rect, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Page regions that fade in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    HeroContent,
    HeroMedia,
    SectionHeader(&'static str),
    FeatureGrid,
    Steps,
    Screenshots,
    CallToAction,
    Footer,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::HeroContent => write!(f, "hero content"),
            Region::HeroMedia => write!(f, "hero media"),
            Region::SectionHeader(section) => write!(f, "{} header", section),
            Region::FeatureGrid => write!(f, "feature grid"),
            Region::Steps => write!(f, "steps"),
            Region::Screenshots => write!(f, "screenshots"),
            Region::CallToAction => write!(f, "call to action"),
            Region::Footer => write!(f, "footer"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed,
}

/// What caused a reveal. Only the observer path keeps the entry delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealCause {
    InitiallyVisible,
    Observed,
    UnsupportedFallback,
    UnconditionalFallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timer {
    UnsupportedFallback,
    UnconditionalFallback,
    StatsAutoplay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserInput {
    Scroll,
    Wheel,
    Touch,
}

/// A region offered for registration. `rect` is `None` when the node was
/// not rendered yet.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub region: Region,
    pub rect: Option<Rect>,
    pub delay_ms: Option<u32>,
}

impl Candidate {
    pub fn new(region: Region, rect: Option<Rect>) -> Self {
        Self {
            region,
            rect,
            delay_ms: None,
        }
    }

    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }
}

/// Host facts sampled once at mount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MountContext {
    pub viewport: Viewport,
    pub scroll_y: f64,
    pub observer_supported: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WatchedElement {
    pub id: ElementId,
    pub region: Region,
    pub state: RevealState,
    pub delay_ms: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Reveal {
        id: ElementId,
        delay_ms: Option<u32>,
    },
    /// Hidden styling may apply from here on.
    Arm,
    Observe(ElementId),
    Unobserve(ElementId),
    ObserveStats,
    UnobserveStats,
    StartCounters,
    SetScrolled(bool),
    Schedule {
        timer: Timer,
        after_ms: u32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StatsPhase {
    Waiting,
    Started,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct StatsTrigger {
    visible_at_mount: bool,
    in_view: bool,
    observed: bool,
    phase: StatsPhase,
}

pub struct RevealController {
    config: RevealConfig,
    elements: Vec<WatchedElement>,
    stats: Option<StatsTrigger>,
    observer_supported: bool,
    user_interacted: bool,
    scrolled: bool,
    torn_down: bool,
}

impl RevealController {
    /// Registers every candidate and returns the effects that set up the page.
    ///
    /// Effects come out in mount order: immediate reveals for everything
    /// already on screen, then [`Effect::Arm`], then observation and timers.
    pub fn mount(
        config: RevealConfig,
        candidates: Vec<Candidate>,
        stats_rect: Option<Rect>,
        context: MountContext,
    ) -> (Self, Vec<Effect>) {
        let mut elements = Vec::with_capacity(candidates.len());
        let mut reveals = Vec::new();
        let mut observes = Vec::new();

        for (index, candidate) in candidates.into_iter().enumerate() {
            let id = ElementId(index);
            let Some(rect) = candidate.rect else {
                log::debug!("reveal: {} not rendered, skipping", candidate.region);
                continue;
            };
            let state = if rect.intersects(&context.viewport) {
                log::debug!(
                    "reveal: {} revealed ({:?})",
                    candidate.region,
                    RevealCause::InitiallyVisible
                );
                reveals.push(Effect::Reveal { id, delay_ms: None });
                RevealState::Revealed
            } else {
                if context.observer_supported {
                    observes.push(Effect::Observe(id));
                }
                RevealState::Pending
            };
            elements.push(WatchedElement {
                id,
                region: candidate.region,
                state,
                delay_ms: candidate.delay_ms,
            });
        }

        let scrolled = context.scroll_y > config.scrolled_threshold_px;

        let mut effects = reveals;
        effects.push(Effect::Arm);
        effects.extend(observes);
        if scrolled {
            effects.push(Effect::SetScrolled(true));
        }

        let stats = stats_rect.map(|rect| {
            let visible_at_mount = rect.intersects(&context.viewport);
            if context.observer_supported {
                effects.push(Effect::ObserveStats);
            }
            if visible_at_mount {
                effects.push(Effect::Schedule {
                    timer: Timer::StatsAutoplay,
                    after_ms: config.stats_autoplay_delay_ms,
                });
            }
            StatsTrigger {
                visible_at_mount,
                in_view: visible_at_mount,
                observed: context.observer_supported,
                phase: StatsPhase::Waiting,
            }
        });

        if !context.observer_supported {
            log::info!("reveal: IntersectionObserver unavailable, relying on timed fallback");
            effects.push(Effect::Schedule {
                timer: Timer::UnsupportedFallback,
                after_ms: config.unsupported_fallback_ms,
            });
        }
        effects.push(Effect::Schedule {
            timer: Timer::UnconditionalFallback,
            after_ms: config.unconditional_fallback_ms,
        });

        let controller = Self {
            config,
            elements,
            stats,
            observer_supported: context.observer_supported,
            user_interacted: false,
            scrolled,
            torn_down: false,
        };
        (controller, effects)
    }

    pub fn pending_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|element| element.state == RevealState::Pending)
            .count()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// An observer report for a watched element.
    pub fn on_intersection(&mut self, id: ElementId, is_intersecting: bool) -> Vec<Effect> {
        if self.torn_down || !is_intersecting {
            return Vec::new();
        }
        let mut effects = Vec::new();
        self.reveal(id, RevealCause::Observed, &mut effects);
        effects
    }

    /// An observer report for the stats block.
    pub fn on_stats_visibility(&mut self, is_intersecting: bool) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.torn_down {
            return effects;
        }
        let user_interacted = self.user_interacted;
        let Some(stats) = self.stats.as_mut() else {
            return effects;
        };
        stats.in_view = is_intersecting;
        if is_intersecting
            && stats.phase == StatsPhase::Waiting
            && (user_interacted || !stats.visible_at_mount)
        {
            self.start_counters(&mut effects);
        }
        effects
    }

    /// Scroll, wheel or touch input from the visitor.
    pub fn on_user_input(&mut self, input: UserInput) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.torn_down {
            return effects;
        }
        if !self.user_interacted {
            log::debug!("reveal: first user input ({:?})", input);
            self.user_interacted = true;
        }
        let waiting_in_view = matches!(
            self.stats,
            Some(StatsTrigger {
                in_view: true,
                phase: StatsPhase::Waiting,
                ..
            })
        );
        if waiting_in_view {
            self.start_counters(&mut effects);
        }
        effects
    }

    /// A scroll event: counts as input and updates the navbar state.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Vec<Effect> {
        let mut effects = self.on_user_input(UserInput::Scroll);
        if self.torn_down {
            return effects;
        }
        let scrolled = scroll_y > self.config.scrolled_threshold_px;
        if scrolled != self.scrolled {
            self.scrolled = scrolled;
            effects.push(Effect::SetScrolled(scrolled));
        }
        effects
    }

    pub fn on_timer(&mut self, timer: Timer) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.torn_down {
            return effects;
        }
        match timer {
            Timer::UnsupportedFallback => {
                self.reveal_all_pending(RevealCause::UnsupportedFallback, &mut effects);
                let waiting = matches!(
                    self.stats,
                    Some(StatsTrigger {
                        phase: StatsPhase::Waiting,
                        ..
                    })
                );
                if waiting {
                    self.start_counters(&mut effects);
                }
            }
            Timer::UnconditionalFallback => {
                let before = self.pending_count();
                self.reveal_all_pending(RevealCause::UnconditionalFallback, &mut effects);
                if before > 0 {
                    log::info!("reveal: fallback forced {} element(s) visible", before);
                }
            }
            Timer::StatsAutoplay => {
                // Once the visitor interacts the visibility path takes over.
                let autoplay = !self.user_interacted
                    && matches!(
                        self.stats,
                        Some(StatsTrigger {
                            visible_at_mount: true,
                            phase: StatsPhase::Waiting,
                            ..
                        })
                    );
                if autoplay {
                    log::debug!("reveal: auto-playing counters");
                    self.start_counters(&mut effects);
                }
            }
        }
        effects
    }

    /// After teardown every entry point is a no-op.
    pub fn teardown(&mut self) {
        if !self.torn_down {
            log::debug!("reveal: teardown with {} element(s) pending", self.pending_count());
        }
        self.torn_down = true;
    }

    fn reveal(&mut self, id: ElementId, cause: RevealCause, effects: &mut Vec<Effect>) {
        let observer_supported = self.observer_supported;
        let Some(element) = self.elements.iter_mut().find(|element| element.id == id) else {
            log::warn!("reveal: unknown element {}", id);
            return;
        };
        if element.state == RevealState::Revealed {
            return;
        }
        element.state = RevealState::Revealed;
        let delay_ms = match cause {
            RevealCause::Observed => element.delay_ms,
            _ => None,
        };
        log::debug!("reveal: {} revealed ({:?})", element.region, cause);
        effects.push(Effect::Reveal { id, delay_ms });
        if observer_supported {
            effects.push(Effect::Unobserve(id));
        }
    }

    fn reveal_all_pending(&mut self, cause: RevealCause, effects: &mut Vec<Effect>) {
        let pending: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|element| element.state == RevealState::Pending)
            .map(|element| element.id)
            .collect();
        for id in pending {
            self.reveal(id, cause, effects);
        }
    }

    fn start_counters(&mut self, effects: &mut Vec<Effect>) {
        let Some(stats) = self.stats.as_mut() else {
            return;
        };
        if stats.phase == StatsPhase::Started {
            return;
        }
        stats.phase = StatsPhase::Started;
        if stats.observed {
            stats.observed = false;
            effects.push(Effect::UnobserveStats);
        }
        effects.push(Effect::StartCounters);
    }
}

// Inspection used by the state-machine tests.
#[cfg(test)]
impl RevealController {
    pub fn elements(&self) -> &[WatchedElement] {
        &self.elements
    }

    pub fn state(&self, id: ElementId) -> Option<RevealState> {
        self.elements
            .iter()
            .find(|element| element.id == id)
            .map(|element| element.state)
    }

    pub fn user_interacted(&self) -> bool {
        self.user_interacted
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn counters_started(&self) -> bool {
        matches!(
            self.stats,
            Some(StatsTrigger {
                phase: StatsPhase::Started,
                ..
            })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1280.0,
        height: 800.0,
    };

    fn on_screen() -> Option<Rect> {
        Some(Rect::new(100.0, 1200.0, 500.0, 80.0))
    }

    fn below_fold(offset: f64) -> Option<Rect> {
        Some(Rect::new(1000.0 + offset, 1200.0, 1400.0 + offset, 80.0))
    }

    fn context(observer_supported: bool) -> MountContext {
        MountContext {
            viewport: VIEWPORT,
            scroll_y: 0.0,
            observer_supported,
        }
    }

    fn page() -> Vec<Candidate> {
        vec![
            Candidate::new(Region::HeroContent, on_screen()),
            Candidate::new(Region::HeroMedia, on_screen()).with_delay(150),
            Candidate::new(Region::SectionHeader("features"), below_fold(0.0)),
            Candidate::new(Region::FeatureGrid, below_fold(400.0)).with_delay(100),
            Candidate::new(Region::Steps, below_fold(1200.0)),
            Candidate::new(Region::Footer, below_fold(3000.0)),
        ]
    }

    fn mount(stats_rect: Option<Rect>, observer_supported: bool) -> (RevealController, Vec<Effect>) {
        RevealController::mount(
            RevealConfig::default(),
            page(),
            stats_rect,
            context(observer_supported),
        )
    }

    fn all_revealed(controller: &RevealController) -> bool {
        controller
            .elements()
            .iter()
            .all(|element| element.state == RevealState::Revealed)
    }

    #[test]
    fn on_screen_elements_reveal_before_arming() {
        let (controller, effects) = mount(None, true);

        let arm_at = effects.iter().position(|e| *e == Effect::Arm).unwrap();
        let reveal_positions: Vec<usize> = effects
            .iter()
            .enumerate()
            .filter(|(_, e)| matches!(e, Effect::Reveal { .. }))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(reveal_positions.len(), 2);
        assert!(reveal_positions.iter().all(|&i| i < arm_at));

        let first_observe = effects
            .iter()
            .position(|e| matches!(e, Effect::Observe(_)))
            .unwrap();
        assert!(first_observe > arm_at);

        assert_eq!(controller.state(ElementId(0)), Some(RevealState::Revealed));
        assert_eq!(controller.state(ElementId(1)), Some(RevealState::Revealed));
        assert_eq!(controller.pending_count(), 4);
    }

    #[test]
    fn initial_reveal_skips_entry_delay() {
        let (_, effects) = mount(None, true);
        assert!(effects.contains(&Effect::Reveal {
            id: ElementId(1),
            delay_ms: None
        }));
        assert!(!effects.contains(&Effect::Observe(ElementId(1))));
    }

    #[test]
    fn missing_regions_are_skipped() {
        let candidates = vec![
            Candidate::new(Region::HeroContent, on_screen()),
            Candidate::new(Region::Screenshots, None),
            Candidate::new(Region::CallToAction, below_fold(0.0)),
        ];
        let (controller, effects) =
            RevealController::mount(RevealConfig::default(), candidates, None, context(true));
        assert_eq!(controller.elements().len(), 2);
        assert_eq!(controller.state(ElementId(1)), None);
        assert_eq!(controller.state(ElementId(2)), Some(RevealState::Pending));
        assert!(effects.contains(&Effect::Observe(ElementId(2))));
    }

    #[test]
    fn observed_element_reveals_once_with_its_delay() {
        let (mut controller, _) = mount(None, true);

        let effects = controller.on_intersection(ElementId(3), true);
        assert_eq!(
            effects,
            vec![
                Effect::Reveal {
                    id: ElementId(3),
                    delay_ms: Some(100)
                },
                Effect::Unobserve(ElementId(3)),
            ]
        );

        assert!(controller.on_intersection(ElementId(3), true).is_empty());
        assert!(controller.on_intersection(ElementId(3), false).is_empty());
        assert_eq!(controller.state(ElementId(3)), Some(RevealState::Revealed));
    }

    #[test]
    fn non_intersecting_report_keeps_element_pending() {
        let (mut controller, _) = mount(None, true);
        assert!(controller.on_intersection(ElementId(2), false).is_empty());
        assert_eq!(controller.state(ElementId(2)), Some(RevealState::Pending));
    }

    #[test]
    fn unconditional_fallback_reveals_everything_left() {
        let (mut controller, effects) = mount(None, true);
        assert!(effects.contains(&Effect::Schedule {
            timer: Timer::UnconditionalFallback,
            after_ms: 2_000
        }));

        controller.on_intersection(ElementId(2), true);
        let effects = controller.on_timer(Timer::UnconditionalFallback);

        let revealed: Vec<ElementId> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::Reveal { id, delay_ms } => {
                    assert_eq!(*delay_ms, None);
                    Some(*id)
                }
                _ => None,
            })
            .collect();
        assert_eq!(revealed, vec![ElementId(3), ElementId(4), ElementId(5)]);
        assert!(all_revealed(&controller));

        // An observer report racing the fallback is a no-op.
        assert!(controller.on_intersection(ElementId(4), true).is_empty());
        assert!(controller.on_timer(Timer::UnconditionalFallback).is_empty());
    }

    #[test]
    fn unsupported_observer_schedules_early_fallback() {
        let (mut controller, effects) = mount(None, false);
        assert!(!effects.iter().any(|e| matches!(e, Effect::Observe(_))));
        assert!(effects.contains(&Effect::Schedule {
            timer: Timer::UnsupportedFallback,
            after_ms: 1_500
        }));

        let effects = controller.on_timer(Timer::UnsupportedFallback);
        assert!(all_revealed(&controller));
        assert!(!effects.iter().any(|e| matches!(e, Effect::Unobserve(_))));
    }

    #[test]
    fn supported_observer_has_no_early_fallback() {
        let (_, effects) = mount(None, true);
        assert!(!effects.contains(&Effect::Schedule {
            timer: Timer::UnsupportedFallback,
            after_ms: 1_500
        }));
    }

    #[test]
    fn no_element_ever_goes_back_to_pending() {
        let (mut controller, _) = mount(below_fold(200.0), true);
        let mut seen_revealed = vec![false; 6];
        let mut check = |controller: &RevealController| {
            for element in controller.elements() {
                let slot = &mut seen_revealed[element.id.0];
                if *slot {
                    assert_eq!(element.state, RevealState::Revealed);
                }
                *slot |= element.state == RevealState::Revealed;
            }
        };
        check(&controller);
        controller.on_intersection(ElementId(2), true);
        check(&controller);
        controller.on_scroll(600.0);
        check(&controller);
        controller.on_intersection(ElementId(2), false);
        controller.on_stats_visibility(true);
        check(&controller);
        controller.on_scroll(0.0);
        controller.on_timer(Timer::UnconditionalFallback);
        check(&controller);
        controller.on_intersection(ElementId(5), false);
        check(&controller);
    }

    #[test]
    fn stats_off_screen_start_after_scrolling_into_view() {
        let (mut controller, effects) = mount(below_fold(200.0), true);
        assert!(effects.contains(&Effect::ObserveStats));
        assert!(!effects.iter().any(|e| matches!(
            e,
            Effect::Schedule {
                timer: Timer::StatsAutoplay,
                ..
            }
        )));

        assert!(controller.on_scroll(300.0).contains(&Effect::SetScrolled(true)));
        assert!(!controller.counters_started());

        let effects = controller.on_stats_visibility(true);
        assert_eq!(effects, vec![Effect::UnobserveStats, Effect::StartCounters]);
        assert!(controller.counters_started());
        assert!(controller.on_stats_visibility(true).is_empty());
    }

    #[test]
    fn stats_off_screen_start_without_input_when_they_come_into_view() {
        let (mut controller, _) = mount(below_fold(200.0), true);
        let effects = controller.on_stats_visibility(true);
        assert!(effects.contains(&Effect::StartCounters));
    }

    #[test]
    fn stats_on_screen_wait_for_autoplay() {
        let (mut controller, effects) = mount(on_screen(), true);
        assert!(effects.contains(&Effect::Schedule {
            timer: Timer::StatsAutoplay,
            after_ms: 1_200
        }));

        // The observer's initial report must not start them.
        assert!(controller.on_stats_visibility(true).is_empty());
        assert!(!controller.counters_started());

        let effects = controller.on_timer(Timer::StatsAutoplay);
        assert!(effects.contains(&Effect::StartCounters));
        assert!(controller.counters_started());
    }

    #[test]
    fn stats_on_screen_start_on_first_input() {
        let (mut controller, _) = mount(on_screen(), true);
        let effects = controller.on_user_input(UserInput::Wheel);
        assert_eq!(effects, vec![Effect::UnobserveStats, Effect::StartCounters]);
        assert!(controller.user_interacted());

        // Autoplay after the fact is a no-op.
        assert!(controller.on_timer(Timer::StatsAutoplay).is_empty());
    }

    #[test]
    fn autoplay_defers_to_visibility_after_input() {
        let (mut controller, _) = mount(on_screen(), true);
        controller.on_stats_visibility(false);
        controller.on_user_input(UserInput::Touch);
        assert!(!controller.counters_started());

        assert!(controller.on_timer(Timer::StatsAutoplay).is_empty());
        assert!(controller
            .on_stats_visibility(true)
            .contains(&Effect::StartCounters));
    }

    #[test]
    fn counters_start_with_unsupported_fallback() {
        let (mut controller, effects) = mount(below_fold(200.0), false);
        assert!(!effects.contains(&Effect::ObserveStats));
        let effects = controller.on_timer(Timer::UnsupportedFallback);
        assert!(effects.contains(&Effect::StartCounters));
        assert!(!effects.contains(&Effect::UnobserveStats));
    }

    #[test]
    fn scrolled_flag_only_reports_changes() {
        let (mut controller, effects) = mount(None, true);
        assert!(!effects.iter().any(|e| matches!(e, Effect::SetScrolled(_))));

        assert_eq!(controller.on_scroll(30.0), Vec::new());
        assert_eq!(controller.on_scroll(51.0), vec![Effect::SetScrolled(true)]);
        assert_eq!(controller.on_scroll(400.0), Vec::new());
        assert_eq!(controller.on_scroll(50.0), vec![Effect::SetScrolled(false)]);
        assert!(!controller.is_scrolled());
    }

    #[test]
    fn restored_scroll_position_sets_scrolled_without_counting_as_input() {
        let mut ctx = context(true);
        ctx.scroll_y = 900.0;
        let (controller, effects) =
            RevealController::mount(RevealConfig::default(), page(), None, ctx);
        assert!(effects.contains(&Effect::SetScrolled(true)));
        assert!(controller.is_scrolled());
        assert!(!controller.user_interacted());
    }

    #[test]
    fn teardown_makes_every_callback_inert() {
        let (mut controller, _) = mount(on_screen(), false);
        let pending = controller.pending_count();
        controller.teardown();

        assert!(controller.on_timer(Timer::UnsupportedFallback).is_empty());
        assert!(controller.on_timer(Timer::UnconditionalFallback).is_empty());
        assert!(controller.on_timer(Timer::StatsAutoplay).is_empty());
        assert!(controller.on_intersection(ElementId(4), true).is_empty());
        assert!(controller.on_stats_visibility(true).is_empty());
        assert!(controller.on_user_input(UserInput::Touch).is_empty());
        assert!(controller.on_scroll(500.0).is_empty());

        assert!(controller.is_torn_down());
        assert_eq!(controller.pending_count(), pending);
        assert!(!controller.counters_started());
        assert!(!controller.user_interacted());
        assert!(!controller.is_scrolled());
    }
}
