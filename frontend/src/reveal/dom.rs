//! Browser glue for the reveal controller: reads geometry, owns the
//! IntersectionObserver, listeners, timers and animation frames, and turns
//! controller effects into class toggles.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};
use yew::{Callback, NodeRef};

use crate::config::RevealConfig;
use crate::error::LandingError;

use super::controller::{
    Candidate, Effect, ElementId, MountContext, Region, RevealController, Timer, UserInput,
};
use super::counter::CounterSet;
use super::geometry::{Rect, Viewport};
use super::subscriptions::Subscriptions;

const REVEAL_ID_ATTR: &str = "data-reveal-id";
const STATS_REVEAL_ID: &str = "stats";
const VISIBLE_CLASS: &str = "visible";
const ARMED_CLASS: &str = "reveal-armed";
/// Browsers report the crossing ratio with float noise around the threshold.
const RATIO_SLACK: f64 = 1e-3;

/// What a `data-reveal-id` attribute points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RevealTag {
    Stats,
    Element(ElementId),
}

fn parse_reveal_tag(tag: &str) -> Option<RevealTag> {
    if tag == STATS_REVEAL_ID {
        return Some(RevealTag::Stats);
    }
    tag.parse::<usize>()
        .ok()
        .map(|index| RevealTag::Element(ElementId(index)))
}

/// `isIntersecting` flips on the first visible pixel, so the ratio decides.
fn crosses_threshold(is_intersecting: bool, ratio: f64, threshold: f64) -> bool {
    is_intersecting && ratio + RATIO_SLACK >= threshold
}

/// A node that should fade in, plus its stagger delay.
#[derive(Clone)]
pub struct RevealTarget {
    pub region: Region,
    pub node: NodeRef,
    pub delay_ms: Option<u32>,
}

impl RevealTarget {
    pub fn new(region: Region, node: NodeRef) -> Self {
        Self {
            region,
            node,
            delay_ms: None,
        }
    }

    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }
}

/// Where the page wants state changes that Yew renders itself.
pub struct RevealSinks {
    pub on_scrolled: Callback<bool>,
    pub on_counters: Callback<Vec<u32>>,
}

/// Keeps the reveal machinery alive. Dropping it tears everything down.
pub struct RevealHandle {
    runtime: Rc<Runtime>,
}

struct ObserverHandle {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Drop for ObserverHandle {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

struct Runtime {
    controller: RefCell<RevealController>,
    subscriptions: RefCell<Subscriptions>,
    root: Option<Element>,
    elements: Vec<Option<Element>>,
    stats: Option<Element>,
    observer: Option<IntersectionObserver>,
    counters: RefCell<CounterSet>,
    frame: RefCell<Option<AnimationFrame>>,
    sinks: RevealSinks,
    threshold: f64,
}

/// Classifies every target, arms the root and starts observing.
///
/// Must run after the nodes are rendered (from a mount effect). On error
/// nothing has been hidden, so the caller can simply show the page as is.
pub fn install(
    config: RevealConfig,
    root: &NodeRef,
    targets: &[RevealTarget],
    stats: &NodeRef,
    sinks: RevealSinks,
) -> Result<RevealHandle, LandingError> {
    let window = web_sys::window().ok_or(LandingError::NoWindow)?;
    let viewport = viewport(&window)?;
    let scroll_y = window.scroll_y().unwrap_or(0.0);

    let elements: Vec<Option<Element>> = targets
        .iter()
        .map(|target| target.node.cast::<Element>())
        .collect();
    for (index, element) in elements.iter().enumerate() {
        if let Some(element) = element {
            element.set_attribute(REVEAL_ID_ATTR, &index.to_string())?;
        }
    }
    let stats = stats.cast::<Element>();
    if let Some(stats) = &stats {
        stats.set_attribute(REVEAL_ID_ATTR, STATS_REVEAL_ID)?;
    }

    let candidates: Vec<Candidate> = targets
        .iter()
        .zip(&elements)
        .map(|(target, element)| {
            let candidate = Candidate::new(target.region, element.as_ref().map(bounding_rect));
            match target.delay_ms {
                Some(delay_ms) => candidate.with_delay(delay_ms),
                None => candidate,
            }
        })
        .collect();
    let stats_rect = stats.as_ref().map(bounding_rect);

    let mut mount_effects = Vec::new();
    let runtime = Rc::new_cyclic(|weak: &Weak<Runtime>| {
        let mut subscriptions = Subscriptions::new();
        let observer = match create_observer(&window, weak.clone(), &config) {
            Ok(handle) => {
                let observer = handle.observer.clone();
                subscriptions.hold(handle);
                Some(observer)
            }
            // The controller schedules the early fallback for this case.
            Err(LandingError::ObserverUnsupported) => None,
            Err(err) => {
                log::warn!("reveal: could not create IntersectionObserver: {}", err);
                None
            }
        };

        let context = MountContext {
            viewport,
            scroll_y,
            observer_supported: observer.is_some(),
        };
        let counters = CounterSet::headline(config.counter_duration_ms);
        let threshold = config.effective_threshold();
        let (controller, effects) =
            RevealController::mount(config, candidates, stats_rect, context);
        mount_effects = effects;

        Runtime {
            controller: RefCell::new(controller),
            subscriptions: RefCell::new(subscriptions),
            root: root.cast::<Element>(),
            elements,
            stats,
            observer,
            counters: RefCell::new(counters),
            frame: RefCell::new(None),
            sinks,
            threshold,
        }
    });

    runtime.apply(mount_effects);
    runtime.listen(&window);
    log::debug!(
        "reveal: installed, {} element(s) pending",
        runtime.controller.borrow().pending_count()
    );

    Ok(RevealHandle { runtime })
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.runtime.controller.borrow_mut().teardown();
        self.runtime.frame.borrow_mut().take();
        self.runtime.subscriptions.borrow_mut().close();
    }
}

impl Runtime {
    fn dispatch(self: &Rc<Self>, event: impl FnOnce(&mut RevealController) -> Vec<Effect>) {
        let effects = {
            let mut controller = self.controller.borrow_mut();
            event(&mut controller)
        };
        self.apply(effects);
    }

    fn apply(self: &Rc<Self>, effects: Vec<Effect>) {
        for effect in effects {
            if let Err(err) = self.apply_one(effect) {
                log::warn!("reveal: {:?} failed: {}", effect, err);
            }
        }
    }

    fn apply_one(self: &Rc<Self>, effect: Effect) -> Result<(), LandingError> {
        match effect {
            Effect::Reveal { id, delay_ms } => {
                if let Some(element) = self.element(id) {
                    reveal_element(element, delay_ms)?;
                }
            }
            Effect::Arm => {
                if let Some(root) = &self.root {
                    root.class_list().add_1(ARMED_CLASS)?;
                }
            }
            Effect::Observe(id) => {
                if let (Some(observer), Some(element)) = (&self.observer, self.element(id)) {
                    observer.observe(element);
                }
            }
            Effect::Unobserve(id) => {
                if let (Some(observer), Some(element)) = (&self.observer, self.element(id)) {
                    observer.unobserve(element);
                }
            }
            Effect::ObserveStats => {
                if let (Some(observer), Some(stats)) = (&self.observer, &self.stats) {
                    observer.observe(stats);
                }
            }
            Effect::UnobserveStats => {
                if let (Some(observer), Some(stats)) = (&self.observer, &self.stats) {
                    observer.unobserve(stats);
                }
            }
            Effect::StartCounters => self.start_counters(),
            Effect::SetScrolled(scrolled) => self.sinks.on_scrolled.emit(scrolled),
            Effect::Schedule { timer, after_ms } => self.schedule(timer, after_ms),
        }
        Ok(())
    }

    fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0).and_then(Option::as_ref)
    }

    fn on_entry(self: &Rc<Self>, entry: &IntersectionObserverEntry) {
        let is_intersecting = crosses_threshold(
            entry.is_intersecting(),
            entry.intersection_ratio(),
            self.threshold,
        );
        let Some(tag) = entry.target().get_attribute(REVEAL_ID_ATTR) else {
            return;
        };
        match parse_reveal_tag(&tag) {
            Some(RevealTag::Stats) => {
                self.dispatch(|controller| controller.on_stats_visibility(is_intersecting))
            }
            Some(RevealTag::Element(id)) => {
                self.dispatch(|controller| controller.on_intersection(id, is_intersecting))
            }
            None => log::warn!("reveal: bad {} value {:?}", REVEAL_ID_ATTR, tag),
        }
    }

    fn schedule(self: &Rc<Self>, timer: Timer, after_ms: u32) {
        let runtime = Rc::downgrade(self);
        let timeout = Timeout::new(after_ms, move || {
            if let Some(runtime) = runtime.upgrade() {
                runtime.dispatch(|controller| controller.on_timer(timer));
            }
        });
        self.subscriptions.borrow_mut().hold(timeout);
    }

    fn listen(self: &Rc<Self>, window: &Window) {
        let scroll = {
            let runtime = Rc::downgrade(self);
            EventListener::new(window, "scroll", move |_| {
                let Some(runtime) = runtime.upgrade() else {
                    return;
                };
                let scroll_y = web_sys::window()
                    .and_then(|window| window.scroll_y().ok())
                    .unwrap_or(0.0);
                runtime.dispatch(|controller| controller.on_scroll(scroll_y));
            })
        };
        let mut subscriptions = self.subscriptions.borrow_mut();
        subscriptions.hold(scroll);
        for (event, input) in [
            ("wheel", UserInput::Wheel),
            ("touchstart", UserInput::Touch),
            ("touchmove", UserInput::Touch),
        ] {
            let runtime = Rc::downgrade(self);
            subscriptions.hold(EventListener::new(window, event, move |_| {
                if let Some(runtime) = runtime.upgrade() {
                    runtime.dispatch(|controller| controller.on_user_input(input));
                }
            }));
        }
    }

    fn start_counters(self: &Rc<Self>) {
        let values = {
            let mut counters = self.counters.borrow_mut();
            counters.start(now_ms());
            counters.values()
        };
        log::debug!("reveal: counters started");
        self.sinks.on_counters.emit(values);
        self.request_frame();
    }

    fn request_frame(self: &Rc<Self>) {
        if self.subscriptions.borrow().is_closed() {
            return;
        }
        let runtime = Rc::downgrade(self);
        let frame = request_animation_frame(move |timestamp| {
            if let Some(runtime) = runtime.upgrade() {
                runtime.on_frame(timestamp);
            }
        });
        self.frame.replace(Some(frame));
    }

    fn on_frame(self: &Rc<Self>, timestamp: f64) {
        if self.controller.borrow().is_torn_down() {
            return;
        }
        let (running, values) = {
            let mut counters = self.counters.borrow_mut();
            let running = counters.tick(timestamp);
            (running, counters.values())
        };
        self.sinks.on_counters.emit(values);
        if running {
            self.request_frame();
        } else {
            log::debug!("reveal: counters finished");
        }
    }
}

fn create_observer(
    window: &Window,
    runtime: Weak<Runtime>,
    config: &RevealConfig,
) -> Result<ObserverHandle, LandingError> {
    if !supports_intersection_observer(window) {
        return Err(LandingError::ObserverUnsupported);
    }
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let Some(runtime) = runtime.upgrade() else {
                return;
            };
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                runtime.on_entry(&entry);
            }
        },
    );
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.effective_threshold()));
    options.set_root_margin(&config.root_margin());
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    Ok(ObserverHandle {
        observer,
        _callback: callback,
    })
}

fn supports_intersection_observer(window: &Window) -> bool {
    js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("IntersectionObserver"))
        .unwrap_or(false)
}

fn reveal_element(element: &Element, delay_ms: Option<u32>) -> Result<(), LandingError> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let delay = format!("{}ms", delay_ms.unwrap_or(0));
        html.style().set_property("transition-delay", &delay)?;
    }
    element.class_list().add_1(VISIBLE_CLASS)?;
    Ok(())
}

fn viewport(window: &Window) -> Result<Viewport, LandingError> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport { width, height })
}

fn bounding_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.top(), rect.right(), rect.bottom(), rect.left())
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or(0.0)
}
