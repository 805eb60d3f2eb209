use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
#[cfg(test)]
use mockall::automock;
use web_sys::{MouseEvent, TouchEvent};
use yew::Callback;

use crate::config;
use crate::error::LandingError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationOrigin {
    Pointer,
    Touch,
}

#[cfg_attr(test, automock)]
pub trait Navigator {
    fn navigate(&self, url: &str) -> Result<(), LandingError>;
}

pub trait Scheduler {
    /// Runs `task` on a later turn of the event loop.
    fn defer(&self, task: Box<dyn FnOnce()>);
}

pub struct WindowNavigator;

impl Navigator for WindowNavigator {
    fn navigate(&self, url: &str) -> Result<(), LandingError> {
        let window = web_sys::window().ok_or(LandingError::NoWindow)?;
        window.location().set_href(url)?;
        Ok(())
    }
}

/// Holds the pending timeout so dropping the scheduler cancels it.
#[derive(Default)]
pub struct TimeoutScheduler {
    pending: RefCell<Option<Timeout>>,
}

impl Scheduler for TimeoutScheduler {
    fn defer(&self, task: Box<dyn FnOnce()>) {
        self.pending.replace(Some(Timeout::new(0, task)));
    }
}

/// Sends the visitor to the web app. Shared by every "Get Started" button
/// on the page, so at most one navigation is ever in flight.
#[derive(Clone)]
pub struct CtaDispatcher {
    url: Rc<str>,
    navigator: Rc<dyn Navigator>,
    scheduler: Rc<dyn Scheduler>,
    in_flight: Rc<Cell<bool>>,
}

impl PartialEq for CtaDispatcher {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.in_flight, &other.in_flight)
    }
}

impl CtaDispatcher {
    pub fn new(url: &str, navigator: Rc<dyn Navigator>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            url: Rc::from(url),
            navigator,
            scheduler,
            in_flight: Rc::new(Cell::new(false)),
        }
    }

    pub fn for_window() -> Self {
        Self::new(
            config::get_webapp_url(),
            Rc::new(WindowNavigator),
            Rc::new(TimeoutScheduler::default()),
        )
    }

    /// Returns false when a navigation was already under way.
    ///
    /// Touch activations wait one tick so the gesture finishes before the
    /// page unloads; some mobile browsers drop the navigation otherwise.
    pub fn activate(&self, origin: ActivationOrigin) -> bool {
        if self.in_flight.get() {
            log::debug!("cta: ignoring {:?} activation, already navigating", origin);
            return false;
        }
        self.in_flight.set(true);
        match origin {
            ActivationOrigin::Pointer => {
                navigate(self.navigator.as_ref(), &self.url, &self.in_flight)
            }
            ActivationOrigin::Touch => {
                // Weak so a page torn down before the tick navigates nowhere.
                let navigator = Rc::downgrade(&self.navigator);
                let url = self.url.clone();
                let in_flight = self.in_flight.clone();
                self.scheduler.defer(Box::new(move || match navigator.upgrade() {
                    Some(navigator) => navigate(navigator.as_ref(), &url, &in_flight),
                    None => log::debug!("cta: page gone, dropping deferred navigation"),
                }));
            }
        }
        true
    }

    pub fn onclick(&self) -> Callback<MouseEvent> {
        let dispatcher = self.clone();
        Callback::from(move |_: MouseEvent| {
            dispatcher.activate(ActivationOrigin::Pointer);
        })
    }

    pub fn ontouchend(&self) -> Callback<TouchEvent> {
        let dispatcher = self.clone();
        Callback::from(move |e: TouchEvent| {
            // Also keeps the browser from synthesizing a click afterwards.
            e.prevent_default();
            e.stop_propagation();
            dispatcher.activate(ActivationOrigin::Touch);
        })
    }
}

fn navigate(navigator: &dyn Navigator, url: &str, in_flight: &Cell<bool>) {
    log::info!("cta: navigating to {}", url);
    if let Err(err) = navigator.navigate(url) {
        log::warn!("cta: navigation to {} failed: {}", url, err);
        in_flight.set(false);
    }
}
