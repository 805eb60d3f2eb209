//! Scroll-triggered reveal animations and the stat counters.

pub mod controller;
pub mod counter;
pub mod dom;
pub mod geometry;
pub mod subscriptions;
pub mod tween;

pub use controller::Region;
pub use dom::{install, RevealSinks, RevealTarget};
