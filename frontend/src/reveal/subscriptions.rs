use std::any::Any;

/// Owns every listener, observer, timer and frame handle the page holds.
///
/// Handles cancel themselves when dropped (gloo's `Timeout`, `EventListener`
/// and `AnimationFrame` all do), so closing the list is the whole teardown.
/// Anything handed over after closing is dropped on the spot.
#[derive(Default)]
pub struct Subscriptions {
    entries: Vec<Box<dyn Any>>,
    closed: bool,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold<T: 'static>(&mut self, handle: T) {
        if self.closed {
            drop(handle);
            return;
        }
        self.entries.push(Box::new(handle));
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn close(&mut self) {
        self.closed = true;
        // Drop outside the Vec so a handle's Drop can't observe a half-cleared list.
        let entries = std::mem::take(&mut self.entries);
        drop(entries);
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
impl Subscriptions {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Handle(Rc<Cell<u32>>);

    impl Drop for Handle {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn close_cancels_everything_held() {
        let cancelled = Rc::new(Cell::new(0));
        let mut subscriptions = Subscriptions::new();
        subscriptions.hold(Handle(cancelled.clone()));
        subscriptions.hold(Handle(cancelled.clone()));
        subscriptions.hold(Handle(cancelled.clone()));
        assert_eq!(subscriptions.len(), 3);
        assert_eq!(cancelled.get(), 0);

        subscriptions.close();
        assert_eq!(cancelled.get(), 3);
        assert!(subscriptions.is_empty());
        assert!(subscriptions.is_closed());
    }

    #[test]
    fn handles_after_close_are_dropped_immediately() {
        let cancelled = Rc::new(Cell::new(0));
        let mut subscriptions = Subscriptions::new();
        subscriptions.close();
        subscriptions.hold(Handle(cancelled.clone()));
        assert_eq!(cancelled.get(), 1);
        assert!(subscriptions.is_empty());
    }

    #[test]
    fn dropping_the_list_cancels_too() {
        let cancelled = Rc::new(Cell::new(0));
        {
            let mut subscriptions = Subscriptions::new();
            subscriptions.hold(Handle(cancelled.clone()));
        }
        assert_eq!(cancelled.get(), 1);
    }
}
