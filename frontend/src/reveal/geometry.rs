/// Bounding box in viewport coordinates, as `getBoundingClientRect` reports it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    /// True when any part of the box is on screen.
    pub fn intersects(&self, viewport: &Viewport) -> bool {
        self.top < viewport.height
            && self.bottom > 0.0
            && self.left < viewport.width
            && self.right > 0.0
    }
}
