use nannou::geom::{pt2, Point2, Rect};

/// A point in page coordinates: origin at the top-left corner of the
/// window, `y` growing downwards.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}

impl Pos {
    pub fn new(x: f32, y: f32) -> Self {
        Pos { x, y }
    }

    /// From nannou's centred, y-up window coordinates.
    pub fn from_window(point: Point2, window: Rect) -> Self {
        Pos::new(point.x - window.left(), window.top() - point.y)
    }

    pub fn to_window(self, window: Rect) -> Point2 {
        pt2(window.left() + self.x, window.top() - self.y)
    }
}
