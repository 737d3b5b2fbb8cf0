use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub position: Point,
}

impl TouchEvent {
    pub fn new(action: TouchAction, position: Point) -> Self {
        Self { action, position }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(TouchAction::Down, Point::new(x, y))
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(TouchAction::Move, Point::new(x, y))
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(TouchAction::Up, Point::new(x, y))
    }

    pub fn cancel() -> Self {
        Self::new(TouchAction::Cancel, Point::default())
    }
}
