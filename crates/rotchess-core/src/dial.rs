use std::f64::consts::FRAC_PI_2;

use crate::constants::{DIAL_CENTER, DIAL_RADIUS};
use crate::geometry::Point;

/// Hook the board calls when a move ends the current rotation interaction.
pub trait RotationSelector {
    fn hide(&mut self);
}

/// Selector for headless callers that have no rotation widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSelector;

impl RotationSelector for NoopSelector {
    fn hide(&mut self) {}
}

/// Converts a point dragged on the dial into a facing angle. Dragging straight
/// up from the centre yields 0.
pub fn angle_from_drag(center: Point, point: Point) -> f64 {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    -dy.atan2(dx) - FRAC_PI_2
}

/// State of the circular rotation widget and its confirm/cancel buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationDial {
    center: Point,
    radius: f64,
    selected_point: Option<Point>,
    dragging: bool,
    visible: bool,
    confirm_visible: bool,
    cancel_visible: bool,
}

impl Default for RotationDial {
    fn default() -> Self {
        Self::new(Point::from(DIAL_CENTER), DIAL_RADIUS)
    }
}

impl RotationDial {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            selected_point: None,
            dragging: false,
            visible: false,
            confirm_visible: false,
            cancel_visible: false,
        }
    }

    pub const fn center(&self) -> Point {
        self.center
    }

    pub const fn radius(&self) -> f64 {
        self.radius
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub const fn confirm_visible(&self) -> bool {
        self.confirm_visible
    }

    pub const fn cancel_visible(&self) -> bool {
        self.cancel_visible
    }

    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub const fn selected_point(&self) -> Option<Point> {
        self.selected_point
    }

    /// Shows the dial and its cancel button. Confirm appears once a point is chosen.
    pub fn reveal(&mut self) {
        self.visible = true;
        self.cancel_visible = true;
        self.confirm_visible = self.selected_point.is_some();
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.center.distance_sq(Point::new(x, y)) < self.radius * self.radius
    }

    /// Starts a drag when the dial is shown and `(x, y)` falls inside it.
    pub fn begin_drag(&mut self, x: f64, y: f64) -> bool {
        if !self.visible || !self.contains(x, y) {
            return false;
        }
        self.dragging = true;
        self.select(x, y);
        true
    }

    /// Follows the pointer while a drag is active. Points outside the dial still
    /// steer the angle.
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        if !self.dragging {
            return false;
        }
        self.select(x, y);
        true
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    fn select(&mut self, x: f64, y: f64) {
        self.selected_point = Some(Point::new(x, y));
        self.confirm_visible = true;
    }

    pub fn selected_angle(&self) -> Option<f64> {
        self.selected_point
            .map(|point| angle_from_drag(self.center, point))
    }
}

impl RotationSelector for RotationDial {
    fn hide(&mut self) {
        self.visible = false;
        self.dragging = false;
        self.selected_point = None;
        self.confirm_visible = false;
        self.cancel_visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn drag_angle_is_zero_pointing_up() {
        let center = Point::new(500.0, 200.0);
        assert!(close(angle_from_drag(center, Point::new(500.0, 150.0)), 0.0));
        assert!(close(angle_from_drag(center, Point::new(550.0, 200.0)), -FRAC_PI_2));
        assert!(close(angle_from_drag(center, Point::new(450.0, 200.0)), -3.0 * FRAC_PI_2));
        assert!(close(angle_from_drag(center, Point::new(500.0, 250.0)).cos(), PI.cos()));
    }

    #[test]
    fn drag_requires_visible_dial() {
        let mut dial = RotationDial::default();
        assert!(!dial.begin_drag(500.0, 180.0));
        dial.reveal();
        assert!(dial.cancel_visible());
        assert!(!dial.confirm_visible());
        assert!(!dial.begin_drag(700.0, 200.0));
        assert!(dial.begin_drag(500.0, 180.0));
        assert!(dial.confirm_visible());
        assert!(dial.drag_to(900.0, 200.0));
        assert!(close(dial.selected_angle().unwrap(), -FRAC_PI_2));
        dial.end_drag();
        assert!(!dial.drag_to(500.0, 100.0));
    }

    #[test]
    fn hide_clears_selection_and_buttons() {
        let mut dial = RotationDial::default();
        dial.reveal();
        dial.begin_drag(520.0, 200.0);
        dial.hide();
        assert!(!dial.is_visible());
        assert!(!dial.confirm_visible());
        assert!(!dial.cancel_visible());
        assert_eq!(dial.selected_angle(), None);
    }
}
