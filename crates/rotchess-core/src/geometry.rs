use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, BOARD_CELLS, CELL_SIZE};

/// A point in board space. The origin is the top-left corner and y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Parses algebraic notation such as `e4`. Several squares joined by `/`
    /// (`a8/b8`) give the average of their centres.
    pub fn from_algebraic(input: &str) -> Option<Self> {
        let mut sum = Point::default();
        let mut count = 0usize;
        for square in input.split('/') {
            let mut chars = square.chars();
            let file = chars.next()?;
            let rank = chars.next()?.to_digit(10)? as usize;
            if chars.next().is_some() || !file.is_ascii_lowercase() {
                return None;
            }
            let file = (file as u8 - b'a') as usize;
            if file >= BOARD_CELLS || !(1..=BOARD_CELLS).contains(&rank) {
                return None;
            }
            sum.x += file as f64 * CELL_SIZE + CELL_SIZE / 2.0;
            sum.y += BOARD_SIZE - (rank as f64 * CELL_SIZE - CELL_SIZE / 2.0);
            count += 1;
        }
        Some(Point::new(sum.x / count as f64, sum.y / count as f64))
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Length of the projection of `start -> point` onto the direction `start -> toward`.
///
/// Returns `None` when `start` and `toward` coincide and no direction exists.
pub fn scalar_projection(start: Point, point: Point, toward: Point) -> Option<f64> {
    let u = toward - start;
    let v = point - start;
    let len = (u.x * u.x + u.y * u.y).sqrt();
    if len == 0.0 {
        return None;
    }
    Some((u.x * v.x + u.y * v.y) / len)
}

/// Perpendicular distance from `point` to the infinite line through `start` and `end`.
pub fn line_distance(start: Point, end: Point, point: Point) -> Option<f64> {
    let len = start.distance(end);
    if len == 0.0 {
        return None;
    }
    let cross = (end.x - start.x) * (point.y - start.y) - (point.x - start.x) * (end.y - start.y);
    Some(cross.abs() / len)
}

/// The board square expanded by a margin on every side. Template enumeration
/// stops at the first point outside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    pub fn board(margin: f64) -> Self {
        Self {
            min: -margin,
            max: BOARD_SIZE + margin,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        !(point.x < self.min || point.x > self.max || point.y < self.min || point.y > self.max)
    }

    /// Distance from `origin` to the farthest corner. No point of a ray leaving
    /// `origin` lies inside the bounds past this distance.
    pub fn farthest_from(&self, origin: Point) -> f64 {
        let dx = (origin.x - self.min).abs().max((self.max - origin.x).abs());
        let dy = (origin.y - self.min).abs().max((self.max - origin.y).abs());
        dx.hypot(dy)
    }
}
