use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::constants::{CELL_SIZE, DIAGONAL_STEP};
use crate::geometry::{Bounds, Point};
use crate::types::PieceType;

/// Distance from a knight to any of its landing points.
const KNIGHT_REACH: f64 = 111.803_398_874_989_48;
/// atan(1/2) and atan(2): the two knight angles in the first quadrant.
const KNIGHT_SHALLOW: f64 = 0.463_647_609_000_806_1;
const KNIGHT_STEEP: f64 = 1.107_148_717_794_090_4;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Distances {
    Finite(&'static [f64]),
    /// `start, start + step, start + 2 * step, ...` without end.
    Unbounded { start: f64, step: f64 },
}

/// A base angle plus an ordered sequence of distances along it. Offsets are
/// expressed relative to the piece's own facing and rotated into board space
/// by the angle the piece currently looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementTemplate {
    distances: Distances,
    angle: f64,
}

impl MovementTemplate {
    pub const fn finite(distances: &'static [f64], angle: f64) -> Self {
        Self {
            distances: Distances::Finite(distances),
            angle,
        }
    }

    pub const fn unbounded(start: f64, step: f64, angle: f64) -> Self {
        Self {
            distances: Distances::Unbounded { start, step },
            angle,
        }
    }

    pub const fn is_unbounded(&self) -> bool {
        matches!(self.distances, Distances::Unbounded { .. })
    }

    pub fn offsets(&self, look_angle: f64) -> Offsets {
        let direction = self.angle - look_angle;
        Offsets {
            distances: DistanceIter::new(self.distances),
            cos: direction.cos(),
            sin: direction.sin(),
        }
    }

    /// Offsets translated to `origin`, cut off at the first point `bounds` rejects.
    pub fn points_from(
        &self,
        origin: Point,
        look_angle: f64,
        bounds: Bounds,
    ) -> impl Iterator<Item = Point> {
        self.offsets(look_angle)
            .take(self.max_points(origin, bounds))
            .map(move |offset| origin + offset)
            .take_while(move |point| bounds.contains(*point))
    }

    /// Upper bound on how many points of this template can fall inside `bounds`.
    fn max_points(&self, origin: Point, bounds: Bounds) -> usize {
        match self.distances {
            Distances::Finite(list) => list.len(),
            Distances::Unbounded { step, .. } if step == 0.0 => 1,
            Distances::Unbounded { start, step } => {
                let span = (bounds.farthest_from(origin) + start.abs()) / step.abs();
                if span.is_finite() {
                    // `as` saturates for spans past usize::MAX.
                    (span.ceil() as usize).saturating_add(1)
                } else {
                    0
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
enum DistanceIter {
    Finite(std::slice::Iter<'static, f64>),
    Unbounded { start: f64, step: f64, n: u32 },
}

impl DistanceIter {
    fn new(distances: Distances) -> Self {
        match distances {
            Distances::Finite(list) => Self::Finite(list.iter()),
            Distances::Unbounded { start, step } => Self::Unbounded { start, step, n: 0 },
        }
    }
}

impl Iterator for DistanceIter {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        match self {
            Self::Finite(iter) => iter.next().copied(),
            Self::Unbounded { start, step, n } => {
                let distance = *start + *step * f64::from(*n);
                *n = n.saturating_add(1);
                Some(distance)
            }
        }
    }
}

/// Lazy sequence of board-space offsets produced by a template.
#[derive(Debug, Clone)]
pub struct Offsets {
    distances: DistanceIter,
    cos: f64,
    sin: f64,
}

impl Iterator for Offsets {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        self.distances
            .next()
            .map(|d| Point::new(d * self.cos, d * self.sin))
    }
}

const fn ray(step: f64, angle: f64) -> MovementTemplate {
    MovementTemplate::unbounded(step, step, angle)
}

static PAWN_CAPTURES: [MovementTemplate; 2] = [
    MovementTemplate::finite(&[DIAGONAL_STEP], -3.0 * FRAC_PI_4),
    MovementTemplate::finite(&[DIAGONAL_STEP], -FRAC_PI_4),
];

static PAWN_MOVES: [MovementTemplate; 1] =
    [MovementTemplate::finite(&[CELL_SIZE, 2.0 * CELL_SIZE], -FRAC_PI_2)];

static ROOK: [MovementTemplate; 4] = [
    ray(CELL_SIZE, 0.0),
    ray(-CELL_SIZE, 0.0),
    ray(CELL_SIZE, FRAC_PI_2),
    ray(-CELL_SIZE, FRAC_PI_2),
];

static BISHOP: [MovementTemplate; 4] = [
    ray(DIAGONAL_STEP, FRAC_PI_4),
    ray(-DIAGONAL_STEP, FRAC_PI_4),
    ray(DIAGONAL_STEP, -FRAC_PI_4),
    ray(-DIAGONAL_STEP, -FRAC_PI_4),
];

static QUEEN: [MovementTemplate; 8] = [
    ray(CELL_SIZE, 0.0),
    ray(-CELL_SIZE, 0.0),
    ray(CELL_SIZE, FRAC_PI_2),
    ray(-CELL_SIZE, FRAC_PI_2),
    ray(DIAGONAL_STEP, FRAC_PI_4),
    ray(-DIAGONAL_STEP, FRAC_PI_4),
    ray(DIAGONAL_STEP, -FRAC_PI_4),
    ray(-DIAGONAL_STEP, -FRAC_PI_4),
];

static KNIGHT: [MovementTemplate; 8] = [
    MovementTemplate::finite(&[KNIGHT_REACH], KNIGHT_SHALLOW),
    MovementTemplate::finite(&[KNIGHT_REACH], -KNIGHT_SHALLOW),
    MovementTemplate::finite(&[KNIGHT_REACH], -KNIGHT_STEEP),
    MovementTemplate::finite(&[KNIGHT_REACH], -(PI - KNIGHT_STEEP)),
    MovementTemplate::finite(&[KNIGHT_REACH], -(PI - KNIGHT_SHALLOW)),
    MovementTemplate::finite(&[KNIGHT_REACH], PI - KNIGHT_SHALLOW),
    MovementTemplate::finite(&[KNIGHT_REACH], PI - KNIGHT_STEEP),
    MovementTemplate::finite(&[KNIGHT_REACH], KNIGHT_STEEP),
];

static KING: [MovementTemplate; 8] = [
    MovementTemplate::finite(&[CELL_SIZE], -FRAC_PI_2),
    MovementTemplate::finite(&[CELL_SIZE], 0.0),
    MovementTemplate::finite(&[CELL_SIZE], FRAC_PI_2),
    MovementTemplate::finite(&[CELL_SIZE], PI),
    MovementTemplate::finite(&[DIAGONAL_STEP], -FRAC_PI_4),
    MovementTemplate::finite(&[DIAGONAL_STEP], FRAC_PI_4),
    MovementTemplate::finite(&[DIAGONAL_STEP], 3.0 * FRAC_PI_4),
    MovementTemplate::finite(&[DIAGONAL_STEP], -3.0 * FRAC_PI_4),
];

pub fn capture_templates(piece_type: PieceType) -> &'static [MovementTemplate] {
    match piece_type {
        PieceType::Pawn => &PAWN_CAPTURES,
        PieceType::Rook => &ROOK,
        PieceType::Knight => &KNIGHT,
        PieceType::Bishop => &BISHOP,
        PieceType::Queen => &QUEEN,
        PieceType::King => &KING,
    }
}

/// Quiet-move templates. Every type except the pawn moves the way it captures.
pub fn move_templates(piece_type: PieceType) -> &'static [MovementTemplate] {
    match piece_type {
        PieceType::Pawn => &PAWN_MOVES,
        other => capture_templates(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn finite_offsets_follow_base_angle() {
        static DISTS: [f64; 4] = [0.0, 1.0, 2.0, 3.0];
        let template = MovementTemplate::finite(&DISTS, FRAC_PI_4);
        let offsets: Vec<Point> = template.offsets(0.0).collect();
        assert_eq!(offsets.len(), 4);
        let half = FRAC_PI_4.cos();
        assert!(close(offsets[0], Point::new(0.0, 0.0)));
        assert!(close(offsets[1], Point::new(half, half)));
        assert!(close(offsets[3], Point::new(3.0 * half, 3.0 * half)));
    }

    #[test]
    fn unbounded_offsets_are_lazy() {
        let template = MovementTemplate::unbounded(0.0, 1.0, PI / 8.0);
        let offsets: Vec<Point> = template
            .offsets(0.0)
            .take_while(|p| p.x.abs() <= 20.0 && p.y.abs() <= 20.0)
            .take(1000)
            .collect();
        assert_eq!(offsets.len(), 22);
        assert!(close(
            offsets[1],
            Point::new(0.923_879_532_511_286_7, 0.382_683_432_365_089_8)
        ));
    }

    #[test]
    fn look_angle_is_subtracted_from_base_angle() {
        let template = MovementTemplate::finite(&[CELL_SIZE], -FRAC_PI_2);
        let white = template.offsets(0.0).next().unwrap();
        let black = template.offsets(PI).next().unwrap();
        assert!(close(white, Point::new(0.0, -CELL_SIZE)));
        assert!(close(black, Point::new(0.0, CELL_SIZE)));
    }

    #[test]
    fn zero_step_ray_yields_single_point() {
        let points: Vec<Point> = MovementTemplate::unbounded(0.0, 0.0, 0.0)
            .points_from(Point::new(25.0, 25.0), 0.0, Bounds::board(20.0))
            .collect();
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn wide_margins_end_enumeration() {
        let origin = Point::new(25.0, 25.0);
        let count = ray(CELL_SIZE, 0.0)
            .points_from(origin, 0.0, Bounds::board(1e6))
            .count();
        assert_eq!(count, 20_007);

        let template = MovementTemplate::unbounded(0.0, 1e-10, 0.0);
        assert_eq!(template.max_points(origin, Bounds::board(1e12)), usize::MAX);
        assert_eq!(
            template.max_points(origin, Bounds::board(f64::INFINITY)),
            0
        );
    }

    #[test]
    fn unbounded_rays_stop_at_bounds() {
        let bounds = Bounds::board(20.0);
        let points: Vec<Point> = ray(CELL_SIZE, 0.0)
            .points_from(Point::new(25.0, 25.0), 0.0, bounds)
            .take(100)
            .collect();
        assert_eq!(points.len(), 7);
        assert!(close(*points.last().unwrap(), Point::new(375.0, 25.0)));

        let backwards: Vec<Point> = ray(-CELL_SIZE, 0.0)
            .points_from(Point::new(25.0, 25.0), 0.0, bounds)
            .take(100)
            .collect();
        assert!(backwards.is_empty());
    }

    #[test]
    fn knight_templates_land_on_knight_squares() {
        let origin = Point::new(200.0, 200.0);
        let bounds = Bounds::board(20.0);
        let mut landings: Vec<(i64, i64)> = capture_templates(PieceType::Knight)
            .iter()
            .flat_map(|t| t.points_from(origin, 0.0, bounds))
            .map(|p| ((p.x - origin.x).round() as i64, (p.y - origin.y).round() as i64))
            .collect();
        landings.sort_unstable();
        let mut expected = vec![
            (-100, -50),
            (-100, 50),
            (-50, -100),
            (-50, 100),
            (50, -100),
            (50, 100),
            (100, -50),
            (100, 50),
        ];
        expected.sort_unstable();
        assert_eq!(landings, expected);
    }

    #[test]
    fn sliding_pieces_are_unbounded() {
        for piece in [PieceType::Rook, PieceType::Bishop, PieceType::Queen] {
            assert!(capture_templates(piece).iter().all(MovementTemplate::is_unbounded));
        }
        for piece in [PieceType::Pawn, PieceType::Knight, PieceType::King] {
            assert!(!move_templates(piece).iter().any(MovementTemplate::is_unbounded));
        }
    }
}
