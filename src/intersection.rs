//! Intersection of two segments treated as infinite lines.
//!
//! Each segment `(x1, y1)-(x2, y2)` is written in implicit form `a x + b y = c`
//! with `a = y2 - y1`, `b = x1 - x2`, `c = a x1 + b y1`. The 2×2 system is solved
//! with Cramer's rule; a determinant below [`PARALLEL_EPS`] in magnitude yields
//! [`Intersection::Parallel`]. The result is not clipped to either segment.
use crate::types::LineSegment;
use nalgebra::Point2;

/// Determinant magnitude under which two lines count as parallel.
pub const PARALLEL_EPS: f64 = 1e-10;

/// Implicit line `a x + b y = c` through a segment's endpoints (not normalised).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImplicitLine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl ImplicitLine {
    pub fn through(seg: &LineSegment) -> Self {
        let [x1, y1] = seg.p0;
        let [x2, y2] = seg.p1;
        let a = y2 - y1;
        let b = x1 - x2;
        let c = a * x1 + b * y1;
        Self { a, b, c }
    }

    /// `a x + b y - c`; zero for points on the line.
    #[inline]
    pub fn residual(&self, p: &Point2<f64>) -> f64 {
        self.a * p.x + self.b * p.y - self.c
    }
}

/// Outcome of intersecting two lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intersection {
    Point(Point2<f64>),
    /// Parallel or numerically degenerate pair; there is no finite solution.
    Parallel,
}

impl Intersection {
    pub fn point(self) -> Option<Point2<f64>> {
        match self {
            Intersection::Point(p) => Some(p),
            Intersection::Parallel => None,
        }
    }

    pub fn is_parallel(&self) -> bool {
        matches!(self, Intersection::Parallel)
    }
}

pub fn intersect_lines(l1: &ImplicitLine, l2: &ImplicitLine) -> Intersection {
    let det = l1.a * l2.b - l2.a * l1.b;
    if det.abs() < PARALLEL_EPS {
        return Intersection::Parallel;
    }
    let x = (l2.b * l1.c - l1.b * l2.c) / det;
    let y = (l1.a * l2.c - l2.a * l1.c) / det;
    Intersection::Point(Point2::new(x, y))
}

/// Intersect the infinite lines through `s1` and `s2`.
pub fn intersect(s1: &LineSegment, s2: &LineSegment) -> Intersection {
    intersect_lines(&ImplicitLine::through(s1), &ImplicitLine::through(s2))
}
