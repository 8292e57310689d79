//! Progressive probabilistic Hough transform over a binary edge map.
//!
//! Edge pixels are visited in random order. Each visit votes in a
//! `(theta, rho)` accumulator; once the pixel's best cell reaches `threshold`,
//! the line through that cell is walked in both directions from the pixel in
//! 16.16 fixed point, tolerating up to `max_line_gap` consecutive non-edge
//! pixels. Walked pixels are removed from the edge mask; if the span is at
//! least `min_line_length` along x or y their votes are withdrawn as well and
//! the segment is emitted.
use crate::angle::angle_bins;
use crate::edges::EdgeMap;
use crate::types::LineSegment;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

const SHIFT: u32 = 16;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoughParams {
    /// Distance resolution of the accumulator in pixels.
    pub rho: f64,
    /// Angle resolution of the accumulator in radians.
    pub theta: f64,
    /// Minimum accumulator votes before a line is traced.
    pub threshold: u32,
    /// Minimum extent (along x or y) of an accepted segment.
    pub min_line_length: f64,
    /// Maximum run of missing edge pixels bridged while tracing.
    pub max_line_gap: u32,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            rho: 1.0,
            theta: std::f64::consts::PI / 180.0,
            threshold: 100,
            min_line_length: 100.0,
            max_line_gap: 10,
        }
    }
}

struct Accumulator {
    trig: Vec<(f64, f64)>,
    num_rho: usize,
    offset: i64,
    votes: Vec<i32>,
}

impl Accumulator {
    fn new(w: usize, h: usize, rho: f64, theta: f64) -> Self {
        let num_angle = angle_bins(theta);
        let num_rho = (((w + h) * 2 + 1) as f64 / rho).round() as usize;
        let irho = 1.0 / rho;
        let trig = (0..num_angle)
            .map(|n| {
                let ang = n as f64 * theta;
                (ang.cos() * irho, ang.sin() * irho)
            })
            .collect();
        Self {
            trig,
            num_rho,
            offset: (num_rho as i64 - 1) / 2,
            votes: vec![0; num_angle * num_rho],
        }
    }

    #[inline]
    fn cell(&self, n: usize, x: usize, y: usize) -> Option<usize> {
        let (c, s) = self.trig[n];
        let r = (x as f64 * c + y as f64 * s).round() as i64 + self.offset;
        (r >= 0 && (r as usize) < self.num_rho).then(|| n * self.num_rho + r as usize)
    }

    /// Vote for every angle and return the best `(votes, angle index)`.
    fn vote(&mut self, x: usize, y: usize) -> (i32, usize) {
        let mut best = (i32::MIN, 0);
        for n in 0..self.trig.len() {
            if let Some(i) = self.cell(n, x, y) {
                self.votes[i] += 1;
                if self.votes[i] > best.0 {
                    best = (self.votes[i], n);
                }
            }
        }
        best
    }

    fn unvote(&mut self, x: usize, y: usize) {
        for n in 0..self.trig.len() {
            if let Some(i) = self.cell(n, x, y) {
                self.votes[i] -= 1;
            }
        }
    }
}

/// Fixed-point walker along the line of angle index `n` through a seed pixel.
#[derive(Clone, Copy)]
struct Walker {
    x0: i64,
    y0: i64,
    dx0: i64,
    dy0: i64,
    /// Major axis is x: `x` is integral and `y` carries the fraction.
    xflag: bool,
}

impl Walker {
    fn new(x: usize, y: usize, angle: f64) -> Self {
        let a = -angle.sin();
        let b = angle.cos();
        let one = (1i64 << SHIFT) as f64;
        let half = 1i64 << (SHIFT - 1);
        let (x, y) = (x as i64, y as i64);
        if a.abs() > b.abs() {
            Self {
                x0: x,
                y0: (y << SHIFT) + half,
                dx0: if a > 0.0 { 1 } else { -1 },
                dy0: (b * one / a.abs()).round() as i64,
                xflag: true,
            }
        } else {
            Self {
                x0: (x << SHIFT) + half,
                y0: y,
                dx0: (a * one / b.abs()).round() as i64,
                dy0: if b > 0.0 { 1 } else { -1 },
                xflag: false,
            }
        }
    }

    /// Pixel positions from the seed outward; `forward == false` walks backwards.
    fn pixels(self, forward: bool) -> impl Iterator<Item = (i64, i64)> {
        let (dx, dy) = if forward {
            (self.dx0, self.dy0)
        } else {
            (-self.dx0, -self.dy0)
        };
        let xflag = self.xflag;
        (0i64..).map(move |k| {
            let px = self.x0 + k * dx;
            let py = self.y0 + k * dy;
            if xflag {
                (px, py >> SHIFT)
            } else {
                (px >> SHIFT, py)
            }
        })
    }
}

/// Detect line segments in `edges`; `rng` fixes the pixel visiting order.
pub fn probabilistic_hough<R: Rng + ?Sized>(
    edges: &EdgeMap,
    params: &HoughParams,
    rng: &mut R,
) -> Vec<LineSegment> {
    let (w, h) = (edges.w, edges.h);
    if w == 0 || h == 0 {
        return Vec::new();
    }
    let mut acc = Accumulator::new(w, h, params.rho, params.theta);
    let mut mask = edges.data.clone();
    let inside = |x: i64, y: i64| x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h;

    let mut points: Vec<(usize, usize)> = (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .filter(|&(x, y)| mask[y * w + x])
        .collect();
    points.shuffle(rng);

    let threshold = params.threshold as i32;
    let mut lines = Vec::new();
    for &(x, y) in &points {
        // Already consumed by an earlier line.
        if !mask[y * w + x] {
            continue;
        }
        let (max_val, max_n) = acc.vote(x, y);
        if max_val < threshold {
            continue;
        }

        let walker = Walker::new(x, y, max_n as f64 * params.theta);
        let mut line_end = [(x as i64, y as i64); 2];
        for (k, end) in line_end.iter_mut().enumerate() {
            let mut gap = 0u32;
            for (px, py) in walker.pixels(k == 0) {
                if !inside(px, py) {
                    break;
                }
                if mask[py as usize * w + px as usize] {
                    gap = 0;
                    *end = (px, py);
                } else {
                    gap += 1;
                    if gap > params.max_line_gap {
                        break;
                    }
                }
            }
        }

        let span_x = (line_end[1].0 - line_end[0].0).abs() as f64;
        let span_y = (line_end[1].1 - line_end[0].1).abs() as f64;
        let good_line = span_x >= params.min_line_length || span_y >= params.min_line_length;

        for (k, end) in line_end.iter().enumerate() {
            for (px, py) in walker.pixels(k == 0) {
                if !inside(px, py) {
                    break;
                }
                let idx = py as usize * w + px as usize;
                if mask[idx] {
                    if good_line {
                        acc.unvote(px as usize, py as usize);
                    }
                    mask[idx] = false;
                }
                if (px, py) == *end {
                    break;
                }
            }
        }

        if good_line {
            let [(x1, y1), (x2, y2)] = line_end;
            lines.push(LineSegment::from_ints(x1 as i32, y1 as i32, x2 as i32, y2 as i32));
        }
    }
    debug!(
        "hough: edge_points={} lines={} size={}x{}",
        points.len(),
        lines.len(),
        w,
        h
    );
    lines
}
