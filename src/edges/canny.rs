//! Canny edge detection on top of Sobel gradients.
//!
//! Non-maximum suppression compares each pixel with its two neighbours along
//! the gradient direction quantised to 0°, 45°, 90° or 135°. The comparison is
//! strict on one side and non-strict on the other so a two-pixel plateau on an
//! ideal step keeps exactly one pixel. Candidates above `low` survive
//! hysteresis only when 8-connected to a pixel above `high`.
use super::blur::gaussian_blur;
use super::grad::{sobel_gradients, Grad, GradientNorm};
use crate::image::{ImageF32, ImageView};

const TAN_22_5_DEG: f32 = 0.414_213_56;
const TAN_67_5_DEG: f32 = 2.414_213_6;

const NONE: u8 = 0;
const WEAK: u8 = 1;
const STRONG: u8 = 2;

/// Binary edge mask in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeMap {
    pub w: usize,
    pub h: usize,
    pub data: Vec<bool>,
}

impl EdgeMap {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![false; w * h],
        }
    }

    #[inline]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: bool) {
        self.data[y * self.w + x] = v;
    }

    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&e| e).count()
    }
}

/// Classify pixels into suppressed / weak / strong after NMS.
pub fn non_max_suppression(grad: &Grad, low: f32, high: f32) -> Vec<u8> {
    let w = grad.mag.w;
    let h = grad.mag.h;
    let mut class = vec![NONE; w * h];
    if w < 3 || h < 3 {
        return class;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let m = mag_row[x];
            if m <= low {
                continue;
            }
            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();

            let is_max = if abs_gy < abs_gx * TAN_22_5_DEG {
                m > mag_row[x - 1] && m >= mag_row[x + 1]
            } else if abs_gy > abs_gx * TAN_67_5_DEG {
                m > mag_prev[x] && m >= mag_next[x]
            } else if (gx < 0.0) != (gy < 0.0) {
                m > mag_prev[x + 1] && m >= mag_next[x - 1]
            } else {
                m > mag_prev[x - 1] && m >= mag_next[x + 1]
            };
            if !is_max {
                continue;
            }
            class[y * w + x] = if m > high { STRONG } else { WEAK };
        }
    }
    class
}

/// Keep weak pixels 8-connected to a strong one.
pub fn hysteresis(class: &[u8], w: usize, h: usize) -> EdgeMap {
    let mut edges = EdgeMap::new(w, h);
    let mut stack: Vec<(usize, usize)> = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if class[y * w + x] == STRONG && !edges.is_edge(x, y) {
                edges.set(x, y, true);
                stack.push((x, y));
            }
            while let Some((cx, cy)) = stack.pop() {
                for ny in cy.saturating_sub(1)..=(cy + 1).min(h - 1) {
                    for nx in cx.saturating_sub(1)..=(cx + 1).min(w - 1) {
                        if class[ny * w + nx] != NONE && !edges.is_edge(nx, ny) {
                            edges.set(nx, ny, true);
                            stack.push((nx, ny));
                        }
                    }
                }
            }
        }
    }
    edges
}

/// Canny edges with L1 gradient magnitude on an already smoothed image.
pub fn canny(l: &ImageF32, low: f32, high: f32) -> EdgeMap {
    let grad = sobel_gradients(l, GradientNorm::L1);
    let class = non_max_suppression(&grad, low, high);
    hysteresis(&class, l.w, l.h)
}

/// Blur with a `kernel × kernel` Gaussian, then run [`canny`].
pub fn blurred_canny(l: &ImageF32, kernel: usize, sigma: f32, low: f32, high: f32) -> EdgeMap {
    canny(&gaussian_blur(l, kernel, sigma), low, high)
}
