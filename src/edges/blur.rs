//! Separable Gaussian smoothing with replicated borders.
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order), odd length.
    fn taps(&self) -> &[f32];
}

/// Sampled, normalised Gaussian of odd size.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    taps: Vec<f32>,
}

impl GaussianKernel {
    /// Build a `size`-tap kernel for standard deviation `sigma`.
    ///
    /// `size` must be odd and `sigma` positive; callers validate this through
    /// `DetectorParams::validate`.
    pub fn new(size: usize, sigma: f32) -> Self {
        debug_assert!(size % 2 == 1, "kernel size must be odd");
        let radius = (size / 2) as isize;
        let denom = 2.0 * sigma * sigma;
        let mut taps: Vec<f32> = (-radius..=radius)
            .map(|i| (-((i * i) as f32) / denom).exp())
            .collect();
        let sum: f32 = taps.iter().sum();
        taps.iter_mut().for_each(|t| *t /= sum);
        Self { taps }
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Convolve `src` with `filter` horizontally then vertically.
pub fn separable_filter<F: SeparableFilter>(src: &ImageF32, filter: &F) -> ImageF32 {
    let taps = filter.taps();
    let radius = (taps.len() / 2) as isize;
    let (w, h) = (src.w, src.h);
    let mut horiz = ImageF32::new(w, h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    let clamp = |v: isize, n: usize| v.clamp(0, n as isize - 1) as usize;

    for y in 0..h {
        let row = src.row(y);
        let dst = horiz.row_mut(y);
        for (x, d) in dst.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let xx = clamp(x as isize + k as isize - radius, w);
                acc += row[xx] * t;
            }
            *d = acc;
        }
    }

    for y in 0..h {
        let dst = out.row_mut(y);
        for (x, d) in dst.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let yy = clamp(y as isize + k as isize - radius, h);
                acc += horiz.get(x, yy) * t;
            }
            *d = acc;
        }
    }
    out
}

/// Gaussian blur with a `size × size` kernel of standard deviation `sigma`.
pub fn gaussian_blur(src: &ImageF32, size: usize, sigma: f32) -> ImageF32 {
    separable_filter(src, &GaussianKernel::new(size, sigma))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn kernel_is_normalised_and_symmetric() {
        let k = GaussianKernel::new(5, 1.5);
        let taps = k.taps();
        assert_eq!(taps.len(), 5);
        assert_abs_diff_eq!(taps.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(taps[0], taps[4], epsilon = 1e-7);
        assert_abs_diff_eq!(taps[1], taps[3], epsilon = 1e-7);
        assert!(taps[2] > taps[1] && taps[1] > taps[0]);
    }

    #[test]
    fn constant_image_is_unchanged() {
        let mut img = ImageF32::new(9, 6);
        img.data.iter_mut().for_each(|v| *v = 77.0);
        let out = gaussian_blur(&img, 5, 1.5);
        for v in out.data {
            assert_abs_diff_eq!(v, 77.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn impulse_spreads_but_keeps_mass() {
        let mut img = ImageF32::new(11, 11);
        img.set(5, 5, 100.0);
        let out = gaussian_blur(&img, 5, 1.5);
        let total: f32 = out.data.iter().sum();
        assert_abs_diff_eq!(total, 100.0, epsilon = 1e-2);
        assert!(out.get(5, 5) < 100.0);
        assert!(out.get(4, 5) > 0.0);
        assert_eq!(out.get(0, 0), 0.0);
    }
}
