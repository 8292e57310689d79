//! Overlay rendering of filtered lines and the estimated vanishing point.
//!
//! Rendering always happens on a fresh RGB copy; the source image is left
//! untouched. The marker is drawn only when an estimate exists and may be
//! partially or fully clipped when the estimate lies off-canvas.
use crate::types::LineSegment;
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// RGB colour of the line overlay.
    pub line_color: [u8; 3],
    pub line_thickness: u32,
    /// RGB colour of the filled estimate marker.
    pub marker_color: [u8; 3],
    pub marker_radius: i32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            line_color: [0, 255, 0],
            line_thickness: 2,
            marker_color: [255, 0, 0],
            marker_radius: 10,
        }
    }
}

/// Draw `lines` and, if present, `estimate` onto an RGB copy of `image`.
pub fn render_overlay(
    image: &DynamicImage,
    lines: &[LineSegment],
    estimate: Option<Point2<f64>>,
    style: &OverlayStyle,
) -> RgbImage {
    let mut canvas = image.to_rgb8();
    let line_color = Rgb(style.line_color);
    for seg in lines {
        draw_thick_segment(&mut canvas, seg, style.line_thickness.max(1), line_color);
    }
    if let Some(vp) = estimate {
        let center = (vp.x.round() as i32, vp.y.round() as i32);
        draw_filled_circle_mut(
            &mut canvas,
            center,
            style.marker_radius,
            Rgb(style.marker_color),
        );
    }
    canvas
}

/// Parallel one-pixel strokes offset along the segment's minor axis.
fn draw_thick_segment(canvas: &mut RgbImage, seg: &LineSegment, thickness: u32, color: Rgb<u8>) {
    let [dx, dy] = seg.delta();
    let offset_y = dx.abs() >= dy.abs();
    let first = -((thickness as i32 - 1) / 2);
    for o in first..first + thickness as i32 {
        let (ox, oy) = if offset_y { (0.0, o as f32) } else { (o as f32, 0.0) };
        let start = (seg.p0[0] as f32 + ox, seg.p0[1] as f32 + oy);
        let end = (seg.p1[0] as f32 + ox, seg.p1[1] as f32 + oy);
        draw_line_segment_mut(canvas, start, end, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_canvas(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([30, 30, 30])))
    }

    #[test]
    fn no_lines_no_estimate_is_identical_copy() {
        let img = gray_canvas(40, 30);
        let out = render_overlay(&img, &[], None, &OverlayStyle::default());
        assert_eq!(&out, img.as_rgb8().unwrap());
    }

    #[test]
    fn lines_are_drawn_and_source_untouched() {
        let img = gray_canvas(40, 40);
        let style = OverlayStyle::default();
        let seg = LineSegment::from_ints(20, 2, 20, 37);
        let out = render_overlay(&img, &[seg], None, &style);
        assert_eq!(out.get_pixel(20, 20), &Rgb(style.line_color));
        assert_eq!(out.get_pixel(5, 5), &Rgb([30, 30, 30]));
        assert_eq!(img.as_rgb8().unwrap().get_pixel(20, 20), &Rgb([30, 30, 30]));
    }

    #[test]
    fn marker_drawn_only_with_estimate() {
        let img = gray_canvas(60, 60);
        let style = OverlayStyle::default();
        let with = render_overlay(&img, &[], Some(Point2::new(30.0, 30.0)), &style);
        assert_eq!(with.get_pixel(30, 30), &Rgb(style.marker_color));
        assert_eq!(with.get_pixel(35, 30), &Rgb(style.marker_color));
        assert_eq!(with.get_pixel(2, 2), &Rgb([30, 30, 30]));
        let without = render_overlay(&img, &[], None, &style);
        assert_eq!(without.get_pixel(30, 30), &Rgb([30, 30, 30]));
    }

    #[test]
    fn off_canvas_marker_is_clipped() {
        let img = gray_canvas(20, 20);
        let out = render_overlay(
            &img,
            &[],
            Some(Point2::new(35.0, 5.0)),
            &OverlayStyle::default(),
        );
        assert_eq!(out.dimensions(), (20, 20));
    }
}
