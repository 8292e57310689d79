//! Angle utilities shared by the line filter and the Hough stage.

/// Orientation of the direction `(dx, dy)` in degrees, range (-180, 180].
#[inline]
pub fn segment_angle_deg(dx: f64, dy: f64) -> f64 {
    dy.atan2(dx).to_degrees()
}

/// Number of angle bins covering [0, π) at resolution `theta` (radians).
#[inline]
pub fn angle_bins(theta: f64) -> usize {
    (std::f64::consts::PI / theta).round().max(1.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn segment_angle_basic() {
        assert!(approx_eq(segment_angle_deg(1.0, 0.0), 0.0));
        assert!(approx_eq(segment_angle_deg(1.0, 1.0), 45.0));
        assert!(approx_eq(segment_angle_deg(0.0, 1.0), 90.0));
        assert!(approx_eq(segment_angle_deg(1.0, -1.0), -45.0));
        assert!(approx_eq(segment_angle_deg(-1.0, 0.0), 180.0));
    }

    #[test]
    fn angle_bins_one_degree() {
        assert_eq!(angle_bins(std::f64::consts::PI / 180.0), 180);
        assert_eq!(angle_bins(10.0), 1);
    }
}
