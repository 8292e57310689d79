use image::{Rgb, RgbImage};
use std::fs;
use std::path::PathBuf;

pub const DARK: u8 = 40;
pub const LIGHT: u8 = 220;

/// Two-tone image whose tone changes across rays leaving `vp` at the given
/// angles (degrees, image coordinates with y pointing down). An even number
/// of boundaries keeps the colouring consistent around the full turn.
pub fn ray_sectors_rgb(width: u32, height: u32, vp: (f64, f64), boundaries_deg: &[f64]) -> RgbImage {
    assert!(
        boundaries_deg.len() % 2 == 0,
        "need an even number of boundaries"
    );
    RgbImage::from_fn(width, height, |x, y| {
        let ang = (y as f64 - vp.1)
            .atan2(x as f64 - vp.0)
            .to_degrees()
            .rem_euclid(360.0);
        let crossed = boundaries_deg.iter().filter(|&&b| b < ang).count();
        let v = if crossed % 2 == 0 { DARK } else { LIGHT };
        Rgb([v, v, v])
    })
}

pub fn uniform_rgb(width: u32, height: u32, value: u8) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([value, value / 2, value / 3]))
}

/// Fresh, empty scratch directory unique to this test process.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "vanishing_point_{}_{}",
        name,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}
