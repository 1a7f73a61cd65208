//! Pixel filters that turn a photographed signature into ink on a
//! transparent background

use image::RgbaImage;

/// Share of the original colour kept after darkening
const INK_DARKEN: f64 = 0.3;

/// Fraction of the threshold over which alpha ramps from 0 to opaque
const ALPHA_RAMP: f64 = 0.5;

/// Average of the three colour channels
fn brightness(pixel: &image::Rgba<u8>) -> f64 {
    (pixel[0] as f64 + pixel[1] as f64 + pixel[2] as f64) / 3.0
}

/// Make bright pixels transparent and darken the rest.
///
/// A pixel brighter than `threshold` gets alpha 0 and keeps its colour.
/// Every other pixel has its colour scaled by `0.3 * (255 - b) / 255` and
/// its alpha ramped up from 0 at the threshold to opaque at half of it.
pub fn remove_background(image: &mut RgbaImage, threshold: u8) {
    let t = threshold as f64;

    for pixel in image.pixels_mut() {
        let b = brightness(pixel);
        if b > t {
            pixel[3] = 0;
            continue;
        }

        let factor = (255.0 - b).max(0.0) / 255.0;
        for channel in 0..3 {
            pixel[channel] = (pixel[channel] as f64 * factor * INK_DARKEN).round() as u8;
        }

        let alpha = if t > 0.0 {
            255.0 * ((t - b) / (t * ALPHA_RAMP)).min(1.0)
        } else {
            0.0
        };
        pixel[3] = alpha.round() as u8;
    }
}

/// Soften the edges of the ink.
///
/// Each pass replaces the alpha of every semi-transparent pixel that is
/// not on the image border with the mean alpha of its 3x3 neighbourhood.
/// Every pass reads the alpha as it was before smoothing started, so extra
/// passes repeat the first one.
pub fn smooth_edges(image: &mut RgbaImage, passes: u8) {
    let (width, height) = image.dimensions();
    if width < 3 || height < 3 {
        return;
    }

    let snapshot = image.clone();
    for _ in 0..passes {
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let alpha = snapshot.get_pixel(x, y)[3];
                if alpha == 0 || alpha == 255 {
                    continue;
                }

                let mut sum = 0u32;
                for ny in y - 1..=y + 1 {
                    for nx in x - 1..=x + 1 {
                        sum += snapshot.get_pixel(nx, ny)[3] as u32;
                    }
                }
                image.get_pixel_mut(x, y)[3] = (sum as f64 / 9.0).round() as u8;
            }
        }
    }
}
