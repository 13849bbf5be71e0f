//! Median-cut palette quantization.
//!
//! Operates on the distinct-color histogram of an image rather than raw
//! pixels: logos are flat-color artwork with few distinct colors, and the
//! histogram keeps a solid-color image as a single unsplittable box.

use std::collections::BTreeMap;

use image::RgbaImage;

use tokentint_shared::Color;

/// Compute up to `max_colors` dominant colors, most prevalent first.
///
/// Fully transparent pixels carry no color and are excluded; an image with
/// no opaque pixels yields an empty palette.
pub fn dominant_palette(img: &RgbaImage, max_colors: usize) -> Vec<Color> {
    let histogram = build_histogram(img);
    if histogram.is_empty() || max_colors == 0 {
        return Vec::new();
    }

    let mut boxes = vec![ColorBox::new(histogram)];
    while boxes.len() < max_colors {
        // Split the most populous box that still holds more than one
        // distinct color; stop when none is splittable.
        let Some(idx) = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.colors.len() > 1)
            .max_by_key(|(_, b)| b.population)
            .map(|(i, _)| i)
        else {
            break;
        };

        let (left, right) = boxes.swap_remove(idx).split();
        boxes.push(left);
        boxes.push(right);
    }

    boxes.sort_by(|a, b| b.population.cmp(&a.population));
    boxes.iter().map(ColorBox::mean).collect()
}

/// Distinct opaque colors with their pixel counts, in deterministic order.
fn build_histogram(img: &RgbaImage) -> Vec<([u8; 3], u32)> {
    let mut counts: BTreeMap<[u8; 3], u32> = BTreeMap::new();
    for pixel in img.pixels() {
        let [r, g, b, a] = pixel.0;
        if a == 0 {
            continue;
        }
        *counts.entry([r, g, b]).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

// ---------------------------------------------------------------------------
// ColorBox
// ---------------------------------------------------------------------------

/// A region of color space holding a slice of the histogram.
struct ColorBox {
    colors: Vec<([u8; 3], u32)>,
    population: u32,
}

impl ColorBox {
    fn new(colors: Vec<([u8; 3], u32)>) -> Self {
        let population = colors.iter().map(|(_, count)| count).sum();
        Self { colors, population }
    }

    /// Channel with the widest value range in this box.
    fn widest_channel(&self) -> usize {
        let mut min = [u8::MAX; 3];
        let mut max = [u8::MIN; 3];
        for (rgb, _) in &self.colors {
            for ch in 0..3 {
                min[ch] = min[ch].min(rgb[ch]);
                max[ch] = max[ch].max(rgb[ch]);
            }
        }

        let ranges = [max[0] - min[0], max[1] - min[1], max[2] - min[2]];
        ranges
            .iter()
            .enumerate()
            .max_by_key(|(_, range)| **range)
            .map(|(ch, _)| ch)
            .unwrap_or(0)
    }

    /// Split at the population median along the widest channel.
    ///
    /// Both halves are guaranteed non-empty; callers must not split a box
    /// with fewer than two distinct colors.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let channel = self.widest_channel();
        self.colors.sort_by_key(|(rgb, _)| rgb[channel]);

        let half = self.population / 2;
        let mut running = 0u32;
        let mut split_at = self.colors.len() - 1;
        for (i, (_, count)) in self.colors.iter().enumerate() {
            running += count;
            if running >= half {
                split_at = i + 1;
                break;
            }
        }
        let split_at = split_at.clamp(1, self.colors.len() - 1);

        let right = self.colors.split_off(split_at);
        (ColorBox::new(self.colors), ColorBox::new(right))
    }

    /// Population-weighted mean color of the box.
    fn mean(&self) -> Color {
        let mut sums = [0u64; 3];
        for (rgb, count) in &self.colors {
            for ch in 0..3 {
                sums[ch] += u64::from(rgb[ch]) * u64::from(*count);
            }
        }

        let total = f64::from(self.population);
        let channel = |sum: u64| (sum as f64 / total).round().clamp(0.0, 255.0) as u8;
        Color {
            r: channel(sums[0]),
            g: channel(sums[1]),
            b: channel(sums[2]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(rgba))
    }

    #[test]
    fn solid_image_yields_single_entry() {
        let img = solid(8, 8, [255, 0, 0, 255]);
        let palette = dominant_palette(&img, 2);
        assert_eq!(palette.len(), 1);
        assert_eq!(palette[0].to_hex(), "#ff0000");
    }

    #[test]
    fn two_color_image_ranked_by_prevalence() {
        // 12 columns red, 4 columns blue: red must come first.
        let mut img = solid(16, 16, [255, 0, 0, 255]);
        for x in 12..16 {
            for y in 0..16 {
                img.put_pixel(x, y, Rgba([0, 0, 255, 255]));
            }
        }

        let palette = dominant_palette(&img, 2);
        assert_eq!(palette.len(), 2);
        assert_eq!(palette[0].to_hex(), "#ff0000");
        assert_eq!(palette[1].to_hex(), "#0000ff");
    }

    #[test]
    fn transparent_pixels_are_ignored() {
        let mut img = solid(4, 4, [0, 255, 0, 255]);
        for x in 0..4 {
            img.put_pixel(x, 0, Rgba([255, 0, 0, 0]));
        }

        let palette = dominant_palette(&img, 2);
        assert_eq!(palette.len(), 1);
        assert_eq!(palette[0].to_hex(), "#00ff00");
    }

    #[test]
    fn fully_transparent_image_yields_empty_palette() {
        let img = solid(4, 4, [255, 0, 0, 0]);
        assert!(dominant_palette(&img, 2).is_empty());
    }

    #[test]
    fn palette_size_is_capped() {
        // Four distinct colors, one per quadrant.
        let mut img = solid(8, 8, [255, 0, 0, 255]);
        for y in 0..8 {
            for x in 0..8 {
                let rgba = match (x < 4, y < 4) {
                    (true, true) => [255, 0, 0, 255],
                    (false, true) => [0, 255, 0, 255],
                    (true, false) => [0, 0, 255, 255],
                    (false, false) => [255, 255, 0, 255],
                };
                img.put_pixel(x, y, Rgba(rgba));
            }
        }

        assert_eq!(dominant_palette(&img, 2).len(), 2);
    }

    #[test]
    fn zero_max_colors_yields_empty_palette() {
        let img = solid(4, 4, [10, 20, 30, 255]);
        assert!(dominant_palette(&img, 0).is_empty());
    }
}
