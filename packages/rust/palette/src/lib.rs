//! Logo image color analysis: average color and a 2-color dominant palette.
//!
//! The extractor is total: absent bytes and undecodable images both produce
//! the fixed fallback triple. Decoding stages the bytes through a named temp
//! file; the file is removed on drop on success and failure alike, so no
//! scratch state outlives a call.

pub mod quantize;

use std::io::Write;

use image::{DynamicImage, ImageReader, RgbaImage};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use tokentint_shared::{Color, ColorTriple, Result, TokenTintError};

/// Maximum edge of the working thumbnail; bounds per-image analysis cost.
const THUMBNAIL_EDGE: u32 = 100;

/// Number of palette entries requested from quantization.
const PALETTE_SIZE: usize = 2;

/// Mix ratio used to derive a second color when the palette has one entry.
/// A light blend toward white keeps the card gradient visually coherent.
const SECOND_COLOR_MIX_RATIO: f64 = 0.1;

/// Compute the color triple for a logo, falling back on any failure.
///
/// `None` bytes (fetch failure) and decode/analysis errors both yield
/// [`ColorTriple::FALLBACK`]; errors are logged, never propagated.
pub fn extract_colors(bytes: Option<&[u8]>) -> ColorTriple {
    let Some(bytes) = bytes else {
        return ColorTriple::FALLBACK;
    };

    match analyze(bytes) {
        Ok(triple) => triple,
        Err(e) => {
            warn!(error = %e, "color extraction failed, using fallback colors");
            ColorTriple::FALLBACK
        }
    }
}

/// Decode image bytes and derive the color triple.
///
/// Fallible variant of [`extract_colors`], for callers that need to
/// distinguish a real extraction from a fallback.
pub fn analyze(bytes: &[u8]) -> Result<ColorTriple> {
    let image = decode_scratch(bytes)?;
    let rgba: RgbaImage = image.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE).to_rgba8();

    let average = average_color(&rgba);
    let palette = quantize::dominant_palette(&rgba, PALETTE_SIZE);

    let dominant1 = palette.first().copied().unwrap_or(Color::BLACK);
    let dominant2 = match palette.get(1) {
        Some(second) => *second,
        None => dominant1.mix(Color::WHITE, SECOND_COLOR_MIX_RATIO),
    };

    debug!(
        average = %average,
        dominant1 = %dominant1,
        dominant2 = %dominant2,
        palette_len = palette.len(),
        "logo analyzed"
    );

    Ok(ColorTriple {
        average,
        dominant1,
        dominant2,
    })
}

/// Mean color over pixels with any opacity.
///
/// Fully transparent pixels carry no color; an image without opaque pixels
/// averages to black.
pub fn average_color(img: &RgbaImage) -> Color {
    let mut sums = [0u64; 3];
    let mut count = 0u64;

    for pixel in img.pixels() {
        let [r, g, b, a] = pixel.0;
        if a == 0 {
            continue;
        }
        sums[0] += u64::from(r);
        sums[1] += u64::from(g);
        sums[2] += u64::from(b);
        count += 1;
    }

    if count == 0 {
        return Color::BLACK;
    }

    let channel = |sum: u64| (sum as f64 / count as f64).round().clamp(0.0, 255.0) as u8;
    Color {
        r: channel(sums[0]),
        g: channel(sums[1]),
        b: channel(sums[2]),
    }
}

/// Decode image bytes via a scratch temp file.
///
/// The temp file is removed when `scratch` drops, on every exit path.
fn decode_scratch(bytes: &[u8]) -> Result<DynamicImage> {
    let mut scratch = NamedTempFile::new()
        .map_err(|e| TokenTintError::Decode(format!("scratch file: {e}")))?;
    scratch
        .write_all(bytes)
        .and_then(|()| scratch.flush())
        .map_err(|e| TokenTintError::Decode(format!("scratch write: {e}")))?;

    let image = ImageReader::open(scratch.path())
        .map_err(|e| TokenTintError::Decode(format!("scratch open: {e}")))?
        .with_guessed_format()
        .map_err(|e| TokenTintError::Decode(format!("format detection: {e}")))?
        .decode()
        .map_err(|e| TokenTintError::Decode(e.to_string()))?;

    Ok(image)
}
