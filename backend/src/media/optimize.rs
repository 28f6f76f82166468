use crate::error::SurveyError;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, Rgba, RgbaImage, RgbImage};
use log::debug;

/// JPEG qualities tried at each size before shrinking further.
const JPEG_QUALITIES: [u8; 5] = [85, 75, 65, 55, 45];
/// Each round scales both edges by this factor.
const SHRINK_FACTOR: f64 = 0.75;
/// Stop shrinking once the shorter edge would drop below this many pixels.
const MIN_EDGE_PX: u32 = 32;

/// An image guaranteed to fit the bound it was optimized for.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl OptimizedImage {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn content_type(&self) -> &'static str {
        self.format.to_mime_type()
    }
}

/// Produces a decodable rendition of `source` that is at most `max_bytes` long.
///
/// Images already within the bound are kept byte for byte. Larger ones are
/// flattened onto white and re-encoded as JPEG, first at falling quality and
/// then at shrinking size. Input that is not a decodable image is
/// `UnsupportedImage`; an image that cannot be made small enough before
/// reaching the minimum edge is an encoding error.
pub fn optimize(source: &[u8], max_bytes: usize) -> Result<OptimizedImage, SurveyError> {
    let format = image::guess_format(source)
        .map_err(|e| SurveyError::UnsupportedImage(e.to_string()))?;
    let decoded = image::load_from_memory_with_format(source, format)
        .map_err(|e| SurveyError::UnsupportedImage(e.to_string()))?;

    if source.len() <= max_bytes {
        return Ok(OptimizedImage {
            bytes: source.to_vec(),
            format,
        });
    }

    let mut current = flatten_on_white(&decoded);
    let mut smallest = usize::MAX;
    loop {
        let (width, height) = current.dimensions();
        for quality in JPEG_QUALITIES {
            let bytes = encode_jpeg(&current, quality, max_bytes)?;
            if bytes.len() <= max_bytes {
                debug!(
                    "logo optimized from {} to {} bytes ({}x{}, quality {})",
                    source.len(),
                    bytes.len(),
                    width,
                    height,
                    quality
                );
                return Ok(OptimizedImage {
                    bytes,
                    format: ImageFormat::Jpeg,
                });
            }
            smallest = smallest.min(bytes.len());
        }

        let next_width = (width as f64 * SHRINK_FACTOR).round() as u32;
        let next_height = (height as f64 * SHRINK_FACTOR).round() as u32;
        if next_width.min(next_height) < MIN_EDGE_PX {
            return Err(encoding_error(
                max_bytes,
                format!("smallest encoding was {} bytes", smallest),
            ));
        }
        current = image::imageops::resize(&current, next_width, next_height, FilterType::Lanczos3);
    }
}

/// Composites transparent pixels over a white background; JPEG has no alpha.
fn flatten_on_white(img: &DynamicImage) -> RgbImage {
    let (w, h) = img.dimensions();
    let mut background = RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]));
    image::imageops::overlay(&mut background, &img.to_rgba8(), 0, 0);
    DynamicImage::ImageRgba8(background).to_rgb8()
}

fn encode_jpeg(img: &RgbImage, quality: u8, max_bytes: usize) -> Result<Vec<u8>, SurveyError> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality)
        .encode_image(img)
        .map_err(|e| encoding_error(max_bytes, e))?;
    Ok(bytes)
}

fn encoding_error(max_bytes: usize, reason: impl std::fmt::Display) -> SurveyError {
    SurveyError::Encoding {
        max_bytes,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use common::model::survey::MAX_LOGO_BYTES;
    use image::Rgb;
    use std::io::Cursor;

    /// PNG of incompressible noise, so its encoded size tracks its pixel count.
    pub(crate) fn noise_png(side: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(side, side, |x, y| {
            let mut z = (y as u64 * side as u64 + x as u64).wrapping_add(0x9E37_79B9_7F4A_7C15);
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^= z >> 31;
            Rgb([z as u8, (z >> 8) as u8, (z >> 16) as u8])
        });
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn image_within_bound_is_kept_verbatim() {
        let source = noise_png(16);
        let optimized = optimize(&source, MAX_LOGO_BYTES).unwrap();
        assert_eq!(optimized.bytes, source);
        assert_eq!(optimized.content_type(), "image/png");
    }

    #[test]
    fn oversized_image_is_reencoded_under_the_bound() {
        let source = noise_png(600);
        assert!(source.len() > MAX_LOGO_BYTES, "fixture is {} bytes", source.len());

        let optimized = optimize(&source, MAX_LOGO_BYTES).unwrap();
        assert!(optimized.len() <= MAX_LOGO_BYTES);
        assert_eq!(optimized.format, ImageFormat::Jpeg);

        let decoded = image::load_from_memory(&optimized.bytes).unwrap();
        assert!(decoded.width() > 0 && decoded.width() <= 600);
        assert_eq!(decoded.width(), decoded.height());
    }

    #[test]
    fn transparent_pixels_become_white() {
        let clear = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
        let flat = flatten_on_white(&DynamicImage::ImageRgba8(clear));
        assert_eq!(flat.get_pixel(0, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn unreachable_bound_is_an_encoding_error() {
        let source = noise_png(64);
        let err = optimize(&source, 100).unwrap_err();
        assert!(matches!(err, SurveyError::Encoding { max_bytes: 100, .. }), "{err}");
    }

    #[test]
    fn non_image_input_is_unsupported() {
        let err = optimize(b"definitely not an image", MAX_LOGO_BYTES).unwrap_err();
        assert!(matches!(err, SurveyError::UnsupportedImage(_)), "{err}");

        let mut truncated = noise_png(32);
        truncated.truncate(64);
        let err = optimize(&truncated, MAX_LOGO_BYTES).unwrap_err();
        assert!(matches!(err, SurveyError::UnsupportedImage(_)), "{err}");
    }
}
