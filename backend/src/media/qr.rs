use crate::error::SurveyError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use png::{BitDepth as PngBitDepth, ColorType as PngColorType, Encoder as PngEncoder};
use qrcode::{Color, EcLevel, QrCode};

/// Edge of the rendered QR image in pixels.
pub const QR_WIDTH_PX: u32 = 200;
/// Quiet zone around the symbol, in modules.
pub const QR_MARGIN_MODULES: u32 = 1;

const DARK: u8 = 0x00;
const LIGHT: u8 = 0xFF;

/// Renders `content` as a QR code (error correction H) and returns it as an
/// embeddable `data:image/png;base64,...` URL.
pub fn render_data_url(content: &str) -> Result<String, SurveyError> {
    let png = render_png(content)?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
}

fn render_png(content: &str) -> Result<Vec<u8>, SurveyError> {
    let code = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::H)
        .map_err(|e| SurveyError::QrCode(e.to_string()))?;
    let modules = code.width() as u32;
    let colors = code.to_colors();

    // The symbol plus margin is stretched over the full width; module edges
    // fall on fractional pixels, matching the usual browser renderers.
    let scale = QR_WIDTH_PX as f64 / (modules + 2 * QR_MARGIN_MODULES) as f64;
    let mut pixels = Vec::with_capacity((QR_WIDTH_PX * QR_WIDTH_PX) as usize);
    for py in 0..QR_WIDTH_PX {
        let row = module_at(py, scale, modules);
        for px in 0..QR_WIDTH_PX {
            let dark = match (row, module_at(px, scale, modules)) {
                (Some(y), Some(x)) => colors[(y * modules + x) as usize] == Color::Dark,
                _ => false,
            };
            pixels.push(if dark { DARK } else { LIGHT });
        }
    }

    let mut out = Vec::new();
    {
        let mut encoder = PngEncoder::new(&mut out, QR_WIDTH_PX, QR_WIDTH_PX);
        encoder.set_color(PngColorType::Grayscale);
        encoder.set_depth(PngBitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| SurveyError::QrCode(e.to_string()))?;
        writer
            .write_image_data(&pixels)
            .map_err(|e| SurveyError::QrCode(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| SurveyError::QrCode(e.to_string()))?;
    }
    Ok(out)
}

/// Module index under pixel `px`, or `None` inside the quiet zone.
fn module_at(px: u32, scale: f64, modules: u32) -> Option<u32> {
    let pos = (px as f64 / scale).floor() as i64 - QR_MARGIN_MODULES as i64;
    if pos < 0 || pos >= modules as i64 {
        None
    } else {
        Some(pos as u32)
    }
}
