//! Signature maker
//!
//! Turns a photo or scan of a handwritten signature into a PNG with a
//! transparent background, ready to be dropped into the signer's library.

pub mod filter;
mod options;
mod types;

pub use filter::{remove_background, smooth_edges};
pub use options::*;
pub use types::*;

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use image::{DynamicImage, ImageFormat, RgbaImage};

/// A processed signature
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    /// Encoded PNG with an alpha channel
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Signature {
    /// `data:image/png;base64,...` form of the PNG
    pub fn to_data_url(&self) -> String {
        format!("data:image/png;base64,{}", B64.encode(&self.png))
    }

    /// Width / height in pixels
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Apply background removal and edge smoothing to a decoded image
pub fn process_image(image: DynamicImage, options: &SignatureOptions) -> Result<RgbaImage> {
    options.validate()?;

    let mut rgba = image.into_rgba8();
    remove_background(&mut rgba, options.threshold);
    smooth_edges(&mut rgba, options.smoothing_passes);
    Ok(rgba)
}

/// Decode `bytes` (PNG or JPEG), process them and encode the result as PNG
pub fn process_bytes(bytes: &[u8], options: &SignatureOptions) -> Result<Signature> {
    let image = image::load_from_memory(bytes)?;
    let processed = process_image(image, options)?;
    let (width, height) = processed.dimensions();

    let mut png = Vec::new();
    processed.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    log::debug!(
        "Processed {}x{} signature at threshold {}",
        width,
        height,
        options.threshold
    );

    Ok(Signature { png, width, height })
}

/// Process an image given as a base64 data URL.
///
/// Accepts the same inputs as the layout crate's data URL parser:
/// `data:<mime>;base64,<payload>` or a bare base64 payload, with
/// whitespace anywhere in the payload ignored. This crate does not depend
/// on the layout crate, so the rules are repeated here.
pub fn process_data_url(data_url: &str, options: &SignatureOptions) -> Result<Signature> {
    let data_url = data_url.trim();
    let payload = match data_url.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest
                .split_once(',')
                .ok_or_else(|| SignatureError::DataUrl("missing ',' separator".to_string()))?;
            if !header.ends_with(";base64") {
                return Err(SignatureError::DataUrl(
                    "only base64 data URLs are supported".to_string(),
                ));
            }
            payload
        }
        None => data_url,
    };

    let cleaned: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = B64
        .decode(cleaned.as_bytes())
        .map_err(|e| SignatureError::DataUrl(format!("bad base64 payload: {}", e)))?;
    process_bytes(&bytes, options)
}

/// Read and process an image file
pub async fn process_file(
    path: impl AsRef<Path>,
    options: &SignatureOptions,
) -> Result<Signature> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    let options = *options;

    // Pixel work is CPU-bound, spawn blocking
    tokio::task::spawn_blocking(move || process_bytes(&bytes, &options)).await?
}

/// Write the signature PNG to disk
pub async fn save_png(signature: &Signature, path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::write(path.as_ref(), &signature.png).await?;
    log::info!("Signature saved to {}", path.as_ref().display());
    Ok(())
}
