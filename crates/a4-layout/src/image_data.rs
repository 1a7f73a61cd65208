//! Image payloads carried by blocks and placements
//!
//! Images travel as data URLs (`data:image/png;base64,...`). This module
//! parses and builds them, guesses PNG versus JPEG, and reads pixel
//! dimensions.

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;

use crate::types::*;

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Raster formats the exporters can embed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    /// Guess the format, trusting a declared MIME type over magic bytes.
    /// Unknown data is treated as JPEG.
    pub fn detect(mime: Option<&str>, bytes: &[u8]) -> Self {
        match mime.map(|m| m.to_ascii_lowercase()) {
            Some(m) if m == "image/png" => return ImageKind::Png,
            Some(m) if m == "image/jpeg" || m == "image/jpg" => return ImageKind::Jpeg,
            _ => {}
        }

        if bytes.starts_with(PNG_MAGIC) {
            ImageKind::Png
        } else {
            ImageKind::Jpeg
        }
    }

    /// Whether the bytes carry this format's signature
    pub fn matches_signature(self, bytes: &[u8]) -> bool {
        match self {
            ImageKind::Png => bytes.starts_with(PNG_MAGIC),
            ImageKind::Jpeg => bytes.starts_with(JPEG_MAGIC),
        }
    }

    pub fn other(self) -> Self {
        match self {
            ImageKind::Png => ImageKind::Jpeg,
            ImageKind::Jpeg => ImageKind::Png,
        }
    }

    pub fn image_format(self) -> image::ImageFormat {
        match self {
            ImageKind::Png => image::ImageFormat::Png,
            ImageKind::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

/// Decoded payload of a data URL
#[derive(Debug, Clone, PartialEq)]
pub struct DataUrl {
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl DataUrl {
    /// Parse `data:<mime>;base64,<payload>`. A bare base64 string without
    /// the `data:` prefix is accepted too.
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        let (mime, payload) = match url.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest
                    .split_once(',')
                    .ok_or_else(|| LayoutError::DataUrl("missing ',' separator".to_string()))?;
                let Some(mime) = header.strip_suffix(";base64") else {
                    return Err(LayoutError::DataUrl(
                        "only base64 data URLs are supported".to_string(),
                    ));
                };
                let mime = mime.split(';').next().unwrap_or_default();
                let mime = (!mime.is_empty()).then(|| mime.to_string());
                (mime, payload)
            }
            None => (None, url),
        };

        let cleaned: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let bytes = B64
            .decode(cleaned.as_bytes())
            .map_err(|e| LayoutError::DataUrl(format!("bad base64 payload: {}", e)))?;

        Ok(Self { mime, bytes })
    }

    pub fn kind(&self) -> ImageKind {
        ImageKind::detect(self.mime.as_deref(), &self.bytes)
    }
}

/// Build a base64 data URL
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, B64.encode(bytes))
}

/// An image whose pixel size is known
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub data_url: String,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl DecodedImage {
    /// Width / height in pixels
    pub fn aspect_ratio(&self) -> f32 {
        self.pixel_width as f32 / self.pixel_height as f32
    }
}

/// Learn the pixel size of an image data URL.
///
/// Fails on anything that is not a readable raster, which is how a
/// corrupt upload is caught before it reaches a block.
pub fn decode_data_url(data_url: String) -> Result<DecodedImage> {
    let parsed = DataUrl::parse(&data_url)?;
    let (pixel_width, pixel_height) = image::ImageReader::new(Cursor::new(&parsed.bytes))
        .with_guessed_format()?
        .into_dimensions()?;

    if pixel_width == 0 || pixel_height == 0 {
        return Err(LayoutError::DataUrl("image has no pixels".to_string()));
    }

    Ok(DecodedImage {
        data_url,
        pixel_width,
        pixel_height,
    })
}

/// Wrap raw image bytes in a data URL and read their pixel size
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DecodedImage> {
    let format = image::guess_format(bytes)?;
    decode_data_url(to_data_url(format.to_mime_type(), bytes))
}

/// Read an image file into a data URL
pub async fn read_image_file(path: impl AsRef<Path>) -> Result<DecodedImage> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    tokio::task::spawn_blocking(move || decode_image_bytes(&bytes)).await?
}
