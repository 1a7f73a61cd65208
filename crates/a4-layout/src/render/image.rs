//! Raster image XObjects
//!
//! Images are decoded with the `image` crate and written as Flate
//! compressed RGB samples, with a gray soft mask when any pixel is not
//! fully opaque.

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::{Document, ObjectId, Stream, dictionary};

use crate::image_data::{DataUrl, ImageKind};
use crate::types::*;

/// Add the image behind `data_url` to `doc`.
///
/// The format guessed from the MIME type or magic bytes is tried first.
/// If that decode fails the other format is tried once before giving up.
pub(crate) fn embed_image(doc: &mut Document, data_url: &str) -> Result<ObjectId> {
    let parsed = DataUrl::parse(data_url)?;
    let detected = parsed.kind();

    match embed_as(doc, &parsed.bytes, detected) {
        Ok(id) => Ok(id),
        Err(err) => {
            let fallback = detected.other();
            log::debug!(
                "Embedding as {:?} failed ({}), retrying as {:?}",
                detected,
                err,
                fallback
            );
            embed_as(doc, &parsed.bytes, fallback)
        }
    }
}

fn embed_as(doc: &mut Document, bytes: &[u8], kind: ImageKind) -> Result<ObjectId> {
    let rgba = image::load_from_memory_with_format(bytes, kind.image_format())?.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    let mut alpha = Vec::with_capacity((width * height) as usize);
    for pixel in rgba.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
        alpha.push(pixel[3]);
    }

    let mut image_dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => width as i64,
        "Height" => height as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
        "Filter" => "FlateDecode",
    };

    if alpha.iter().any(|&a| a < u8::MAX) {
        let smask = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            },
            deflate(&alpha)?,
        );
        let smask_id = doc.add_object(smask);
        image_dict.set("SMask", smask_id);
    }

    Ok(doc.add_object(Stream::new(image_dict, deflate(&rgb)?)))
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Paint XObject `name` into a rectangle given in page points
pub(crate) fn draw_image_ops(name: &str, x: f32, y: f32, width: f32, height: f32) -> String {
    format!(
        "q {:.3} 0 0 {:.3} {:.3} {:.3} cm /{} Do Q\n",
        width, height, x, y, name
    )
}
