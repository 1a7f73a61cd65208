use std::path::PathBuf;

use a4_layout::{
    Block, DecodedImage, EditorOptions, SignaturePlacement, decode_data_url, export_document,
    export_signed_pdf, load_pdf, read_image_file,
};
use a4_signature::SignatureOptions;
use tokio::sync::mpsc;

use crate::{ImageTarget, LayoutUpdate};

fn send_decoded(
    result: a4_layout::Result<DecodedImage>,
    target: ImageTarget,
    update_tx: &mpsc::UnboundedSender<LayoutUpdate>,
) {
    let update = match result {
        Ok(image) => LayoutUpdate::ImageDecoded { target, image },
        Err(e) => {
            log::warn!("Image for {:?} could not be decoded: {}", target, e);
            LayoutUpdate::ImageFailed {
                target,
                message: format!("Failed to read image: {e}"),
            }
        }
    };
    let _ = update_tx.send(update);
}

pub async fn handle_read_image(
    path: PathBuf,
    target: ImageTarget,
    update_tx: &mpsc::UnboundedSender<LayoutUpdate>,
) {
    send_decoded(read_image_file(&path).await, target, update_tx);
}

pub async fn handle_decode_image(
    data_url: String,
    target: ImageTarget,
    update_tx: &mpsc::UnboundedSender<LayoutUpdate>,
) {
    let result = match tokio::task::spawn_blocking(move || decode_data_url(data_url)).await {
        Ok(result) => result,
        Err(e) => Err(e.into()),
    };
    send_decoded(result, target, update_tx);
}

pub async fn handle_load_pdf(path: PathBuf, update_tx: &mpsc::UnboundedSender<LayoutUpdate>) {
    match load_pdf(&path).await {
        Ok(pdf) => {
            log::debug!("Loaded {} with {} pages", path.display(), pdf.page_count());
            let _ = update_tx.send(LayoutUpdate::PdfLoaded { path, pdf });
        }
        Err(e) => {
            let _ = update_tx.send(LayoutUpdate::Error {
                message: format!("Failed to load PDF: {e}"),
            });
        }
    }
}

pub async fn handle_export_document(
    blocks: Vec<Block>,
    options: EditorOptions,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<LayoutUpdate>,
) {
    match export_document(blocks, options, &output_path).await {
        Ok(report) => {
            let _ = update_tx.send(LayoutUpdate::ExportComplete {
                path: output_path,
                page_count: report.page_count,
                warnings: report.warnings,
            });
        }
        Err(e) => {
            let _ = update_tx.send(LayoutUpdate::Error {
                message: format!("Failed to export document: {e}"),
            });
        }
    }
}

pub async fn handle_export_signed(
    pdf_bytes: Vec<u8>,
    placements: Vec<SignaturePlacement>,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<LayoutUpdate>,
) {
    match export_signed_pdf(pdf_bytes, placements, &output_path).await {
        Ok(report) => {
            let _ = update_tx.send(LayoutUpdate::ExportComplete {
                path: output_path,
                page_count: report.page_count,
                warnings: report.warnings,
            });
        }
        Err(e) => {
            let _ = update_tx.send(LayoutUpdate::Error {
                message: format!("Failed to sign PDF: {e}"),
            });
        }
    }
}

pub async fn handle_make_signature(
    input_path: PathBuf,
    options: SignatureOptions,
    update_tx: &mpsc::UnboundedSender<LayoutUpdate>,
) {
    match a4_signature::process_file(&input_path, &options).await {
        Ok(signature) => {
            let image = DecodedImage {
                data_url: signature.to_data_url(),
                pixel_width: signature.width,
                pixel_height: signature.height,
            };
            let _ = update_tx.send(LayoutUpdate::SignatureReady { image });
        }
        Err(e) => {
            let _ = update_tx.send(LayoutUpdate::Error {
                message: format!("Failed to make signature: {e}"),
            });
        }
    }
}

pub async fn handle_load_config(path: PathBuf, update_tx: &mpsc::UnboundedSender<LayoutUpdate>) {
    match EditorOptions::load(&path).await {
        Ok(options) => {
            let _ = update_tx.send(LayoutUpdate::ConfigLoaded { options });
        }
        Err(e) => {
            let _ = update_tx.send(LayoutUpdate::Error {
                message: format!("Failed to load config: {e}"),
            });
        }
    }
}
