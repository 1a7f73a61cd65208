//! Message types and async worker for the editor and signer front ends
//!
//! The UI owns the canvas and overlay and mutates them synchronously. Every
//! slow operation (reading files, decoding images, parsing and writing PDFs)
//! is sent to the worker as a [`LayoutCommand`]; results come back as
//! [`LayoutUpdate`]s that the UI applies by id.

mod apply;
mod handlers;
mod worker;

pub use apply::{apply_to_canvas, apply_to_overlay};
pub use worker::{spawn_worker, worker_task};

use std::path::PathBuf;

// Re-export types from library crates
pub use a4_layout::{
    Block, DecodedImage, EditorOptions, ElementId, ExportWarning, LoadedPdf, SignaturePlacement,
};
pub use a4_signature::SignatureOptions;

/// Where a decoded image should land once it is ready
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    /// Content of an image block on the editor canvas
    Block(ElementId),
    /// A new template in the signer's library
    Library,
}

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum LayoutCommand {
    ReadImage {
        path: PathBuf,
        target: ImageTarget,
    },
    DecodeImage {
        data_url: String,
        target: ImageTarget,
    },
    LoadPdf {
        path: PathBuf,
    },
    ExportDocument {
        blocks: Vec<Block>,
        options: EditorOptions,
        output_path: PathBuf,
    },
    ExportSigned {
        pdf_bytes: Vec<u8>,
        placements: Vec<SignaturePlacement>,
        output_path: PathBuf,
    },
    MakeSignature {
        input_path: PathBuf,
        options: SignatureOptions,
    },
    LoadConfig {
        path: PathBuf,
    },
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum LayoutUpdate {
    ImageDecoded {
        target: ImageTarget,
        image: DecodedImage,
    },
    ImageFailed {
        target: ImageTarget,
        message: String,
    },
    PdfLoaded {
        path: PathBuf,
        pdf: LoadedPdf,
    },
    ExportComplete {
        path: PathBuf,
        page_count: usize,
        warnings: Vec<ExportWarning>,
    },
    SignatureReady {
        image: DecodedImage,
    },
    ConfigLoaded {
        options: EditorOptions,
    },
    Error {
        message: String,
    },
}
