pub mod constants;
pub mod geometry;
pub mod interact;
pub mod io;
pub mod render;
pub mod store;

mod canvas;
mod image_data;
mod model;
mod options;
mod overlay;
mod session;
mod types;

pub use canvas::{BlockCanvas, TextEditRequest};
pub use image_data::*;
pub use interact::{HitTarget, Key, KeyAction, KeyInput};
pub use io::{LoadedPdf, load_pdf, parse_pdf};
pub use model::*;
pub use options::*;
pub use overlay::SignatureOverlay;
pub use render::{
    ExportReport, ExportWarning, export_document, export_file_name, export_signed_pdf,
    render_document, sign_pdf, signed_file_name,
};
pub use session::EditorSession;
pub use store::{DocumentStore, MemoryStore};
#[cfg(feature = "serde")]
pub use store::JsonFileStore;
pub use types::*;
