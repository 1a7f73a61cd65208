//! File I/O for the signer and exporters

use std::path::Path;

use crate::render::load_page_sizes;
use crate::types::*;

/// A PDF read from disk, ready for the signature overlay
#[derive(Debug, Clone)]
pub struct LoadedPdf {
    /// Untouched file contents, needed again at export
    pub bytes: Vec<u8>,
    /// Native size of every page, in page order
    pub pages: Vec<PageSize>,
}

impl LoadedPdf {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Load a PDF and read its page sizes
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<LoadedPdf> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    parse_pdf(bytes).await
}

/// Read page sizes from PDF bytes already in memory
pub async fn parse_pdf(bytes: Vec<u8>) -> Result<LoadedPdf> {
    tokio::task::spawn_blocking(move || {
        let pages = load_page_sizes(&bytes)?;
        log::debug!("Parsed PDF with {} pages", pages.len());
        Ok(LoadedPdf { bytes, pages })
    })
    .await?
}
