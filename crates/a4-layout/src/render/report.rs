use crate::types::ElementId;

/// An item left out of an export
#[derive(Debug, Clone, PartialEq)]
pub enum ExportWarning {
    /// The image could not be embedded in either PNG or JPEG form
    SkippedImage { id: ElementId, reason: String },
    /// A placement points past the end of the PDF
    InvalidPage {
        id: ElementId,
        page_number: u32,
        page_count: usize,
    },
}

impl std::fmt::Display for ExportWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportWarning::SkippedImage { id, reason } => {
                write!(f, "Skipped image {}: {}", id, reason)
            }
            ExportWarning::InvalidPage {
                id,
                page_number,
                page_count,
            } => write!(
                f,
                "Skipped signature {}: page {} is outside 1..={}",
                id, page_number, page_count
            ),
        }
    }
}

/// Output of one export call
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// The complete PDF file
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub warnings: Vec<ExportWarning>,
}

impl ExportReport {
    /// True when every item made it into the file
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    pub(crate) fn warn(warnings: &mut Vec<ExportWarning>, warning: ExportWarning) {
        log::warn!("{}", warning);
        warnings.push(warning);
    }
}
