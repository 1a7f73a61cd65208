//! Blocks, placements and documents
//!
//! The persisted JSON shape keeps geometry and variant fields side by side:
//! `{"id":1,"x":10,"y":5,"width":80,"height":10,"type":"text","content":"…","fontSize":14,"isBold":false}`

use crate::constants::{DEFAULT_DOCUMENT_TITLE, DEFAULT_FONT_SIZE};
use crate::geometry::Rect;
use crate::types::{DocumentId, ElementId, OwnerId};

/// Kind of block the editor can add
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BlockType {
    Text,
    Image,
}

/// Variant-specific content of a block
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum BlockKind {
    Text {
        content: String,
        #[cfg_attr(
            feature = "serde",
            serde(rename = "fontSize", default = "default_font_size")
        )]
        font_size: f32,
        #[cfg_attr(feature = "serde", serde(rename = "isBold", default))]
        is_bold: bool,
    },
    Image {
        /// Image data URL; empty while the upload is pending
        #[cfg_attr(feature = "serde", serde(default))]
        content: String,
        /// Pixel width / height of the uploaded image
        #[cfg_attr(
            feature = "serde",
            serde(
                rename = "aspectRatio",
                default,
                skip_serializing_if = "Option::is_none"
            )
        )]
        aspect_ratio: Option<f32>,
    },
}

#[cfg(feature = "serde")]
fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

impl BlockKind {
    pub fn text(content: impl Into<String>) -> Self {
        BlockKind::Text {
            content: content.into(),
            font_size: DEFAULT_FONT_SIZE,
            is_bold: false,
        }
    }

    pub fn empty_image() -> Self {
        BlockKind::Image {
            content: String::new(),
            aspect_ratio: None,
        }
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            BlockKind::Text { .. } => BlockType::Text,
            BlockKind::Image { .. } => BlockType::Image,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            BlockKind::Text { content, .. } | BlockKind::Image { content, .. } => content,
        }
    }

    pub fn aspect_ratio(&self) -> Option<f32> {
        match self {
            BlockKind::Image { aspect_ratio, .. } => *aspect_ratio,
            BlockKind::Text { .. } => None,
        }
    }
}

/// A positioned content unit on the editor page
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub id: ElementId,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub rect: Rect,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: BlockKind,
}

impl Block {
    pub fn block_type(&self) -> BlockType {
        self.kind.block_type()
    }

    /// An image block whose upload has not completed
    pub fn is_pending_image(&self) -> bool {
        matches!(&self.kind, BlockKind::Image { content, .. } if content.is_empty())
    }
}

/// Partial update of a block; `None` leaves a field untouched.
///
/// `font_size` and `is_bold` only apply to text blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockUpdate {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub content: Option<String>,
    pub font_size: Option<f32>,
    pub is_bold: Option<bool>,
}

impl BlockUpdate {
    pub fn rect(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
            ..Default::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub(crate) fn apply(self, block: &mut Block) {
        if let Some(x) = self.x {
            block.rect.x = x;
        }
        if let Some(y) = self.y {
            block.rect.y = y;
        }
        if let Some(width) = self.width {
            block.rect.width = width;
        }
        if let Some(height) = self.height {
            block.rect.height = height;
        }

        match &mut block.kind {
            BlockKind::Text {
                content,
                font_size,
                is_bold,
            } => {
                if let Some(new_content) = self.content {
                    *content = new_content;
                }
                if let Some(size) = self.font_size {
                    *font_size = size;
                }
                if let Some(bold) = self.is_bold {
                    *is_bold = bold;
                }
            }
            BlockKind::Image { content, .. } => {
                if let Some(new_content) = self.content {
                    *content = new_content;
                }
            }
        }
    }
}

/// A signature image placed on one page of a loaded PDF
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SignaturePlacement {
    pub id: ElementId,
    /// 1-indexed page number
    pub page_number: u32,
    pub image_data: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub rect: Rect,
    pub aspect_ratio: f32,
}

/// A reusable signature image in the signer's library
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SignatureTemplate {
    pub id: ElementId,
    pub image_data: String,
    pub aspect_ratio: f32,
}

/// A persisted editor document
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Document {
    pub id: DocumentId,
    pub owner: OwnerId,
    pub title: String,
    pub blocks: Vec<Block>,
    /// Unix milliseconds
    pub created_at: i64,
    /// Unix milliseconds
    pub updated_at: i64,
}

/// A document that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct DocumentDraft {
    pub title: String,
    pub blocks: Vec<Block>,
    /// Creation time to keep when importing; `None` means now
    pub created_at: Option<i64>,
}

impl DocumentDraft {
    pub fn new(title: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            title: title.into(),
            blocks,
            created_at: None,
        }
    }

    /// Title to persist, falling back to the default for blank titles
    pub fn effective_title(&self) -> String {
        effective_title(&self.title)
    }
}

pub(crate) fn effective_title(title: &str) -> String {
    if title.trim().is_empty() {
        DEFAULT_DOCUMENT_TITLE.to_string()
    } else {
        title.to_string()
    }
}

/// Fields of a document to replace
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub blocks: Option<Vec<Block>>,
}
