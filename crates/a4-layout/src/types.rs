use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid data URL: {0}")]
    DataUrl(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[cfg(feature = "serde")]
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),
    #[error("Nothing to export")]
    NothingToExport,
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Identifier of a block, placement or library template.
///
/// Ids are unique within the collection that issued them. They are written
/// as JSON numbers; numeric strings such as `"1712345678901"` are accepted
/// when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ElementId(pub u64);

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ElementId {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        struct IdVisitor;

        impl serde::de::Visitor<'_> for IdVisitor {
            type Value = ElementId;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a non-negative integer id or a string holding one")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> std::result::Result<ElementId, E> {
                Ok(ElementId(v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> std::result::Result<ElementId, E> {
                u64::try_from(v)
                    .map(ElementId)
                    .map_err(|_| E::invalid_value(serde::de::Unexpected::Signed(v), &self))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> std::result::Result<ElementId, E> {
                v.trim()
                    .parse()
                    .map(ElementId)
                    .map_err(|_| E::invalid_value(serde::de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source for one collection.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> ElementId {
        let id = ElementId(self.next.max(1));
        self.next = id.0 + 1;
        id
    }

    /// Make sure ids issued from now on never collide with `existing`.
    pub fn reserve_past<'a>(&mut self, existing: impl IntoIterator<Item = &'a ElementId>) {
        if let Some(max) = existing.into_iter().map(|id| id.0).max() {
            self.next = self.next.max(max + 1);
        }
    }
}

/// Identifier assigned to a persisted document by a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DocumentId(pub String);

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// User identity issued by the account service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OwnerId(pub String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Standard paper sizes for the editor page
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Portrait dimensions in millimeters
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Page size in PDF points
    pub fn page_size(self) -> PageSize {
        let (w, h) = self.dimensions_mm();
        PageSize::new(crate::constants::mm_to_pt(w), crate::constants::mm_to_pt(h))
    }

    /// Height divided by width (A4: 297/210)
    pub fn aspect(self) -> f32 {
        let (w, h) = self.dimensions_mm();
        h / w
    }
}

/// Width and height of an output page in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
