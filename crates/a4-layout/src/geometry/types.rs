//! Geometry data types

use std::str::FromStr;

use crate::constants::{MIN_HEIGHT_PCT, MIN_WIDTH_PCT, PERCENT_MAX};

/// A rectangle in percentage space, origin at the page's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge, percent of page width
    pub x: f32,
    /// Top edge, percent of page height
    pub y: f32,
    /// Width, percent of page width
    pub width: f32,
    /// Height, percent of page height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the rectangle lies fully on the page
    pub fn is_on_page(&self) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= PERCENT_MAX + f32::EPSILON * PERCENT_MAX
            && self.bottom() <= PERCENT_MAX + f32::EPSILON * PERCENT_MAX
    }

    pub fn contains(&self, point: PercentPoint) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    pub fn with_origin(self, x: f32, y: f32) -> Self {
        Self { x, y, ..self }
    }
}

/// A point in percentage space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PercentPoint {
    pub x: f32,
    pub y: f32,
}

impl PercentPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Pull the point onto the page
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, PERCENT_MAX),
            y: self.y.clamp(0.0, PERCENT_MAX),
        }
    }
}

/// A point on the display surface, in pixels relative to the page's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset_from(self, origin: PixelPoint) -> PixelPoint {
        PixelPoint::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Current pixel dimensions of the displayed page.
///
/// The page may be displayed at any size; only its aspect matters for
/// aspect-locked geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSize {
    pub width: f32,
    pub height: f32,
}

impl PixelSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A surface that cannot be used to convert between pixels and percent
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    pub fn to_percent(&self, point: PixelPoint) -> PercentPoint {
        PercentPoint::new(
            point.x / self.width * PERCENT_MAX,
            point.y / self.height * PERCENT_MAX,
        )
    }

    pub fn to_pixels(&self, point: PercentPoint) -> PixelPoint {
        PixelPoint::new(
            point.x / PERCENT_MAX * self.width,
            point.y / PERCENT_MAX * self.height,
        )
    }
}

/// Compass direction of a resize handle. Corners combine two edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeDirection {
    /// All handles in drawing order: corners, then edge midpoints
    pub const ALL: [ResizeDirection; 8] = [
        ResizeDirection::NW,
        ResizeDirection::NE,
        ResizeDirection::SW,
        ResizeDirection::SE,
        ResizeDirection::N,
        ResizeDirection::S,
        ResizeDirection::E,
        ResizeDirection::W,
    ];

    pub fn north(self) -> bool {
        matches!(
            self,
            ResizeDirection::N | ResizeDirection::NE | ResizeDirection::NW
        )
    }

    pub fn south(self) -> bool {
        matches!(
            self,
            ResizeDirection::S | ResizeDirection::SE | ResizeDirection::SW
        )
    }

    pub fn east(self) -> bool {
        matches!(
            self,
            ResizeDirection::E | ResizeDirection::NE | ResizeDirection::SE
        )
    }

    pub fn west(self) -> bool {
        matches!(
            self,
            ResizeDirection::W | ResizeDirection::NW | ResizeDirection::SW
        )
    }

    /// Moves a vertical edge
    pub fn horizontal(self) -> bool {
        self.east() || self.west()
    }

    /// Moves a horizontal edge
    pub fn vertical(self) -> bool {
        self.north() || self.south()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResizeDirection::N => "n",
            ResizeDirection::S => "s",
            ResizeDirection::E => "e",
            ResizeDirection::W => "w",
            ResizeDirection::NE => "ne",
            ResizeDirection::NW => "nw",
            ResizeDirection::SE => "se",
            ResizeDirection::SW => "sw",
        }
    }
}

impl FromStr for ResizeDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "n" => Ok(ResizeDirection::N),
            "s" => Ok(ResizeDirection::S),
            "e" => Ok(ResizeDirection::E),
            "w" => Ok(ResizeDirection::W),
            "ne" => Ok(ResizeDirection::NE),
            "nw" => Ok(ResizeDirection::NW),
            "se" => Ok(ResizeDirection::SE),
            "sw" => Ok(ResizeDirection::SW),
            other => Err(format!("unknown resize direction: {other}")),
        }
    }
}

/// Lower bounds a resize respects, in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeLimits {
    pub min_width: f32,
    pub min_height: f32,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            min_width: MIN_WIDTH_PCT,
            min_height: MIN_HEIGHT_PCT,
        }
    }
}

/// A rectangle in page units with a bottom-left origin (PDF content space)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageRect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PageRect {
    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}
