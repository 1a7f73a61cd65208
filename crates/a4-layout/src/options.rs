use crate::constants::{
    DEFAULT_FONT_SIZE, DRAG_THRESHOLD_PX, HANDLE_HIT_RADIUS_PX, MIN_HEIGHT_PCT, MIN_WIDTH_PCT,
    PERCENT_MAX, TEXT_PADDING_PT,
};
use crate::geometry::SizeLimits;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Editor and export configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditorOptions {
    // Page
    pub paper: PaperSize,

    // Interaction
    pub drag_threshold_px: f32,
    pub handle_hit_radius_px: f32,
    pub min_width_pct: f32,
    pub min_height_pct: f32,

    // Text
    pub default_font_size: f32,
    pub text_padding_pt: f32,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            drag_threshold_px: DRAG_THRESHOLD_PX,
            handle_hit_radius_px: HANDLE_HIT_RADIUS_PX,
            min_width_pct: MIN_WIDTH_PCT,
            min_height_pct: MIN_HEIGHT_PCT,
            default_font_size: DEFAULT_FONT_SIZE,
            text_padding_pt: TEXT_PADDING_PT,
        }
    }
}

impl EditorOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| LayoutError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LayoutError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let (w, h) = self.paper.dimensions_mm();
        if !(w > 0.0 && h > 0.0) {
            return Err(LayoutError::Config(format!(
                "Paper dimensions must be positive, got {}x{}mm",
                w, h
            )));
        }

        if self.drag_threshold_px < 0.0 {
            return Err(LayoutError::Config(
                "Drag threshold cannot be negative".to_string(),
            ));
        }

        if self.handle_hit_radius_px <= 0.0 {
            return Err(LayoutError::Config(
                "Handle hit radius must be positive".to_string(),
            ));
        }

        for (name, value) in [
            ("Minimum width", self.min_width_pct),
            ("Minimum height", self.min_height_pct),
        ] {
            if !(value > 0.0 && value < PERCENT_MAX) {
                return Err(LayoutError::Config(format!(
                    "{} must be between 0 and 100 percent, got {}",
                    name, value
                )));
            }
        }

        if self.default_font_size <= 0.0 {
            return Err(LayoutError::Config(
                "Default font size must be positive".to_string(),
            ));
        }

        if self.text_padding_pt < 0.0 {
            return Err(LayoutError::Config(
                "Text padding cannot be negative".to_string(),
            ));
        }

        Ok(())
    }

    pub fn size_limits(&self) -> SizeLimits {
        SizeLimits {
            min_width: self.min_width_pct,
            min_height: self.min_height_pct,
        }
    }

    /// Output page size in points
    pub fn page_size(&self) -> PageSize {
        self.paper.page_size()
    }
}
