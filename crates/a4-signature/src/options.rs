use std::ops::RangeInclusive;

use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Allowed brightness thresholds
pub const THRESHOLD_RANGE: RangeInclusive<u8> = 100..=255;

/// Allowed number of smoothing passes
pub const SMOOTHING_RANGE: RangeInclusive<u8> = 0..=5;

/// Background removal settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SignatureOptions {
    /// Pixels brighter than this become fully transparent
    pub threshold: u8,
    /// How many times semi-transparent edges are averaged with their neighbours
    pub smoothing_passes: u8,
}

impl Default for SignatureOptions {
    fn default() -> Self {
        Self {
            threshold: 200,
            smoothing_passes: 1,
        }
    }
}

impl SignatureOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| SignatureError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !THRESHOLD_RANGE.contains(&self.threshold) {
            return Err(SignatureError::Config(format!(
                "Threshold must be between {} and {}, got {}",
                THRESHOLD_RANGE.start(),
                THRESHOLD_RANGE.end(),
                self.threshold
            )));
        }

        if !SMOOTHING_RANGE.contains(&self.smoothing_passes) {
            return Err(SignatureError::Config(format!(
                "Smoothing must be between {} and {} passes, got {}",
                SMOOTHING_RANGE.start(),
                SMOOTHING_RANGE.end(),
                self.smoothing_passes
            )));
        }

        Ok(())
    }
}
