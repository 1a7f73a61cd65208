use crate::canvas::BlockCanvas;
use crate::geometry::PixelSize;
use crate::options::EditorOptions;
use crate::overlay::SignatureOverlay;
use crate::types::*;

/// State shared by every editor and signer opened in one session.
///
/// Created when the user arrives and dropped when they leave. Canvases
/// and overlays receive their options from here instead of any global.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    pub owner: Option<OwnerId>,
    pub options: EditorOptions,
}

impl EditorSession {
    /// Start a session after validating `options`
    pub fn start(owner: Option<OwnerId>, options: EditorOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { owner, options })
    }

    pub fn is_signed_in(&self) -> bool {
        self.owner.is_some()
    }

    /// A fresh editor canvas displayed at `viewport`
    pub fn canvas(&self, viewport: PixelSize) -> BlockCanvas {
        BlockCanvas::new(self.options.clone(), viewport)
    }

    /// A fresh signature overlay displayed at `viewport`
    pub fn overlay(&self, viewport: PixelSize) -> SignatureOverlay {
        SignatureOverlay::new(self.options.clone(), viewport)
    }
}
