//! Percentage-space geometry
//!
//! All positions and sizes of blocks and placements are percentages
//! (0-100) of the page's own width and height. This module handles:
//! - Default placement of new blocks
//! - Clamping a dragged rectangle onto the page
//! - Edge and corner resize, with aspect locking in true pixel proportions
//! - Mapping percentages to page units for export

mod page;
mod resize;
mod types;

pub use page::*;
pub use resize::*;
pub use types::*;
