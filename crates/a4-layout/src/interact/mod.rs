//! Pointer and keyboard interaction
//!
//! One gesture controller per canvas turns pointer events into geometry
//! updates on whichever collection owns the selected entity.

mod controller;
mod keys;

pub use controller::*;
pub use keys::*;
