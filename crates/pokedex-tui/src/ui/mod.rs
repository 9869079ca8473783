//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, bars and overlays
//! - `input`: keyboard event handling
//! - `styles`: light and dark palettes
//! - `tabs`: the card grid and the details overlay

pub mod input;
pub mod render;
pub mod styles;
pub mod tabs;
