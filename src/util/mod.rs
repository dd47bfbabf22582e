//! Utilities shared by the terminal views.

mod colormaps;
mod layout_config;

pub use colormaps::ColorPalette;
pub use layout_config::LayoutConfig;
