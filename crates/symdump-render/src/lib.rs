//! Text and JSON presentations of exported symbols and export maps

mod json;
mod label;
mod render;

pub use json::{SpacedFormatter, to_json_string};
pub use label::{IncludeLabel, load_statement};
pub use render::{RenderError, RenderOptions, render_export_map, render_symbols};
