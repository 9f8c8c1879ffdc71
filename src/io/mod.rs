//! Input loading and output rendering around the scheduling core.

pub mod loader;
pub mod render;

pub use loader::{load_cadence, load_weighted, read_cadence, read_weighted, LoadedChores};
pub use render::{render_json, render_text};
