#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, render_points_png, save_rgb_png, CellShader};
