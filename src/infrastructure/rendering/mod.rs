pub mod canvas_renderer;
pub mod geometry;

pub use canvas_renderer::CanvasRenderer;

/// Series palette, cycled by index.
pub const COLORS: [&str; 5] = ["#667eea", "#764ba2", "#f093fb", "#4facfe", "#00f2fe"];

pub const BACKGROUND: &str = "#ffffff";
pub const TEXT_COLOR: &str = "#4b5563";
pub const AXIS_COLOR: &str = "#d1d5db";
