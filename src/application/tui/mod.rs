pub mod range_picker;
pub mod text_renderer;
pub mod theme;

pub use range_picker::*;
pub use text_renderer::*;
pub use theme::*;
