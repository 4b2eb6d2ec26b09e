pub mod hooks;
pub mod payload;
pub mod plugins;

pub use hooks::*;
pub use payload::*;
pub use plugins::*;
