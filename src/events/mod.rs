pub mod resize;
pub mod start;

pub use resize::wire_resize;
pub use start::wire_start_prompt;
