pub mod config;
pub mod constants;
pub mod error;
pub mod frame_loop;
pub mod mapping;
pub mod series;
pub mod session;
pub mod stats;
pub mod uniforms;

pub static LINE_WGSL: &str = include_str!("../shaders/line.wgsl");

pub use config::*;
pub use constants::*;
pub use error::*;
pub use frame_loop::*;
pub use mapping::*;
pub use series::*;
pub use session::*;
pub use stats::*;
pub use uniforms::*;
