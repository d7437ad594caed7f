pub mod config;
pub mod frame;

pub use config::{AppConfig, ConfigError, PaletteScope};
pub use frame::{Frame, FrameHeader, Run};
