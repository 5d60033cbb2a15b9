pub mod config;
pub mod setup;

pub use config::{Level, Log, LogConsole, LogFormat};
pub use setup::setup;
