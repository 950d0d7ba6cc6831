pub mod data;
pub mod io;
pub mod printing;

#[cfg(test)]
pub mod tests;

pub use data::{path_display, Config, SettingError};
pub use io::ConfigError;
