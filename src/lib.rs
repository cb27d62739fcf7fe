pub mod config;
pub mod logger;
pub mod plugin;
pub mod schema;

pub use plugin::{CHANNEL_NAME, WiredashPlugin};
