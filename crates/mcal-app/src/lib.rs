//! Application wiring for the market calendar engine.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;

pub use app::Application;
pub use config::{AppConfig, FeedSettings, RestConfig};
pub use error::{AppError, AppResult};
pub use logging::init_logging;
