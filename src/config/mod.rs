// Config layer - environment-driven settings and logging setup
pub mod logging;
pub mod settings;

pub use logging::{init_logging, LoggingConfig, LoggingError};
pub use settings::AppSettings;
