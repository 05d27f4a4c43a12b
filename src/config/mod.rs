mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{
    default_suggestions, Config, IdentityConfig, LoggingConfig, PipelineConfig, TimeoutConfig,
    DEFAULT_CATEGORY,
};
