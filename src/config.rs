//! Configuration loading, validation and fragment matching.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Fragment file matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use matcher::{
    FragmentMatcher,
    MatcherError,
};
pub use types::{
    BundlerSettings,
    CombineConfig,
    ComponentNaming,
    ConfigError,
    DEFAULT_FRAGMENT_SUFFIX,
    RewriteConfig,
    ValidationError,
};
