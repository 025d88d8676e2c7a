//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup and the scripted run
//! so `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: juku_core::config::ConfigError,
    },

    /// A simulation action or the monthly tick failed.
    #[error("simulation error: {source}")]
    Simulation {
        /// The underlying simulation error.
        #[from]
        source: juku_core::SimError,
    },

    /// The `engine` section of the config is unreadable or refers to
    /// something the catalogs do not contain.
    #[error("script error: {message}")]
    Script {
        /// Description of the script failure.
        message: String,
    },
}
