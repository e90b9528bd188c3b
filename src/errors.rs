use thiserror::Error;

/// Unified error type for the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A form amount that does not parse as a number. Rejected locally,
    /// before any gateway traffic.
    #[error("Invalid amount: {input:?}")]
    InvalidAmount {
        /// The raw form text that failed to parse
        input: String,
    },

    /// A remote list/create/update/delete call failed. The session draft
    /// and the entity store are left untouched.
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Tried to submit or edit while no edit session was open.
    #[error("No edit session in progress")]
    NoSession,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
