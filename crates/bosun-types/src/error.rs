//! Error types for the bosun command engine.

/// Errors produced by the bosun framework.
#[derive(Debug, thiserror::Error)]
pub enum BosunError {
    #[error("registration error: {0}")]
    Registration(String),

    #[error("handler error: {0}")]
    Handler(String),

    #[error("completion error: {0}")]
    Completion(String),

    #[error("sink error: {0}")]
    Sink(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, BosunError>;

/// Why a single command definition failed to register.
///
/// One failing definition is skipped and logged; the rest of the build
/// phase proceeds unaffected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("command name is empty")]
    EmptyName,

    #[error("command `{0}` declares more than one default handler")]
    DuplicateDefault(String),

    #[error("command `{0}` declares subcommand `{1}` more than once")]
    DuplicateSub(String, String),

    #[error("command or alias name `{0}` is already registered")]
    NameTaken(String),
}

impl From<RegistrationError> for BosunError {
    fn from(err: RegistrationError) -> Self {
        BosunError::Registration(err.to_string())
    }
}
