use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum DemoError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown dashboard section `{0}`")]
    UnknownSection(String),
}
