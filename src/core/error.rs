//! Error types for OptiPrice

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptiError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Market data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type OptiResult<T> = Result<T, OptiError>;

impl OptiError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn data_unavailable(msg: impl Into<String>) -> Self {
        Self::DataUnavailable(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

impl From<serde_json::Error> for OptiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for OptiError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
