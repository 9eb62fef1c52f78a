use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum MyError {
    #[error("Invalid hex string for `{name}`: {msg}")]
    InvalidHex { name: String, msg: String },

    #[error("Unknown block cipher algorithm `{0}`")]
    UnknownAlgorithm(String),

    #[error("Invalid value `{value}` for `{name}`")]
    InvalidOption { name: String, value: String },

    #[error("No message given, use the positional MESSAGE or `--file`")]
    MissingInput,

    #[error("{0}")]
    ConfigFailed(String),
}
