//! Framework error type.
//!
//! Sub-crates define their own error enums; `FbError` covers the failures
//! that originate in `fb-core` itself (config validation, id parsing).

use thiserror::Error;

/// The top-level error type for `fb-core`.
#[derive(Debug, Error)]
pub enum FbError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `fb-core`.
pub type FbResult<T> = Result<T, FbError>;
