use fb_core::FbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("driver configuration error: {0}")]
    Config(#[from] FbError),

    #[error("host has no frame subscribers")]
    NoSubscribers,
}

pub type DriverResult<T> = Result<T, DriverError>;
