use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("accumulated time must be finite and non-negative, got {0}")]
    InvalidTime(f64),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
