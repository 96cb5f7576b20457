use thiserror::Error;

pub type LayoutResult<T> = Result<T, LayoutError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("input has {count} data points, exceeding the limit of {limit}")]
    OversizedInput { count: usize, limit: usize },

    #[error("data point {index} has an invalid value: {reason}")]
    InvalidValue { index: usize, reason: String },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}
