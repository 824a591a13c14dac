use crate::error::CommonError;

/// Result of reading typed data out of a [`Value`](crate::Value)
pub type CommonResult<T> = Result<T, CommonError>;
