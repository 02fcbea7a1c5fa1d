use crate::error::EngineError;

pub type EngineResult<T> = Result<T, EngineError>;
