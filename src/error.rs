use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("invalid granularity: {0}")]
    InvalidGranularity(String),

    #[error("date arithmetic out of range while {context}")]
    DateOverflow { context: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown item: {0}")]
    UnknownItem(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl TimelineError {
    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        Self::DateOverflow {
            context: context.into(),
        }
    }
}
