use cp_core::CalculationError;
use cp_plan::ConfigurationError;
use thiserror::Error;

/// Fatal errors.  Either one aborts the run and no schedule is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("calculation error: {0}")]
    Calculation(#[from] CalculationError),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
