use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid gamma: {value}. Must be a finite number")]
    InvalidGamma { value: f64 },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error(transparent)]
    Library(#[from] truecolor::Error),
}
