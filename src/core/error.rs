use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{label} is required")]
    Required { label: &'static str },

    #[error("{label} must be a number")]
    NotNumeric { label: &'static str },

    #[error("{label} must be at least {min}")]
    BelowMinimum { label: &'static str, min: f64 },

    #[error("{label} must be at most {max}")]
    AboveMaximum { label: &'static str, max: f64 },
}
