use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("unknown feature `{0}`")]
    UnknownFeature(String),
    #[error("feature `{0}` is missing")]
    MissingFeature(&'static str),
    #[error("feature `{feature}` is not a finite number ({value})")]
    NonFinite { feature: &'static str, value: f64 },
    #[error("feature `{feature}` = {value} is outside [{min}, {max}]")]
    OutOfBounds {
        feature: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl DomainError {
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }
}
