#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        min: String,
        max: String,
        value: String,
    },
    #[error("{name} is not a valid number: {value}")]
    NotANumber { name: &'static str, value: String },
}
