use thiserror::Error;

/// Errors raised while parsing query-side domain values.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A query value is not one of the accepted variants.
    #[error("Invalid {param}. Must be one of: {accepted}")]
    InvalidValue { param: &'static str, value: String, accepted: &'static str },
}
