use thiserror::Error;

/// Errors that may occur when evaluating fluid properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The property has no value at the requested state.
    #[error("undefined property: {context}")]
    Undefined { context: String },

    /// The requested state lies outside the range the model covers.
    ///
    /// For example, a liquid water correlation asked for steam temperatures.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },

    /// The requested state is not physical, such as a `NaN` temperature.
    #[error("invalid state: {context}")]
    InvalidState { context: String },

    /// The evaluation itself failed.
    #[error("calculation error: {context}")]
    Calculation { context: String },
}
