//! Validation trait

use crate::errors::ConversionResult;

/// Checks a value before it enters the pipeline
pub trait Validator {
    /// The type of value this validator handles
    type Value;

    /// Accept or reject a single value
    fn validate(&self, value: &Self::Value) -> ConversionResult<()>;
}
