//! Error conversion glue between layers.
//!
//! The domain and form layers must not depend on the engine's error types,
//! so the bridging impls live here.

use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;
use crate::forms::ValidationError;

impl From<ValidationErrors> for ValidationError {
    fn from(val: ValidationErrors) -> Self {
        ValidationError::Invalid(val.to_string())
    }
}

impl From<TypeConstraintError> for ValidationError {
    fn from(val: TypeConstraintError) -> Self {
        ValidationError::Invalid(val.to_string())
    }
}

#[cfg(feature = "client")]
mod sync {
    use super::*;
    use crate::forms::FormError;
    use crate::services::SyncError;

    impl From<ValidationError> for SyncError {
        fn from(val: ValidationError) -> Self {
            SyncError::Validation(val)
        }
    }

    impl From<FormError> for SyncError {
        fn from(val: FormError) -> Self {
            match val {
                FormError::Validation(err) => SyncError::Validation(err),
                other => SyncError::Form(other),
            }
        }
    }
}
