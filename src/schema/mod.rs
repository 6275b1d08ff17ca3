pub mod raw_value;
pub mod validation_error;
pub mod validator;

pub use raw_value::{into_record, RawRecord, RawValue};
pub use validation_error::{Expected, ValidationError, ValidationFailure};
pub use validator::{unknown_fields, validate, validate_with_defaults, SchemaDefaults, DEFAULT_AUTHOR};
