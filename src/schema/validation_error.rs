use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::post::PostId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Text,
    ArrayOfText,
    Boolean,
}

impl Display for Expected {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Text => write!(f, "text"),
            Expected::ArrayOfText => write!(f, "array of text"),
            Expected::Boolean => write!(f, "boolean"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(&'static str),
    TypeMismatch { field: &'static str, expected: Expected },
    InvalidFormat(&'static str),
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) => field,
            ValidationError::TypeMismatch { field, .. } => field,
            ValidationError::InvalidFormat(field) => field,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField(field) => write!(f, "{}: required field is missing", field),
            ValidationError::TypeMismatch { field, expected } => write!(f, "{}: expected {}", field, expected),
            ValidationError::InvalidFormat(field) => write!(f, "{}: not a valid date or date time", field),
        }
    }
}

/// Every violation found in one document's front matter.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    pub id: PostId,
    pub errors: Vec<ValidationError>,
}

impl ValidationFailure {
    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.field()).collect()
    }

    pub fn mentions(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field() == field)
    }
}

impl Display for ValidationFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "invalid front matter in {}", self.id)?;
        for error in &self.errors {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}

impl Error for ValidationFailure {}
