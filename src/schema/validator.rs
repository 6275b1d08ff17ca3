use chrono::NaiveDateTime;

use crate::post::{PostId, PostRecord};
use crate::schema::raw_value::{RawRecord, RawValue};
use crate::schema::validation_error::{Expected, ValidationError, ValidationFailure};
use crate::text_utils::parse_date_time;

pub const DEFAULT_AUTHOR: &str = "Anonymous";

pub const KNOWN_FIELDS: [&str; 7] = [
    "title",
    "description",
    "pubDate",
    "updatedDate",
    "author",
    "tags",
    "draft",
];

#[derive(Debug, Clone)]
pub struct SchemaDefaults {
    pub author: String,
}

impl Default for SchemaDefaults {
    fn default() -> Self {
        SchemaDefaults {
            author: DEFAULT_AUTHOR.to_string(),
        }
    }
}

pub fn validate(id: impl Into<PostId>, raw: &RawRecord) -> Result<PostRecord, ValidationFailure> {
    validate_with_defaults(id, raw, &SchemaDefaults::default())
}

/// Checks every field of `raw` and builds a record, or reports all the
/// violations at once.
pub fn validate_with_defaults(id: impl Into<PostId>, raw: &RawRecord, defaults: &SchemaDefaults) -> Result<PostRecord, ValidationFailure> {
    let mut errors = vec![];

    let title = required_text(raw, "title", &mut errors);
    let description = required_text(raw, "description", &mut errors);
    let pub_date = required_date(raw, "pubDate", &mut errors);
    let updated_date = optional_date(raw, "updatedDate", &mut errors);
    let author = optional_text(raw, "author", &mut errors);
    let tags = optional_tags(raw, "tags", &mut errors);
    let draft = optional_bool(raw, "draft", &mut errors);

    let id = id.into();
    match (title, description, pub_date) {
        (Some(title), Some(description), Some(pub_date)) if errors.is_empty() => {
            Ok(PostRecord::new(
                id,
                title,
                description,
                pub_date,
                updated_date,
                author.unwrap_or_else(|| defaults.author.clone()),
                tags.unwrap_or_default(),
                draft.unwrap_or(false),
            ))
        }
        _ => Err(ValidationFailure { id, errors }),
    }
}

/// Keys present in the front matter that the schema does not know about.
pub fn unknown_fields(raw: &RawRecord) -> Vec<&str> {
    raw.keys()
        .map(|k| k.as_str())
        .filter(|k| !KNOWN_FIELDS.contains(k))
        .collect()
}

// Optional fields treat an explicit null the same as an absent key
fn present<'a>(raw: &'a RawRecord, field: &str) -> Option<&'a RawValue> {
    raw.get(field).filter(|v| !v.is_null())
}

fn required_text(raw: &RawRecord, field: &'static str, errors: &mut Vec<ValidationError>) -> Option<String> {
    match present(raw, field) {
        None => {
            errors.push(ValidationError::MissingField(field));
            None
        }
        Some(RawValue::Text(s)) if s.is_empty() => {
            errors.push(ValidationError::MissingField(field));
            None
        }
        Some(RawValue::Text(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(ValidationError::TypeMismatch { field, expected: Expected::Text });
            None
        }
    }
}

fn optional_text(raw: &RawRecord, field: &'static str, errors: &mut Vec<ValidationError>) -> Option<String> {
    match present(raw, field)? {
        RawValue::Text(s) => Some(s.clone()),
        _ => {
            errors.push(ValidationError::TypeMismatch { field, expected: Expected::Text });
            None
        }
    }
}

fn coerce_date(value: &RawValue) -> Option<NaiveDateTime> {
    match value {
        RawValue::Date(date) => Some(*date),
        RawValue::Text(s) => parse_date_time(s).ok(),
        _ => None,
    }
}

fn required_date(raw: &RawRecord, field: &'static str, errors: &mut Vec<ValidationError>) -> Option<NaiveDateTime> {
    let Some(value) = present(raw, field) else {
        errors.push(ValidationError::MissingField(field));
        return None;
    };
    let date = coerce_date(value);
    if date.is_none() {
        errors.push(ValidationError::InvalidFormat(field));
    }
    date
}

fn optional_date(raw: &RawRecord, field: &'static str, errors: &mut Vec<ValidationError>) -> Option<NaiveDateTime> {
    let value = present(raw, field)?;
    let date = coerce_date(value);
    if date.is_none() {
        errors.push(ValidationError::InvalidFormat(field));
    }
    date
}

fn optional_tags(raw: &RawRecord, field: &'static str, errors: &mut Vec<ValidationError>) -> Option<Vec<String>> {
    let mismatch = ValidationError::TypeMismatch { field, expected: Expected::ArrayOfText };
    let items = match present(raw, field)? {
        RawValue::List(items) => items,
        _ => {
            errors.push(mismatch);
            return None;
        }
    };

    // One bad element rejects the whole list
    let tags: Option<Vec<String>> = items.iter()
        .map(|item| item.as_text().map(|s| s.to_string()))
        .collect();
    if tags.is_none() {
        errors.push(mismatch);
    }
    tags
}

fn optional_bool(raw: &RawRecord, field: &'static str, errors: &mut Vec<ValidationError>) -> Option<bool> {
    match present(raw, field)? {
        RawValue::Bool(b) => Some(*b),
        _ => {
            errors.push(ValidationError::TypeMismatch { field, expected: Expected::Boolean });
            None
        }
    }
}
