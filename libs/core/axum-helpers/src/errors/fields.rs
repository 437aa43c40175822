//! Per-field error map returned with 400 responses.
//!
//! Serializes as a flat object from field name to a list of messages:
//!
//! ```json
//! {"name": ["Field 'name' must have at least 3 characters"], "price": ["This field is required."]}
//! ```
//!
//! Errors that are not tied to one field go under [`NON_FIELD_ERRORS`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors};

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(example = json!({"name": ["Field 'name' must have at least 3 characters"]}))]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-message map, handy for query parameter errors
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn message_of(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, list) in errors.field_errors() {
            for error in list.iter() {
                out.add(field.to_string(), message_of(error));
            }
        }
        out
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        FieldErrors::from(&errors)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[test]
    fn test_serializes_as_plain_map() {
        let mut errors = FieldErrors::new();
        errors.add("price", "This field is required.");
        errors.add("name", "Field 'name' must have at least 3 characters");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": ["Field 'name' must have at least 3 characters"],
                "price": ["This field is required."]
            })
        );
    }

    #[test]
    fn test_merge_appends_per_field() {
        let mut left = FieldErrors::single("name", "first");
        let mut right = FieldErrors::single("name", "second");
        right.add("price", "third");
        left.merge(right);

        assert_eq!(left.messages("name"), ["first", "second"]);
        assert_eq!(left.messages("price"), ["third"]);
        assert!(left.messages("description").is_empty());
    }

    #[test]
    fn test_from_validation_errors_prefers_message() {
        let mut source = ValidationErrors::new();
        let mut with_message = ValidationError::new("length");
        with_message.message = Some(Cow::from("too short"));
        source.add("name", with_message);
        source.add("price", ValidationError::new("range"));

        let errors = FieldErrors::from(&source);
        assert_eq!(errors.messages("name"), ["too short"]);
        assert_eq!(errors.messages("price"), ["range"]);
    }

    #[test]
    fn test_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());
        assert!(FieldErrors::single("name", "bad").into_result().is_err());
    }

    #[test]
    fn test_display_joins_messages() {
        let mut errors = FieldErrors::single("name", "a");
        errors.add("price", "b");
        assert_eq!(errors.to_string(), "name: a; price: b");
    }
}
