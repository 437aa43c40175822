//! Business rules for product fields.
//!
//! Each rule is a pure function returning a `validator::ValidationError`;
//! [`ProductInput`]'s `Validate` impl applies them to the fields present in
//! a request and collects every failure.

use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::schema::ProductInput;

pub const NAME_MIN_CHARS: usize = 3;
pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const PRICE_FLOOR: i64 = 500;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().count() < NAME_MIN_CHARS {
        return Err(error(
            "min_length",
            "Field 'name' must have at least 3 characters",
        ));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.chars().count() < DESCRIPTION_MIN_CHARS {
        return Err(error(
            "min_length",
            "Field 'description' must have at least 10 characters",
        ));
    }
    Ok(())
}

/// Price must be strictly greater than the floor
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::from(PRICE_FLOOR) {
        return Err(error("range", "Field 'price' must be higher than 500"));
    }
    Ok(())
}

impl Validate for ProductInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(Err(e)) = self.name.as_deref().map(validate_name) {
            errors.add("name", e);
        }
        if let Some(Some(description)) = &self.description {
            if let Err(e) = validate_description(description) {
                errors.add("description", e);
            }
        }
        if let Some(Err(e)) = self.price.as_ref().map(validate_price) {
            errors.add("price", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_helpers::FieldErrors;
    use std::str::FromStr;

    fn price(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    #[test]
    fn test_name_length_boundary() {
        assert!(validate_name("ab").is_err());
        assert!(validate_name("").is_err());
        assert!(validate_name("abc").is_ok());
        // counted in characters, not bytes
        assert!(validate_name("ñé").is_err());
        assert!(validate_name("ñéü").is_ok());
    }

    #[test]
    fn test_description_length_boundary() {
        assert!(validate_description("123456789").is_err());
        assert!(validate_description("1234567890").is_ok());
    }

    #[test]
    fn test_price_must_exceed_floor() {
        assert!(validate_price(&price("500")).is_err());
        assert!(validate_price(&price("500.00")).is_err());
        assert!(validate_price(&price("-650")).is_err());
        assert!(validate_price(&price("500.01")).is_ok());
        assert!(validate_price(&price("650")).is_ok());
    }

    #[test]
    fn test_messages() {
        let e = validate_price(&price("10")).unwrap_err();
        assert_eq!(e.message.as_deref(), Some("Field 'price' must be higher than 500"));
        let e = validate_name("a").unwrap_err();
        assert_eq!(
            e.message.as_deref(),
            Some("Field 'name' must have at least 3 characters")
        );
    }

    #[test]
    fn test_all_failures_collected() {
        let input = ProductInput {
            name: Some("ab".into()),
            description: Some(Some("short".into())),
            price: Some(price("100")),
        };
        let errors = FieldErrors::from(input.validate().unwrap_err());

        assert_eq!(
            errors.messages("name"),
            ["Field 'name' must have at least 3 characters"]
        );
        assert_eq!(
            errors.messages("description"),
            ["Field 'description' must have at least 10 characters"]
        );
        assert_eq!(errors.messages("price"), ["Field 'price' must be higher than 500"]);
    }

    #[test]
    fn test_absent_fields_skip_rules() {
        assert!(ProductInput::default().validate().is_ok());

        let input = ProductInput {
            description: Some(None),
            ..Default::default()
        };
        assert!(input.validate().is_ok());
    }
}
