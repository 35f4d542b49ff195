// crates/smartpark-core/src/validation.rs

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::Result;

/// The first rule a request body broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Email,
    Boolean,
    PositiveInteger,
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldRule {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// An ordered set of field rules for one request body.
///
/// Rules are checked in declaration order and checking stops at the first
/// failure. Keys that no rule names are rejected after every declared field
/// has passed.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    rules: &'static [FieldRule],
}

impl Schema {
    pub const fn new(rules: &'static [FieldRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [FieldRule] {
        self.rules
    }

    pub fn validate(&self, body: &Value) -> std::result::Result<(), ValidationError> {
        let Value::Object(fields) = body else {
            return Err(ValidationError::new("\"value\" must be of type object"));
        };

        for rule in self.rules {
            check_field(rule, fields)?;
        }

        if let Some(unknown) = fields
            .keys()
            .find(|key| !self.rules.iter().any(|rule| rule.name == key.as_str()))
        {
            return Err(ValidationError::new(format!("\"{unknown}\" is not allowed")));
        }

        Ok(())
    }

    /// Rewrites whole-number floats such as `3.0` in integer fields as
    /// integers, so a body that passed [`Schema::validate`] deserializes.
    pub fn normalize(&self, body: &mut Value) {
        let Value::Object(fields) = body else {
            return;
        };
        for rule in self.rules {
            if rule.kind != FieldKind::PositiveInteger {
                continue;
            }
            if let Some(value) = fields.get_mut(rule.name) {
                if let Some(number) = value.as_f64().filter(|_| !value.is_i64()) {
                    if number.fract() == 0.0 && number.abs() <= f64::from(i32::MAX) {
                        *value = Value::from(number as i64);
                    }
                }
            }
        }
    }
}

fn check_field(rule: &FieldRule, fields: &Map<String, Value>) -> std::result::Result<(), ValidationError> {
    let name = rule.name;
    let Some(value) = fields.get(name) else {
        if rule.required {
            return Err(ValidationError::new(format!("\"{name}\" is required")));
        }
        return Ok(());
    };

    match rule.kind {
        FieldKind::String => {
            require_non_empty_string(name, value)?;
        }
        FieldKind::Email => {
            let text = require_non_empty_string(name, value)?;
            if !looks_like_email(text) {
                return Err(ValidationError::new(format!(
                    "\"{name}\" must be a valid email"
                )));
            }
        }
        FieldKind::Boolean => {
            if !value.is_boolean() {
                return Err(ValidationError::new(format!(
                    "\"{name}\" must be a boolean"
                )));
            }
        }
        FieldKind::PositiveInteger => {
            let Some(number) = value.as_f64() else {
                return Err(ValidationError::new(format!("\"{name}\" must be a number")));
            };
            if number.fract() != 0.0 {
                return Err(ValidationError::new(format!(
                    "\"{name}\" must be an integer"
                )));
            }
            if number <= 0.0 {
                return Err(ValidationError::new(format!(
                    "\"{name}\" must be a positive number"
                )));
            }
            if number > f64::from(i32::MAX) {
                return Err(ValidationError::new(format!(
                    "\"{name}\" must be less than or equal to {}",
                    i32::MAX
                )));
            }
        }
        FieldKind::OneOf(allowed) => {
            let text = require_non_empty_string(name, value)?;
            if !allowed.contains(&text) {
                return Err(ValidationError::new(format!(
                    "\"{name}\" must be one of [{}]",
                    allowed.join(", ")
                )));
            }
        }
    }

    Ok(())
}

fn require_non_empty_string<'a>(
    name: &str,
    value: &'a Value,
) -> std::result::Result<&'a str, ValidationError> {
    let Some(text) = value.as_str() else {
        return Err(ValidationError::new(format!("\"{name}\" must be a string")));
    };
    if text.is_empty() {
        return Err(ValidationError::new(format!(
            "\"{name}\" is not allowed to be empty"
        )));
    }
    Ok(text)
}

fn looks_like_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| !label.is_empty())
        && labels
            .last()
            .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

/// A request body with a schema checked before deserialization.
pub trait Payload: DeserializeOwned {
    const SCHEMA: Schema;

    /// Validates `body` against [`Payload::SCHEMA`] and deserializes it.
    fn from_json(mut body: Value) -> Result<Self> {
        Self::SCHEMA.validate(&body)?;
        Self::SCHEMA.normalize(&mut body);
        let payload = serde_json::from_value(body)
            .map_err(|err| ValidationError::new(err.to_string()))?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCHEMA: Schema = Schema::new(&[
        FieldRule::required("name", FieldKind::String),
        FieldRule::required("email", FieldKind::Email),
        FieldRule::optional("isActive", FieldKind::Boolean),
        FieldRule::optional("number", FieldKind::PositiveInteger),
        FieldRule::optional("type", FieldKind::OneOf(&["IR", "RFID"])),
    ]);

    fn message(body: Value) -> String {
        SCHEMA.validate(&body).unwrap_err().message().to_string()
    }

    #[test]
    fn accepts_a_complete_body() {
        let body = json!({"name": "Ana", "email": "ana@example.com", "number": 3, "type": "IR"});
        assert!(SCHEMA.validate(&body).is_ok());
    }

    #[test]
    fn reports_only_the_first_violation() {
        assert_eq!(message(json!({})), "\"name\" is required");
        assert_eq!(message(json!({"name": 5})), "\"name\" must be a string");
        assert_eq!(message(json!({"name": "Ana"})), "\"email\" is required");
    }

    #[test]
    fn rejects_empty_and_null_strings() {
        assert_eq!(
            message(json!({"name": "", "email": "a@b.co"})),
            "\"name\" is not allowed to be empty"
        );
        assert_eq!(
            message(json!({"name": null, "email": "a@b.co"})),
            "\"name\" must be a string"
        );
    }

    #[test]
    fn checks_email_shape() {
        assert_eq!(
            message(json!({"name": "Ana", "email": "not-an-email"})),
            "\"email\" must be a valid email"
        );
        assert_eq!(
            message(json!({"name": "Ana", "email": "ana@localhost"})),
            "\"email\" must be a valid email"
        );
    }

    #[test]
    fn checks_integers() {
        let base = |number: Value| json!({"name": "Ana", "email": "a@b.co", "number": number});
        assert_eq!(message(base(json!("7"))), "\"number\" must be a number");
        assert_eq!(message(base(json!(1.5))), "\"number\" must be an integer");
        assert_eq!(message(base(json!(0))), "\"number\" must be a positive number");
        assert_eq!(message(base(json!(-4))), "\"number\" must be a positive number");
    }

    #[test]
    fn whole_number_floats_become_integers() {
        let mut body = json!({"name": "Ana", "email": "a@b.co", "number": 4.0});
        assert!(SCHEMA.validate(&body).is_ok());
        SCHEMA.normalize(&mut body);
        assert!(body["number"].is_i64());
        assert_eq!(body["number"], json!(4));
    }

    #[test]
    fn checks_enumerations() {
        assert_eq!(
            message(json!({"name": "Ana", "email": "a@b.co", "type": "LASER"})),
            "\"type\" must be one of [IR, RFID]"
        );
    }

    #[test]
    fn rejects_unknown_keys_after_declared_fields() {
        assert_eq!(
            message(json!({"name": "Ana", "email": "a@b.co", "color": "red"})),
            "\"color\" is not allowed"
        );
        assert_eq!(
            message(json!({"color": "red"})),
            "\"name\" is required"
        );
    }

    #[test]
    fn rejects_non_objects() {
        assert_eq!(message(json!([1, 2])), "\"value\" must be of type object");
    }
}
