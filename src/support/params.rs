//! Parameter validation and normalization
//!
//! [`validate`] turns raw tool arguments into the exact parameter map the
//! platform call receives: declared fields only, values coerced to their
//! declared type, defaults filled in, cross-field group rules enforced.
//! It is pure; nothing here touches the network.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::tool_definitions::{
    AllowedValues, FieldGroup, GroupRule, ParamDef, ParamType, ToolDescriptor,
};
use crate::webex_tools::support::Params;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

#[allow(clippy::expect_used)]
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("e-mail pattern is a valid regex"));

/// `null`, blank strings and empty arrays count as absent
pub fn is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

/// Validate `arguments` against `descriptor` and return the normalized parameters
pub fn validate(descriptor: &ToolDescriptor, arguments: &Params) -> Result<Params> {
    for name in arguments.keys() {
        if descriptor.param(name).is_none() {
            debug!(tool = descriptor.name, argument = %name, "Dropping undeclared argument");
        }
    }

    let mut normalized = Params::new();
    for param in &descriptor.params {
        let supplied = arguments
            .get(param.name)
            .filter(|value| is_populated(value) || (param.clearable && value.is_string()));
        match supplied {
            Some(value) => {
                let value = check_constraints(param, coerce(param, value)?)?;
                normalized.insert(param.name.to_string(), value);
            }
            None if param.required => {
                return Err(Error::MissingParameter {
                    field: param.name.to_string(),
                });
            }
            None => {
                if let Some(default) = &param.default {
                    normalized.insert(param.name.to_string(), default.clone());
                }
            }
        }
    }

    for group in &descriptor.groups {
        apply_group(group, &mut normalized)?;
    }

    Ok(normalized)
}

fn type_mismatch(param: &ParamDef, expected: &'static str) -> Error {
    Error::TypeMismatch {
        field: param.name.to_string(),
        expected,
    }
}

fn coerce(param: &ParamDef, value: &Value) -> Result<Value> {
    match param.param_type {
        ParamType::String | ParamType::Email => match value {
            Value::String(_) => Ok(value.clone()),
            _ => Err(type_mismatch(param, "a string")),
        },
        ParamType::Integer => {
            let number = match value {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.trim().parse::<u64>().ok(),
                _ => None,
            };
            number
                .map(Value::from)
                .ok_or_else(|| type_mismatch(param, "a non-negative integer"))
        }
        ParamType::Boolean => match value {
            Value::Bool(_) => Ok(value.clone()),
            Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
            Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
            _ => Err(type_mismatch(param, "a boolean")),
        },
        ParamType::StringArray => match value {
            Value::String(s) => Ok(Value::Array(vec![Value::String(s.clone())])),
            Value::Array(items) if items.iter().all(Value::is_string) => Ok(value.clone()),
            _ => Err(type_mismatch(param, "an array of strings")),
        },
    }
}

fn invalid_value(param: &ParamDef, value: &str, allowed: Vec<String>) -> Error {
    Error::InvalidValue {
        field: param.name.to_string(),
        value: value.to_string(),
        allowed,
    }
}

/// Enforce range, e-mail shape and allowed values; case-insensitive matches
/// come back in their listed spelling
fn check_constraints(param: &ParamDef, value: Value) -> Result<Value> {
    if let (Some((min, max)), Some(n)) = (param.range, value.as_u64()) {
        if !(min..=max).contains(&n) {
            return Err(invalid_value(
                param,
                &n.to_string(),
                vec![format!("an integer from {min} to {max}")],
            ));
        }
    }

    let Some(text) = value.as_str() else {
        return Ok(value);
    };

    if param.param_type == ParamType::Email && !EMAIL.is_match(text) {
        return Err(invalid_value(
            param,
            text,
            vec!["an e-mail address".to_string()],
        ));
    }

    match &param.allowed_values {
        Some(allowed) => match_allowed(allowed, text).map(Value::from).ok_or_else(|| {
            invalid_value(
                param,
                text,
                allowed.values.iter().map(ToString::to_string).collect(),
            )
        }),
        None => Ok(value),
    }
}

fn match_allowed(allowed: &AllowedValues, text: &str) -> Option<&'static str> {
    allowed.values.iter().copied().find(|candidate| {
        if allowed.case_sensitive {
            *candidate == text
        } else {
            candidate.eq_ignore_ascii_case(text)
        }
    })
}

fn present(group: &FieldGroup, params: &Params) -> Vec<String> {
    group
        .fields
        .iter()
        .filter(|field| params.contains_key(**field))
        .map(ToString::to_string)
        .collect()
}

fn group_fields(group: &FieldGroup) -> Vec<String> {
    group.fields.iter().map(ToString::to_string).collect()
}

fn apply_group(group: &FieldGroup, params: &mut Params) -> Result<()> {
    let supplied = present(group, params);

    match group.rule {
        GroupRule::ExactlyOne => match supplied.len() {
            1 => Ok(()),
            0 => Err(Error::MissingTarget {
                candidates: group_fields(group),
            }),
            _ => Err(Error::AmbiguousTarget {
                candidates: group_fields(group),
                supplied,
            }),
        },
        GroupRule::AtLeastOne => {
            if supplied.is_empty() {
                Err(Error::MissingParameter {
                    field: format!("one of {}", group.fields.join(", ")),
                })
            } else {
                Ok(())
            }
        }
        GroupRule::Synonyms => {
            if supplied.len() > 1 {
                return Err(Error::ConflictingParameters { fields: supplied });
            }
            let Some(wire_name) = group.fields.first() else {
                return Ok(());
            };
            for alias in group.fields.iter().skip(1) {
                if let Some(value) = params.remove(*alias) {
                    params.insert((*wire_name).to_string(), value);
                }
            }
            Ok(())
        }
    }
}
