use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Number, Value};

use super::{Constraint, FieldSpec, FieldType, Schema};
use crate::{FieldIssue, RawParams, Record, TributaryError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate and normalize raw request parameters against `schema`.
///
/// Missing or `null` fields take their default; nullable fields without a
/// default become `null`; required fields without a value are reported.
/// Values are coerced leniently (numeric strings for numbers, `"true"` and
/// `"false"` for booleans) and then checked against the field constraints.
/// With `strict`, keys the schema does not declare are rejected; otherwise
/// they are dropped.
///
/// Every problem is collected before returning.
///
/// # Errors
/// Returns the full list of field issues when any field is invalid.
pub fn validate_params(
    schema: &Schema,
    raw: &RawParams,
    strict: bool,
) -> Result<RawParams, Vec<FieldIssue>> {
    let mut issues = Vec::new();
    if strict {
        for key in raw.keys() {
            if schema.field(key).is_none() {
                issues.push(FieldIssue::new(key.as_str(), "unexpected field"));
            }
        }
    }

    let mut out = RawParams::new();
    for field in &schema.fields {
        match raw.get(&field.name) {
            None | Some(Value::Null) => {
                if let Some(default) = &field.default {
                    out.insert(field.name.clone(), default.clone());
                } else if field.required {
                    issues.push(FieldIssue::new(field.name.as_str(), "field required"));
                } else {
                    out.insert(field.name.clone(), Value::Null);
                }
            }
            Some(value) => match coerce(field.ty, value) {
                Ok(value) => {
                    issues.extend(constraint_issues(field, &value));
                    out.insert(field.name.clone(), value);
                }
                Err(message) => issues.push(FieldIssue::new(field.name.as_str(), message)),
            },
        }
    }

    if issues.is_empty() {
        Ok(out)
    } else {
        Err(issues)
    }
}

/// Check one output record against a data schema, without coercion.
///
/// Fields the schema does not declare are allowed. Optional fields may be
/// omitted; present values must have the declared type and satisfy the
/// field constraints.
#[must_use]
pub fn validate_record(schema: &Schema, record: &Record) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    for field in &schema.fields {
        match record.get(&field.name) {
            None => {
                if field.required {
                    issues.push(FieldIssue::new(field.name.as_str(), "field required"));
                }
            }
            Some(Value::Null) => {
                if !field.nullable {
                    issues.push(FieldIssue::new(field.name.as_str(), "must not be null"));
                }
            }
            Some(value) => {
                if matches_type(field.ty, value) {
                    issues.extend(constraint_issues(field, value));
                } else {
                    issues.push(FieldIssue::new(
                        field.name.as_str(),
                        format!("expected {}, got {value}", field.ty),
                    ));
                }
            }
        }
    }
    issues
}

/// Check every record, prefixing issue fields with the record index (`[3].rate`).
///
/// # Errors
/// Returns all issues across all records when any record is invalid.
pub fn validate_records(schema: &Schema, records: &[Record]) -> Result<(), Vec<FieldIssue>> {
    let issues: Vec<FieldIssue> = records
        .iter()
        .enumerate()
        .flat_map(|(i, record)| {
            validate_record(schema, record)
                .into_iter()
                .map(move |issue| FieldIssue::new(format!("[{i}].{}", issue.field), issue.message))
        })
        .collect();
    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Verify descriptor invariants. See [`super::SchemaCheck::check`].
///
/// # Errors
/// Returns `InvalidSchema` naming the first violation.
pub fn check_schema(schema: &Schema) -> Result<(), TributaryError> {
    let invalid = |message: String| Err(TributaryError::invalid_schema(&schema.name, message));
    let mut seen = HashSet::new();
    for field in &schema.fields {
        let name = field.name.as_str();
        if name.is_empty() {
            return invalid("field with empty name".to_string());
        }
        if !seen.insert(name) {
            return invalid(format!("duplicate field `{name}`"));
        }
        if field.description.trim().is_empty() {
            return invalid(format!("field `{name}` has no description"));
        }
        let optional = field.default.is_some() || field.nullable;
        if field.required == optional {
            return invalid(format!(
                "field `{name}` must be required or carry a default, not both or neither"
            ));
        }
        for constraint in &field.constraints {
            if !constraint_applies(field.ty, constraint) {
                return invalid(format!(
                    "constraint `{constraint}` does not apply to {} field `{name}`",
                    field.ty
                ));
            }
        }
        match &field.default {
            Some(Value::Null) if !field.nullable => {
                return invalid(format!("field `{name}` defaults to null but is not nullable"));
            }
            Some(Value::Null) | None => {}
            Some(default) => {
                if !matches_type(field.ty, default) {
                    return invalid(format!(
                        "default for `{name}` is not a valid {}: {default}",
                        field.ty
                    ));
                }
                if let Some(issue) = constraint_issues(field, default).into_iter().next() {
                    return invalid(format!("default for `{name}` {}", issue.message));
                }
            }
        }
    }
    Ok(())
}

fn coerce(ty: FieldType, value: &Value) -> Result<Value, String> {
    let fail = || Err(format!("expected {ty}, got {value}"));
    match ty {
        FieldType::String => match value {
            Value::String(_) => Ok(value.clone()),
            _ => fail(),
        },
        FieldType::Integer => match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
            Value::Number(n) => match n.as_f64() {
                #[allow(clippy::cast_possible_truncation)]
                Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Ok(Value::from(f as i64)),
                _ => fail(),
            },
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .or_else(|_| fail()),
            _ => fail(),
        },
        FieldType::Number => match value {
            Value::Number(_) => Ok(value.clone()),
            Value::String(s) => match s.trim().parse::<f64>().ok().and_then(Number::from_f64) {
                Some(n) => Ok(Value::Number(n)),
                None => fail(),
            },
            _ => fail(),
        },
        FieldType::Boolean => match value {
            Value::Bool(_) => Ok(value.clone()),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
            _ => fail(),
        },
        FieldType::Date => match value {
            Value::String(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
                .map(|d| Value::String(d.format(DATE_FORMAT).to_string()))
                .or_else(|_| fail()),
            _ => fail(),
        },
        FieldType::DateTime => match value {
            Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
                .map(|dt| Value::String(dt.to_rfc3339()))
                .or_else(|_| fail()),
            _ => fail(),
        },
        FieldType::NaiveDateTime => match value {
            Value::String(s) => s
                .trim()
                .parse::<NaiveDateTime>()
                .map(|dt| Value::String(format!("{dt:?}")))
                .or_else(|_| fail()),
            _ => fail(),
        },
    }
}

fn matches_type(ty: FieldType, value: &Value) -> bool {
    match ty {
        FieldType::String => value.is_string(),
        FieldType::Integer => value.is_i64() || value.is_u64(),
        FieldType::Number => value.is_number(),
        FieldType::Boolean => value.is_boolean(),
        FieldType::Date => value
            .as_str()
            .is_some_and(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).is_ok()),
        FieldType::DateTime => value
            .as_str()
            .is_some_and(|s| DateTime::parse_from_rfc3339(s).is_ok()),
        FieldType::NaiveDateTime => value
            .as_str()
            .is_some_and(|s| s.parse::<NaiveDateTime>().is_ok()),
    }
}

const fn constraint_applies(ty: FieldType, constraint: &Constraint) -> bool {
    match constraint {
        Constraint::Ge(_) | Constraint::Gt(_) | Constraint::Le(_) | Constraint::Lt(_) => {
            matches!(ty, FieldType::Integer | FieldType::Number)
        }
        Constraint::MinLength(_) | Constraint::MaxLength(_) | Constraint::Choices(_) => {
            matches!(ty, FieldType::String)
        }
    }
}

fn constraint_issues(field: &FieldSpec, value: &Value) -> Vec<FieldIssue> {
    field
        .constraints
        .iter()
        .filter(|c| !satisfies(c, value))
        .map(|c| FieldIssue::new(field.name.as_str(), c.to_string()))
        .collect()
}

fn satisfies(constraint: &Constraint, value: &Value) -> bool {
    match constraint {
        Constraint::Ge(b) => value.as_f64().is_none_or(|v| v >= *b),
        Constraint::Gt(b) => value.as_f64().is_none_or(|v| v > *b),
        Constraint::Le(b) => value.as_f64().is_none_or(|v| v <= *b),
        Constraint::Lt(b) => value.as_f64().is_none_or(|v| v < *b),
        Constraint::MinLength(n) => value.as_str().is_none_or(|s| s.chars().count() >= *n),
        Constraint::MaxLength(n) => value.as_str().is_none_or(|s| s.chars().count() <= *n),
        Constraint::Choices(choices) => value
            .as_str()
            .is_none_or(|s| choices.iter().any(|c| c == s)),
    }
}
