//! Declarative schema descriptors for query parameters and data records.
//!
//! A [`Schema`] is a plain list of [`FieldSpec`]s. Each field records its
//! name, value type, description, default and constraints so that routing
//! layers, documentation generators and the validation engine all read the
//! same record instead of annotations attached at runtime.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Value type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// UTF-8 string.
    String,
    /// Whole number.
    Integer,
    /// Floating point or whole number.
    Number,
    /// `true`/`false`.
    Boolean,
    /// Calendar date encoded as `YYYY-MM-DD`.
    Date,
    /// Timestamp with offset, encoded as RFC 3339.
    #[serde(rename = "datetime")]
    DateTime,
    /// Timestamp without offset, encoded as `YYYY-MM-DDTHH:MM:SS[.fff]`.
    #[serde(rename = "naive_datetime")]
    NaiveDateTime,
}

impl FieldType {
    /// Stable, lowercase identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::NaiveDateTime => "naive_datetime",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraint attached to a field, checked after type coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// Numeric value must be `>=` the bound.
    Ge(f64),
    /// Numeric value must be `>` the bound.
    Gt(f64),
    /// Numeric value must be `<=` the bound.
    Le(f64),
    /// Numeric value must be `<` the bound.
    Lt(f64),
    /// String must have at least this many characters.
    MinLength(usize),
    /// String must have at most this many characters.
    MaxLength(usize),
    /// String must be one of the listed values.
    Choices(Vec<String>),
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ge(b) => write!(f, "must be >= {b}"),
            Self::Gt(b) => write!(f, "must be > {b}"),
            Self::Le(b) => write!(f, "must be <= {b}"),
            Self::Lt(b) => write!(f, "must be < {b}"),
            Self::MinLength(n) => write!(f, "must have at least {n} characters"),
            Self::MaxLength(n) => write!(f, "must have at most {n} characters"),
            Self::Choices(c) => write!(f, "must be one of [{}]", c.join(", ")),
        }
    }
}

/// One field of a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as it appears in raw params and serialized records.
    pub name: String,
    /// Value type.
    pub ty: FieldType,
    /// Human-readable description.
    pub description: String,
    /// Whether a value must be supplied.
    pub required: bool,
    /// Whether `null` is an accepted value.
    pub nullable: bool,
    /// Value used when the field is omitted.
    pub default: Option<serde_json::Value>,
    /// Constraints checked after coercion.
    pub constraints: Vec<Constraint>,
}

impl FieldSpec {
    /// A required, non-nullable field with no constraints.
    pub fn new(name: impl Into<String>, ty: FieldType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            description: description.into(),
            required: true,
            nullable: false,
            default: None,
            constraints: Vec::new(),
        }
    }

    /// Accept `null` and stop requiring the field.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self.required = false;
        self
    }

    /// Fill `value` when the field is omitted.
    #[must_use]
    pub fn default_value(mut self, value: serde_json::Value) -> Self {
        self.default = Some(value);
        self.required = false;
        self
    }

    /// Append a constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Allowed values, when the field carries a `Choices` constraint.
    #[must_use]
    pub fn choices(&self) -> Option<&[String]> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::Choices(v) => Some(v.as_slice()),
            _ => None,
        })
    }
}

/// Named, ordered list of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name, usually the Rust type name.
    pub name: String,
    /// Optional description of the whole schema.
    pub description: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<FieldSpec>,
}

impl Schema {
    /// Build a schema from its parts.
    pub fn new(
        name: impl Into<String>,
        description: Option<&str>,
        fields: Vec<FieldSpec>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.map(str::to_string),
            fields,
        }
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of the fields in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Names of the fields a caller must supply.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
    }
}
