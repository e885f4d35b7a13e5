//! Schema descriptors and the validation engine.
//!
//! Descriptors are declared once per type through `#[derive(Schema)]` and
//! read by the registry (invariant checks), the dispatcher (params and
//! record validation) and `Registry::describe` (documentation).

mod validate;

pub use tributary_types::schema::{Constraint, FieldSpec, FieldType, Schema};
pub use validate::{check_schema, validate_params, validate_record, validate_records};

use crate::TributaryError;

/// Types that carry a static schema descriptor.
///
/// Implement with `#[derive(Schema)]`.
pub trait Schematic {
    /// The descriptor, built once per type.
    fn schema() -> &'static Schema;
}

/// Invariant checks on a [`Schema`].
pub trait SchemaCheck {
    /// Verify the descriptor invariants.
    ///
    /// Every field has a non-empty description; a field is required exactly
    /// when it has neither a default nor accepts `null`; defaults satisfy the
    /// field's own type and constraints; field names are unique.
    ///
    /// # Errors
    /// Returns `InvalidSchema` naming the first violation.
    fn check(&self) -> Result<(), TributaryError>;
}

impl SchemaCheck for Schema {
    fn check(&self) -> Result<(), TributaryError> {
        check_schema(self)
    }
}
