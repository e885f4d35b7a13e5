mod schema;

use schema::derive_schema_impl;

/// Derive `tributary_core::schema::Schematic` for a struct with named fields.
///
/// Every field needs `#[schema(description = "...")]`. Optional keys:
/// `default = <expr>`, `ge`/`gt`/`le`/`lt = <number>`,
/// `min_length`/`max_length = <int>`, `choices("a", "b")` and
/// `ty = "date"` to override the inferred value type. `Option<T>` fields are
/// nullable; fields that are neither nullable nor defaulted are required.
/// `NaiveDateTime` maps to `naive_datetime` and `DateTime<Tz>` to
/// `datetime`. Integer fields up to 32 bits get the range of their Rust type
/// as `ge`/`le` bounds, and unsigned 64-bit fields get `ge = 0`, unless the
/// field sets its own bound on that side.
///
/// The container accepts `#[schema(name = "...", description = "...")]`.
#[proc_macro_derive(Schema, attributes(schema))]
pub fn derive_schema(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    derive_schema_impl(input)
}
