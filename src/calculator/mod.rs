//! Calculator definitions: catalog and role-based input schemas

pub mod catalog;
mod schema;

pub use catalog::{builtin_schemas, category_of, CalculatorCategory, CatalogEntry};
pub use schema::{CalculatorSchema, FieldRole, InputField, ResolvedInputs};
