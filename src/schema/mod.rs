//! Declarative validation schemas
//!
//! Fields are built once, at startup, from tagged constraint descriptors and
//! are immutable afterwards. Forms compose named fields and add cross-field
//! refinements.
//!
//! # Design Principles
//!
//! - Pure, synchronous validation with no I/O
//! - Definition errors surface at build time, never during validation
//! - At most one issue per field; refinements accumulate
//! - A form either fully validates or fully fails

mod constraint;
mod errors;
mod field;
mod form;
mod refinement;
mod types;

pub use constraint::{evaluate, normalize, Constraint, Normalizer, Rule};
pub use errors::{SchemaDefinitionError, SchemaResult};
pub use field::{FieldBuilder, FieldDescription, FieldSchema};
pub use form::{FormDescription, FormSchema, FormSchemaBuilder};
pub use refinement::Refinement;
pub use types::{FieldIssue, FieldValue, FormValues, ValidationErrors, ValueKind, ROOT_PATH};
