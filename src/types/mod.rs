//! Typed model for authentication records, source-type schemas, and the
//! renderable field descriptors emitted to the form engine.

mod authentication;
mod fields;

pub use authentication::{AuthenticationRecord, SchemaAuthEntry, SourceSchema, SourceType};
pub use fields::{
    component_types, validator_types, FieldGroupDescriptor, FieldSpec, FormField,
    ManagementHeader, PlaceholderField, PresentationComponent, ValidatorSpec,
};
