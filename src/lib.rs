//! Declarative authentication form schemas for data-driven form renderers.
//!
//! This crate transforms a list of stored authentication records plus a
//! source-type schema into the nested field-group descriptors a data-driven
//! form engine renders as a credential edit form: one sub-form per record,
//! with namespaced field names, provider-specific field overrides, and
//! edit-mode annotations.
//!
//! The transformation is pure and synchronous. Inputs are never mutated;
//! every call allocates fresh output, so a shared [`AuthFieldMapper`] is
//! safe to invoke from independent render cycles.
//!
//! # Quick start
//!
//! ```rust
//! use authform::{
//!     AuthFieldMapper, AuthenticationRecord, FieldSpec, SchemaAuthEntry, SourceSchema,
//!     SourceType,
//! };
//!
//! let mapper = AuthFieldMapper::default();
//!
//! let records = vec![AuthenticationRecord::new("1", "basic")];
//! let source_type = SourceType::new("openshift").with_schema(SourceSchema::new(vec![
//!     SchemaAuthEntry::new("basic", "Basic authentication")
//!         .with_field(FieldSpec::text_field("authentication.username").with_label("Username")),
//! ]));
//!
//! let groups = mapper.authentication_fields(&records, &source_type, &[]);
//! assert_eq!(groups.len(), 1);
//!
//! let json = serde_json::to_value(&groups).unwrap();
//! assert_eq!(json[0]["component"], "sub-form");
//! assert_eq!(json[0]["fields"][1]["name"], "authentications.a1.username");
//! ```
//!
//! # Collaborators
//!
//! Two collaborators are injected at construction and both default to
//! something sensible:
//!
//! - [`ProviderOverrides`] — a nested lookup table (provider name →
//!   authentication type → field name) of field overrides and enabled step
//!   keys. Defaults to empty; applications typically load theirs with
//!   [`ProviderOverrides::from_json_str`].
//! - [`Messages`] — localized message formatting behind a template-key
//!   interface. Defaults to the built-in [`EnglishMessages`] catalog.

pub mod error;
pub mod mapper;
pub mod messages;
pub mod overrides;
pub mod types;

pub use error::SchemaError;
pub use mapper::{
    create_auth_field_name, last_name_segment, modify_fields, remove_required_validator,
    AuthFieldMapper, AUTH_NAMESPACE,
};
pub use messages::{EnglishMessages, Messages};
pub use overrides::{AuthOverrideEntry, FieldOverride, ProviderOverrides};
pub use types::{
    AuthenticationRecord, FieldGroupDescriptor, FieldSpec, FormField, ManagementHeader,
    PlaceholderField, PresentationComponent, SchemaAuthEntry, SourceSchema, SourceType,
    ValidatorSpec,
};
