//! Mapping from authentication records to renderable sub-form groups.
//!
//! [`AuthFieldMapper::authentication_fields`] is the crate's entry point;
//! the free functions are the individual transformation steps, exposed
//! because applications occasionally need one of them on its own (e.g.
//! renaming a single field to locate its form value).

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::messages::{keys, EnglishMessages, Messages};
use crate::overrides::ProviderOverrides;
use crate::types::{
    component_types, AuthenticationRecord, FieldGroupDescriptor, FieldSpec, FormField,
    ManagementHeader, PlaceholderField, SchemaAuthEntry, SourceType, ValidatorSpec,
};

/// Namespace prefix marking schema fields that belong to an
/// authentication record (as opposed to the surrounding source).
pub const AUTH_NAMESPACE: &str = "authentication";

const AUTH_NAMESPACE_DOT: &str = "authentication.";
const PASSWORD_SEGMENT: &str = "password";

/// Rewrite a namespaced schema field name to its per-record form name.
///
/// The first `authentication.` occurrence is removed and the remainder is
/// namespaced under the owning record's identifier, guaranteeing no name
/// collisions when several records render in the same form:
///
/// ```rust
/// use authform::create_auth_field_name;
///
/// assert_eq!(
///     create_auth_field_name("authentication.password", "7"),
///     "authentications.a7.password"
/// );
/// ```
pub fn create_auth_field_name(field_name: &str, id: &str) -> String {
    format!(
        "authentications.a{id}.{}",
        field_name.replacen(AUTH_NAMESPACE_DOT, "", 1)
    )
}

/// Final `.`-separated segment of a field name.
pub fn last_name_segment(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Drop validators that mark the field as mandatory.
pub fn remove_required_validator(validate: Vec<ValidatorSpec>) -> Vec<ValidatorSpec> {
    validate
        .into_iter()
        .filter(|validator| !validator.is_required_type())
        .collect()
}

/// Annotate fields for edit-mode rendering.
///
/// Each field's component tag moves to `originalComponent` and is replaced
/// with the edit-field wrapper, which renders the stored value read-only
/// until the user toggles inline editing.
pub fn modify_fields(fields: Vec<FieldSpec>) -> Vec<FieldSpec> {
    fields
        .into_iter()
        .map(|mut field| {
            let original = std::mem::replace(
                &mut field.component,
                component_types::EDIT_FIELD.to_string(),
            );
            field.original_component = Some(original);
            field
        })
        .collect()
}

/// Field list for one record, decided once per record.
enum RecordFields {
    /// Render the real (renamed, annotated) fields.
    Active(Vec<FieldSpec>),
    /// Removal in flight; render a placeholder instead.
    Deleting,
}

/// Maps authentication records and a source-type schema to sub-form
/// field-group descriptors.
///
/// The mapper is immutable once built and safe to share across render
/// cycles; see the crate docs for the collaborator defaults.
#[derive(Debug, Clone)]
pub struct AuthFieldMapper {
    overrides: ProviderOverrides,
    messages: Arc<dyn Messages>,
}

impl Default for AuthFieldMapper {
    fn default() -> Self {
        Self::new(ProviderOverrides::default())
    }
}

impl AuthFieldMapper {
    /// Create a mapper with the given override table and the built-in
    /// English message catalog.
    pub fn new(overrides: ProviderOverrides) -> Self {
        Self {
            overrides,
            messages: Arc::new(EnglishMessages::default()),
        }
    }

    /// Replace the message catalog.
    pub fn with_messages(mut self, messages: Arc<dyn Messages>) -> Self {
        self.messages = messages;
        self
    }

    /// Produce one sub-form descriptor per authentication record.
    ///
    /// Returns an empty vector when `authentications` is empty or the
    /// source type carries no schema or no authentication list. A record
    /// whose type has no schema entry degrades to an unsupported-type
    /// placeholder descriptor; the mapping itself never fails.
    ///
    /// `app_types` is opaque to the mapper and passed through to each
    /// group's management header for display.
    pub fn authentication_fields(
        &self,
        authentications: &[AuthenticationRecord],
        source_type: &SourceType,
        app_types: &[Value],
    ) -> Vec<FieldGroupDescriptor> {
        let Some(schema_entries) = source_type
            .schema
            .as_ref()
            .and_then(|schema| schema.authentication.as_ref())
        else {
            return Vec::new();
        };

        authentications
            .iter()
            .map(|record| self.field_group(record, schema_entries, &source_type.name, app_types))
            .collect()
    }

    /// Descriptor standing in for an authentication type the source-type
    /// schema does not cover.
    pub fn unsupported_auth_type_field(&self, authtype: &str) -> FieldGroupDescriptor {
        let label = self
            .messages
            .format(keys::UNSUPPORTED_AUTH_TYPE, &[("authtype", authtype)]);
        FieldGroupDescriptor::sub_form(
            format!("unsupported-{authtype}"),
            vec![FormField::Placeholder(PlaceholderField::unsupported(
                authtype, label,
            ))],
        )
    }

    /// Rename fields into the record's namespace and apply the
    /// password-on-edit policy.
    ///
    /// Stored passwords are write-only: the form never shows them, so on
    /// edit the field is optional (blank means "leave unchanged") and its
    /// help text warns that submitting a value resets the credential. Any
    /// field whose renamed final segment is `password` gets that
    /// treatment: `isRequired` forced off, required validators stripped,
    /// helper text replaced.
    pub fn modify_auth_schemas(&self, fields: Vec<FieldSpec>, id: &str) -> Vec<FieldSpec> {
        fields
            .into_iter()
            .map(|mut field| {
                if field.name.starts_with(AUTH_NAMESPACE) {
                    field.name = create_auth_field_name(&field.name, id);
                }

                if last_name_segment(&field.name) == PASSWORD_SEGMENT {
                    let label = field.label.clone().unwrap_or_default();
                    field.helper_text = Some(self.messages.format(
                        keys::PASSWORD_RESET_HELPER_TEXT,
                        &[("label", label.as_str())],
                    ));
                    field.is_required = Some(false);
                    field.validate = remove_required_validator(std::mem::take(&mut field.validate));
                }

                field
            })
            .collect()
    }

    fn field_group(
        &self,
        record: &AuthenticationRecord,
        schema_entries: &[SchemaAuthEntry],
        provider: &str,
        app_types: &[Value],
    ) -> FieldGroupDescriptor {
        let Some(schema_auth) = schema_entries
            .iter()
            .find(|entry| entry.authtype == record.authtype)
        else {
            warn!(
                authtype = %record.authtype,
                provider = provider,
                "authentication type missing from source-type schema"
            );
            return self.unsupported_auth_type_field(&record.authtype);
        };

        let record_fields = if record.is_deleting {
            RecordFields::Deleting
        } else {
            RecordFields::Active(self.enhanced_fields(schema_auth, provider, &record.authtype))
        };

        // The flag travels on the header; the embedded record is the raw
        // credential data only.
        let mut stripped = record.clone();
        stripped.is_deleting = false;
        let header =
            ManagementHeader::new(stripped, schema_auth.clone(), app_types, record.is_deleting);

        let mut fields = vec![FormField::Management(header)];
        match record_fields {
            RecordFields::Deleting => {
                fields.push(FormField::Placeholder(PlaceholderField::removal(&record.id)));
            }
            RecordFields::Active(active) => {
                let renamed = self.modify_auth_schemas(active, &record.id);
                fields.extend(modify_fields(renamed).into_iter().map(FormField::Input));
            }
        }

        FieldGroupDescriptor::sub_form(schema_auth.name.clone(), fields)
    }

    /// Retain the fields enabled for this provider/authtype pair and merge
    /// in its configured overrides.
    fn enhanced_fields(
        &self,
        schema_auth: &SchemaAuthEntry,
        provider: &str,
        authtype: &str,
    ) -> Vec<FieldSpec> {
        let additional_step_keys = self.overrides.additional_step_keys(provider, authtype);

        let enhanced: Vec<FieldSpec> = schema_auth
            .fields
            .iter()
            .filter(|field| {
                field
                    .step_key
                    .as_ref()
                    .is_none_or(|key| additional_step_keys.contains(key))
            })
            .map(
                |field| match self.overrides.field_override(provider, authtype, &field.name) {
                    Some(field_override) => field_override.apply(field),
                    None => field.clone(),
                },
            )
            .collect();

        let dropped = schema_auth.fields.len() - enhanced.len();
        if dropped > 0 {
            debug!(
                dropped = dropped,
                authtype = authtype,
                provider = provider,
                "dropped fields with disabled step keys"
            );
        }

        enhanced
    }
}
