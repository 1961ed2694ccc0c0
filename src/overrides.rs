//! Provider/authtype-keyed field overrides.
//!
//! Providers ship one generic field schema per authentication type; real
//! deployments then need per-provider adjustments: a different label here,
//! an extra enabled step group there. Applications encode those in a
//! nested table keyed by provider name, then authentication type, then
//! canonical field name. Every lookup defaults to "no adjustment" — an
//! absent provider, type, or field simply means the schema is used as-is.
//!
//! # Example
//!
//! ```rust
//! use authform::{AuthOverrideEntry, FieldOverride, ProviderOverrides};
//!
//! let overrides = ProviderOverrides::new().with_entry(
//!     "amazon",
//!     "access_key_secret_key",
//!     AuthOverrideEntry::new()
//!         .with_step_key("billing")
//!         .with_field_override(
//!             "authentication.username",
//!             FieldOverride::new().with_label("Access key ID"),
//!         ),
//! );
//!
//! assert_eq!(
//!     overrides.additional_step_keys("amazon", "access_key_secret_key"),
//!     ["billing".to_string()]
//! );
//! assert!(overrides.field_override("google", "project_id", "x").is_none());
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::SchemaError;
use crate::types::{FieldSpec, ValidatorSpec};

/// Partial [`FieldSpec`]: every property optional, applied over a schema
/// field with the override's set properties winning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOverride {
    /// Replacement component tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,

    /// Replacement label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Replacement step key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_key: Option<String>,

    /// Replacement mandatory flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,

    /// Replacement help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,

    /// Replacement validator list (replaces wholesale, no per-validator merge).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate: Option<Vec<ValidatorSpec>>,

    /// Opaque engine properties overlaid key-by-key.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl FieldOverride {
    /// Create an empty override (applying it is the identity).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the replacement component tag.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Set the replacement label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the replacement step key.
    pub fn with_step_key(mut self, step_key: impl Into<String>) -> Self {
        self.step_key = Some(step_key.into());
        self
    }

    /// Set the replacement mandatory flag.
    pub fn with_is_required(mut self, is_required: bool) -> Self {
        self.is_required = Some(is_required);
        self
    }

    /// Set the replacement help text.
    pub fn with_helper_text(mut self, helper_text: impl Into<String>) -> Self {
        self.helper_text = Some(helper_text.into());
        self
    }

    /// Set the replacement validator list.
    pub fn with_validate(mut self, validate: Vec<ValidatorSpec>) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Overlay an opaque engine property.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Apply this override to a schema field, producing a new field.
    ///
    /// The input is never mutated. Set properties replace the field's;
    /// opaque extras are overlaid key-by-key on top of the field's own.
    pub fn apply(&self, field: &FieldSpec) -> FieldSpec {
        let mut out = field.clone();
        if let Some(component) = &self.component {
            out.component = component.clone();
        }
        if let Some(label) = &self.label {
            out.label = Some(label.clone());
        }
        if let Some(step_key) = &self.step_key {
            out.step_key = Some(step_key.clone());
        }
        if let Some(is_required) = self.is_required {
            out.is_required = Some(is_required);
        }
        if let Some(helper_text) = &self.helper_text {
            out.helper_text = Some(helper_text.clone());
        }
        if let Some(validate) = &self.validate {
            out.validate = validate.clone();
        }
        for (key, value) in &self.extra {
            out.extra.insert(key.clone(), value.clone());
        }
        out
    }
}

/// Overrides for one provider/authtype pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOverrideEntry {
    /// Step keys whose fields are enabled for this pair.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_step_key_fields: Vec<String>,

    /// Field overrides keyed by canonical (pre-rename) field name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub fields: IndexMap<String, FieldOverride>,
}

impl AuthOverrideEntry {
    /// Create an empty entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the fields carrying the given step key.
    pub fn with_step_key(mut self, step_key: impl Into<String>) -> Self {
        self.include_step_key_fields.push(step_key.into());
        self
    }

    /// Attach an override for the named field.
    pub fn with_field_override(
        mut self,
        field_name: impl Into<String>,
        field_override: FieldOverride,
    ) -> Self {
        self.fields.insert(field_name.into(), field_override);
        self
    }
}

/// Overrides for one provider, keyed by authentication type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderEntry {
    /// Per-authtype overrides.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub authentication: IndexMap<String, AuthOverrideEntry>,
}

/// Nested override table: provider name → authentication type → overrides.
///
/// Applications supply the data (typically deserialized from a bundled
/// JSON document); this crate only defines the structure and the
/// default-to-empty lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderOverrides {
    providers: IndexMap<String, ProviderEntry>,
}

impl ProviderOverrides {
    /// Create an empty table (all lookups default).
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach overrides for a provider/authtype pair.
    pub fn with_entry(
        mut self,
        provider: impl Into<String>,
        authtype: impl Into<String>,
        entry: AuthOverrideEntry,
    ) -> Self {
        self.providers
            .entry(provider.into())
            .or_default()
            .authentication
            .insert(authtype.into(), entry);
        self
    }

    /// Load a table from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let table: Self = serde_json::from_str(json)?;
        debug!(providers = table.providers.len(), "loaded override table");
        Ok(table)
    }

    /// Load a table from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        let table: Self = serde_json::from_value(value)?;
        debug!(providers = table.providers.len(), "loaded override table");
        Ok(table)
    }

    /// Step keys enabled for the given provider/authtype pair.
    ///
    /// Empty when the provider, the authentication type, or the list
    /// itself is absent.
    pub fn additional_step_keys(&self, provider: &str, authtype: &str) -> &[String] {
        self.providers
            .get(provider)
            .and_then(|entry| entry.authentication.get(authtype))
            .map(|entry| entry.include_step_key_fields.as_slice())
            .unwrap_or_default()
    }

    /// Override for the named field under the given provider/authtype
    /// pair, if one is configured.
    pub fn field_override(
        &self,
        provider: &str,
        authtype: &str,
        field_name: &str,
    ) -> Option<&FieldOverride> {
        self.providers
            .get(provider)?
            .authentication
            .get(authtype)?
            .fields
            .get(field_name)
    }
}
