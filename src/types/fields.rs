//! Field descriptors and the renderable output model.
//!
//! Everything here serializes to the form engine's declarative schema
//! format: camelCase keys, string component tags, nested field lists.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::authentication::{AuthenticationRecord, SchemaAuthEntry};

/// Component tags understood by the form engine.
pub mod component_types {
    /// Field group nested under a single record.
    pub const SUB_FORM: &str = "sub-form";
    /// Non-input pseudo-field rendering a display component.
    pub const DESCRIPTION: &str = "description";
    /// Plain text input.
    pub const TEXT_FIELD: &str = "text-field";
    /// Wrapper rendering a field read-only with inline edit toggling.
    pub const EDIT_FIELD: &str = "edit-field";
}

/// Validator type tags understood by the form engine.
pub mod validator_types {
    /// Marks a field as mandatory.
    pub const REQUIRED: &str = "required-validator";
    /// Legacy spelling of [`REQUIRED`] still present in older schemas.
    pub const LEGACY_REQUIRED: &str = "required";
}

/// Declarative validator attached to a form field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorSpec {
    /// Validator type tag, e.g. [`validator_types::REQUIRED`].
    #[serde(rename = "type")]
    pub kind: String,

    /// Validator parameters (threshold, pattern, message override, ...).
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ValidatorSpec {
    /// Create a validator with the given type tag.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            extra: IndexMap::new(),
        }
    }

    /// Create a required-field validator.
    pub fn required() -> Self {
        Self::new(validator_types::REQUIRED)
    }

    /// Whether this validator marks the field as mandatory.
    ///
    /// Recognizes both the canonical tag and the legacy spelling.
    pub fn is_required_type(&self) -> bool {
        matches!(
            self.kind.as_str(),
            validator_types::REQUIRED | validator_types::LEGACY_REQUIRED
        )
    }

    /// Attach a validator parameter.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Declarative description of one form input.
///
/// Known engine properties are typed; anything else rides in `extra` so
/// provider schemas can carry engine extensions without losing them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Engine component tag, e.g. [`component_types::TEXT_FIELD`].
    pub component: String,

    /// Field name; namespaced names start with `authentication.`.
    pub name: String,

    /// Human-readable label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Tag grouping optional fields into named inclusion sets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_key: Option<String>,

    /// Whether the engine renders the field as mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,

    /// Help text rendered under the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,

    /// Component tag preserved by the edit-mode annotation pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_component: Option<String>,

    /// Attached validators.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validate: Vec<ValidatorSpec>,

    /// Remaining engine properties, in insertion order.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl FieldSpec {
    /// Create a field with the given component tag and name.
    pub fn new(component: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a plain text input.
    pub fn text_field(name: impl Into<String>) -> Self {
        Self::new(component_types::TEXT_FIELD, name)
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the step key.
    pub fn with_step_key(mut self, step_key: impl Into<String>) -> Self {
        self.step_key = Some(step_key.into());
        self
    }

    /// Set the help text.
    pub fn with_helper_text(mut self, helper_text: impl Into<String>) -> Self {
        self.helper_text = Some(helper_text.into());
        self
    }

    /// Set the mandatory flag.
    pub fn with_is_required(mut self, is_required: bool) -> Self {
        self.is_required = Some(is_required);
        self
    }

    /// Attach a validator.
    pub fn with_validator(mut self, validator: ValidatorSpec) -> Self {
        self.validate.push(validator);
        self
    }

    /// Mark the field mandatory and attach the required validator.
    pub fn required(self) -> Self {
        self.with_is_required(true).with_validator(ValidatorSpec::required())
    }

    /// Attach an opaque engine property.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// External display components referenced by identity.
///
/// The engine resolves these tags to presentation components registered by
/// the application; this crate only names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresentationComponent {
    /// Header row with record details and per-record actions.
    AuthenticationManagement,
    /// Spinner shown while a record's removal is in flight.
    RemoveAuthPlaceholder,
    /// Notice shown for authentication types the schema does not cover.
    UnsupportedAuthType,
}

impl PresentationComponent {
    /// Get the component tag string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthenticationManagement => "authentication-management",
            Self::RemoveAuthPlaceholder => "remove-auth-placeholder",
            Self::UnsupportedAuthType => "unsupported-auth-type",
        }
    }
}

impl std::fmt::Display for PresentationComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PresentationComponent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "authentication-management" => Ok(Self::AuthenticationManagement),
            "remove-auth-placeholder" => Ok(Self::RemoveAuthPlaceholder),
            "unsupported-auth-type" => Ok(Self::UnsupportedAuthType),
            _ => Err(format!("Unknown presentation component: {s}")),
        }
    }
}

/// Management header pseudo-field leading every sub-form.
///
/// Carries the raw record (deletion flag stripped), the matched schema
/// entry, and the opaque app-type list for downstream display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagementHeader {
    /// Always [`component_types::DESCRIPTION`].
    pub component: String,

    /// `<record id>-authentication-management`.
    pub name: String,

    /// Display component rendering the header.
    pub content: PresentationComponent,

    /// Schema entry matched for this record.
    pub schema_auth: SchemaAuthEntry,

    /// Opaque application types, passed through for display.
    pub app_types: Vec<Value>,

    /// The record itself, without the transient deletion flag.
    pub auth: AuthenticationRecord,

    /// Whether a removal is in flight for this record.
    pub is_deleting: bool,
}

impl ManagementHeader {
    /// Build the header for one record.
    pub fn new(
        auth: AuthenticationRecord,
        schema_auth: SchemaAuthEntry,
        app_types: &[Value],
        is_deleting: bool,
    ) -> Self {
        Self {
            component: component_types::DESCRIPTION.to_string(),
            name: format!("{}-authentication-management", auth.id),
            content: PresentationComponent::AuthenticationManagement,
            schema_auth,
            app_types: app_types.to_vec(),
            auth,
            is_deleting,
        }
    }
}

/// Non-input pseudo-field standing in for a record's real fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderField {
    /// Always [`component_types::DESCRIPTION`].
    pub component: String,

    /// Pseudo-field name, unique within the form.
    pub name: String,

    /// Display component rendering the placeholder.
    pub content: PresentationComponent,

    /// Localized notice text, where the component displays one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PlaceholderField {
    /// Placeholder shown while the record's removal is in flight.
    pub fn removal(id: &str) -> Self {
        Self {
            component: component_types::DESCRIPTION.to_string(),
            name: format!("{id}-remove-spinner"),
            content: PresentationComponent::RemoveAuthPlaceholder,
            label: None,
        }
    }

    /// Placeholder shown for an authentication type the schema does not cover.
    pub fn unsupported(authtype: &str, label: impl Into<String>) -> Self {
        Self {
            component: component_types::DESCRIPTION.to_string(),
            name: format!("{authtype}-unsupported"),
            content: PresentationComponent::UnsupportedAuthType,
            label: Some(label.into()),
        }
    }
}

/// One entry in a sub-form's field list.
///
/// Serializes untagged: the engine sees plain field objects and dispatches
/// on their `component` tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormField {
    /// Management header pseudo-field.
    Management(ManagementHeader),
    /// Removal or unsupported-type placeholder.
    Placeholder(PlaceholderField),
    /// Real form input.
    Input(FieldSpec),
}

impl FormField {
    /// Downcast to the management header, if that is what this is.
    pub fn as_management(&self) -> Option<&ManagementHeader> {
        match self {
            Self::Management(header) => Some(header),
            _ => None,
        }
    }

    /// Downcast to a placeholder, if that is what this is.
    pub fn as_placeholder(&self) -> Option<&PlaceholderField> {
        match self {
            Self::Placeholder(placeholder) => Some(placeholder),
            _ => None,
        }
    }

    /// Downcast to a real input field, if that is what this is.
    pub fn as_input(&self) -> Option<&FieldSpec> {
        match self {
            Self::Input(field) => Some(field),
            _ => None,
        }
    }
}

/// Renderable field group for one authentication record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldGroupDescriptor {
    /// Always [`component_types::SUB_FORM`].
    pub component: String,

    /// Group name shown by the engine.
    pub name: String,

    /// Header first, then placeholder or real fields.
    pub fields: Vec<FormField>,
}

impl FieldGroupDescriptor {
    /// Create a sub-form group with the given fields.
    pub fn sub_form(name: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            component: component_types::SUB_FORM.to_string(),
            name: name.into(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn field_spec_omits_absent_properties() {
        let field = FieldSpec::text_field("authentication.username");
        let value = serde_json::to_value(&field).unwrap();

        assert_eq!(
            value,
            json!({ "component": "text-field", "name": "authentication.username" })
        );
    }

    #[test]
    fn field_spec_keeps_unknown_engine_properties() {
        let field: FieldSpec = serde_json::from_value(json!({
            "component": "select",
            "name": "authentication.authtype",
            "options": [{ "value": "basic" }]
        }))
        .unwrap();

        assert_eq!(field.extra["options"], json!([{ "value": "basic" }]));
        assert_eq!(
            serde_json::to_value(&field).unwrap()["options"],
            json!([{ "value": "basic" }])
        );
    }

    #[test]
    fn required_validator_recognizes_both_spellings() {
        assert!(ValidatorSpec::required().is_required_type());
        assert!(ValidatorSpec::new("required").is_required_type());
        assert!(!ValidatorSpec::new("pattern-validator").is_required_type());
    }

    #[test]
    fn presentation_component_tags_round_trip() {
        use std::str::FromStr;

        for component in [
            PresentationComponent::AuthenticationManagement,
            PresentationComponent::RemoveAuthPlaceholder,
            PresentationComponent::UnsupportedAuthType,
        ] {
            assert_eq!(
                PresentationComponent::from_str(component.as_str()),
                Ok(component)
            );
            assert_eq!(
                serde_json::to_value(component).unwrap(),
                json!(component.as_str())
            );
        }
        assert!(PresentationComponent::from_str("spinner").is_err());
    }

    #[test]
    fn removal_placeholder_shape() {
        let placeholder = PlaceholderField::removal("3");
        let value = serde_json::to_value(&placeholder).unwrap();

        assert_eq!(
            value,
            json!({
                "component": "description",
                "name": "3-remove-spinner",
                "content": "remove-auth-placeholder"
            })
        );
    }

    #[test]
    fn form_field_downcasts() {
        let field = FormField::Input(FieldSpec::text_field("x"));
        assert!(field.as_input().is_some());
        assert!(field.as_management().is_none());
        assert!(field.as_placeholder().is_none());
    }
}
