//! Caller-supplied model: authentication records and source-type schemas.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::FieldSpec;

/// One stored credential set, as supplied by the application.
///
/// Beyond the identifier and the authentication type tag, a record carries
/// opaque credential fields in `extra` (username, endpoints, whatever the
/// provider defines). The mapper never interprets them; they ride along so
/// the management header can display them.
///
/// # Example
///
/// ```rust
/// use authform::AuthenticationRecord;
/// use serde_json::json;
///
/// let record = AuthenticationRecord::new("1", "basic")
///     .with_extra("username", json!("alice"));
/// assert_eq!(record.extra["username"], "alice");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationRecord {
    /// Record identifier; embedded into namespaced field names.
    pub id: String,

    /// Authentication type tag, matched against [`SchemaAuthEntry::authtype`].
    pub authtype: String,

    /// Transient UI flag marking a removal in progress.
    ///
    /// Not authentication data: it is accepted on input (`isDeleting`) but
    /// never serialized back out. The mapper strips it from the embedded
    /// record and carries it on the management header instead.
    #[serde(default, skip_serializing)]
    pub is_deleting: bool,

    /// Remaining opaque record fields, in insertion order.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl AuthenticationRecord {
    /// Create a record with the given identifier and authentication type.
    pub fn new(id: impl Into<String>, authtype: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            authtype: authtype.into(),
            is_deleting: false,
            extra: IndexMap::new(),
        }
    }

    /// Attach an opaque record field.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Set the transient removal-in-progress flag.
    pub fn with_deleting(mut self, is_deleting: bool) -> Self {
        self.is_deleting = is_deleting;
        self
    }
}

/// Per-provider description of the supported authentication types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceType {
    /// Provider name; keys the override table.
    pub name: String,

    /// Field schema, absent for providers that define none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SourceSchema>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl SourceType {
    /// Create a source type with no schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            extra: IndexMap::new(),
        }
    }

    /// Set the field schema.
    pub fn with_schema(mut self, schema: SourceSchema) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// The schema portion of a source type.
///
/// An *absent* authentication list short-circuits the mapping to an empty
/// result; an *empty* list instead yields an unsupported-type placeholder
/// per record. The distinction comes from the wire format, where the two
/// cases are observable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSchema {
    /// Supported authentication types and their required fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Vec<SchemaAuthEntry>>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl SourceSchema {
    /// Create a schema with the given authentication entries.
    pub fn new(authentication: Vec<SchemaAuthEntry>) -> Self {
        Self {
            authentication: Some(authentication),
            extra: IndexMap::new(),
        }
    }
}

/// Provider-defined description of one authentication type's form fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaAuthEntry {
    /// Authentication type tag, matched against [`AuthenticationRecord::authtype`].
    #[serde(rename = "type")]
    pub authtype: String,

    /// Display name; becomes the sub-form group name.
    pub name: String,

    /// Form fields required for this authentication type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldSpec>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl SchemaAuthEntry {
    /// Create an entry with no fields.
    pub fn new(authtype: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            authtype: authtype.into(),
            name: name.into(),
            fields: Vec::new(),
            extra: IndexMap::new(),
        }
    }

    /// Append a form field.
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }
}
