//! End-to-end descriptor shape tests against the serialized JSON the form
//! engine actually consumes.

use authform::{
    AuthFieldMapper, AuthOverrideEntry, AuthenticationRecord, FieldOverride, FieldSpec,
    ProviderOverrides, SchemaAuthEntry, SourceSchema, SourceType, ValidatorSpec,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn basic_source_type() -> SourceType {
    SourceType::new("openshift").with_schema(SourceSchema::new(vec![SchemaAuthEntry::new(
        "basic",
        "Basic authentication",
    )
    .with_field(FieldSpec::text_field("authentication.username").with_label("Username"))
    .with_field(
        FieldSpec::text_field("authentication.password")
            .with_label("Password")
            .with_validator(ValidatorSpec::new("required-validator")),
    )]))
}

fn render(groups: &[authform::FieldGroupDescriptor]) -> Value {
    serde_json::to_value(groups).expect("descriptors serialize")
}

#[test]
fn worked_example_matches_engine_shape() {
    let mapper = AuthFieldMapper::default();
    let records = vec![AuthenticationRecord::new("1", "basic")];

    let groups = mapper.authentication_fields(&records, &basic_source_type(), &[]);
    assert_eq!(groups.len(), 1);

    let json = render(&groups);
    assert_eq!(json[0]["component"], "sub-form");
    assert_eq!(json[0]["name"], "Basic authentication");

    // header first, carrying the raw record
    let header = &json[0]["fields"][0];
    assert_eq!(header["component"], "description");
    assert_eq!(header["name"], "1-authentication-management");
    assert_eq!(header["content"], "authentication-management");
    assert_eq!(header["auth"]["id"], "1");
    assert_eq!(header["auth"].get("isDeleting"), None);
    assert_eq!(header["isDeleting"], false);
    assert_eq!(header["schemaAuth"]["type"], "basic");

    // username: renamed, otherwise unchanged
    let username = &json[0]["fields"][1];
    assert_eq!(username["name"], "authentications.a1.username");
    assert_eq!(username["label"], "Username");
    assert_eq!(username["component"], "edit-field");
    assert_eq!(username["originalComponent"], "text-field");

    // password: renamed, de-required, validators stripped, help text replaced
    let password = &json[0]["fields"][2];
    assert_eq!(password["name"], "authentications.a1.password");
    assert_eq!(password["isRequired"], false);
    assert_eq!(password.get("validate"), None);
    assert_eq!(
        password["helperText"],
        "Changing this resets your current Password."
    );
}

#[test]
fn password_field_on_record_seven() {
    let mapper = AuthFieldMapper::default();
    let records = vec![AuthenticationRecord::new("7", "basic")];

    let json = render(&mapper.authentication_fields(&records, &basic_source_type(), &[]));

    let password = &json[0]["fields"][2];
    assert_eq!(password["name"], "authentications.a7.password");
    assert_eq!(password["isRequired"], false);
    assert_eq!(password.get("validate"), None);
}

#[test]
fn missing_inputs_degrade_to_empty() {
    let mapper = AuthFieldMapper::default();
    let record = AuthenticationRecord::new("1", "basic");

    assert!(mapper
        .authentication_fields(&[], &basic_source_type(), &[])
        .is_empty());
    assert!(mapper
        .authentication_fields(&[record.clone()], &SourceType::new("openshift"), &[])
        .is_empty());
    assert!(mapper
        .authentication_fields(
            &[record],
            &SourceType::new("openshift").with_schema(SourceSchema::default()),
            &[],
        )
        .is_empty());
}

#[test]
fn unsupported_type_renders_placeholder_descriptor() {
    let mapper = AuthFieldMapper::default();
    let records = vec![AuthenticationRecord::new("1", "kerberos")];

    let json = render(&mapper.authentication_fields(&records, &basic_source_type(), &[]));

    assert_eq!(json[0]["component"], "sub-form");
    assert_eq!(json[0]["name"], "unsupported-kerberos");
    let fields = json[0]["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0]["component"], "description");
    assert_eq!(fields[0]["content"], "unsupported-auth-type");
    assert_eq!(
        fields[0]["label"],
        "Authentication type kerberos is not currently supported."
    );
}

#[test]
fn deleting_record_renders_removal_placeholder() {
    let mapper = AuthFieldMapper::default();
    let records = vec![AuthenticationRecord::new("3", "basic").with_deleting(true)];

    let json = render(&mapper.authentication_fields(&records, &basic_source_type(), &[]));

    let fields = json[0]["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0]["isDeleting"], true);
    assert_eq!(fields[1]["component"], "description");
    assert_eq!(fields[1]["name"], "3-remove-spinner");
    assert_eq!(fields[1]["content"], "remove-auth-placeholder");
}

#[test]
fn app_types_pass_through_to_the_header() {
    let mapper = AuthFieldMapper::default();
    let records = vec![AuthenticationRecord::new("1", "basic")];
    let app_types = vec![json!({ "id": "2", "name": "cost-management" })];

    let json = render(&mapper.authentication_fields(&records, &basic_source_type(), &app_types));

    assert_eq!(
        json[0]["fields"][0]["appTypes"],
        json!([{ "id": "2", "name": "cost-management" }])
    );
}

#[test]
fn override_table_loaded_from_json_applies() {
    let overrides = ProviderOverrides::from_json_str(
        r#"{
            "openshift": {
                "authentication": {
                    "basic": {
                        "includeStepKeyFields": ["usage"],
                        "fields": {
                            "authentication.username": { "label": "Login", "autoFocus": true }
                        }
                    }
                }
            }
        }"#,
    )
    .expect("table parses");
    let mapper = AuthFieldMapper::new(overrides);

    let source_type = SourceType::new("openshift").with_schema(SourceSchema::new(vec![
        SchemaAuthEntry::new("basic", "Basic authentication")
            .with_field(FieldSpec::text_field("authentication.username").with_label("Username"))
            .with_field(FieldSpec::text_field("authentication.usage_hint").with_step_key("usage"))
            .with_field(FieldSpec::text_field("authentication.extra").with_step_key("other")),
    ]));
    let records = vec![AuthenticationRecord::new("1", "basic")];

    let json = render(&mapper.authentication_fields(&records, &source_type, &[]));

    let username = &json[0]["fields"][1];
    assert_eq!(username["label"], "Login");
    assert_eq!(username["autoFocus"], true);

    // "usage" enabled, "other" not
    let names: Vec<&str> = json[0]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .skip(1)
        .map(|field| field["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        ["authentications.a1.username", "authentications.a1.usage_hint"]
    );
}

#[test]
fn groups_follow_record_order() {
    let mapper = AuthFieldMapper::default();
    let records = vec![
        AuthenticationRecord::new("10", "basic"),
        AuthenticationRecord::new("11", "kerberos"),
        AuthenticationRecord::new("12", "basic").with_deleting(true),
    ];

    let groups = mapper.authentication_fields(&records, &basic_source_type(), &[]);

    assert_eq!(groups.len(), 3);
    let json = render(&groups);
    assert_eq!(json[0]["fields"][0]["name"], "10-authentication-management");
    assert_eq!(json[1]["name"], "unsupported-kerberos");
    assert_eq!(json[2]["fields"][1]["name"], "12-remove-spinner");
}

#[test]
fn field_override_builder_matches_json_override() {
    let from_builder = AuthFieldMapper::new(ProviderOverrides::new().with_entry(
        "openshift",
        "basic",
        AuthOverrideEntry::new().with_field_override(
            "authentication.username",
            FieldOverride::new().with_label("Login"),
        ),
    ));
    let from_json = AuthFieldMapper::new(
        ProviderOverrides::from_json_str(
            r#"{
                "openshift": {
                    "authentication": {
                        "basic": { "fields": { "authentication.username": { "label": "Login" } } }
                    }
                }
            }"#,
        )
        .unwrap(),
    );

    let records = vec![AuthenticationRecord::new("1", "basic")];
    let source_type = basic_source_type();

    assert_eq!(
        render(&from_builder.authentication_fields(&records, &source_type, &[])),
        render(&from_json.authentication_fields(&records, &source_type, &[]))
    );
}
