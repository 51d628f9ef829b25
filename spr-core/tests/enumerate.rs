use spr_core::synth::{INT_FUZZ_VALUES, UUID_PLACEHOLDER};
use spr_core::{
    enumerate, enumerate_with, parse_description_str, ApiDescription, DocumentFormat,
    EnumerateOptions, ParamOverrides,
};

fn description(input: &str) -> ApiDescription {
    parse_description_str(input, DocumentFormat::Auto)
        .unwrap()
        .description
}

#[test]
fn only_get_operations_produce_tasks() {
    let d = description(
        r#"
paths:
  /users:
    summary: user collection
    get: {}
    post: {}
    put: {}
  /users/{id}:
    parameters:
      - name: id
        in: path
        schema: {type: integer}
    delete: {}
    patch: {}
    GET: {}
"#,
    );
    let overrides = ParamOverrides::new();
    let tasks: Vec<_> = enumerate(&d, "http://api.test", &overrides).collect();

    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| t.method == "GET"));
    assert_eq!(tasks[0].url, "http://api.test/users");
    assert_eq!(tasks[1].url, "http://api.test/users/123");
}

#[test]
fn tasks_follow_document_order() {
    let d = description(
        r#"{"paths": {
            "/zeta": {"get": {}},
            "/alpha": {"get": {"parameters": [{"name": "q", "in": "query", "schema": {"type": "string"}}]}},
            "/mid/{x}": {"get": {}}
        }}"#,
    );
    let overrides = ParamOverrides::new();
    let urls: Vec<String> = enumerate(&d, "http://api.test", &overrides).map(|t| t.url).collect();
    assert_eq!(
        urls,
        [
            "http://api.test/zeta",
            "http://api.test/alpha?q=arthur",
            "http://api.test/mid/123",
        ]
    );
}

#[test]
fn no_paths_produces_no_tasks() {
    let d = description(r#"{"paths": {}}"#);
    let overrides = ParamOverrides::new();
    assert_eq!(enumerate(&d, "http://api.test", &overrides).count(), 0);

    let d = ApiDescription::default();
    assert_eq!(enumerate(&d, "http://api.test", &overrides).count(), 0);
}

#[test]
fn enumeration_is_lazy() {
    let d = description(r#"{"paths": {"/a": {"get": {}}, "/b": {"get": {}}, "/c": {"get": {}}}}"#);
    let overrides = ParamOverrides::new();
    let mut it = enumerate(&d, "http://api.test", &overrides);
    assert_eq!(it.next().map(|t| t.url).as_deref(), Some("http://api.test/a"));
    assert_eq!(it.next().map(|t| t.url).as_deref(), Some("http://api.test/b"));
}

#[test]
fn overrides_flow_into_tasks() {
    let d = description(
        r#"{"paths": {"/users/{id}": {"get": {"parameters": [
            {"name": "id", "in": "path", "schema": {"type": "integer"}},
            {"name": "fields", "in": "query", "schema": {"type": "array"}}
        ]}}}}"#,
    );
    let overrides: ParamOverrides = [("id", "me"), ("fields", "email")].into_iter().collect();
    let tasks: Vec<_> = enumerate(&d, "http://api.test", &overrides).collect();
    assert_eq!(tasks[0].url, "http://api.test/users/me?fields=email");
}

#[test]
fn examples_and_uuid_formats_shape_the_url() {
    let d = description(
        r#"
paths:
  /accounts/{accountId}/orders:
    parameters:
      - name: accountId
        in: path
        schema: {type: string, format: uuid}
    get:
      parameters:
        - name: status
          in: query
          example: shipped
          schema: {type: string}
        - name: limit
          in: query
          schema: {type: integer, example: 25}
"#,
    );
    let overrides = ParamOverrides::new();
    let tasks: Vec<_> = enumerate(&d, "http://api.test", &overrides).collect();
    assert_eq!(
        tasks[0].url,
        format!("http://api.test/accounts/{UUID_PLACEHOLDER}/orders?status=shipped&limit=25")
    );
}

#[test]
fn int_fuzzing_expands_operations_with_integer_params() {
    let d = description(
        r#"
paths:
  /users/{id}:
    get:
      parameters:
        - {name: id, in: path, schema: {type: integer}}
  /health:
    get: {}
  /search:
    get:
      parameters:
        - {name: q, in: query, schema: {type: string}}
"#,
    );
    let overrides = ParamOverrides::new();
    let fuzzing = EnumerateOptions { int_fuzzing: true };
    let tasks: Vec<_> = enumerate_with(&d, "http://api.test", &overrides, fuzzing).collect();

    assert_eq!(tasks.len(), INT_FUZZ_VALUES.len() + 2);
    let users: Vec<&str> = tasks
        .iter()
        .map(|t| t.url.as_str())
        .filter(|u| u.contains("/users/"))
        .collect();
    assert_eq!(users.len(), INT_FUZZ_VALUES.len());
    assert_eq!(users[0], "http://api.test/users/1");
    assert_eq!(users[INT_FUZZ_VALUES.len() - 1], "http://api.test/users/90000000");
    assert!(tasks.iter().any(|t| t.url == "http://api.test/health"));
    assert!(tasks.iter().any(|t| t.url == "http://api.test/search?q=arthur"));

    let plain: Vec<_> = enumerate(&d, "http://api.test", &overrides).collect();
    assert_eq!(plain.len(), 3);
    assert_eq!(plain[0].url, "http://api.test/users/123");
}

#[test]
fn int_fuzzing_skips_integers_pinned_by_override() {
    let d = description(
        r#"{"paths": {"/users/{id}": {"get": {"parameters": [
            {"name": "id", "in": "path", "schema": {"type": "integer"}}
        ]}}}}"#,
    );
    let overrides: ParamOverrides = [("id", "me")].into_iter().collect();
    let fuzzing = EnumerateOptions { int_fuzzing: true };
    let tasks: Vec<_> = enumerate_with(&d, "http://api.test", &overrides, fuzzing).collect();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].url, "http://api.test/users/me");
}
