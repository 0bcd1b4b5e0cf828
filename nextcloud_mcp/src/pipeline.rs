//! Argument validation and result normalisation shared by every tool.
//!
//! Arguments are checked in four steps, stopping at the first failure:
//! required fields from the declared schema, JSON types of the supplied
//! fields, typed deserialisation, then the parameter type's own
//! [`Validate`] constraints. Outcomes are wrapped in a [`ToolCallResult`].

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use rmcp::model::{CallToolResult, Content, JsonObject};
use rmcp::schemars::{self, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::errors::ToolError;

static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date pattern"));
static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}").expect("valid date-time pattern")
});
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// A field-level argument failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Domain constraints checked after deserialisation.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

pub fn require_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(field, "Must not be empty"));
    }
    Ok(())
}

pub fn require_date(field: &str, value: &str) -> Result<(), ValidationError> {
    if !DATE.is_match(value) {
        return Err(ValidationError::new(field, "Date must be in YYYY-MM-DD format"));
    }
    Ok(())
}

pub fn require_date_time(field: &str, value: &str) -> Result<(), ValidationError> {
    if !DATE_TIME.is_match(value) {
        return Err(ValidationError::new(
            field,
            "DateTime must be in ISO 8601 format",
        ));
    }
    Ok(())
}

pub fn require_email(field: &str, value: &str) -> Result<(), ValidationError> {
    if !EMAIL.is_match(value) {
        return Err(ValidationError::new(field, "Invalid email"));
    }
    Ok(())
}

/// JSON schema of a parameter type, as advertised in `tools/list`.
pub fn input_schema<P: JsonSchema>() -> Arc<JsonObject> {
    let schema = schemars::schema_for!(P);
    match serde_json::to_value(schema) {
        Ok(Value::Object(object)) => Arc::new(object),
        _ => Arc::new(JsonObject::new()),
    }
}

/// Runs the validation steps and returns the typed parameters.
pub fn validate_arguments<P>(
    schema: &JsonObject,
    arguments: Option<JsonObject>,
) -> Result<P, ValidationError>
where
    P: DeserializeOwned + Validate,
{
    let arguments = arguments.unwrap_or_default();

    if let Some(Value::Array(required)) = schema.get("required") {
        if let Some(missing) = required
            .iter()
            .filter_map(Value::as_str)
            .find(|name| !arguments.contains_key(*name))
        {
            return Err(ValidationError::new(missing, "Required"));
        }
    }

    if let Some(Value::Object(properties)) = schema.get("properties") {
        for (name, value) in &arguments {
            let Some(expected) = properties.get(name).and_then(|p| p.get("type")) else {
                continue;
            };
            if !matches_type(value, expected) {
                return Err(ValidationError::new(
                    name.as_str(),
                    format!(
                        "Expected {}, received {}",
                        describe_type(expected),
                        json_type(value)
                    ),
                ));
            }
        }
    }

    let params: P = serde_json::from_value(Value::Object(arguments))
        .map_err(|e| ValidationError::new("arguments", e.to_string()))?;
    params.validate()?;
    Ok(params)
}

fn matches_type(value: &Value, expected: &Value) -> bool {
    match expected {
        Value::String(name) => is_type(value, name),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .any(|name| is_type(value, name)),
        _ => true,
    }
}

fn is_type(value: &Value, name: &str) -> bool {
    match name {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn describe_type(expected: &Value) -> String {
    match expected {
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" or "),
        other => other.as_str().unwrap_or("value").to_string(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Uniform outcome of a tool call.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCallResult {
    Success(Value),
    Failure { error: String, code: &'static str },
}

impl ToolCallResult {
    pub fn failure(error: &ToolError) -> Self {
        ToolCallResult::Failure {
            error: error.to_string(),
            code: error.code(),
        }
    }

    pub fn from_outcome(outcome: Result<Value, ToolError>) -> Self {
        match outcome {
            Ok(data) => ToolCallResult::Success(data),
            Err(err) => ToolCallResult::failure(&err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolCallResult::Success(_))
    }

    /// The envelope: `{"success": true, "data": ...}` or
    /// `{"success": false, "error": ..., "code": ...}`.
    pub fn to_json(&self) -> Value {
        match self {
            ToolCallResult::Success(data) => json!({ "success": true, "data": data }),
            ToolCallResult::Failure { error, code } => {
                json!({ "success": false, "error": error, "code": code })
            }
        }
    }

    /// Pretty printed envelope as the single text content of an MCP result.
    pub fn into_call_result(self) -> CallToolResult {
        let text = format!("{:#}", self.to_json());
        if self.is_success() {
            CallToolResult::success(vec![Content::text(text)])
        } else {
            CallToolResult::error(vec![Content::text(text)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, JsonSchema)]
    #[serde(rename_all = "camelCase")]
    struct SampleParams {
        name: String,
        #[serde(default = "default_kind")]
        kind: String,
        due_date: Option<String>,
    }

    fn default_kind() -> String {
        "note".to_string()
    }

    impl Validate for SampleParams {
        fn validate(&self) -> Result<(), ValidationError> {
            require_non_empty("name", &self.name)?;
            if let Some(due) = &self.due_date {
                require_date("dueDate", due)?;
            }
            Ok(())
        }
    }

    fn args(value: Value) -> Option<JsonObject> {
        value.as_object().cloned()
    }

    #[test]
    fn test_schema_marks_required_fields() {
        let schema = input_schema::<SampleParams>();
        let required = schema.get("required").and_then(Value::as_array).unwrap();
        assert_eq!(required, &vec![json!("name")]);
    }

    #[test]
    fn test_missing_required_field() {
        let schema = input_schema::<SampleParams>();
        let result = validate_arguments::<SampleParams>(&schema, args(json!({"kind": "x"})));
        assert_eq!(result.unwrap_err(), ValidationError::new("name", "Required"));
    }

    #[test]
    fn test_missing_arguments_object() {
        let schema = input_schema::<SampleParams>();
        let err = validate_arguments::<SampleParams>(&schema, None).unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn test_wrong_type() {
        let schema = input_schema::<SampleParams>();
        let err = validate_arguments::<SampleParams>(&schema, args(json!({"name": 7}))).unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(err.message, "Expected string, received number");
    }

    #[test]
    fn test_defaults_and_constraints() {
        let schema = input_schema::<SampleParams>();
        let params =
            validate_arguments::<SampleParams>(&schema, args(json!({"name": "a"}))).unwrap();
        assert_eq!(params.kind, "note");

        let err = validate_arguments::<SampleParams>(
            &schema,
            args(json!({"name": "a", "dueDate": "tomorrow"})),
        )
        .unwrap_err();
        assert_eq!(err.field, "dueDate");
    }

    #[test]
    fn test_null_optional_is_accepted() {
        let schema = input_schema::<SampleParams>();
        let params = validate_arguments::<SampleParams>(
            &schema,
            args(json!({"name": "a", "dueDate": null})),
        )
        .unwrap();
        assert_eq!(params.due_date, None);
    }

    #[test]
    fn test_constraint_helpers() {
        assert!(require_date_time("start", "2024-01-15T10:00:00").is_ok());
        assert!(require_date_time("start", "2024-01-15T10:00:00.000Z").is_ok());
        assert!(require_date_time("start", "2024-01-15").is_err());
        assert!(require_email("email", "ada@example.com").is_ok());
        assert!(require_email("email", "not-an-email").is_err());
        assert!(require_non_empty("summary", "").is_err());
    }

    #[test]
    fn test_envelope_shapes() {
        let ok = ToolCallResult::Success(json!([1, 2]));
        assert_eq!(ok.to_json(), json!({"success": true, "data": [1, 2]}));

        let failed = ToolCallResult::Failure {
            error: "Not found: /x".to_string(),
            code: "not_found",
        };
        assert_eq!(
            failed.to_json(),
            json!({"success": false, "error": "Not found: /x", "code": "not_found"})
        );
        assert_eq!(failed.into_call_result().is_error, Some(true));
    }
}
