use super::error::SchemaError;
use super::node::SchemaNode;
use super::resolver::resolve;
use serde_json::Value;

/// Every keyword the draft-7 vocabulary defines
const DRAFT7_KEYWORDS: &[&str] = &[
    "$schema", "$id", "$ref", "$comment", "definitions", "title", "description", "default",
    "readOnly", "writeOnly", "examples", "multipleOf", "maximum", "exclusiveMaximum", "minimum",
    "exclusiveMinimum", "maxLength", "minLength", "pattern", "additionalItems", "items",
    "maxItems", "minItems", "uniqueItems", "contains", "maxProperties", "minProperties",
    "required", "properties", "patternProperties", "additionalProperties", "dependencies",
    "propertyNames", "enum", "const", "type", "allOf", "anyOf", "oneOf", "not", "if", "then",
    "else", "format", "contentMediaType", "contentEncoding",
];

/// Keywords whose value is a single sub-schema
const SCHEMA_KEYWORDS: &[&str] = &[
    "additionalItems", "additionalProperties", "contains", "propertyNames", "not", "if", "then",
    "else",
];

/// Keywords whose value maps names to sub-schemas
const SCHEMA_MAP_KEYWORDS: &[&str] = &["properties", "patternProperties", "definitions", "dependencies"];

/// Keywords whose value is a list of sub-schemas
const SCHEMA_LIST_KEYWORDS: &[&str] = &["allOf", "anyOf", "oneOf"];

/// How much of a schema the validator is willing to accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Reject schemas using keywords outside draft-7 (`x-` extensions allowed)
    #[default]
    Strict,
    /// Plain draft-7: unknown keywords are ignored
    Permissive,
}

/// Validates field values against the sub-schema addressed by a path
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldValidator {
    policy: ValidationPolicy,
}

impl FieldValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    /// Resolve `path`/`options` against `schema` and check `value` there.
    ///
    /// Returns `Ok(false)` for a value that does not conform; errors are kept
    /// for schema problems (unresolvable path, unknown keyword, bad schema).
    pub fn validate(
        &self,
        schema: &SchemaNode,
        path: &[String],
        options: &[String],
        value: &Value,
    ) -> Result<bool, SchemaError> {
        let sub_schema = resolve(schema, path, options)?;
        self.is_valid(sub_schema.raw(), value)
    }

    /// Check `value` against a raw schema under this validator's policy
    pub fn is_valid(&self, schema: &Value, value: &Value) -> Result<bool, SchemaError> {
        if self.policy == ValidationPolicy::Strict {
            check_keywords(schema)?;
        }

        let validator = compile(schema)?;

        let valid = validator.is_valid(value);
        if !valid {
            log::debug!("value {} rejected by schema {}", value, schema);
        }

        Ok(valid)
    }

    /// Collect every validation error for `value`, as display strings
    pub fn errors(&self, schema: &Value, value: &Value) -> Result<Vec<String>, SchemaError> {
        if self.policy == ValidationPolicy::Strict {
            check_keywords(schema)?;
        }

        let validator = compile(schema)?;

        Ok(validator
            .iter_errors(value)
            .map(|error| {
                let location = error.instance_path.to_string();
                if location.is_empty() {
                    error.to_string()
                } else {
                    format!("{}: {}", location, error)
                }
            })
            .collect())
    }
}

fn compile(schema: &Value) -> Result<jsonschema::Validator, SchemaError> {
    jsonschema::draft7::options()
        .should_validate_formats(true)
        .build(schema)
        .map_err(|e| SchemaError::Compile(e.to_string()))
}

/// Walk every sub-schema position and reject keywords draft-7 does not know
fn check_keywords(schema: &Value) -> Result<(), SchemaError> {
    let Value::Object(obj) = schema else {
        return Ok(());
    };

    for (keyword, value) in obj {
        if !keyword.starts_with("x-") && !DRAFT7_KEYWORDS.contains(&keyword.as_str()) {
            return Err(SchemaError::UnknownKeyword(keyword.clone()));
        }

        let keyword = keyword.as_str();
        if SCHEMA_KEYWORDS.contains(&keyword) {
            check_keywords(value)?;
        } else if SCHEMA_MAP_KEYWORDS.contains(&keyword) {
            if let Value::Object(children) = value {
                for child in children.values() {
                    check_keywords(child)?;
                }
            }
        } else if SCHEMA_LIST_KEYWORDS.contains(&keyword) || keyword == "items" {
            match value {
                Value::Array(children) => {
                    for child in children {
                        check_keywords(child)?;
                    }
                }
                other => check_keywords(other)?,
            }
        }
    }

    Ok(())
}
