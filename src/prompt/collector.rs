use super::error::PromptError;
use super::label::humanize;
use crate::schema::{FieldValidator, SchemaNode};
use crate::traits::{Output, UserInput};
use anyhow::Result;
use serde_json::Value;

pub(crate) const INCORRECT_DATA: &str = "data incorrect. Enter again";

/// Type an entered answer is coerced to before validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
}

impl FieldKind {
    /// Parse terminal text into a JSON value of this kind
    pub fn coerce(&self, text: &str) -> Option<Value> {
        let text = text.trim();
        match self {
            FieldKind::String => Some(Value::String(text.to_string())),
            FieldKind::Integer => text.parse::<i64>().ok().map(Value::from),
            FieldKind::Number => text
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            FieldKind::Boolean => match text.to_lowercase().as_str() {
                "y" | "yes" | "true" => Some(Value::Bool(true)),
                "n" | "no" | "false" => Some(Value::Bool(false)),
                _ => None,
            },
        }
    }
}

/// Prompts for scalar fields and keeps asking until the schema accepts the answer
pub struct FieldCollector<'a> {
    schema: &'a SchemaNode,
    input: &'a dyn UserInput,
    output: &'a dyn Output,
    validator: FieldValidator,
    max_attempts: Option<usize>,
}

impl<'a> FieldCollector<'a> {
    pub fn new(schema: &'a SchemaNode, input: &'a dyn UserInput, output: &'a dyn Output) -> Self {
        Self {
            schema,
            input,
            output,
            validator: FieldValidator::default(),
            max_attempts: None,
        }
    }

    /// Give up after `attempts` rejected answers instead of asking forever
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Ask for the field at `path` until a valid value is entered.
    ///
    /// The prompt defaults to `Enter <humanized last segment>`. A truthy
    /// `default` is offered and used for an empty answer.
    pub fn collect(
        &self,
        path: &[String],
        options: &[String],
        default: Option<&Value>,
        kind: FieldKind,
        message: Option<&str>,
    ) -> Result<Value> {
        let field = path.last().map(|s| humanize(s)).unwrap_or_default();
        let message = match message {
            Some(m) => m.to_string(),
            None => format!("Enter {}", field),
        };

        let default = default.filter(|d| is_truthy(d));
        let default_text = default.map(display_value);

        let mut attempts = 0;
        loop {
            attempts += 1;
            let answer = self.input.text(&message, default_text.as_deref())?;

            let value = match (default, &default_text) {
                (Some(d), Some(text)) if answer.is_empty() || &answer == text => Some(d.clone()),
                _ if answer.is_empty() => None,
                _ => kind.coerce(&answer),
            };

            if let Some(value) = value {
                if self.validator.validate(self.schema, path, options, &value)? {
                    return Ok(value);
                }
                log::debug!("rejected {} for '{}'", value, path.join("."));
                self.output.warning(INCORRECT_DATA);
            } else if !answer.is_empty() {
                self.output.warning(INCORRECT_DATA);
            }

            if let Some(max) = self.max_attempts
                && attempts >= max
            {
                return Err(PromptError::RetriesExhausted { field, attempts }.into());
            }
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MockOutput, MockResponse, MockUserInput, OutputMessage};
    use serde_json::json;

    fn path(steps: &[&str]) -> Vec<String> {
        steps.iter().map(|s| s.to_string()).collect()
    }

    fn schema() -> SchemaNode {
        SchemaNode::from_value(&json!({
            "type": "object",
            "properties": {
                "name": {"type": "string", "maxLength": 8},
                "resources": {
                    "type": "object",
                    "properties": {
                        "num_vcpus_per_socket": {"type": "integer", "minimum": 1}
                    }
                }
            }
        }))
        .unwrap()
    }

    fn answers(texts: &[&str]) -> MockUserInput {
        MockUserInput::with_responses(
            texts.iter().map(|t| MockResponse::Text(t.to_string())).collect(),
        )
    }

    #[test]
    fn test_accepts_first_valid_answer() {
        let schema = schema();
        let input = answers(&["vm1"]);
        let output = MockOutput::new();

        let value = FieldCollector::new(&schema, &input, &output)
            .collect(&path(&["name"]), &[], None, FieldKind::String, None)
            .unwrap();

        assert_eq!(value, json!("vm1"));
        assert_eq!(input.prompts(), vec!["Enter Name"]);
        assert!(output.get_messages().is_empty());
    }

    #[test]
    fn test_reprompts_until_valid() {
        let schema = schema();
        let input = answers(&["0", "abc", "4"]);
        let output = MockOutput::new();

        let value = FieldCollector::new(&schema, &input, &output)
            .collect(
                &path(&["resources", "num_vcpus_per_socket"]),
                &[],
                None,
                FieldKind::Integer,
                None,
            )
            .unwrap();

        assert_eq!(value, json!(4));
        assert_eq!(input.prompts()[0], "Enter Num vcpus per socket");
        let warnings = output
            .get_messages()
            .into_iter()
            .filter(|m| m == &OutputMessage::Warning(INCORRECT_DATA.to_string()))
            .count();
        assert_eq!(warnings, 2);
    }

    #[test]
    fn test_empty_answer_takes_default() {
        let schema = schema();
        let input = answers(&[""]);
        let output = MockOutput::new();

        let value = FieldCollector::new(&schema, &input, &output)
            .collect(
                &path(&["resources", "num_vcpus_per_socket"]),
                &[],
                Some(&json!(1)),
                FieldKind::Integer,
                Some("Enter Cores per vCPU count"),
            )
            .unwrap();

        assert_eq!(value, json!(1));
        assert_eq!(input.prompts(), vec!["Enter Cores per vCPU count"]);
    }

    #[test]
    fn test_falsy_default_requires_entry() {
        let schema = schema();
        let input = answers(&["", "web"]);
        let output = MockOutput::new();

        let value = FieldCollector::new(&schema, &input, &output)
            .collect(&path(&["name"]), &[], Some(&json!("")), FieldKind::String, None)
            .unwrap();

        assert_eq!(value, json!("web"));
        assert_eq!(input.prompts().len(), 2);
    }

    #[test]
    fn test_bounded_attempts_fail_cleanly() {
        let schema = schema();
        let input = answers(&["far-too-long-name", "still-too-long"]);
        let output = MockOutput::new();

        let err = FieldCollector::new(&schema, &input, &output)
            .with_max_attempts(2)
            .collect(&path(&["name"]), &[], None, FieldKind::String, None)
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<PromptError>(),
            Some(&PromptError::RetriesExhausted {
                field: "Name".to_string(),
                attempts: 2
            })
        );
    }

    #[test]
    fn test_schema_errors_abort() {
        let schema = schema();
        let input = answers(&["x"]);
        let output = MockOutput::new();

        let err = FieldCollector::new(&schema, &input, &output)
            .collect(&path(&["missing"]), &[], None, FieldKind::String, None)
            .unwrap_err();

        assert!(err.to_string().contains("Missing property 'missing'"));
    }

    #[test]
    fn test_coerce_kinds() {
        assert_eq!(FieldKind::Integer.coerce(" 12 "), Some(json!(12)));
        assert_eq!(FieldKind::Integer.coerce("1.5"), None);
        assert_eq!(FieldKind::Number.coerce("1.5"), Some(json!(1.5)));
        assert_eq!(FieldKind::Boolean.coerce("Y"), Some(json!(true)));
        assert_eq!(FieldKind::Boolean.coerce("maybe"), None);
    }
}
