use crate::context::Context;
use crate::schema::{ProviderSchema, resolve};
use crate::vm::{OutputFormat, render};
use anyhow::{Context as _, Result};

/// Handles the 'schema' command - prints the provider schema or one field of it
pub struct SchemaCommand;

impl SchemaCommand {
    /// Execute the schema command.
    ///
    /// `path` is dot separated (`resources.disk_list.disk_size_mib`); each
    /// union on the way consumes the next `options` label.
    pub fn execute(ctx: &Context, path: Option<&str>, options: &[String], format: OutputFormat) -> Result<()> {
        let schema = ProviderSchema::load().context("Failed to load the VM provider schema")?;

        let Some(path) = path else {
            ctx.output.plain(&render(schema.raw(), format)?);
            return Ok(());
        };

        let steps: Vec<String> = path
            .split('.')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        let node = resolve(schema.node(), &steps, options)
            .with_context(|| format!("Failed to resolve '{}'", path))?;

        ctx.output.plain(&render(node.raw(), format)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MockOutput, MockUserInput};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn run(path: Option<&str>, options: &[&str]) -> Result<Value> {
        let output = Arc::new(MockOutput::new());
        let ctx = Context::test_with(Arc::new(MockUserInput::new()), output.clone());
        let options: Vec<String> = options.iter().map(|o| o.to_string()).collect();

        SchemaCommand::execute(&ctx, path, &options, OutputFormat::Json)?;
        Ok(serde_json::from_str(&output.get_plain()[0]).unwrap())
    }

    #[test]
    fn test_scalar_field() {
        let node = run(Some("resources.num_sockets"), &[]).unwrap();
        assert_eq!(node, json!({"type": "integer", "minimum": 1, "default": 1}));
    }

    #[test]
    fn test_union_field_needs_option() {
        let node = run(Some("resources.disk_list.disk_size_mib"), &["AHV VDisk"]).unwrap();
        assert_eq!(node["minimum"], json!(1));

        let err = run(Some("resources.disk_list.disk_size_mib"), &[]).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to resolve"));
    }

    #[test]
    fn test_whole_schema_without_path() {
        let node = run(None, &[]).unwrap();
        assert_eq!(node["title"], json!("AHV VM Create Spec"));
    }
}
