use crate::context::Context;
use crate::schema::ProviderSchema;
use crate::vm::{OutputFormat, render};
use anyhow::{Context as _, Result, bail};
use serde_json::Value;
use std::path::Path;

/// Handles the 'validate' command - checks an existing spec file against the provider schema
pub struct ValidateCommand;

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(ctx: &Context, file: &Path, format: OutputFormat) -> Result<()> {
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read spec file: {:?}", file))?;

        // JSON documents are YAML too
        let spec: Value = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse spec file: {:?}", file))?;

        let schema = ProviderSchema::load().context("Failed to load the VM provider schema")?;

        match schema.validate_spec(&spec) {
            Ok(spec) => {
                ctx.output.success(&format!("{} is a valid AHV VM spec", file.display()));
                ctx.output.plain(&render(&spec, format)?);
                Ok(())
            }
            Err(errors) => {
                for error in &errors {
                    ctx.output.error(error);
                }
                bail!("{} has {} validation error(s)", file.display(), errors.len())
            }
        }
    }
}
