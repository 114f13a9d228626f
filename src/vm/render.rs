use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

/// Document format for a finished spec
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Serialize `spec` for display. JSON keys come out sorted with a four space indent.
pub fn render(spec: &Value, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(spec).context("Failed to render spec as YAML"),
        OutputFormat::Json => {
            let mut buf = Vec::new();
            let mut serializer =
                serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
            spec.serialize(&mut serializer)
                .context("Failed to render spec as JSON")?;
            String::from_utf8(buf).context("Rendered JSON is not UTF-8")
        }
    }
}
