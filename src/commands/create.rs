use crate::api::{Ahv, Connection};
use crate::config::ServerConfig;
use crate::context::Context;
use crate::schema::ProviderSchema;
use crate::traits::ReqwestClient;
use crate::vm::{OutputFormat, SpecAssembler, render};
use anyhow::{Context as _, Result};
use std::sync::Arc;

/// Handles the 'create' command - runs the wizard against a live cluster
pub struct CreateCommand;

impl CreateCommand {
    /// Execute the create command
    pub fn execute(
        ctx: &Context,
        server: &ServerConfig,
        format: OutputFormat,
        max_attempts: Option<usize>,
    ) -> Result<()> {
        let host = server.host.as_deref().context(
            "No server host configured.\n\nPass --host, set VMSPEC_HOST or add server.host to the config file.",
        )?;

        let client = ReqwestClient::new(
            server.username.clone(),
            server.password.clone(),
            server.verify_ssl,
        )?;
        let connection = Connection::new(host, server.port, Arc::new(client))?;
        log::info!("connecting to {}", connection.base_url());

        Self::run(ctx, &Ahv::new(connection), format, max_attempts)
    }

    /// Assemble a spec through `ahv` and print it
    pub fn run(ctx: &Context, ahv: &Ahv, format: OutputFormat, max_attempts: Option<usize>) -> Result<()> {
        let schema = ProviderSchema::load().context("Failed to load the VM provider schema")?;

        let mut assembler = SpecAssembler::new(ctx, ahv, &schema);
        if let Some(attempts) = max_attempts {
            assembler = assembler.with_max_attempts(attempts);
        }

        let Some(spec) = assembler.assemble()? else {
            return Ok(());
        };

        ctx.output.blank();
        ctx.output.success("Create spec for your AHV VM:");
        ctx.output.highlight(&render(&spec, format)?);

        Ok(())
    }
}
