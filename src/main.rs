mod api;
mod commands;
mod config;
mod context;
mod logger;
mod output;
mod prompt;
mod schema;
mod test_helpers;
mod traits;
mod vm;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{CreateCommand, SchemaCommand, ValidateCommand};
use config::Config;
use context::Context;
use std::path::PathBuf;
use vm::OutputFormat;

#[derive(Parser)]
#[command(name = "vmspec")]
#[command(about = "Interactive wizard that builds validated AHV VM create specs", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v error ... -vvvvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to ~/.vmspec/config.yaml)
    #[arg(long, env = "VMSPEC_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a VM spec interactively from a live cluster
    Create {
        /// Output format of the finished spec
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,

        /// Prism Central host
        #[arg(long, env = "VMSPEC_HOST")]
        host: Option<String>,

        /// Prism Central port
        #[arg(long, env = "VMSPEC_PORT")]
        port: Option<u16>,

        #[arg(short, long, env = "VMSPEC_USERNAME")]
        username: Option<String>,

        #[arg(short, long, env = "VMSPEC_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Skip TLS certificate verification
        #[arg(long)]
        insecure: bool,

        /// Give up on a field after this many rejected answers
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_attempts: Option<u32>,
    },

    /// Apply defaults to a spec file and validate it
    Validate {
        /// Spec file (YAML or JSON)
        #[arg(short, long)]
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },

    /// Print the provider schema, or the part of it a field path resolves to
    Schema {
        /// Dot separated field path, e.g. resources.disk_list.disk_size_mib
        #[arg(short, long)]
        path: Option<String>,

        /// Union option label, one per union on the path
        #[arg(short, long = "option")]
        options: Vec<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    logger::init_logger(logger::resolve_level(&config.log.level, cli.verbose))?;

    ctrlc::set_handler(|| {
        output::blank();
        output::warning("Aborted");
        std::process::exit(130);
    })?;

    let ctx = Context::new();

    match cli.command {
        Commands::Create {
            format,
            host,
            port,
            username,
            password,
            insecure,
            max_attempts,
        } => {
            let mut server = config.server;
            server.host = host.or(server.host);
            server.port = port.unwrap_or(server.port);
            server.username = username.or(server.username);
            server.password = password.or(server.password);
            server.verify_ssl = server.verify_ssl && !insecure;

            CreateCommand::execute(&ctx, &server, format, max_attempts.map(|n| n as usize))?;
        }
        Commands::Validate { file, format } => {
            ValidateCommand::execute(&ctx, &file, format)?;
        }
        Commands::Schema {
            path,
            options,
            format,
        } => {
            SchemaCommand::execute(&ctx, path.as_deref(), &options, format)?;
        }
    }

    Ok(())
}
