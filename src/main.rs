//! svcgen CLI entrypoint
//! Parses command-line arguments, loads the service catalog and runs the templates.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use std::path::PathBuf;

use svcgen::{CompositeDefinitionLoader, Config, DefinitionLoader, TemplateRunner};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "svcgen")]
#[command(author, version, about = "Generates service bindings from templates", long_about = None)]
struct Cli {
    /// Location of the code generation template directory
    #[arg(long)]
    template_dir: Option<PathBuf>,
    /// Generated code location
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Path or URL of the service catalog (JSON or YAML)
    #[arg(long)]
    definitions: Option<String>,
    /// Service to regenerate, default is all services
    #[arg(long)]
    service: Option<String>,
    /// Suffix identifying template files
    #[arg(long)]
    suffix: Option<String>,
    /// TOML configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(template_dir) = self.template_dir {
            config.template_dir = Some(template_dir);
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = Some(output_dir);
        }
        if let Some(definitions) = self.definitions {
            config.definitions = Some(definitions);
        }
        if let Some(service) = self.service {
            config.service = Some(service);
        }
        if let Some(suffix) = self.suffix {
            config.template_suffix = suffix;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting svcgen");
    let config = cli.into_config()?;
    generate(config).await
}

/// Load the catalog and render every template against it
async fn generate(config: Config) -> anyhow::Result<()> {
    let runner_config = config.runner_config().context("Invalid configuration")?;
    let source = config.definitions_source()?;

    let mut catalog = CompositeDefinitionLoader::new()
        .load(source)
        .await
        .with_context(|| format!("Failed to load service definitions from {source}"))?;

    // An empty service name means all services
    if let Some(service) = config.service.as_deref().filter(|s| !s.is_empty()) {
        catalog.retain_service(service)?;
    }
    info!(
        version = %catalog.version,
        services = catalog.services.len(),
        "Loaded service catalog"
    );

    let runner = TemplateRunner::new(runner_config);
    info!(
        template_dir = %runner.config().template_dir.display(),
        output_dir = %runner.config().output_dir.display(),
        "Generating code"
    );

    // Rendering is blocking file I/O
    let report = tokio::task::spawn_blocking(move || runner.run(&catalog))
        .await
        .context("Template runner task failed")?
        .map_err(|e| {
            error!(error = %e, "Failed to generate code");
            e
        })
        .context("Failed to generate code")?;

    for file in report.files() {
        info!(path = %file.display(), "Generated file");
    }
    info!(
        templates = report.templates.len(),
        files = report.files().count(),
        "Code generation complete"
    );
    Ok(())
}
