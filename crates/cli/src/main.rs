//! HVYC CLI entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration** — load `.hvyc/config.toml` (or `--config`) and
//!    validate it into domain settings before any work starts.
//! 2. **Wire observability** — configure `tracing-subscriber` with a pretty or
//!    JSON formatter on stderr. All `tracing` spans and structured events
//!    emitted by every crate in the workspace flow through this layer.
//! 3. **Construct infrastructure** — create the [`renderer::MiniJinjaRenderer`]
//!    and [`compiler::SolcCompiler`] and inject them into a
//!    [`generator::ContractGenerator`].
//! 4. **Dispatch** — `render`, `compile` or `check-solc`.

mod commands;
mod config;
mod observability;
mod output;

use clap::Parser;
use compiler::SolcCompiler;
use generator::ContractGenerator;
use renderer::MiniJinjaRenderer;
use tracing::info;

use crate::commands::{Cli, Command};
use crate::config::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;
    observability::init(&config.logging)?;
    run(cli.command, &config).await
}

async fn run(command: Command, config: &CliConfig) -> anyhow::Result<()> {
    let settings = config.compiler_settings()?;
    let template = config.template_name()?;

    let renderer = match &config.templates.dir {
        Some(dir) => MiniJinjaRenderer::with_template_dir(dir),
        None => MiniJinjaRenderer::new(),
    };
    let compiler = SolcCompiler::new(&config.solc.binary);
    let generator = ContractGenerator::new(renderer, compiler, template, settings);

    match command {
        Command::Render { contract, out } => {
            let rendered = generator.render(contract.to_params()?)?;
            match out {
                Some(path) => output::write_source(&path, &rendered.source)?,
                None => print!("{}", rendered.source),
            }
        }
        Command::Compile { contract, out_dir } => {
            let variant = contract.variant();
            let generated = generator.generate(contract.to_params()?).await?;
            match out_dir {
                Some(dir) => {
                    output::write_artifacts(
                        &dir,
                        &generated,
                        variant,
                        generator.template(),
                        generator.settings(),
                    )?;
                }
                None => println!("{}", serde_json::to_string_pretty(&generated.artifacts)?),
            }
        }
        Command::CheckSolc => {
            let version = generator.check_compiler().await?;
            info!(binary = %config.solc.binary, "solc is ready");
            println!("{version}");
        }
    }
    Ok(())
}
