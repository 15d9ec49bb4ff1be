use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fixture::{
    check_fixtures, write_fixtures, FileNaming, NodeLayout, DEFAULT_NODE_COUNT, DEFAULT_PREFIX,
};
use script::ScriptLimits;
use spgen_tools::{format_check_pretty, format_inspect_pretty, inspect_script, CheckOutput};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "spgen",
    version,
    about = "Deterministic SP command-script fixture generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct FixtureArgs {
    /// Number of simulated SPs.
    #[arg(long, default_value_t = DEFAULT_NODE_COUNT)]
    nodes: u32,
    /// Directory holding the fixture files. Must already exist.
    #[arg(long, default_value = "inputs")]
    out_dir: PathBuf,
    /// File name prefix; SP i is stored as <prefix><i>.
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,
}

#[derive(Subcommand)]
enum Command {
    /// Write one command script per SP.
    Generate {
        #[command(flatten)]
        fixture: FixtureArgs,
    },
    /// Verify a fixture set against the generator.
    Check {
        #[command(flatten)]
        fixture: FixtureArgs,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Summarise a single command script.
    Inspect {
        /// Path to the script file.
        script_path: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate { fixture } => {
            let layout = NodeLayout::new(fixture.nodes).context("invalid layout")?;
            let naming = FileNaming::new(fixture.prefix);
            let summary = write_fixtures(&fixture.out_dir, &layout, &naming)
                .with_context(|| format!("generate fixtures in {}", fixture.out_dir.display()))?;
            info!(
                files = summary.files,
                frames = summary.frames,
                waits = summary.waits,
                "done"
            );
        }
        Command::Check { fixture, format } => {
            let layout = NodeLayout::new(fixture.nodes).context("invalid layout")?;
            let naming = FileNaming::new(fixture.prefix);
            let report = check_fixtures(&fixture.out_dir, &layout, &naming)
                .with_context(|| format!("check fixtures in {}", fixture.out_dir.display()))?;
            let output = CheckOutput::from(&report);
            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&output).context("serialize json")?;
                    println!("{json}");
                }
                OutputFormat::Pretty => println!("{}", format_check_pretty(&output)),
            }
            if !output.clean {
                anyhow::bail!(
                    "{} finding(s) in {}",
                    output.findings.len(),
                    fixture.out_dir.display()
                );
            }
        }
        Command::Inspect {
            script_path,
            format,
        } => {
            let text = fs::read_to_string(&script_path)
                .with_context(|| format!("read script {}", script_path.display()))?;
            let report = inspect_script(&text, &ScriptLimits::default())
                .with_context(|| format!("parse script {}", script_path.display()))?;
            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&report).context("serialize json")?;
                    println!("{json}");
                }
                OutputFormat::Pretty => println!("{}", format_inspect_pretty(&report)),
            }
        }
    }
    Ok(())
}
