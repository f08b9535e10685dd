//! Bindmeta CLI - command line interface for the binding metadata generator

mod report;
mod settings;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use bindmeta_ast::{Program, RETURN_BINDING_NAME};
use bindmeta_codegen::{emit_provider_source, serialize_metadata, GenerationReport, Generator, GeneratorOptions};
use bindmeta_provider::{write_artifact, write_artifact_to, ProviderError};

use crate::report::print_diagnostics;
use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "bindmeta")]
#[command(about = "Extract function binding metadata from a declaration model", long_about = None)]
struct Cli {
    /// Configuration file (default: ./bindmeta.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, global = true, env = "BINDMETA_LOG")]
    log_level: Option<String>,

    /// Process functions on one thread
    #[arg(long, global = true)]
    serial: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the metadata artifact for a model
    Generate {
        /// Declaration model (JSON)
        model: PathBuf,
        /// Output file or directory; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
        /// Also write a Rust provider module to this path
        #[arg(long)]
        emit_provider: Option<PathBuf>,
    },
    /// Validate models and report diagnostics
    Check {
        /// Declaration model(s)
        models: Vec<PathBuf>,
    },
    /// List functions and their bindings
    List {
        /// Declaration model (JSON)
        model: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid declaration model {}: {source}", path.display())]
    Model {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("failed to serialize metadata: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("generation failed with {0} error(s)")]
    Failed(usize),

    #[error("{0} model(s) failed validation")]
    ModelsFailed(usize),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&settings.log_level);
    debug!(?settings, "settings loaded");

    let result = match &cli.command {
        Commands::Generate { model, output, pretty, emit_provider } => cmd_generate(
            &settings.generator,
            model,
            output.as_deref(),
            *pretty,
            emit_provider.as_deref(),
        ),
        Commands::Check { models } => cmd_check(&settings.generator, models),
        Commands::List { model } => cmd_list(&settings.generator, model),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Config sources, then command-line flags on top
fn load_settings(cli: &Cli) -> Result<Settings, CliError> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        settings.log_level = level.clone();
    }
    if cli.serial {
        settings.generator.parallel = false;
    }
    Ok(settings)
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_model(path: &Path) -> Result<Program, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Model {
        path: path.to_path_buf(),
        source,
    })
}

fn model_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

fn run_generator(options: &GeneratorOptions, model: &Path) -> Result<(Program, GenerationReport), CliError> {
    let program = load_model(model)?;
    let report = Generator::new(&program, options).run();
    print_diagnostics(&report.diagnostics(), model_dir(model));
    Ok((program, report))
}

fn cmd_generate(
    options: &GeneratorOptions,
    model: &Path,
    output: Option<&Path>,
    pretty: bool,
    emit_provider: Option<&Path>,
) -> Result<(), CliError> {
    let (_, report) = run_generator(options, model)?;
    if !report.is_success() {
        return Err(CliError::Failed(report.errors.len()));
    }
    let records = report.functions;

    match output {
        Some(path) if path.is_dir() => {
            let written = write_artifact(path, &records, pretty)?;
            info!(path = %written.display(), functions = records.len(), "metadata written");
        }
        Some(path) => {
            write_artifact_to(path, &records, pretty)?;
            info!(path = %path.display(), functions = records.len(), "metadata written");
        }
        None => println!("{}", serialize_metadata(&records, pretty)?),
    }

    if let Some(path) = emit_provider {
        fs::write(path, emit_provider_source(&records)).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "provider source written");
    }

    Ok(())
}

fn cmd_check(options: &GeneratorOptions, models: &[PathBuf]) -> Result<(), CliError> {
    let mut failed = 0;

    for model in models {
        let (_, report) = match run_generator(options, model) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("✗ {}", e);
                failed += 1;
                continue;
            }
        };

        if report.is_success() {
            println!(
                "✓ {} - {} functions ({} warnings)",
                model.display(),
                report.functions.len(),
                report.warnings.len()
            );
        } else {
            eprintln!("✗ {} - {} errors", model.display(), report.errors.len());
            failed += 1;
        }
    }

    if failed > 0 {
        Err(CliError::ModelsFailed(failed))
    } else {
        Ok(())
    }
}

fn cmd_list(options: &GeneratorOptions, model: &Path) -> Result<(), CliError> {
    let (program, report) = run_generator(options, model)?;

    println!("Assembly: {}", program.assembly_name);
    for record in &report.functions {
        println!();
        println!("{}  ({})", record.name, record.entry_point);
        for raw in &record.raw_bindings {
            println!("  {}", describe_binding(raw));
        }
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::Failed(report.errors.len()))
    }
}

/// `direction  type  name` for a serialized descriptor
fn describe_binding(raw: &str) -> String {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(_) => return raw.to_string(),
    };
    let field = |key: &str| value.get(key).and_then(|v| v.as_str()).unwrap_or("?");

    let name = field("name");
    let marker = if name == RETURN_BINDING_NAME { " (return)" } else { "" };
    format!("{:<4} {:<20} {}{}", field("direction"), field("type"), name, marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_are_listed_by_direction_and_type() {
        let line = describe_binding(r#"{"name":"$return","type":"Queue","direction":"Out","queueName":"q"}"#);
        assert_eq!(line, format!("{:<4} {:<20} $return (return)", "Out", "Queue"));
        assert_eq!(describe_binding("not json"), "not json");
    }

    #[test]
    fn flags_override_loaded_settings() {
        let cli = Cli::parse_from(["bindmeta", "--serial", "--log-level", "debug", "list", "model.json"]);
        let settings = load_settings(&cli).unwrap();
        assert!(!settings.generator.parallel);
        assert_eq!(settings.log_level, "debug");
    }
}
