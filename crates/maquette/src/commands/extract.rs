//! Extract command - Generate view models and template paths

use clap::{Args, ValueEnum};
use maquette_esquisse::{extract, ExtractOptions, GeneratedArtifacts, ParseOptions};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use super::{collect_files, report_diagnostic, report_error, SourceKindArg};
use crate::config::{load_config, load_config_file};

/// Used when neither `--out-dir` nor the config names one
const DEFAULT_OUT_DIR: &str = "views";

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Output JSON with components, models and templates per file
    #[default]
    Json,
    /// Output the rendered property declarations of every model
    Declarations,
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Files or directories to scan (default: current directory)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Directory template paths are resolved against
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// How source files are parsed
    #[arg(long, value_enum, default_value = "module")]
    pub source_kind: SourceKindArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Configuration file (default: ./maquette.config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Continue on errors
    #[arg(long)]
    pub continue_on_error: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileOutput<'a> {
    file: String,
    #[serde(flatten)]
    artifacts: &'a GeneratedArtifacts,
}

fn resolve_out_dir(dir: PathBuf) -> PathBuf {
    if dir.is_absolute() {
        return dir;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(dir),
        Err(_) => dir,
    }
}

pub fn run(args: ExtractArgs) {
    let start = Instant::now();

    let config = match &args.config {
        Some(path) => load_config_file(path),
        None => load_config(None),
    };
    let out_dir = resolve_out_dir(
        args.out_dir
            .or(config.out_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
    );

    let files = collect_files(&args.paths);
    if files.is_empty() {
        eprintln!("No component files found");
        std::process::exit(1);
    }

    let base_options = ExtractOptions {
        model: config.model,
        template: config.template,
        out_dir,
        ..Default::default()
    };
    let failed = AtomicUsize::new(0);

    let results: Vec<_> = files
        .par_iter()
        .map(|path| match extract_file(path, &base_options, args.source_kind) {
            Ok(artifacts) => Some((path.clone(), artifacts)),
            Err(()) => {
                failed.fetch_add(1, Ordering::Relaxed);
                if !args.continue_on_error {
                    std::process::exit(1);
                }
                None
            }
        })
        .collect();

    let results: Vec<_> = results.into_iter().flatten().collect();

    match args.format {
        OutputFormat::Json => {
            let output: Vec<_> = results
                .iter()
                .map(|(path, artifacts)| FileOutput {
                    file: path.display().to_string(),
                    artifacts,
                })
                .collect();
            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Failed to serialize output: {}", e);
                    std::process::exit(1);
                }
            }
        }
        OutputFormat::Declarations => {
            for (path, artifacts) in &results {
                print_declarations(path, artifacts);
            }
        }
    }

    let failed = failed.load(Ordering::Relaxed);
    let components: usize = results.iter().map(|(_, a)| a.components.len()).sum();
    let elapsed = start.elapsed().as_secs_f64();

    if failed > 0 {
        eprintln!(
            "✗ {} file(s) failed, {} component(s) extracted in {:.4}s",
            failed, components, elapsed
        );
        std::process::exit(1);
    }

    eprintln!(
        "✓ {} component(s) from {} file(s) in {:.4}s",
        components,
        results.len(),
        elapsed
    );
}

fn extract_file(
    path: &Path,
    base_options: &ExtractOptions,
    source_kind: SourceKindArg,
) -> Result<GeneratedArtifacts, ()> {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: failed to read {}: {}", path.display(), e);
            return Err(());
        }
    };

    let options = ExtractOptions {
        parse: ParseOptions::for_path(path, source_kind.into()),
        ..base_options.clone()
    };

    match extract(&source, &options) {
        Ok(artifacts) => {
            for diagnostic in &artifacts.diagnostics {
                report_diagnostic(path, &source, diagnostic);
            }
            Ok(artifacts)
        }
        Err(err) => {
            report_error(path, &source, &err);
            Err(())
        }
    }
}

fn print_declarations(path: &Path, artifacts: &GeneratedArtifacts) {
    for (component, model) in &artifacts.models {
        println!("// {} ({})", model.name, path.display());
        if let Some(template) = artifacts.templates.get(component) {
            println!("// template: {}", template.display());
        }
        for declaration in model.declarations() {
            println!("{}", declaration);
        }
        println!();
    }
}
