//! Components command - List the components found in each file

use clap::Args;
use maquette_esquisse::{extract, ComponentBoundary, ExtractOptions, ParseOptions};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use super::{collect_files, report_error, SourceKindArg};
use crate::config::{load_config, load_config_file};

#[derive(Args)]
pub struct ComponentsArgs {
    /// Files or directories to scan (default: current directory)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// How source files are parsed
    #[arg(long, value_enum, default_value = "module")]
    pub source_kind: SourceKindArg,

    /// Configuration file (default: ./maquette.config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output JSON instead of a listing
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct FileComponents {
    file: String,
    components: Vec<ComponentBoundary>,
}

pub fn run(args: ComponentsArgs) {
    let config = match &args.config {
        Some(path) => load_config_file(path),
        None => load_config(None),
    };
    let files = collect_files(&args.paths);
    if files.is_empty() {
        eprintln!("No component files found");
        std::process::exit(1);
    }

    let results: Vec<_> = files
        .par_iter()
        .map(|path| -> Result<FileComponents, ()> {
            let source = fs::read_to_string(path).map_err(|e| {
                eprintln!("error: failed to read {}: {}", path.display(), e);
            })?;
            let options = ExtractOptions {
                parse: ParseOptions::for_path(path, args.source_kind.into()),
                model: config.model.clone(),
                ..Default::default()
            };
            let artifacts = extract(&source, &options).map_err(|err| {
                report_error(path, &source, &err);
            })?;
            Ok(FileComponents {
                file: path.display().to_string(),
                components: artifacts.components.into_values().collect(),
            })
        })
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    let listings: Vec<FileComponents> = results.into_iter().flatten().collect();

    if args.json {
        match serde_json::to_string_pretty(&listings) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize output: {}", e),
        }
    } else {
        for listing in &listings {
            print_listing(listing);
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

fn print_listing(listing: &FileComponents) {
    println!("{}", listing.file);
    for component in &listing.components {
        let props: Vec<_> = component.properties.names().collect();
        println!(
            "  {} ({}) {}..{} props: [{}]{}",
            component.name,
            component.kind.as_str(),
            component.start,
            component.end,
            props.join(", "),
            if component.has_children { " +children" } else { "" }
        );
    }
}
