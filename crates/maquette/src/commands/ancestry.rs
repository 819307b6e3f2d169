//! Ancestry command - Show the enclosing node kinds of every JSX element

use clap::Args;
use maquette_esquisse::{collect_ancestry, parse_program, ParseOptions};
use oxc_allocator::Allocator;
use std::fs;
use std::path::PathBuf;

use super::{line_col, report_error, SourceKindArg};

#[derive(Args)]
pub struct AncestryArgs {
    /// Component file to inspect
    pub file: PathBuf,

    /// How the file is parsed
    #[arg(long, value_enum, default_value = "module")]
    pub source_kind: SourceKindArg,

    /// Output JSON instead of a listing
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: AncestryArgs) {
    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: failed to read {}: {}", args.file.display(), e);
            std::process::exit(1);
        }
    };

    let allocator = Allocator::default();
    let options = ParseOptions::for_path(&args.file, args.source_kind.into());
    let program = match parse_program(&allocator, &source, options) {
        Ok(program) => program,
        Err(err) => {
            report_error(&args.file, &source, &err);
            std::process::exit(1);
        }
    };

    let elements = collect_ancestry(&program, &source);

    if args.json {
        match serde_json::to_string_pretty(&elements) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize output: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    for element in &elements {
        let (line, column) = line_col(&source, element.start);
        println!(
            "<{}> {}:{}  {}",
            element.tag,
            line,
            column,
            element.ancestors.join(" < ")
        );
    }
}
