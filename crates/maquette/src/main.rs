//! # maquette
//!
//! Maquette - Typed view models and templates from JSX components.
//!
//! ## Name Origin
//!
//! **Maquette** (/ma.kɛt/) is the scale model an architect or sculptor builds
//! before the real thing. `maquette` builds a small typed model of each
//! component's data so that a server-side template can be generated for it.

mod commands;
mod config;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "maquette")]
#[command(about = "Typed view models and templates from JSX components", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract view models and template paths from component files
    Extract(commands::extract::ExtractArgs),

    /// List the components found in each file
    Components(commands::components::ComponentsArgs),

    /// Show the enclosing node kinds of every JSX element in a file
    Ancestry(commands::ancestry::AncestryArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Extract(args) => commands::extract::run(args),
        Commands::Components(args) => commands::components::run(args),
        Commands::Ancestry(args) => commands::ancestry::run(args),
    }
}
