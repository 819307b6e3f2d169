//! # maquette_esquisse
//!
//! Esquisse - The component extraction engine for Maquette.
//!
//! ## Name Origin
//!
//! **Esquisse** (/ɛs.kis/) is the French word for a preliminary sketch, the
//! first study an architect or painter makes before committing to the final
//! work. `maquette_esquisse` sketches the data shape of each JSX component
//! so that typed view models and templates can be built from it.
//!
//! ## Purpose
//!
//! - **Boundary Location**: Find function, arrow and class components
//! - **Parameter Extraction**: Read declared props from destructured parameters
//! - **Attribute Refinement**: Extend and check props from markup usage
//! - **Type Inference**: Classify literals into primitive, array and model types
//! - **Synthesis**: Produce view models and template paths
//!
//! ## Architecture
//!
//! ```text
//!    oxc_parser (Parse)
//!          ↓
//!  walker (Boundaries + Refinement)  ← single depth-first pass
//!          ↓
//!  synthesize (Models + Templates)
//! ```
//!
//! ## Example
//!
//! ```
//! use maquette_esquisse::{extract, ExtractOptions};
//!
//! let source = r#"
//! const Badge = ({ label }) => <span label={label} tone="info" />;
//! "#;
//! let artifacts = extract(source, &ExtractOptions::default()).unwrap();
//!
//! let model = &artifacts.models["Badge"];
//! assert_eq!(model.name, "BadgeModel");
//! assert_eq!(model.property("Tone").unwrap().type_name.as_deref(), Some("string"));
//! ```

// Core modules
mod boundary;
mod classify;
mod diagnostics;
mod error;
mod index;
mod params;
mod property;

// Pipeline modules
pub mod ancestry;
pub mod refine;
pub mod rules;
pub mod source;
pub mod synthesize;
pub mod walker;

pub use boundary::*;
pub use classify::*;
pub use diagnostics::*;
pub use error::*;
pub use index::*;
pub use params::*;
pub use property::*;

pub use ancestry::{collect_ancestry, ElementAncestry};
pub use rules::{CaseStyle, ExtractOptions, ModelRules, NameRule, TemplateRules};
pub use source::{parse_program, ParseOptions, SourceKind};
pub use synthesize::{synthesize, GeneratedArtifacts, Model, ModelProperty};
pub use walker::{walk_program, ComponentWalker, Extraction};

use oxc_allocator::Allocator;

/// Extract components, models and template paths from one source text.
///
/// Stops at the first fatal error; configuration problems are returned as
/// diagnostics on the result.
pub fn extract(source: &str, options: &ExtractOptions) -> ExtractResult<GeneratedArtifacts> {
    let allocator = Allocator::default();
    let program = parse_program(&allocator, source, options.parse)?;
    let extraction = walk_program(&program, &options.model)?;

    tracing::debug!(
        "extracted {} component(s), {} diagnostic(s)",
        extraction.index.len(),
        extraction.diagnostics.len()
    );

    Ok(synthesize(extraction, options))
}
