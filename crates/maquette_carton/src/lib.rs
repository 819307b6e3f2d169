//! Carton - The model maker's toolbox for Maquette.
//!
//! Shared building blocks used across the Maquette crates:
//!
//! - **Strings and maps**: `CompactString` and the Fx hash collections
//! - **Naming**: case conversions used by the name transformation rules
//!
//! # Example
//!
//! ```
//! use maquette_carton::{to_pascal_case, CompactString};
//!
//! let name: CompactString = to_pascal_case("user-card");
//! assert_eq!(name, "UserCard");
//! ```

pub mod naming;

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};

pub use naming::*;
