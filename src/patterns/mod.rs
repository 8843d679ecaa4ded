//! Pattern resolution
//!
//! Decides a value for a document path from an ordered table of glob
//! patterns.
//!
//! ## Precedence
//!
//! Every pattern in the table is tested, in order. Each match replaces the
//! previous result, so the **last** matching entry decides. A pattern mapped
//! to `false` is still a match: it overrides an earlier `true` just as a
//! later `true` overrides an earlier `false`. When nothing matches, the
//! caller's default (if any) is returned.
//!
//! ## Example Configuration
//!
//! ```toml
//! [read_only.files]
//! "**/node_modules/**" = true             # vendored code is read-only
//! "**/node_modules/special/**" = false    # except this package
//! "**/src/out/**" = true                  # generated output
//! ```

pub mod glob;
pub mod resolver;
pub mod table;

pub use glob::{GlobMatcher, GlobsetMatcher};
pub use resolver::{Match, OrderedResolver, Resolution, explain, resolve};
pub use table::PatternTable;
