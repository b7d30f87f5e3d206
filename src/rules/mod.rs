//! Redirect rule compilation and matching.
//!
//! This module handles:
//! - Compiling source patterns into anchored matchers
//! - Substituting captures into destination templates
//! - Per-project caching of compiled rule sets

pub mod cache;
pub mod destination;
pub mod matcher;
pub mod pattern;

pub use cache::RuleCache;
pub use destination::{Destination, TemplatePart};
pub use matcher::{CompiledRule, RuleMatch, RuleSet, find_matching_rule, fingerprint};
pub use pattern::{Captures, Pattern, SPLAT, Segment};
