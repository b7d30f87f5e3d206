//! Siteroute - resolve static site request paths into candidate replies.
//!
//! This library provides the core functionality for siteroute, including:
//! - `_redirects` and TOML redirect rule parsing
//! - Source pattern compilation with named placeholders and splats
//! - Pretty URL expansion and ordered candidate resolution
//! - A per-project cache of compiled rule sets
//!
//! # Example
//!
//! ```
//! use siteroute::config::parse_redirects_str;
//! use siteroute::route::calc_routes;
//! use siteroute::rules::RuleSet;
//!
//! let rules = parse_redirects_str("/old/* /new/:splat 301").unwrap();
//! let rules = RuleSet::compile(&rules);
//!
//! for reply in calc_routes("my-site", "/old/post", &rules) {
//!     println!("{} {}", reply.status, reply.location());
//! }
//! ```

pub mod config;
pub mod error;
pub mod route;
pub mod rules;

pub use error::{Result, RouteError};
