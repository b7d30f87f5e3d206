//! Redirect configuration for siteroute.
//!
//! This module handles:
//! - `_redirects` line format parsing
//! - TOML `[[redirects]]` parsing
//! - The `--init` template

pub mod parser;
pub mod template;
pub mod types;

pub use parser::{parse_redirects_file, parse_redirects_str, parse_toml_str};
pub use template::generate_init_template;
pub use types::{DEFAULT_REDIRECT_STATUS, RedirectRule, RedirectsFile};
