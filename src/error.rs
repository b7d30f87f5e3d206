use std::path::PathBuf;

/// Library-level structured errors for siteroute.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
	#[error("Failed to read redirects file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse redirects file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid redirect on line {line}: {reason}")]
	RedirectSyntax { line: usize, reason: String },

	#[error("Invalid source pattern {pattern:?}: {reason}")]
	InvalidPattern { pattern: String, reason: String },

	#[error("Invalid status code {status} in rule {from:?}")]
	InvalidStatus { from: String, status: u16 },

	#[error("Failed to build matcher for pattern: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},
}

/// Result type alias using RouteError.
pub type Result<T> = std::result::Result<T, RouteError>;
