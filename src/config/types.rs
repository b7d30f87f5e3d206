use serde::Deserialize;
use std::collections::BTreeMap;

/// Status used when a rule does not declare one.
pub const DEFAULT_REDIRECT_STATUS: u16 = 301;

fn default_status() -> u16 {
	DEFAULT_REDIRECT_STATUS
}

/// Top-level structure of a TOML redirects file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedirectsFile {
	/// Redirect and rewrite rules, in declaration order.
	/// First matching rule wins.
	#[serde(default)]
	pub redirects: Vec<RedirectRule>,
}

/// A user-declared mapping from a source pattern to a destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RedirectRule {
	/// Source pattern, e.g. `/blog/:slug` or `/old/*`.
	pub from: String,

	/// Destination template, e.g. `/posts/:slug` or `https://example.com/:splat`.
	pub to: String,

	/// HTTP status of the outcome. 3xx redirects the client, anything
	/// else rewrites internally.
	#[serde(default = "default_status")]
	pub status: u16,

	/// Replace every previously accumulated candidate on match.
	#[serde(default)]
	pub force: bool,

	/// Query parameters attached to the redirect.
	#[serde(default)]
	pub query: BTreeMap<String, String>,
}

impl RedirectRule {
	/// Build a non-forced rule with no query parameters.
	pub fn new(from: impl Into<String>, to: impl Into<String>, status: u16) -> Self {
		Self {
			from: from.into(),
			to: to.into(),
			status,
			force: false,
			query: BTreeMap::new(),
		}
	}

	/// Set the force flag.
	pub fn forced(mut self) -> Self {
		self.force = true;
		self
	}

	/// Attach a query parameter.
	pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.insert(key.into(), value.into());
		self
	}

	/// A rule pointing at itself can never do anything useful.
	pub fn is_self_redirect(&self) -> bool {
		self.from == self.to
	}
}
