use crate::error::{Result, RouteError};
use regex::Regex;

/// Capture name bound by a trailing `*` segment.
pub const SPLAT: &str = "splat";

/// One `/`-separated piece of a source pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	/// Text matched verbatim.
	Literal(String),

	/// `:name`, matches exactly one path segment.
	Named(String),

	/// `*`, matches the remainder of the path including further `/`.
	Wildcard,
}

/// A compiled source pattern.
///
/// Matching is anchored at both ends. A declared trailing `/` is optional
/// when matching, so `/blog/` also matches `/blog`.
#[derive(Debug, Clone)]
pub struct Pattern {
	source: String,
	segments: Vec<Segment>,
	regex: Regex,
}

/// Ordered captures from a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures {
	entries: Vec<(String, String)>,
}

impl Captures {
	/// Look up a capture by name.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_str())
	}

	/// Captures in pattern order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl Pattern {
	/// Compile a source pattern.
	pub fn compile(source: &str) -> Result<Self> {
		let invalid = |reason: String| RouteError::InvalidPattern {
			pattern: source.to_string(),
			reason,
		};

		if source.is_empty() {
			return Err(invalid("pattern is empty".to_string()));
		}

		let (absolute, rest) = match source.strip_prefix('/') {
			Some(rest) => (true, rest),
			None => (false, source),
		};
		let (trailing_slash, rest) = match rest.strip_suffix('/') {
			Some(rest) => (true, rest),
			None => (false, rest),
		};

		let segments = if rest.is_empty() {
			Vec::new()
		} else {
			rest.split('/')
				.map(parse_segment)
				.collect::<std::result::Result<Vec<_>, _>>()
				.map_err(invalid)?
		};

		check_segments(&segments).map_err(invalid)?;

		let regex_src = build_regex(&segments, absolute, trailing_slash);
		let regex = Regex::new(&regex_src).map_err(|err| RouteError::InvalidRegex {
			pattern: source.to_string(),
			source: err,
		})?;

		Ok(Pattern {
			source: source.to_string(),
			segments,
			regex,
		})
	}

	/// The pattern as declared.
	pub fn as_str(&self) -> &str {
		&self.source
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Match a whole request path, returning the captures in pattern order.
	pub fn captures(&self, path: &str) -> Option<Captures> {
		let caps = self.regex.captures(path)?;
		let entries = self
			.capture_names()
			.map(|name| {
				let value = caps.name(name).map_or("", |m| m.as_str());
				(name.to_string(), value.to_string())
			})
			.collect();
		Some(Captures { entries })
	}

	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	fn capture_names(&self) -> impl Iterator<Item = &str> {
		self.segments.iter().filter_map(|seg| match seg {
			Segment::Named(name) => Some(name.as_str()),
			Segment::Wildcard => Some(SPLAT),
			Segment::Literal(_) => None,
		})
	}
}

/// Classify a single segment.
fn parse_segment(raw: &str) -> std::result::Result<Segment, String> {
	if raw == "*" {
		return Ok(Segment::Wildcard);
	}
	if raw.contains('*') {
		return Err(format!("wildcard must be a whole segment, found {raw:?}"));
	}
	match raw.strip_prefix(':') {
		Some(name) if is_identifier(name) => Ok(Segment::Named(name.to_string())),
		Some(name) => Err(format!("invalid placeholder name {name:?}")),
		None => Ok(Segment::Literal(raw.to_string())),
	}
}

fn check_segments(segments: &[Segment]) -> std::result::Result<(), String> {
	if let Some(pos) = segments.iter().position(|s| *s == Segment::Wildcard)
		&& pos + 1 != segments.len()
	{
		return Err("wildcard is only allowed as the last segment".to_string());
	}

	let mut seen: Vec<&str> = Vec::new();
	for seg in segments {
		let name = match seg {
			Segment::Named(name) => name.as_str(),
			Segment::Wildcard => SPLAT,
			Segment::Literal(_) => continue,
		};
		if seen.contains(&name) {
			return Err(format!("capture {name:?} is bound more than once"));
		}
		seen.push(name);
	}

	Ok(())
}

fn build_regex(segments: &[Segment], absolute: bool, trailing_slash: bool) -> String {
	// The root pattern also matches the empty (root) request path.
	if absolute && segments.is_empty() {
		return "^/?$".to_string();
	}

	let body = segments
		.iter()
		.map(|seg| match seg {
			Segment::Literal(text) => regex::escape(text),
			Segment::Named(name) => format!("(?P<{name}>[^/]+)"),
			Segment::Wildcard => format!("(?P<{SPLAT}>.*)"),
		})
		.collect::<Vec<_>>()
		.join("/");

	let mut regex_src = String::from("^");
	if absolute {
		regex_src.push('/');
	}
	regex_src.push_str(&body);
	if trailing_slash {
		regex_src.push_str("/?");
	}
	regex_src.push('$');
	regex_src
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_identifier(name: &str) -> bool {
	let mut chars = name.chars();
	match chars.next() {
		Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
		_ => return false,
	}
	chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
