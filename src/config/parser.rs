use crate::config::types::{DEFAULT_REDIRECT_STATUS, RedirectRule, RedirectsFile};
use crate::error::{Result, RouteError};
use std::collections::BTreeMap;
use std::path::Path;

/// Parse a redirects file from the given path.
///
/// Files with a `.toml` extension are read as `[[redirects]]` tables,
/// anything else as the line-based `_redirects` format.
pub fn parse_redirects_file(path: &Path) -> Result<Vec<RedirectRule>> {
	let content = std::fs::read_to_string(path).map_err(|source| RouteError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	if path.extension().is_some_and(|ext| ext == "toml") {
		parse_toml_str(&content, path)
	} else {
		parse_redirects_str(&content)
	}
}

/// Parse TOML redirects from a string (useful for testing).
pub fn parse_toml_str(content: &str, path: &Path) -> Result<Vec<RedirectRule>> {
	let file: RedirectsFile =
		toml::from_str(content).map_err(|source| RouteError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	Ok(file.redirects)
}

/// Parse the line-based `_redirects` format.
///
/// Each non-blank, non-comment line reads `from [key=value ...] to [status[!]]`.
pub fn parse_redirects_str(content: &str) -> Result<Vec<RedirectRule>> {
	let mut rules = Vec::new();

	for (idx, line) in content.lines().enumerate() {
		let trimmed = line.trim();
		if trimmed.is_empty() || trimmed.starts_with('#') {
			continue;
		}
		rules.push(parse_redirect_line(trimmed, idx + 1)?);
	}

	Ok(rules)
}

fn parse_redirect_line(line: &str, line_no: usize) -> Result<RedirectRule> {
	let syntax = |reason: &str| RouteError::RedirectSyntax {
		line: line_no,
		reason: reason.to_string(),
	};

	let mut fields = line.split_whitespace();
	let from = fields.next().ok_or_else(|| syntax("missing source path"))?;

	// Query conditions sit between the source and the destination.
	let mut query = BTreeMap::new();
	let mut to = None;
	for field in fields.by_ref() {
		match field.split_once('=') {
			Some((key, value)) if !field.contains('/') => {
				query.insert(key.to_string(), value.to_string());
			}
			_ => {
				to = Some(field);
				break;
			}
		}
	}
	let to = to.ok_or_else(|| syntax("missing destination path or URL"))?;

	let (status, force) = match fields.next() {
		Some(raw) => parse_status(raw).ok_or_else(|| syntax(&format!("invalid status {raw:?}")))?,
		None => (DEFAULT_REDIRECT_STATUS, false),
	};

	if let Some(extra) = fields.next() {
		return Err(syntax(&format!("unexpected trailing field {extra:?}")));
	}

	Ok(RedirectRule {
		from: from.to_string(),
		to: to.to_string(),
		status,
		force,
		query,
	})
}

/// Parse `301` or `301!` into a status and force flag.
fn parse_status(raw: &str) -> Option<(u16, bool)> {
	let (digits, force) = match raw.strip_suffix('!') {
		Some(digits) => (digits, true),
		None => (raw, false),
	};
	digits.parse().ok().map(|status| (status, force))
}
