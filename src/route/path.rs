//! Lexical path helpers. Nothing here touches the filesystem.

/// Lexically clean a `/`-separated path.
///
/// Collapses repeated slashes, drops `.` elements and resolves `..` against
/// the preceding element. A rooted path never climbs above `/`. An empty
/// result is `.` (or `/` when rooted).
pub fn clean(path: &str) -> String {
	let rooted = path.starts_with('/');
	let mut parts: Vec<&str> = Vec::new();

	for elem in path.split('/') {
		match elem {
			"" | "." => {}
			".." => match parts.last() {
				Some(&last) if last != ".." => {
					parts.pop();
				}
				_ if rooted => {}
				_ => parts.push(".."),
			},
			_ => parts.push(elem),
		}
	}

	let joined = parts.join("/");
	match (rooted, joined.is_empty()) {
		(true, _) => format!("/{joined}"),
		(false, true) => ".".to_string(),
		(false, false) => joined,
	}
}

/// Clean `path` as if it were rooted, so `..` cannot escape.
pub fn rooted(path: &str) -> String {
	clean(&format!("/{path}"))
}

/// Join non-empty elements with `/` and clean the result.
pub fn join(elems: &[&str]) -> String {
	let kept: Vec<&str> = elems.iter().copied().filter(|e| !e.is_empty()).collect();
	if kept.is_empty() {
		return String::new();
	}
	clean(&kept.join("/"))
}

/// Last element of the path, ignoring trailing slashes.
pub fn base(path: &str) -> &str {
	if path.is_empty() {
		return ".";
	}
	let trimmed = path.trim_end_matches('/');
	if trimmed.is_empty() {
		return "/";
	}
	match trimmed.rfind('/') {
		Some(idx) => &trimmed[idx + 1..],
		None => trimmed,
	}
}

/// Everything but the last element, cleaned.
pub fn dir(path: &str) -> String {
	match path.rfind('/') {
		Some(idx) => clean(&path[..=idx]),
		None => ".".to_string(),
	}
}

/// Extension of the last element including the dot, or `""`.
pub fn ext(path: &str) -> &str {
	let last = match path.rfind('/') {
		Some(idx) => &path[idx + 1..],
		None => path,
	};
	match last.rfind('.') {
		Some(idx) => &last[idx..],
		None => "",
	}
}
