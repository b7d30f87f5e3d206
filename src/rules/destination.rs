use crate::rules::pattern::{Captures, is_identifier};

/// Piece of a destination template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
	/// Copied through unchanged.
	Text(String),

	/// `:name`, replaced with the capture of the same name.
	Token(String),
}

/// A destination template split into text and capture tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
	template: String,
	parts: Vec<TemplatePart>,
}

impl Destination {
	/// Split a destination template such as `/posts/:slug` or `https://cdn.example.com/:splat`.
	pub fn parse(template: &str) -> Self {
		let mut parts = Vec::new();
		let mut text = String::new();
		let mut rest = template;

		while let Some(idx) = rest.find(':') {
			text.push_str(&rest[..idx]);
			let after = &rest[idx + 1..];
			let len = after
				.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
				.unwrap_or(after.len());
			let name = &after[..len];

			if is_identifier(name) {
				if !text.is_empty() {
					parts.push(TemplatePart::Text(std::mem::take(&mut text)));
				}
				parts.push(TemplatePart::Token(name.to_string()));
				rest = &after[len..];
			} else {
				text.push(':');
				rest = after;
			}
		}
		text.push_str(rest);
		if !text.is_empty() {
			parts.push(TemplatePart::Text(text));
		}

		Destination {
			template: template.to_string(),
			parts,
		}
	}

	/// The template as declared.
	pub fn as_str(&self) -> &str {
		&self.template
	}

	pub fn parts(&self) -> &[TemplatePart] {
		&self.parts
	}

	/// Substitute captures into the template.
	///
	/// Tokens without a matching capture are emitted as written. Substituted
	/// text is never scanned again.
	pub fn build(&self, captures: &Captures) -> String {
		let mut out = String::with_capacity(self.template.len());
		for part in &self.parts {
			match part {
				TemplatePart::Text(text) => out.push_str(text),
				TemplatePart::Token(name) => match captures.get(name) {
					Some(value) => out.push_str(value),
					None => {
						out.push(':');
						out.push_str(name);
					}
				},
			}
		}
		out
	}
}
